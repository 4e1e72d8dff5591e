//! # Polar Entities
//!
//! A polar describes how fast a boat sails for each true wind speed (`tws`)
//! and true wind angle (`twa`), per sail, plus the ratios and timers applied
//! for foils, hull condition and manoeuvres.
//!
//! The same shape is used for the YAML documents on disk and for the JSON
//! bodies of the HTTP API. Keys are camelCase; the numeric polar id is `_id`.

use serde::{Deserialize, Serialize};

/// A complete boat polar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polar {
    /// String id, equal to the file stem once stored.
    #[serde(default)]
    pub id: Option<String>,
    /// Numeric polar id.
    #[serde(rename = "_id")]
    pub polar_id: u8,
    /// Set from the directory the polar was read from. Never serialized.
    #[serde(default, skip_serializing)]
    pub archived: bool,
    pub label: String,
    pub global_speed_ratio: f64,
    pub ice_speed_ratio: f64,
    pub auto_sail_change_tolerance: f64,
    pub bad_sail_tolerance: f64,
    pub max_speed: f64,
    pub foil: Foil,
    pub hull: Hull,
    pub winch: Winch,
    /// True wind speeds (knots), one column per entry.
    pub tws: Vec<u8>,
    /// True wind angles (degrees), one row per entry.
    pub twa: Vec<u8>,
    pub sail: Vec<Sail>,
}

impl Polar {
    /// Id derived from the label: its last `/` segment.
    ///
    /// `"race/imoca"` yields `"imoca"`. Empty labels yield `None`.
    pub fn id_from_label(&self) -> Option<String> {
        self.label
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Foil speed bonus and the wind window where it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Foil {
    pub speed_ratio: f64,
    pub twa_min: f64,
    pub twa_max: f64,
    pub twa_merge: f64,
    pub tws_min: f64,
    pub tws_max: f64,
    pub tws_merge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hull {
    pub speed_ratio: f64,
}

/// Manoeuvre penalties, interpolated between light (`lws`) and heavy
/// (`hws`) wind speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winch {
    pub tack: PenaltyCase,
    pub gybe: PenaltyCase,
    pub sail_change: PenaltyCase,
    pub lws: u8,
    pub hws: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyCase {
    pub std_timer_sec: u16,
    pub std_ratio: f64,
    pub pro_timer_sec: u16,
    pub pro_ratio: f64,
    pub std: PenaltyBoundaries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyBoundaries {
    pub lw: Penalty,
    pub hw: Penalty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    pub ratio: f64,
    pub timer: u16,
}

/// One sail and its speed table, indexed `speed[twa][tws]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sail {
    pub id: u8,
    pub name: String,
    pub speed: Vec<Vec<f64>>,
}
