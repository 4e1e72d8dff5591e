//! # Inbound Ports (Driving Ports)
//!
//! The API the polar service exposes to its drivers (the HTTP layer).

use crate::domain::errors::PolarError;
use crate::domain::polar::Polar;

/// Polar management operations.
///
/// Lookups that may legitimately miss return `Ok(None)`; mutations on a
/// missing polar fail with `PolarError::NotFound`.
pub trait PolarApi: Send + Sync {
    /// List active polars, or archived ones when `archived` is `Some(true)`.
    fn list(&self, archived: Option<bool>) -> Result<Vec<Polar>, PolarError>;

    /// Fetch a polar by id, active first, then archived.
    fn get(&self, id: &str) -> Result<Option<Polar>, PolarError>;

    /// Fetch a polar by its numeric `_id`, active first, then archived.
    fn find_by_polar_id(&self, polar_id: u8) -> Result<Option<Polar>, PolarError>;

    /// Store a new active polar under `polar.id`.
    fn create(&self, polar: &Polar) -> Result<(), PolarError>;

    /// Replace the active polar `id`. A different `polar.id` renames it.
    fn update(&self, id: &str, polar: &Polar) -> Result<(), PolarError>;

    /// Delete the polar `id`, active first, then archived.
    fn delete(&self, id: &str) -> Result<(), PolarError>;

    /// Move an active polar to the archive.
    fn archive(&self, id: &str) -> Result<(), PolarError>;

    /// Move an archived polar back to the active set.
    fn restore(&self, id: &str) -> Result<(), PolarError>;
}
