//! # Ports
//!
//! - `inbound` - the API this crate offers (`PolarApi`)
//! - `outbound` - the storage it requires (`PolarRepository`)

pub mod inbound;
pub mod outbound;
