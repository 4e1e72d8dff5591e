//! # Domain Layer
//!
//! Pure domain types for polars. No I/O happens here.

pub mod errors;
pub mod id;
pub mod polar;
