//! # Polar Store
//!
//! Persistence and application logic for boat polars: the speed tables,
//! sail set and manoeuvre penalties of a single boat model.
//!
//! ## Storage Layout
//!
//! ```text
//! polars_dir/                 archived_dir/
//! ├── imoca.yaml              ├── mini.yaml
//! ├── class40.yaml            └── ...
//! └── ...
//! ```
//!
//! A polar's id is its file name up to the first `.`; the numeric `_id`
//! lives inside the document. Archiving moves the file between the two
//! directories, it never rewrites it.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Polar entities, id rules, errors
//! - `ports/` - Inbound API (`PolarApi`) and outbound SPI (`PolarRepository`)
//! - `adapters/` - YAML directory and in-memory repositories
//! - `service.rs` - `PolarService`, the application service
//!
//! ## Usage
//!
//! ```ignore
//! use polar_store::{PolarApi, PolarService, YamlDirectoryRepository};
//!
//! let repo = YamlDirectoryRepository::new("data/polars", "data/archived")?;
//! let service = PolarService::new(repo);
//!
//! let active = service.list(None)?;
//! service.archive("imoca")?;
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

pub use adapters::{InMemoryPolarRepository, YamlDirectoryRepository};
pub use domain::errors::{PolarError, PolarResult};
pub use domain::id::{file_id, validate_id};
pub use domain::polar::{
    Foil, Hull, Penalty, PenaltyBoundaries, PenaltyCase, Polar, Sail, Winch,
};
pub use ports::inbound::PolarApi;
pub use ports::outbound::{PolarRepository, Shelf};
pub use service::PolarService;
