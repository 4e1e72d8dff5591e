//! # Adapters
//!
//! `PolarRepository` implementations.

mod memory;
mod yaml_dir;

pub use memory::InMemoryPolarRepository;
pub use yaml_dir::YamlDirectoryRepository;
