pub mod config;
pub mod core;
pub mod domain;
pub mod mockery;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::MockeryEngine, pipeline::MockPipeline};
pub use mockery::ManifestGuard;
pub use utils::error::{MockeryError, Result};
