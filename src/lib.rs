pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// Environment variable holding the SearchAPI key.
pub const API_KEY_ENV: &str = "SEARCHAPI_API_KEY";

pub use crate::adapters::searchapi::{ApiCredential, SearchApiClient};
pub use crate::config::{CliConfig, RunConfig};
pub use crate::core::{explore::ExploreEngine, ranker::rank_by_price};
pub use crate::utils::error::{ExploreError, Result};
