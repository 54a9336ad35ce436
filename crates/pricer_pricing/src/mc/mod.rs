//! Monte Carlo simulation kernels.
//!
//! - [`config`]: validated simulation sizing and seeding
//! - [`paths`]: parallel generation of coupled price/variance path batches
//! - [`engine`]: discounted payoff averaging over a batch
//! - [`error`]: configuration error types

pub mod config;
pub mod engine;
pub mod error;
pub mod paths;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use engine::{price_with_rule, McPrice};
pub use error::ConfigError;
pub use paths::{generate_heston_paths, PathBatch};
