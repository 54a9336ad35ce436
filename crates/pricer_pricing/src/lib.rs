//! # Pricer Pricing (L3: Simulation Engine)
//!
//! Monte Carlo infrastructure for the Heston model:
//! - Seeded, reproducible random number generation
//! - Parallel path-batch simulation of the coupled price/variance SDEs
//! - A closed payoff rule library (vanilla, Asian, barrier, digital)
//! - The discounted payoff-averaging engine
//! - On-demand exotic pricing entry points
//!
//! # Architecture
//!
//! ```text
//! price_exotic()
//! ├── SimulationConfig   (validated sizing + seed)
//! ├── generate_heston_paths()  -> PathBatch (fresh per call)
//! └── price_with_rule()        (PayoffRule evaluated once per path)
//! ```
//!
//! Per-path work is embarrassingly data-parallel: every trajectory
//! depends only on its own draws and the shared read-only parameters, so
//! the simulation and payoff loops fan out across cores with no locking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod exotic;
pub mod mc;
pub mod payoff;
pub mod rng;

pub use exotic::{price_asian, price_barrier, price_digital, price_exotic, price_vanilla};
pub use mc::{generate_heston_paths, McPrice, PathBatch, SimulationConfig};
pub use payoff::{BarrierDirection, Knock, PayoffRule};
