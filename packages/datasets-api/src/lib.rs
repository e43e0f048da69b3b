//! # Datasets API
//!
//! Manages the dataset configs that mirror ThreatExchange privacy groups:
//! whether content is fetched, matched, and written back for each group.
//!
//! ## Quick Start
//! ```bash
//! DATASETS_STORE_BACKEND=memory cargo run --bin datasets-api
//! ```
//!
//! ## Endpoints
//! - `GET /health` - Health check
//! - `GET /datasets/` - List dataset configs
//! - `POST /datasets/update` - Toggle fetcher / matcher / write-back
//! - `POST /datasets/create` - Create a dataset config if absent
//! - `POST /datasets/sync` - Add configs for new ThreatExchange privacy groups
//! - `POST /datasets/delete/{id}` - Delete a dataset config

pub mod config;
mod error;
pub mod extract;
mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
mod router;
pub mod schemas;
pub mod service;
mod state;
pub mod store;
pub mod threatexchange;

pub use config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
