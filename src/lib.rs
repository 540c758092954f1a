//! Simulated farm-field monitoring: an in-memory dashboard store fed by
//! synthetic sensor data, served to the dashboard client over HTTP.
//!
//! The service binary in `main.rs` wires these modules together; the library
//! target exists so integration tests can mount the same router.

pub mod config;
pub mod export;
pub mod generator;
pub mod models;
pub mod queries;
pub mod routes;
pub mod seed;
pub mod store;
pub mod ticker;

pub use config::Config;
pub use store::{DashboardState, DashboardStore, StoreEvent};
pub use ticker::{spawn_ticker, Ticker};
