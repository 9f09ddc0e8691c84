//! HTTP surface for the status-communications assistant.
//!
//! The router is built separately from the listener so integration tests
//! can drive it in-process.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{ConfigError, HeraldConfig, SourceConfig};
pub use routes::build_router;
pub use state::AppState;
