//! AuthorCheck Server
//!
//! HTTP service exposing the AI-usage detection engine to course platforms.

pub mod config;
pub mod guidelines;
pub mod routes;
pub mod state;

pub use config::{CorsConfig, ServerConfig};
pub use routes::{create_router, API_PREFIX};
pub use state::AppState;
