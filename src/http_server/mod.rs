//! # HTTP Server Module
//!
//! Serves the error digest feed over HTTP.
//!
//! # Endpoints
//!
//! - `/digest.rss`, `/digestrss` - Daily digest RSS feed
//! - `/detail?id=` - Single error record (JSON)
//! - `/health` - Health check
//! - `/metrics` - Feed counters

pub mod config;
pub mod digest_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use digest_routes::{digest_routes, DigestState};
pub use server::HttpServer;
