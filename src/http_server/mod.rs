//! # HTTP Server Module
//!
//! Thin axum surface over the query and mutation engines.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/get-records`, `/api/get-record`, `/api/get-records-filter`
//! - `/api/add-record`, `/api/update-record`, `/api/delete-record`

pub mod caller;
pub mod config;
pub mod record_routes;
pub mod server;

pub use caller::extract_caller;
pub use config::HttpServerConfig;
pub use record_routes::{record_routes, RecordState};
pub use server::HttpServer;
