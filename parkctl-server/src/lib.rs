//! parkctl-server: vehicle store, parking service and HTTP API
//!
//! The service owns the entry/exit rules; the HTTP layer is a thin
//! JSON surface over it. The CLI drives the same service directly.

pub mod db;
pub mod http;
pub mod service;

pub use db::{connect, connect_memory};
pub use http::{build_router, run_server, ServerConfig};
pub use service::{ParkingService, ServiceError, ServiceResult};
