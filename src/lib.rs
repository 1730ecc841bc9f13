//! Stack Overflow Lite API server library.
//!
//! Composes independently defined namespaces into one versioned API surface
//! and serves it with Axum.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod namespaces;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use routing::{ApiRegistry, Namespace, RegistryError};
