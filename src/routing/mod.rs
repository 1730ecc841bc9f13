//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Composition (at startup):
//!     Namespace::new(..).endpoint(..)   (independently defined)
//!     → registry.rs attach(path, namespace)
//!     → path.rs (validate, join prefix + path, detect overlap)
//!     → into_router(): nest each namespace, serve document.rs output
//!     → Freeze as immutable axum Router
//!
//! Incoming Request (path)
//!     → axum matches prefix + mount path
//!     → Namespace handler
//! ```
//!
//! # Design Decisions
//! - Routes composed at startup, immutable at runtime
//! - Route wiring is plain data, inspectable without a running server
//! - Mount order never changes which namespace serves a path
//! - Conflicts are explicit errors rather than axum panics

pub mod document;
pub mod error;
pub mod namespace;
pub mod path;
pub mod registry;

pub use document::ApiDocument;
pub use error::RegistryError;
pub use namespace::{Endpoint, Namespace};
pub use registry::{ApiRegistry, DOCUMENT_PATH};
