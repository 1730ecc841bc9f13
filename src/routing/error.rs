//! Registry error definitions.

use thiserror::Error;

/// Errors raised while composing the API surface at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A namespace is already mounted at this path.
    #[error("Path {path} is already registered to namespace '{existing}'")]
    DuplicatePath { path: String, existing: String },

    /// Mount path shares a segment-wise prefix with an existing mount.
    #[error("Path {path} overlaps {existing} (namespace '{namespace}')")]
    OverlappingPath {
        path: String,
        existing: String,
        namespace: String,
    },

    /// Mount or endpoint path is malformed.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// API prefix is malformed.
    #[error("Invalid prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    /// Mount would shadow a route served by the registry itself.
    #[error("Path {path} is reserved")]
    ReservedPath { path: String },

    /// The same method and path were declared twice in one namespace.
    #[error("Endpoint {method} {path} is declared twice in namespace '{namespace}'")]
    DuplicateEndpoint {
        namespace: String,
        method: String,
        path: String,
    },

    /// HTTP method has no routing filter.
    #[error("Unsupported method {0}")]
    UnsupportedMethod(String),
}
