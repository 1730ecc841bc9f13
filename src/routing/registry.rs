//! The API registry.
//!
//! # Responsibilities
//! - Hold API metadata (title, description, version, prefix)
//! - Mount namespaces at sub-paths under the prefix
//! - Publish the resulting route table and API description
//! - Freeze into an axum Router for serving
//!
//! # Design Decisions
//! - Constructed explicitly and passed by reference; there is no global API object
//! - Mutated only during startup, consumed by `into_router`
//! - Duplicate and overlapping mounts fail fast instead of shadowing
//! - Dispatch does not depend on mount order

use std::collections::BTreeMap;

use axum::routing::get;
use axum::{Json, Router};

use crate::routing::document::ApiDocument;
use crate::routing::error::RegistryError;
use crate::routing::namespace::Namespace;
use crate::routing::path;

/// Where the API description is served, relative to the prefix.
pub const DOCUMENT_PATH: &str = "/swagger.json";

#[derive(Debug)]
struct Mount {
    path: String,
    namespace: Namespace,
}

/// Composes namespaces into one API surface under a common prefix.
#[derive(Debug)]
pub struct ApiRegistry {
    title: String,
    description: String,
    version: String,
    prefix: String,
    mounts: Vec<Mount>,
}

impl ApiRegistry {
    /// Create an empty registry. Metadata is stored exactly as given.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            version: version.into(),
            prefix: prefix.into(),
            mounts: Vec::new(),
        }
    }

    /// Mount `namespace` so its routes are reachable under `prefix + path`.
    pub fn attach(&mut self, path: &str, namespace: Namespace) -> Result<(), RegistryError> {
        self.check_prefix()?;
        path::check_mount(path).map_err(|reason| RegistryError::InvalidPath {
            path: path.to_string(),
            reason,
        })?;

        if let Some(existing) = self.mounts.iter().find(|m| m.path == path) {
            return Err(RegistryError::DuplicatePath {
                path: path.to_string(),
                existing: existing.namespace.name().to_string(),
            });
        }
        if let Some(existing) = self.mounts.iter().find(|m| path::overlaps(&m.path, path)) {
            return Err(RegistryError::OverlappingPath {
                path: path.to_string(),
                existing: existing.path.clone(),
                namespace: existing.namespace.name().to_string(),
            });
        }
        if path::overlaps(path, DOCUMENT_PATH) {
            return Err(RegistryError::ReservedPath {
                path: self.full_path(path),
            });
        }

        tracing::debug!(
            namespace = %namespace.name(),
            path = %self.full_path(path),
            endpoints = namespace.endpoints().len(),
            "Namespace attached"
        );

        self.mounts.push(Mount {
            path: path.to_string(),
            namespace,
        });
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `prefix + path`.
    pub fn full_path(&self, path: &str) -> String {
        path::join(&self.prefix, path)
    }

    /// Mounted namespaces in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.mounts.iter().map(|m| (m.path.as_str(), &m.namespace))
    }

    /// Full mount path to namespace.
    pub fn route_table(&self) -> BTreeMap<String, &Namespace> {
        self.mounts
            .iter()
            .map(|m| (self.full_path(&m.path), &m.namespace))
            .collect()
    }

    /// Build the API description document.
    pub fn describe(&self) -> ApiDocument {
        ApiDocument::from_registry(self)
    }

    /// Freeze the registry into a router.
    ///
    /// Each namespace is nested at its full path and the API description is
    /// served at `prefix + DOCUMENT_PATH`.
    pub fn into_router(self) -> Result<Router, RegistryError> {
        self.check_prefix()?;

        let document = self.describe();
        let document_path = self.full_path(DOCUMENT_PATH);
        let mut router = Router::new().route(
            &document_path,
            get(move || async move { Json(document) }),
        );

        for mount in self.mounts {
            let full = path::join(&self.prefix, &mount.path);
            router = router.nest(&full, mount.namespace.into_router());
        }

        tracing::info!(
            title = %self.title,
            version = %self.version,
            document = %document_path,
            "API routes frozen"
        );
        Ok(router)
    }

    fn check_prefix(&self) -> Result<(), RegistryError> {
        path::check_prefix(&self.prefix).map_err(|reason| RegistryError::InvalidPrefix {
            prefix: self.prefix.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;
    use std::collections::BTreeSet;

    async fn ok() -> &'static str {
        "ok"
    }

    fn namespace(name: &str) -> Namespace {
        Namespace::new(name, format!("{name} operations"))
            .endpoint(Method::GET, "/", "Index", ok)
            .unwrap()
    }

    fn registry() -> ApiRegistry {
        ApiRegistry::new("S", "D", "1.0", "/api/v1")
    }

    #[test]
    fn test_create_keeps_metadata() {
        let registry = ApiRegistry::new("Stack Overflow Lite", "  multi\n line ", "1.0", "/api/v1");
        assert_eq!(registry.title(), "Stack Overflow Lite");
        assert_eq!(registry.description(), "  multi\n line ");
        assert_eq!(registry.version(), "1.0");
        assert_eq!(registry.prefix(), "/api/v1");
        assert_eq!(registry.namespaces().count(), 0);
        assert!(registry.route_table().is_empty());
    }

    #[test]
    fn test_route_table_after_attach() {
        let mut registry = registry();
        registry.attach("/users", namespace("users")).unwrap();
        registry.attach("/auth", namespace("auth")).unwrap();

        let table = registry.route_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table["/api/v1/users"].name(), "users");
        assert_eq!(table["/api/v1/auth"].name(), "auth");
    }

    #[test]
    fn test_route_set_is_order_independent() {
        let mut forward = registry();
        forward.attach("/users", namespace("users")).unwrap();
        forward.attach("/auth", namespace("auth")).unwrap();

        let mut reverse = registry();
        reverse.attach("/auth", namespace("auth")).unwrap();
        reverse.attach("/users", namespace("users")).unwrap();

        let forward: BTreeSet<String> = forward.route_table().into_keys().collect();
        let reverse: BTreeSet<String> = reverse.route_table().into_keys().collect();
        let expected: BTreeSet<String> = ["/api/v1/users", "/api/v1/auth"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(forward, expected);
        assert_eq!(reverse, expected);
    }

    #[test]
    fn test_namespaces_keep_registration_order() {
        let mut registry = registry();
        registry.attach("/users", namespace("users")).unwrap();
        registry.attach("/auth", namespace("auth")).unwrap();

        let paths: Vec<&str> = registry.namespaces().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["/users", "/auth"]);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut registry = registry();
        registry.attach("/users", namespace("users")).unwrap();

        let err = registry.attach("/users", namespace("accounts")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePath {
                path: "/users".into(),
                existing: "users".into(),
            }
        );
        // First registration stays in place
        assert_eq!(registry.route_table()["/api/v1/users"].name(), "users");
        assert_eq!(registry.namespaces().count(), 1);
    }

    #[test]
    fn test_overlapping_path_rejected() {
        let mut registry = registry();
        registry.attach("/users", namespace("users")).unwrap();

        let err = registry.attach("/users/admin", namespace("admin")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::OverlappingPath {
                path: "/users/admin".into(),
                existing: "/users".into(),
                namespace: "users".into(),
            }
        );

        // Sibling with a shared string prefix is fine
        registry.attach("/users-archive", namespace("archive")).unwrap();
    }

    #[test]
    fn test_invalid_mount_path_rejected() {
        let mut registry = registry();
        for bad in ["", "/", "users", "/users/", "/a//b", "/{id}", "/:users"] {
            let err = registry.attach(bad, namespace("x")).unwrap_err();
            assert!(
                matches!(err, RegistryError::InvalidPath { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_prefix_rejected_on_attach() {
        let mut registry = ApiRegistry::new("S", "D", "1.0", "api/v1");
        let err = registry.attach("/users", namespace("users")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPrefix { .. }));
        assert!(ApiRegistry::new("S", "D", "1.0", "/api/v1/").into_router().is_err());

        let mut registry = ApiRegistry::new("S", "D", "1.0", "/:v1");
        let err = registry.attach("/users", namespace("users")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPrefix { .. }));
        assert!(registry.into_router().is_err());
    }

    #[test]
    fn test_document_path_reserved() {
        let mut registry = registry();
        let err = registry.attach("/swagger.json", namespace("docs")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ReservedPath {
                path: "/api/v1/swagger.json".into()
            }
        );
    }

    #[test]
    fn test_empty_prefix_mounts_at_root() {
        let mut registry = ApiRegistry::new("S", "D", "1.0", "");
        registry.attach("/users", namespace("users")).unwrap();
        assert!(registry.route_table().contains_key("/users"));
    }
}
