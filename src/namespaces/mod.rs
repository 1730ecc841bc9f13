//! API namespaces and their wiring.
//!
//! Each namespace is defined in its own module and knows nothing about where
//! it is mounted. `register` is the single place that decides the mount
//! paths. The handlers here are placeholders answering `501 Not Implemented`;
//! user storage and authentication live outside this crate.

pub mod auth;
pub mod users;

use crate::config::ApiConfig;
use crate::routing::{ApiRegistry, RegistryError};

/// Attach every namespace to `registry`.
pub fn register(registry: &mut ApiRegistry) -> Result<(), RegistryError> {
    registry.attach(users::MOUNT, users::namespace()?)?;
    registry.attach(auth::MOUNT, auth::namespace()?)?;
    Ok(())
}

/// Create a registry from configuration and attach every namespace.
pub fn build_registry(config: &ApiConfig) -> Result<ApiRegistry, RegistryError> {
    let mut registry = ApiRegistry::new(
        config.title.as_str(),
        config.description.as_str(),
        config.version.as_str(),
        config.prefix.as_str(),
    );
    register(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_standard_route_set() {
        let mut registry = ApiRegistry::new("S", "D", "1.0", "/api/v1");
        register(&mut registry).unwrap();

        let routes: BTreeSet<String> = registry.route_table().into_keys().collect();
        let expected: BTreeSet<String> = ["/api/v1/users", "/api/v1/auth"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(routes, expected);

        let table = registry.route_table();
        assert_eq!(table["/api/v1/users"].name(), users::NAME);
        assert_eq!(table["/api/v1/auth"].name(), auth::NAME);
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut registry = ApiRegistry::new("S", "D", "1.0", "/api/v1");
        register(&mut registry).unwrap();
        let err = register(&mut registry).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePath { .. }));
    }

    #[test]
    fn test_build_registry_from_config() {
        let config = ApiConfig::default();
        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.title(), config.title);
        assert_eq!(registry.description(), config.description);
        assert_eq!(registry.version(), "1.0");
        assert_eq!(registry.prefix(), "/api/v1");
        assert_eq!(registry.namespaces().count(), 2);
    }
}
