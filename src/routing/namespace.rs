//! Namespaces: named bundles of route handlers.
//!
//! A namespace is defined independently of where it is mounted. It records
//! each endpoint it declares so the registry can publish a route table and an
//! API description without running the handlers.

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{on, MethodFilter};
use axum::Router;

use crate::routing::error::RegistryError;
use crate::routing::path;

/// One declared endpoint, relative to its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub summary: String,
}

/// A named group of route handlers.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    description: String,
    endpoints: Vec<Endpoint>,
    router: Router,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            endpoints: Vec::new(),
            router: Router::new(),
        }
    }

    /// Declare an endpoint and bind its handler.
    ///
    /// `path` is relative to the mount point; `/` addresses the mount point
    /// itself. Fails instead of letting axum panic on a conflicting route.
    pub fn endpoint<H, T>(
        mut self,
        method: Method,
        path: &str,
        summary: impl Into<String>,
        handler: H,
    ) -> Result<Self, RegistryError>
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        path::check_endpoint(path).map_err(|reason| RegistryError::InvalidPath {
            path: path.to_string(),
            reason,
        })?;

        let filter = method_filter(&method)
            .ok_or_else(|| RegistryError::UnsupportedMethod(method.to_string()))?;

        for existing in &self.endpoints {
            if existing.path == path && existing.method == method {
                return Err(RegistryError::DuplicateEndpoint {
                    namespace: self.name.clone(),
                    method: method.to_string(),
                    path: path.to_string(),
                });
            }
            if existing.path != path && shape(&existing.path) == shape(path) {
                return Err(RegistryError::InvalidPath {
                    path: path.to_string(),
                    reason: "parameter names conflict with another endpoint",
                });
            }
        }

        self.router = self.router.route(path, on(filter, handler));
        self.endpoints.push(Endpoint {
            method,
            path: path.to_string(),
            summary: summary.into(),
        });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Endpoints in declaration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub(crate) fn into_router(self) -> Router {
        self.router
    }
}

fn method_filter(method: &Method) -> Option<MethodFilter> {
    match *method {
        Method::GET => Some(MethodFilter::GET),
        Method::POST => Some(MethodFilter::POST),
        Method::PUT => Some(MethodFilter::PUT),
        Method::PATCH => Some(MethodFilter::PATCH),
        Method::DELETE => Some(MethodFilter::DELETE),
        Method::HEAD => Some(MethodFilter::HEAD),
        Method::OPTIONS => Some(MethodFilter::OPTIONS),
        Method::TRACE => Some(MethodFilter::TRACE),
        _ => None,
    }
}

// Parameter names erased: `/{id}` and `/{user_id}` share a shape.
fn shape(path: &str) -> Vec<&str> {
    path::segments(path)
        .map(|s| if s.starts_with('{') { "{}" } else { s })
        .collect()
}
