//! `auth` namespace.

use axum::http::Method;

use crate::http::response::ApiError;
use crate::routing::{Namespace, RegistryError};

pub const NAME: &str = "auth";
pub const MOUNT: &str = "/auth";

pub fn namespace() -> Result<Namespace, RegistryError> {
    Namespace::new(NAME, "Account sign-up and login")
        .endpoint(Method::POST, "/signup", "Sign up", signup)?
        .endpoint(Method::POST, "/login", "Log in", login)
}

async fn signup() -> ApiError {
    ApiError::not_implemented("Sign up")
}

async fn login() -> ApiError {
    ApiError::not_implemented("Log in")
}
