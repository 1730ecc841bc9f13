//! `users` namespace.

use axum::extract::Path;
use axum::http::Method;

use crate::http::response::ApiError;
use crate::routing::{Namespace, RegistryError};

pub const NAME: &str = "users";
pub const MOUNT: &str = "/users";

pub fn namespace() -> Result<Namespace, RegistryError> {
    Namespace::new(NAME, "Operations on registered users")
        .endpoint(Method::GET, "/", "List users", list_users)?
        .endpoint(Method::GET, "/{user_id}", "Fetch a user", fetch_user)
}

async fn list_users() -> ApiError {
    ApiError::not_implemented("List users")
}

async fn fetch_user(Path(user_id): Path<String>) -> ApiError {
    tracing::debug!(user_id = %user_id, "Fetch user requested");
    ApiError::not_implemented("Fetch a user")
}
