use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use deadpool_sqlite::{Object, Pool};
use shared::api::error::{Nothing, ServerError};

/// A pooled sqlite connection checked out for one request.
///
/// Failing to get one (pool timeout, connection setup failure) is never the
/// caller's fault, so the rejection is the generic 500 `"Server error"` reply
/// and the cause only goes to the log.
#[derive(Debug)]
pub struct DatabaseConnection(pub Object);

impl Deref for DatabaseConnection {
    type Target = Object;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DatabaseConnection
where
    S: Send + Sync,
    Pool: FromRef<S>,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Pool::from_ref(state)
            .get()
            .await
            .map(DatabaseConnection)
            .map_err(ServerError::from)
    }
}
