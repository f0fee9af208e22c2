use axum::Json;
use shared::{
    api::{
        error::ServerError,
        payloads::RegisterPayload,
        response_errors::{FetchError, RegisterError},
    },
    model::User,
};
use tracing::{debug, instrument};

use crate::{db::DatabaseConnection, extract::FormOrJson};

/// Registers a username, or returns the existing user if it's already taken
#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(payload): FormOrJson<RegisterPayload>,
) -> Result<Json<User>, ServerError<RegisterError>> {
    let username = payload.validate()?;

    let user = conn
        .interact(move |conn| User::register::<RegisterError>(conn, &username))
        .await??;
    debug!(%user.id, "registered");

    Ok(Json(user))
}

#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<FetchError>> {
    let users = conn
        .interact(|conn| Ok::<_, ServerError<FetchError>>(User::fetch_all(conn)?))
        .await??;

    Ok(Json(users))
}
