use axum::{
    extract::{Path, Query},
    Json,
};
use shared::{
    api::{
        error::ServerError,
        payloads::{LogQuery, LogResponse},
        response_errors::LogError,
    },
    model::{Exercise, User},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

/// A user's exercise log. `limit` caps how many exercises are read, the
/// `from`/`to` range is applied to what was read.
#[instrument(skip(conn))]
pub async fn fetch_logs(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogResponse>, ServerError<LogError>> {
    if user_id.trim().is_empty() {
        Err(LogError::UserIdRequired)?;
    }

    let limit = query.limit()?;
    let filter = query.filter();

    let response = conn
        .interact(move |conn| {
            let user = match Uuid::parse(&user_id) {
                Ok(id) => User::fetch_by_id(conn, &id)?,
                Err(_) => None,
            }
            .ok_or(LogError::UnknownUserId)?;

            let exercises = Exercise::fetch_for_user(conn, &user.id, limit)?;
            let log = filter.apply(&exercises);

            Ok::<_, ServerError<LogError>>(LogResponse::new(user, log))
        })
        .await??;

    Ok(Json(response))
}
