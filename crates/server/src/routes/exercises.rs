use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{ExercisePayload, ExerciseResponse},
        response_errors::ExerciseError,
    },
    model::{Exercise, User},
    types::Uuid,
    utils::date::today,
};
use tracing::{debug, instrument};

use crate::{db::DatabaseConnection, extract::FormOrJson, state::Args};

/// Logs an exercise for the user in the path. Replies with the stored record,
/// which may be an earlier one with the same description depending on the
/// configured dedup mode.
#[instrument(skip(conn, args))]
pub async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Path(user_id): Path<String>,
    FormOrJson(payload): FormOrJson<ExercisePayload>,
) -> Result<Json<ExerciseResponse>, ServerError<ExerciseError>> {
    if user_id.trim().is_empty() {
        Err(ExerciseError::UserIdRequired)?;
    }

    let new_exercise = payload.validate(today())?;
    let dedup = args.exercise_dedup;

    let response = conn
        .interact(move |conn| {
            let user = match Uuid::parse(&user_id) {
                Ok(id) => User::fetch_by_id(conn, &id)?,
                Err(_) => None,
            }
            .ok_or(ExerciseError::UnknownUserId)?;

            let exercise = Exercise::log(conn, user.id, new_exercise, dedup)?;
            debug!(%exercise.id, %dedup, "logged exercise");

            Ok::<_, ServerError<ExerciseError>>(ExerciseResponse::new(user, exercise))
        })
        .await??;

    Ok(Json(response))
}
