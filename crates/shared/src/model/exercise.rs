use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Alias, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A logged exercise. `date` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: i64,
    pub date: i64,
}

/// Validated input for logging an exercise
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

impl NewExercise {
    pub fn into_exercise(self, user_id: Uuid) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            user_id,
            description: self.description,
            duration: self.duration,
            date: self.date.timestamp_millis(),
        }
    }
}

/// Which existing record, if any, a newly logged exercise is folded into.
///
/// `Global` reuses any record with the same description, whoever logged it,
/// and is the historical behavior. It merges unrelated users' entries, so the
/// other modes exist for deployments that want that fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseDedup {
    #[default]
    Global,
    PerUser,
    Never,
}

impl fmt::Display for ExerciseDedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExerciseDedup::Global => "global",
            ExerciseDedup::PerUser => "per-user",
            ExerciseDedup::Never => "never",
        })
    }
}

impl FromStr for ExerciseDedup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" => Ok(ExerciseDedup::Global),
            "per-user" | "per_user" => Ok(ExerciseDedup::PerUser),
            "never" => Ok(ExerciseDedup::Never),
            other => Err(format!(
                "unknown exercise dedup mode {other:?}, expected one of global, per-user, never"
            )),
        }
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .order_by(Alias::new("rowid"), Order::Asc)
            .to_owned()
    }

    /// First record logged with `description` by anyone
    pub fn fetch_first_by_description(
        conn: &Connection,
        description: &str,
    ) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Description).eq(description))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    pub fn fetch_first_by_user_and_description(
        conn: &Connection,
        user_id: &Uuid,
        description: &str,
    ) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .and_where(Expr::col(ExerciseIden::Description).eq(description))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    /// A user's exercises in the order they were logged. The limit is applied
    /// here, before any date filtering.
    pub fn fetch_for_user(
        conn: &Connection,
        user_id: &Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let mut query = Self::select_star();
        query.and_where(Expr::col(ExerciseIden::UserId).eq(user_id));
        if let Some(limit) = limit {
            query.limit(limit);
        }
        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    /// Stores `new_exercise` for the user unless `dedup` finds an existing
    /// record to reuse, in which case that record is returned untouched.
    pub fn log(
        conn: &mut Connection,
        user_id: Uuid,
        new_exercise: NewExercise,
        dedup: ExerciseDedup,
    ) -> Result<Exercise, rusqlite::Error> {
        let tx = conn.transaction()?;
        let existing = match dedup {
            ExerciseDedup::Global => {
                Exercise::fetch_first_by_description(&tx, &new_exercise.description)?
            }
            ExerciseDedup::PerUser => Exercise::fetch_first_by_user_and_description(
                &tx,
                &user_id,
                &new_exercise.description,
            )?,
            ExerciseDedup::Never => None,
        };

        let exercise = match existing {
            Some(existing) => existing,
            None => {
                let exercise = new_exercise.into_exercise(user_id);
                exercise.insert(&tx)?;
                exercise
            }
        };
        tx.commit()?;

        Ok(exercise)
    }
}
