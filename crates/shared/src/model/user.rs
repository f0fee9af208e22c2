use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    crate::{api::error::ServerError, other_error},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Alias, Expr, OnConflict, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A registered user. Serialized with the `_id` key clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
}

impl User {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}

#[cfg(feature = "backend")]
impl User {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([UserIden::Id, UserIden::Username])
            .from(UserIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), User::from_row).optional()
    }

    pub fn fetch_by_username<T: AsRef<str>>(
        conn: &Connection,
        username: T,
    ) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::Username).eq(username.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), User::from_row).optional()
    }

    /// All users in registration order
    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(Alias::new("rowid"), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Returns the user registered under `username`, creating it first if
    /// there isn't one.
    ///
    /// The insert is ignored when the username is taken so concurrent
    /// registrations of the same name all resolve to the same row.
    pub fn register<T>(conn: &mut Connection, username: &str) -> Result<User, ServerError<T>> {
        let tx = conn.transaction()?;
        let user = {
            let new_user = User::new(username);
            let (sql, values) = Query::insert()
                .into_table(UserIden::Table)
                .columns([UserIden::Id, UserIden::Username])
                .values_panic([new_user.id.into(), new_user.username.into()])
                .on_conflict(OnConflict::column(UserIden::Username).do_nothing().to_owned())
                .build_rusqlite(SqliteQueryBuilder);
            tx.execute(&sql, &*values.as_params())?;

            match User::fetch_by_username(&tx, username)? {
                Some(user) => user,
                None => return Err(other_error!("User::register: {username:?} missing after insert")),
            }
        };
        tx.commit()?;

        Ok(user)
    }
}
