use std::{error::Error, fmt};

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body sent for every failure that isn't the caller's fault
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Builds a [`ServerError::Other`] from format args
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other {
            message: format!($($arg)*),
        }
    };
}

/// Error type for endpoints that have no domain specific failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl Error for Nothing {}

/// Error returned from route handlers.
///
/// `Inner` carries one of the per-endpoint errors from
/// [`response_errors`](crate::api::response_errors) and is reported to the
/// caller. Everything else is a store or runtime failure: it gets logged and
/// the caller only sees [`GENERIC_SERVER_ERROR`].
#[derive(Debug)]
pub enum ServerError<T> {
    Inner { code: StatusCode, inner: T },
    Other { message: String },
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { code, inner } => write!(f, "{code}: {inner}"),
            ServerError::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> Error for ServerError<T> {}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            ServerError::Inner { code, .. } => *code,
            ServerError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use http::StatusCode;
    use tracing::error;

    use super::{ServerError, GENERIC_SERVER_ERROR};

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            Self::Other {
                message: format!("rusqlite: {err:?}"),
            }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Other {
                message: format!("deadpool_sqlite::InteractError: {err:?}"),
            }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Other {
                message: format!("deadpool_sqlite::PoolError: {err:?}"),
            }
        }
    }

    // Domain errors go out as plain text, store failures as a json string
    impl<T: fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            match self {
                ServerError::Inner { code, inner } => (code, inner.to_string()).into_response(),
                ServerError::Other { message } => {
                    error!(error = %message, "request failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(GENERIC_SERVER_ERROR)).into_response()
                }
            }
        }
    }
}
