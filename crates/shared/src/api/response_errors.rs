use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ServerError;

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($message:tt)*)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($message)*)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl $name {
            pub fn code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = inner.code();
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(RegisterError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Path `username` is required.")]
    UsernameRequired,
});

response_error!(ExerciseError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("not found")]
    UserIdRequired,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Cast to date failed for value \"{value}\" at path \"date\"")]
    InvalidDate { value: String },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Path `duration` is required.")]
    DurationRequired,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Path `description` is required.")]
    DescriptionRequired,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Cast to Number failed for value \"{value}\" at path \"duration\"")]
    InvalidDuration { value: String },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("duration too short")]
    DurationTooShort,
    // Unknown ids are a 400 rather than a 404
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Unknown userId")]
    UnknownUserId,
});

response_error!(LogError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("not found")]
    UserIdRequired,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Cast to Number failed for value \"{value}\" at path \"limit\"")]
    InvalidLimit { value: String },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Unknown userId")]
    UnknownUserId,
});

// Alias used to allow future expansion of the errors without having to go back
// and update all routes that use it
pub type FetchError = super::error::Nothing;
