use std::fmt;

use serde::{Deserialize, Serialize};

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// A body field that may arrive as a json number or as text (form bodies are
/// always text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// An empty string, as sent by a form field left blank
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(t) if t.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(t) if t.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Text(t) => f.write_str(t),
        }
    }
}
