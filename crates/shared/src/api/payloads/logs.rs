use serde::{Deserialize, Serialize};

use crate::{
    api::response_errors::LogError,
    model::{LogFilter, User},
    types::Uuid,
};

/// `?from=&to=&limit=`. Everything is kept as text so empty values can be
/// told apart from bad ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl LogQuery {
    pub fn filter(&self) -> LogFilter {
        LogFilter::new(self.from.as_deref(), self.to.as_deref())
    }

    /// Maximum number of exercises to fetch before filtering.
    ///
    /// Missing, empty and zero mean no limit. A negative limit counts the same
    /// as its absolute value, capped at what sqlite can bind.
    pub fn limit(&self) -> Result<Option<u64>, LogError> {
        let value = match self.limit.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(value) => value,
        };

        let limit = value.parse::<i64>().map_err(|_| LogError::InvalidLimit {
            value: value.to_string(),
        })?;

        Ok(match limit.unsigned_abs() {
            0 => None,
            n => Some(n.min(i64::MAX as u64)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl LogResponse {
    pub fn new(user: User, log: Vec<LogEntry>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            count: log.len(),
            log,
        }
    }
}
