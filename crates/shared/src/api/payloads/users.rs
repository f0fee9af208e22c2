use serde::{Deserialize, Serialize};

use super::Scalar;
use crate::api::response_errors::RegisterError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub username: Option<Scalar>,
}

impl RegisterPayload {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            username: Some(Scalar::Text(username.into())),
        }
    }

    /// The username to register. Missing and empty are both rejected, numbers
    /// are taken as their text.
    pub fn validate(&self) -> Result<String, RegisterError> {
        match &self.username {
            Some(username) if !username.is_empty() => Ok(username.to_string()),
            _ => Err(RegisterError::UsernameRequired),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_username_is_rejected() {
        assert_eq!(RegisterPayload::new("").validate(), Err(RegisterError::UsernameRequired));
        assert_eq!(RegisterPayload::default().validate(), Err(RegisterError::UsernameRequired));
        assert_eq!(RegisterPayload::new("fcc_test").validate(), Ok("fcc_test".to_string()));
    }

    #[test]
    fn test_numeric_username_is_text() {
        let payload: RegisterPayload = serde_json::from_str(r#"{"username":42}"#).unwrap();
        assert_eq!(payload.validate(), Ok("42".to_string()));
    }
}
