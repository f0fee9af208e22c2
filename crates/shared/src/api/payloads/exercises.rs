use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Scalar;
use crate::{
    api::response_errors::ExerciseError,
    model::{Exercise, NewExercise, User},
    types::Uuid,
    utils::date::{format_epoch_millis, parse_date},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExercisePayload {
    #[serde(default)]
    pub description: Option<Scalar>,
    #[serde(default)]
    pub duration: Option<Scalar>,
    #[serde(default)]
    pub date: Option<Scalar>,
}

impl ExercisePayload {
    /// Checks the fields in the order clients have always seen the errors:
    /// date, duration present, description present, then duration value.
    ///
    /// `today` is used when no date is given.
    pub fn validate(&self, today: DateTime<Utc>) -> Result<NewExercise, ExerciseError> {
        let date = match self.date.as_ref().filter(|d| !d.is_empty()) {
            None => today,
            Some(value) => {
                let value = value.to_string();
                parse_date(&value).ok_or(ExerciseError::InvalidDate { value })?
            }
        };

        let duration = match self.duration.as_ref() {
            Some(duration) if !duration.is_blank() => duration,
            _ => return Err(ExerciseError::DurationRequired),
        };

        let description = match &self.description {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => return Err(ExerciseError::DescriptionRequired),
        };

        let duration = parse_duration(duration)?;

        Ok(NewExercise {
            description,
            duration,
            date,
        })
    }
}

/// Whole minutes, at least one and small enough to store
fn parse_duration(duration: &Scalar) -> Result<i64, ExerciseError> {
    let invalid = || ExerciseError::InvalidDuration {
        value: duration.to_string(),
    };

    let minutes = match duration {
        Scalar::Integer(i) if *i < 1 => return Err(ExerciseError::DurationTooShort),
        Scalar::Integer(i) => return Ok(*i),
        Scalar::Float(n) => *n,
        Scalar::Text(t) => t.trim().parse::<f64>().map_err(|_| invalid())?,
    };

    // i64::MAX rounds up to 2^63 as a float, so anything at or above it overflows
    if !minutes.is_finite() || minutes >= i64::MAX as f64 {
        return Err(invalid());
    }
    if minutes < 1.0 {
        return Err(ExerciseError::DurationTooShort);
    }
    if minutes.fract() != 0.0 {
        return Err(invalid());
    }

    Ok(minutes as i64)
}

/// Reply to logging an exercise: the user's identity merged with the stored
/// exercise fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub date: String,
    pub duration: i64,
    pub description: String,
}

impl ExerciseResponse {
    pub fn new(user: User, exercise: Exercise) -> Self {
        Self {
            id: user.id,
            username: user.username,
            date: format_epoch_millis(exercise.date).unwrap_or_else(|| "Invalid Date".to_string()),
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap()
    }

    fn payload(description: &str, duration: Option<Scalar>, date: Option<&str>) -> ExercisePayload {
        ExercisePayload {
            description: Some(Scalar::Text(description.to_string())),
            duration,
            date: date.map(|d| Scalar::Text(d.to_string())),
        }
    }

    fn text(value: &str) -> Option<Scalar> {
        Some(Scalar::Text(value.to_string()))
    }

    #[test]
    fn test_valid_payload() {
        let new = payload("run", text("30"), Some("2023-01-01")).validate(today()).unwrap();
        assert_eq!(new.description, "run");
        assert_eq!(new.duration, 30);
        assert_eq!(new.date, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let new = payload("run", Some(Scalar::Integer(1)), None).validate(today()).unwrap();
        assert_eq!(new.date, today());
        let new = payload("run", Some(Scalar::Integer(1)), Some("")).validate(today()).unwrap();
        assert_eq!(new.date, today());
    }

    #[test]
    fn test_invalid_date_names_the_value() {
        assert_eq!(
            payload("run", text("30"), Some("someday")).validate(today()),
            Err(ExerciseError::InvalidDate {
                value: "someday".to_string()
            })
        );
    }

    #[test]
    fn test_duration_errors() {
        assert_eq!(
            payload("run", None, None).validate(today()),
            Err(ExerciseError::DurationRequired)
        );
        assert_eq!(
            payload("run", text(""), None).validate(today()),
            Err(ExerciseError::DurationRequired)
        );
        assert_eq!(
            payload("run", text("0"), None).validate(today()),
            Err(ExerciseError::DurationTooShort)
        );
        assert_eq!(
            payload("run", Some(Scalar::Integer(-5)), None).validate(today()),
            Err(ExerciseError::DurationTooShort)
        );
        assert_eq!(
            payload("run", text("ten"), None).validate(today()),
            Err(ExerciseError::InvalidDuration {
                value: "ten".to_string()
            })
        );
        assert_eq!(
            payload("run", Some(Scalar::Float(1.5)), None).validate(today()),
            Err(ExerciseError::InvalidDuration {
                value: "1.5".to_string()
            })
        );
        assert_eq!(payload("run", text("1"), None).validate(today()).map(|e| e.duration), Ok(1));
    }

    #[test]
    fn test_duration_out_of_range() {
        assert_eq!(
            payload("run", text("1e300"), None).validate(today()),
            Err(ExerciseError::InvalidDuration {
                value: "1e300".to_string()
            })
        );
        assert_eq!(
            payload("run", Some(Scalar::Float(1e19)), None).validate(today()),
            Err(ExerciseError::InvalidDuration {
                value: "10000000000000000000".to_string()
            })
        );
        assert_eq!(
            payload("run", Some(Scalar::Integer(i64::MAX)), None)
                .validate(today())
                .map(|e| e.duration),
            Ok(i64::MAX)
        );
    }

    #[test]
    fn test_whitespace_date_is_invalid() {
        assert_eq!(
            payload("run", text("30"), Some("   ")).validate(today()),
            Err(ExerciseError::InvalidDate {
                value: "   ".to_string()
            })
        );
    }

    #[test]
    fn test_numeric_description_is_text() {
        let payload: ExercisePayload =
            serde_json::from_str(r#"{"description":7,"duration":5}"#).unwrap();
        assert_eq!(payload.validate(today()).map(|e| e.description), Ok("7".to_string()));
    }

    #[test]
    fn test_validation_order() {
        // Bad date wins over everything else
        let all_bad = ExercisePayload {
            description: None,
            duration: None,
            date: text("nope"),
        };
        assert!(matches!(
            all_bad.validate(today()),
            Err(ExerciseError::InvalidDate { .. })
        ));

        // Missing duration is reported before missing description
        let no_fields = ExercisePayload::default();
        assert_eq!(no_fields.validate(today()), Err(ExerciseError::DurationRequired));

        // Missing description is reported before a too short duration
        let short = ExercisePayload {
            description: None,
            duration: text("0"),
            date: None,
        };
        assert_eq!(short.validate(today()), Err(ExerciseError::DescriptionRequired));
    }

    #[test]
    fn test_form_and_json_bodies_agree() {
        let form: ExercisePayload =
            serde_urlencoded::from_str("description=swim&duration=45&date=2023-01-02").unwrap();
        let json: ExercisePayload = serde_json::from_str(
            r#"{"description":"swim","duration":45,"date":"2023-01-02"}"#,
        )
        .unwrap();

        assert_eq!(form.validate(today()), json.validate(today()));
    }
}
