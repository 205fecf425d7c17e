//! Registration and login inputs.
//!
//! Absent and `null` fields deserialize as empty strings so that "missing"
//! and "empty" are rejected the same way. Presence is checked with `validator`; every
//! presence failure collapses into one client-facing message.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{MSG_FIELDS_REQUIRED, MSG_PASSWORD_MISMATCH};
use crate::errors::{AppError, AppResult};

/// Account creation request
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct Registration {
    /// Display name (not unique)
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Email address, unique per account
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Plain text password
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
    /// Must equal `password`
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "confirm is required"))]
    #[schema(example = "secret1")]
    pub confirm: String,
}

impl Registration {
    /// Presence first, then password confirmation.
    pub fn check(&self) -> AppResult<()> {
        require_fields(self)?;

        if self.password != self.confirm {
            return Err(AppError::validation(MSG_PASSWORD_MISMATCH));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm", &"[REDACTED]")
            .finish()
    }
}

/// Login request
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    /// Account email address
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Plain text password
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

impl Credentials {
    pub fn check(&self) -> AppResult<()> {
        require_fields(self)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Run field validation, reporting which fields failed only to the log.
fn require_fields<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        tracing::debug!(?fields, "Rejected incomplete input");
        AppError::validation(MSG_FIELDS_REQUIRED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            confirm: "secret1".to_string(),
        }
    }

    fn message(result: AppResult<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_complete_registration_passes() {
        assert!(registration().check().is_ok());
    }

    #[test]
    fn test_each_missing_field_rejected() {
        let blanks: [fn(&mut Registration); 4] = [
            |r| r.username.clear(),
            |r| r.email.clear(),
            |r| r.password.clear(),
            |r| r.confirm.clear(),
        ];

        for blank in blanks {
            let mut input = registration();
            blank(&mut input);
            assert_eq!(message(input.check()), MSG_FIELDS_REQUIRED);
        }
    }

    #[test]
    fn test_missing_field_wins_over_mismatch() {
        let input = Registration {
            confirm: String::new(),
            ..registration()
        };
        assert_eq!(message(input.check()), MSG_FIELDS_REQUIRED);
    }

    #[test]
    fn test_password_mismatch() {
        let input = Registration {
            confirm: "secret2".to_string(),
            ..registration()
        };
        assert_eq!(message(input.check()), MSG_PASSWORD_MISMATCH);
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let input = Registration {
            username: " ".to_string(),
            ..registration()
        };
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_absent_json_fields_default_to_empty() {
        let input: Credentials = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();

        assert_eq!(input.password, "");
        assert_eq!(message(input.check()), MSG_FIELDS_REQUIRED);
    }

    #[test]
    fn test_null_json_fields_read_as_empty() {
        let input: Registration = serde_json::from_str(
            r#"{"username":null,"email":"a@x.com","password":"secret1","confirm":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(input.username, "");
        assert_eq!(message(input.check()), MSG_FIELDS_REQUIRED);

        let input: Credentials =
            serde_json::from_str(r#"{"email":null,"password":null}"#).unwrap();
        assert_eq!(message(input.check()), MSG_FIELDS_REQUIRED);
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let debug = format!("{:?}", registration());
        assert!(!debug.contains("secret1"));

        let debug = format!(
            "{:?}",
            Credentials {
                email: "a@x.com".to_string(),
                password: "secret1".to_string()
            }
        );
        assert!(!debug.contains("secret1"));
    }
}
