use thiserror::Error;

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::TooShort { field, .. } => field,
        }
    }
}

fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

/// Returns the trimmed name when it satisfies the minimum length.
pub fn validate_name(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    require_min_chars(field, trimmed, MIN_NAME_LEN)?;
    Ok(trimmed.to_string())
}

pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    require_min_chars("Username", trimmed, MIN_USERNAME_LEN)?;
    Ok(trimmed.to_string())
}

/// Passwords are not trimmed.
pub fn validate_password(raw: &str) -> Result<(), ValidationError> {
    require_min_chars("Password", raw, MIN_PASSWORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert_eq!(
            validate_name("Department name", "  HR  "),
            Err(ValidationError::TooShort {
                field: "Department name",
                min: 3
            })
        );
        assert_eq!(
            validate_name("Department name", "  Sales ").as_deref(),
            Ok("Sales")
        );
    }

    #[test]
    fn blank_name_is_required_error() {
        let err = validate_name("Department name", "   ").expect_err("blank");
        assert_eq!(err.to_string(), "Department name is required");
        assert_eq!(err.field(), "Department name");
    }

    #[test]
    fn credentials_follow_login_rules() {
        assert!(validate_username("al").is_err());
        assert_eq!(validate_username(" alice ").as_deref(), Ok("alice"));
        assert_eq!(
            validate_password("12345").expect_err("short").to_string(),
            "Password must be at least 6 characters"
        );
        assert!(validate_password("123456").is_ok());
    }
}
