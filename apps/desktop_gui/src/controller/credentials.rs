//! Login/register form state.

use shared::validation::{validate_password, validate_username, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
    username_error: Option<ValidationError>,
    password_error: Option<ValidationError>,
    in_flight: bool,
}

impl CredentialsForm {
    /// Returns the trimmed username and the password when both pass and no
    /// request is already pending.
    pub fn submit(&mut self) -> Option<(String, String)> {
        if self.in_flight {
            return None;
        }
        let username = validate_username(&self.username);
        let password = validate_password(&self.password);
        self.username_error = username.as_ref().err().cloned();
        self.password_error = password.as_ref().err().cloned();

        let username = username.ok()?;
        password.ok()?;
        self.in_flight = true;
        Some((username, self.password.clone()))
    }

    /// Request finished; fields stay populated so a failure can be corrected.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn username_error(&self) -> Option<&ValidationError> {
        self.username_error.as_ref()
    }

    pub fn password_error(&self) -> Option<&ValidationError> {
        self.password_error.as_ref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_invalid_field() {
        let mut form = CredentialsForm {
            username: "al".into(),
            password: "12345".into(),
            ..Default::default()
        };
        assert_eq!(form.submit(), None);
        assert_eq!(
            form.username_error().map(ToString::to_string).as_deref(),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            form.password_error().map(ToString::to_string).as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(!form.is_in_flight());
    }

    #[test]
    fn pending_request_blocks_resubmission() {
        let mut form = CredentialsForm {
            username: " alice ".into(),
            password: "secret1".into(),
            ..Default::default()
        };
        assert_eq!(
            form.submit(),
            Some(("alice".to_string(), "secret1".to_string()))
        );
        assert_eq!(form.submit(), None);

        form.finish();
        assert!(form.submit().is_some());
        assert_eq!(form.username, " alice ");
    }
}
