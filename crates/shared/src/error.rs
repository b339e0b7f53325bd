use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthenticated,
    Forbidden,
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl ErrorCode {
    /// Maps the `extensions.code` string a GraphQL server attaches to an error.
    pub fn from_extension_code(code: Option<&str>) -> Self {
        match code.map(str::to_ascii_uppercase).as_deref() {
            Some("UNAUTHENTICATED") | Some("UNAUTHORIZED") => Self::Unauthenticated,
            Some("FORBIDDEN") => Self::Forbidden,
            Some("NOT_FOUND") => Self::NotFound,
            Some("BAD_USER_INPUT") | Some("BAD_REQUEST") | Some("GRAPHQL_VALIDATION_FAILED") => {
                Self::Validation
            }
            Some("CONFLICT") => Self::Conflict,
            _ => Self::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_extension_codes() {
        assert_eq!(
            ErrorCode::from_extension_code(Some("UNAUTHENTICATED")),
            ErrorCode::Unauthenticated
        );
        assert_eq!(
            ErrorCode::from_extension_code(Some("bad_user_input")),
            ErrorCode::Validation
        );
        assert_eq!(
            ErrorCode::from_extension_code(Some("NOT_FOUND")),
            ErrorCode::NotFound
        );
        assert_eq!(ErrorCode::from_extension_code(None), ErrorCode::Internal);
        assert_eq!(
            ErrorCode::from_extension_code(Some("INTERNAL_SERVER_ERROR")),
            ErrorCode::Internal
        );
    }
}
