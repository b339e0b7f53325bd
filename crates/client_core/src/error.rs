use shared::{
    error::{ApiError, ErrorCode},
    pagination::PaginationError,
    validation::ValidationError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("{}", join_messages(.0))]
    Api(Vec<ApiError>),
    #[error("response for {operation} carried no data")]
    MissingData { operation: &'static str },
    #[error("malformed response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("token store failure: {0}")]
    TokenStore(#[from] std::io::Error),
    #[error("invalid GraphQL endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not resolve a local data directory; set DEPTADMIN_DATA_DIR or --data-dir")]
    NoDataDir,
    #[error("not signed in")]
    NotAuthenticated,
}

fn join_messages(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "unknown API error".to_string();
    }
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    pub fn has_code(&self, code: ErrorCode) -> bool {
        match self {
            Self::Api(errors) => errors.iter().any(|err| err.code == code),
            _ => false,
        }
    }

    /// True when the server rejected the bearer token (or none was sent).
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            Self::NotAuthenticated => true,
            Self::Http { status, .. } => *status == 401,
            _ => self.has_code(ErrorCode::Unauthenticated),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.has_code(ErrorCode::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_display_joined_messages() {
        let err = ClientError::Api(vec![
            ApiError::new(ErrorCode::Validation, "name too short"),
            ApiError::new(ErrorCode::Conflict, "name taken"),
        ]);
        assert_eq!(err.to_string(), "name too short; name taken");
        assert!(!err.is_unauthenticated());
    }

    #[test]
    fn unauthenticated_is_detected_from_code_and_status() {
        assert!(
            ClientError::Api(vec![ApiError::new(ErrorCode::Unauthenticated, "Unauthorized")])
                .is_unauthenticated()
        );
        assert!(ClientError::Http {
            status: 401,
            body: String::new()
        }
        .is_unauthenticated());
        assert!(ClientError::NotAuthenticated.is_unauthenticated());
        assert!(!ClientError::MissingData { operation: "Login" }.is_unauthenticated());
    }
}
