//! GraphQL-over-HTTP envelope and transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use shared::error::{ApiError, ErrorCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlErrorPayload {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlErrorPayload {
    fn extension_code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .and_then(Value::as_str)
    }

    /// Nest-style servers put the HTTP status under `extensions.originalError`.
    fn original_status(&self) -> Option<u64> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("originalError"))
            .and_then(|original| original.get("statusCode"))
            .and_then(Value::as_u64)
    }

    pub fn to_api_error(&self) -> ApiError {
        let code = match self.original_status() {
            Some(401) => ErrorCode::Unauthenticated,
            Some(403) => ErrorCode::Forbidden,
            Some(404) => ErrorCode::NotFound,
            Some(409) => ErrorCode::Conflict,
            Some(400) => ErrorCode::Validation,
            _ => ErrorCode::from_extension_code(self.extension_code()),
        };
        ApiError::new(code, self.message.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorPayload>,
}

impl GraphqlResponse {
    /// Extracts `data.<field>`; any reported error wins over partial data.
    pub fn into_field<T: DeserializeOwned>(
        self,
        operation: &'static str,
        field: &'static str,
    ) -> Result<T> {
        if !self.errors.is_empty() {
            let errors: Vec<ApiError> = self
                .errors
                .iter()
                .map(GraphqlErrorPayload::to_api_error)
                .collect();
            warn!(operation, errors = errors.len(), "graphql operation returned errors");
            return Err(ClientError::Api(errors));
        }

        let mut data = self.data.ok_or(ClientError::MissingData { operation })?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or(ClientError::MissingData { operation })?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(&self, request: &GraphqlRequest, bearer: Option<&str>)
        -> Result<GraphqlResponse>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn execute(
        &self,
        request: &GraphqlRequest,
        bearer: Option<&str>,
    ) -> Result<GraphqlResponse> {
        debug!(
            operation = request.operation_name,
            authenticated = bearer.is_some(),
            "sending graphql request"
        );
        let mut builder = self.http.post(self.endpoint.clone()).json(request);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // GraphQL servers report most failures in a 200 body, but validation
        // failures may come back as 4xx with the same envelope.
        let parsed = serde_json::from_str::<GraphqlResponse>(&body);
        if !status.is_success() {
            return match parsed {
                Ok(parsed) if !parsed.errors.is_empty() => Ok(parsed),
                _ => Err(ClientError::Http {
                    status: status.as_u16(),
                    body,
                }),
            };
        }
        Ok(parsed?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_operation_name_in_camel_case() {
        let request = GraphqlRequest {
            query: "query Ping { ping }",
            operation_name: "Ping",
            variables: serde_json::json!({}),
        };
        let value = serde_json::to_value(&request).expect("json");
        assert_eq!(value["operationName"], "Ping");
        assert_eq!(value["query"], "query Ping { ping }");
    }

    #[test]
    fn errors_take_precedence_over_partial_data() {
        let response: GraphqlResponse = serde_json::from_value(serde_json::json!({
            "data": { "login": null },
            "errors": [{ "message": "Invalid credentials", "extensions": { "code": "UNAUTHENTICATED" } }]
        }))
        .expect("response");

        let err = response
            .into_field::<Value>("Login", "login")
            .expect_err("errors present");
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn nest_original_status_is_mapped() {
        let payload: GraphqlErrorPayload = serde_json::from_value(serde_json::json!({
            "message": "Department not found",
            "extensions": {
                "code": "INTERNAL_SERVER_ERROR",
                "originalError": { "statusCode": 404, "message": "Department not found" }
            }
        }))
        .expect("payload");
        assert_eq!(payload.to_api_error().code, ErrorCode::NotFound);
    }

    #[test]
    fn missing_field_is_reported_with_operation_name() {
        let response: GraphqlResponse =
            serde_json::from_value(serde_json::json!({ "data": {} })).expect("response");
        let err = response
            .into_field::<Value>("GetDepartments", "getDepartments")
            .expect_err("missing field");
        assert!(matches!(
            err,
            ClientError::MissingData {
                operation: "GetDepartments"
            }
        ));
    }
}
