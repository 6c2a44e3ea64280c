//! Wire payload types for the Looker REST API.

use serde::{Deserialize, Serialize};

/// Form body for `POST {host}/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub client_id: String,
    pub client_secret: String,
}

/// Subset of the login response the client consumes. Anything without a
/// usable `access_token` is an authentication failure.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// PATCH body for `api/3.0/datagroups/{id}`.
#[derive(Debug, Serialize)]
pub struct DatagroupStalenessRequest {
    pub stale_before: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_parses_access_token() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"access_token":"fancy-pancy-access-token"}"#)
                .expect("valid login body");
        assert_eq!(response.access_token, "fancy-pancy-access-token");
    }

    #[test]
    fn login_response_without_token_is_an_error() {
        let result = serde_json::from_str::<LoginResponse>(r#"{"expires_in":3600}"#);
        assert!(result.is_err());
    }

    #[test]
    fn staleness_request_serializes_the_watermark() {
        let body = DatagroupStalenessRequest {
            stale_before: 1_700_000_000,
        };
        let value = serde_json::to_value(&body).expect("serializable");
        assert_eq!(value, serde_json::json!({"stale_before": 1_700_000_000}));
    }
}
