//! Classification of raw Last.fm response bodies.

use serde::Deserialize;
use serde_json::Value;

/// A response body, classified once so callers can match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Empty body or a JSON value that carries nothing (`null`, `false`, `0`, `""`).
    Empty,
    /// `{"session": {"name": ..., "key": ...}}` from `auth.getSession`.
    AuthSuccess { name: String, key: String },
    /// `{"error": code, "message": ...}`.
    ServiceError { code: u32, message: String },
    /// Any other JSON payload.
    Payload(Value),
    /// The body is not JSON at all.
    Malformed(String),
}

#[derive(Deserialize)]
struct SessionEnvelope {
    session: SessionBody,
}

#[derive(Deserialize)]
struct SessionBody {
    name: String,
    key: String,
}

// The service sends numeric codes, but older endpoints quote them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorCode {
    Number(u32),
    Text(String),
}

impl ErrorCode {
    fn value(&self) -> u32 {
        match self {
            ErrorCode::Number(code) => *code,
            ErrorCode::Text(code) => code.trim().parse().unwrap_or(0),
        }
    }
}

impl ApiResponse {
    pub fn parse(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return ApiResponse::Empty;
        }

        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => return ApiResponse::Malformed(e.to_string()),
        };

        if is_falsy(&value) {
            return ApiResponse::Empty;
        }

        if value.get("session").is_some() {
            return match SessionEnvelope::deserialize(&value) {
                Ok(envelope) => ApiResponse::AuthSuccess {
                    name: envelope.session.name,
                    key: envelope.session.key,
                },
                Err(_) => ApiResponse::Payload(value),
            };
        }

        // Any truthy `error` marks a failure, whatever shape the code has.
        if let Some(error) = value.get("error").filter(|error| !is_falsy(error)) {
            let code = ErrorCode::deserialize(error)
                .map(|code| code.value())
                .unwrap_or(0);
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return ApiResponse::ServiceError { code, message };
        }

        ApiResponse::Payload(value)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::ServiceError { .. })
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let response = ApiResponse::parse(
            r#"{"session":{"name":"username","key":"sessionkey","subscriber":"0"}}"#,
        );
        assert_eq!(
            response,
            ApiResponse::AuthSuccess {
                name: "username".to_string(),
                key: "sessionkey".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_error() {
        let response = ApiResponse::parse(
            r#"{"error":13,"message":"Invalid method signature supplied"}"#,
        );
        assert_eq!(
            response,
            ApiResponse::ServiceError {
                code: 13,
                message: "Invalid method signature supplied".to_string(),
            }
        );
        assert!(response.is_error());
    }

    #[test]
    fn test_parse_quoted_error_code() {
        let response = ApiResponse::parse(r#"{"error":"9","message":"Invalid session key"}"#);
        assert_eq!(
            response,
            ApiResponse::ServiceError {
                code: 9,
                message: "Invalid session key".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_error_with_unusual_code() {
        for body in [
            r#"{"error":true,"message":"Boom"}"#,
            r#"{"error":{"code":6},"message":"Boom"}"#,
            r#"{"error":-1,"message":"Boom"}"#,
            r#"{"error":2.5,"message":"Boom"}"#,
        ] {
            assert_eq!(
                ApiResponse::parse(body),
                ApiResponse::ServiceError {
                    code: 0,
                    message: "Boom".to_string(),
                },
                "body: {body}"
            );
        }

        let response = ApiResponse::parse(r#"{"error":"oops"}"#);
        assert_eq!(
            response,
            ApiResponse::ServiceError {
                code: 0,
                message: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_falsy_error_is_not_a_failure() {
        assert!(matches!(
            ApiResponse::parse(r#"{"error":0,"scrobbles":{}}"#),
            ApiResponse::Payload(_)
        ));
        assert!(matches!(
            ApiResponse::parse(r#"{"error":null,"scrobbles":{}}"#),
            ApiResponse::Payload(_)
        ));
    }

    #[test]
    fn test_parse_empty_and_falsy() {
        assert_eq!(ApiResponse::parse(""), ApiResponse::Empty);
        assert_eq!(ApiResponse::parse("  \n"), ApiResponse::Empty);
        assert_eq!(ApiResponse::parse("null"), ApiResponse::Empty);
        assert_eq!(ApiResponse::parse("false"), ApiResponse::Empty);
        assert_eq!(ApiResponse::parse("0"), ApiResponse::Empty);
        assert_eq!(ApiResponse::parse(r#""""#), ApiResponse::Empty);
    }

    #[test]
    fn test_parse_other_payload() {
        let response = ApiResponse::parse(
            r##"{"recenttracks":{"track":[{"name":"Run To Your Grave","artist":{"#text":"The Mae Shi"}}]}}"##,
        );
        assert!(matches!(response, ApiResponse::Payload(_)));

        // a session object without a key is not a successful authorisation
        let response = ApiResponse::parse(r#"{"session":{"name":"username"}}"#);
        assert!(matches!(response, ApiResponse::Payload(_)));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            ApiResponse::parse("<html>502 Bad Gateway</html>"),
            ApiResponse::Malformed(_)
        ));
    }
}
