use std::collections::HashMap;

use reqwest::{header::HeaderMap, Url};
use serde_json::Value;

use crate::{ApiError, ApiResponse, ConfigError, Payload};

/// Status, headers and body text of one received response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

pub(crate) fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };
    let url = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Joins `path` onto `base_url` with exactly one `/` between them.
///
/// Absolute `http(s)://` paths bypass the base URL.
pub(crate) fn resolve_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let joined = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else if path.is_empty() {
        base_url.trim().to_owned()
    } else {
        format!(
            "{}/{}",
            base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };
    Url::parse(&joined)
        .map_err(|err| ApiError::invalid_request(format!("invalid request url '{joined}': {err}")))
}

pub(crate) fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::with_capacity(headers.len());
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        out.entry(name.as_str().to_owned())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_owned());
    }
    out
}

/// Decodes a response body as UTF-8, replacing invalid sequences with U+FFFD.
pub(crate) fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub(crate) fn decode_payload(body: String) -> Payload {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => Payload::Json(value),
        Err(_) => Payload::Text(body),
    }
}

pub(crate) fn decode_success(raw: RawResponse) -> ApiResponse {
    ApiResponse {
        data: decode_payload(raw.body),
        status: raw.status,
        headers: raw.headers,
        success: true,
    }
}

/// Builds an [`ApiError`] from an error response.
///
/// Unparseable bodies fall back to the default message and code.
pub(crate) fn decode_error(raw: &RawResponse) -> ApiError {
    let parsed = serde_json::from_str::<Value>(&raw.body).ok();

    let message = parsed
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(message_text)
        .unwrap_or_else(|| format!("Request failed with status {}", raw.status));

    let code = parsed
        .as_ref()
        .and_then(|body| body.get("code"))
        .and_then(Value::as_str)
        .unwrap_or(ApiError::UNKNOWN_ERROR)
        .to_owned();

    let details = parsed.map(|body| match body {
        Value::Object(mut map) if map.contains_key("details") => {
            map.remove("details").unwrap_or(Value::Null)
        }
        other => other,
    });

    ApiError {
        message,
        status: raw.status,
        code,
        details,
    }
}

// NestJS validation errors carry `message` as an array of strings.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use reqwest::header::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::{
        body_text, collect_headers, decode_error, decode_payload, resolve_url,
        validate_base_url, RawResponse,
    };
    use crate::{ApiError, ConfigError, Payload};

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HashMap::new(),
            body: body.to_owned(),
        }
    }

    #[test]
    fn resolve_joins_with_single_slash() {
        let expected = "https://api.example.com/v1/users";
        assert_eq!(
            resolve_url("https://api.example.com/v1", "/users").unwrap().as_str(),
            expected
        );
        assert_eq!(
            resolve_url("https://api.example.com/v1/", "users").unwrap().as_str(),
            expected
        );
        assert_eq!(
            resolve_url("https://api.example.com/v1/", "/users").unwrap().as_str(),
            expected
        );
    }

    #[test]
    fn resolve_keeps_absolute_paths_and_empty_path() {
        assert_eq!(
            resolve_url("https://api.example.com", "http://other.test/x")
                .unwrap()
                .as_str(),
            "http://other.test/x"
        );
        assert_eq!(
            resolve_url("https://api.example.com/v1", "").unwrap().as_str(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn resolve_reports_invalid_request() {
        let err = resolve_url("not a url", "/users").expect_err("must not parse");
        assert_eq!(err.code, ApiError::INVALID_REQUEST);
        assert_eq!(err.status, 0);
    }

    #[test]
    fn validate_rejects_relative_and_non_http() {
        assert!(validate_base_url("https://api.example.com").is_ok());
        assert!(matches!(
            validate_base_url("/relative"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            validate_base_url("ftp://files.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn payload_falls_back_to_raw_text() {
        assert_eq!(
            decode_payload(r#"{"message":"success"}"#.to_owned()),
            Payload::Json(json!({"message": "success"}))
        );
        assert_eq!(
            decode_payload("<html>ok</html>".to_owned()),
            Payload::Text("<html>ok</html>".to_owned())
        );
        assert_eq!(decode_payload(String::new()), Payload::Text(String::new()));
    }

    #[test]
    fn body_text_keeps_utf8_and_replaces_invalid_bytes() {
        assert_eq!(body_text("naïve ✓".as_bytes()), "naïve ✓");
        assert_eq!(body_text(&[b'o', b'k', 0xff, b'!']), "ok\u{fffd}!");
    }

    #[test]
    fn error_extracts_message_code_and_details() {
        let err = decode_error(&raw(
            400,
            r#"{"message":"Bad Request","code":"VALIDATION_ERROR","details":{"field":"email"}}"#,
        ));
        assert_eq!(err.message, "Bad Request");
        assert_eq!(err.status, 400);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.details, Some(json!({"field": "email"})));
    }

    #[test]
    fn error_without_details_keeps_whole_body() {
        let err = decode_error(&raw(
            400,
            r#"{"statusCode":400,"message":["email must be an email","name should not be empty"],"error":"Bad Request"}"#,
        ));
        assert_eq!(
            err.message,
            "email must be an email; name should not be empty"
        );
        assert_eq!(err.code, ApiError::UNKNOWN_ERROR);
        assert_eq!(
            err.details.as_ref().and_then(|d| d.get("error")),
            Some(&json!("Bad Request"))
        );
    }

    #[test]
    fn malformed_error_body_uses_defaults() {
        let err = decode_error(&raw(502, "<html>Bad Gateway</html>"));
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.status, 502);
        assert_eq!(err.code, ApiError::UNKNOWN_ERROR);
        assert_eq!(err.details, None);
    }

    #[test]
    fn non_string_code_is_ignored() {
        let err = decode_error(&raw(409, r#"{"message":"Conflict","code":409}"#));
        assert_eq!(err.message, "Conflict");
        assert_eq!(err.code, ApiError::UNKNOWN_ERROR);
    }

    #[test]
    fn repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let collected = collect_headers(&headers);
        assert_eq!(collected["set-cookie"], "a=1, b=2");
        assert_eq!(collected["content-type"], "application/json");
    }
}
