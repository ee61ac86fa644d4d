//! Single-shot GraphQL transport.
//!
//! [`HttpBackend`] posts one [`SearchPayload`] and hands the body to
//! [`parse_response`]. The [`SearchBackend`] trait is the seam the
//! pipeline is tested through.

use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::errors::SearchError;
use crate::query::SearchPayload;
use crate::types::SearchResultItem;

/// Path of the GraphQL endpoint, relative to the domain.
pub const GQL_PATH: &str = "/api/v1/gql/query";

/// Anything that can answer a search payload with result items.
pub trait SearchBackend {
    fn search(&self, payload: &SearchPayload) -> Result<Vec<SearchResultItem>, SearchError>;
}

/// Blocking HTTP backend built on `ureq`.
pub struct HttpBackend {
    agent: Agent,
    endpoint: String,
    token: String,
}

impl HttpBackend {
    /// `domain` must already be normalized (scheme, no trailing slash).
    pub fn new(domain: &str, token: &str) -> Self {
        // Error statuses are read like any other body so a service-side
        // `message` still reaches the user.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            endpoint: format!("{domain}{GQL_PATH}"),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpBackend {
    fn search(&self, payload: &SearchPayload) -> Result<Vec<SearchResultItem>, SearchError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| SearchError::ResponseFormat(format!("failed to encode query: {e}")))?;

        debug!(endpoint = %self.endpoint, bytes = body.len(), "posting search query");
        let mut response = self
            .agent
            .post(self.endpoint.as_str())
            .header("API-Token", self.token.as_str())
            .header("Content-Type", "application/json; charset=utf-8")
            .send(&body[..])?;

        let status = response.status().as_u16();
        let bytes = response.body_mut().read_to_vec()?;
        debug!(status, bytes = bytes.len(), "received search response");
        parse_response(&bytes, status)
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(default, rename = "searchV2")]
    search_v2: Option<SearchV2>,
}

#[derive(Deserialize)]
struct SearchV2 {
    #[serde(default)]
    items: Option<Vec<SearchResultItem>>,
}

/// Turn a response body into result items.
///
/// * Top-level `message` key: [`SearchError::Remote`], whatever else is
///   present and whatever the status.
/// * Non-2xx status otherwise (JSON or not): [`SearchError::Remote`] naming
///   the status.
/// * Body that is not JSON (or not UTF-8) on a 2xx: [`SearchError::ResponseFormat`].
/// * Missing `data.searchV2.items` (at any level, or `null`): empty list.
pub fn parse_response(body: &[u8], status: u16) -> Result<Vec<SearchResultItem>, SearchError> {
    let success = (200..300).contains(&status);
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !success => return Err(unexpected_status(status)),
        Err(_) => {
            return Err(SearchError::ResponseFormat(
                "Failed to parse JSON response".to_string(),
            ));
        }
    };

    if let Some(message) = value.get("message") {
        let message = match message.as_str() {
            Some(s) => s.to_string(),
            None => message.to_string(),
        };
        return Err(SearchError::Remote(message));
    }

    if !success {
        return Err(unexpected_status(status));
    }

    if !value.is_object() {
        return Ok(Vec::new());
    }
    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|e| SearchError::ResponseFormat(format!("unexpected response shape: {e}")))?;
    Ok(envelope
        .data
        .and_then(|d| d.search_v2)
        .and_then(|s| s.items)
        .unwrap_or_default())
}

fn unexpected_status(status: u16) -> SearchError {
    SearchError::Remote(format!("unexpected HTTP status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemType;

    #[test]
    fn items_extracted_in_order() {
        let body = r#"{"data":{"searchV2":{"items":[
            {"type":"dashboards","name":"CPU","slug":"cpu-1","team":{"name":"SRE","slug":"sre"}},
            {"type":"teams","name":"SRE","slug":"sre"}
        ],"totalCount":2}}}"#;
        let items = parse_response(body.as_bytes(), 200).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_type, ItemType::Dashboards);
        assert_eq!(items[0].slug, "cpu-1");
        assert_eq!(items[1].item_type, ItemType::Teams);
    }

    #[test]
    fn message_is_remote_error_even_with_data() {
        let body = r#"{"message":"invalid token","data":{"searchV2":{"items":[]}}}"#;
        let err = parse_response(body.as_bytes(), 200).unwrap_err();
        assert!(matches!(err, SearchError::Remote(_)));
        assert_eq!(err.to_string(), "invalid token");
    }

    #[test]
    fn message_on_error_status_is_surfaced() {
        let err = parse_response(br#"{"code":16,"message":"unauthenticated"}"#, 401).unwrap_err();
        assert_eq!(err.to_string(), "unauthenticated");
    }

    #[test]
    fn error_status_without_message() {
        let err = parse_response(b"{}", 503).unwrap_err();
        assert!(matches!(err, SearchError::Remote(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn non_json_body_is_format_error() {
        let err = parse_response(b"<html>hello</html>", 200).unwrap_err();
        assert!(matches!(err, SearchError::ResponseFormat(_)));
        assert_eq!(err.to_string(), "Failed to parse JSON response");
    }

    #[test]
    fn non_utf8_body_is_format_error() {
        let err = parse_response(&[0xff, 0xfe, b'{', b'}'], 200).unwrap_err();
        assert!(matches!(err, SearchError::ResponseFormat(_)));
        assert_eq!(err.to_string(), "Failed to parse JSON response");
    }

    #[test]
    fn gateway_page_keeps_status() {
        let err = parse_response(b"<html>Bad Gateway</html>", 502).unwrap_err();
        assert!(matches!(err, SearchError::Remote(_)));
        assert_eq!(err.to_string(), "unexpected HTTP status 502");
    }

    #[test]
    fn missing_path_components_yield_empty() {
        for body in [
            "{}",
            r#"{"data":null}"#,
            r#"{"data":{}}"#,
            r#"{"data":{"searchV2":null}}"#,
            r#"{"data":{"searchV2":{}}}"#,
            r#"{"data":{"searchV2":{"items":null}}}"#,
        ] {
            assert!(parse_response(body.as_bytes(), 200).unwrap().is_empty(), "body {body}");
        }
    }

    #[test]
    fn endpoint_appends_gql_path() {
        let backend = HttpBackend::new("https://acme.chronosphere.io", "t");
        assert_eq!(
            backend.endpoint(),
            "https://acme.chronosphere.io/api/v1/gql/query"
        );
    }
}
