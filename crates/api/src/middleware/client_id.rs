//! Caller identification via the `X-Client-ID` header.
//!
//! The client identifier is self-asserted by the calling service and is not
//! authenticated. Any caller presenting one may read every stored event.

use audit_trail_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;

/// Header carrying the caller's client identifier.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Client identifier extracted from the `X-Client-ID` header.
///
/// Use this as an extractor parameter in any handler that requires the
/// header; a missing or empty value is rejected with `400 Client ID is
/// required`.
///
/// ```ignore
/// async fn my_handler(client: ClientId) -> AppResult<Json<()>> {
///     tracing::info!(client_id = %client.as_str(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Read the client identifier from raw request headers.
    ///
    /// Only an absent or empty value is rejected. Non-ASCII bytes are decoded
    /// as UTF-8, with invalid sequences replaced.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CoreError> {
        headers
            .get(CLIENT_ID_HEADER)
            .filter(|v| !v.is_empty())
            .map(|v| ClientId(String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .ok_or_else(CoreError::missing_client_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientId::from_headers(&parts.headers)?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_header_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Client-ID", HeaderValue::from_static("billing-service"));

        let client = ClientId::from_headers(&headers).unwrap();
        assert_eq!(client.as_str(), "billing-service");
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = ClientId::from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Client ID is required");
    }

    #[test]
    fn empty_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static(""));

        assert_matches!(
            ClientId::from_headers(&headers),
            Err(CoreError::MissingField { field: "Client ID" })
        );
    }

    #[test]
    fn non_ascii_header_is_decoded() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CLIENT_ID_HEADER,
            HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap(),
        );

        let client = ClientId::from_headers(&headers).unwrap();
        assert_eq!(client.as_str(), "café");
    }
}
