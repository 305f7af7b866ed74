use axum::http::header;
use axum::http::HeaderMap;

/// Extract the credential of a `Bearer` Authorization header.
///
/// Returns `None` when the header is missing, not valid UTF-8, or uses another
/// scheme. The scheme is matched case-insensitively. An empty credential is
/// returned as `Some("")` and left for token validation to reject.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(credential.trim())
}
