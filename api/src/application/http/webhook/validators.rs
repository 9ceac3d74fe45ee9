use axum::http::HeaderMap;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Checks the secret Telegram echoes back on every webhook call. No configured secret
/// accepts every request.
pub fn verify_secret_token(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match headers.get(SECRET_TOKEN_HEADER).map(|v| v.to_str()) {
        Some(Ok(received)) if received == expected => Ok(()),
        Some(_) => Err(ApiError::Unauthorized("invalid secret token".to_string())),
        None => Err(ApiError::Unauthorized("missing secret token".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn test_matching_secret() {
        assert_eq!(verify_secret_token(&headers("s3cret"), Some("s3cret")), Ok(()));
    }

    #[test]
    fn test_wrong_or_missing_secret() {
        assert!(matches!(
            verify_secret_token(&headers("nope"), Some("s3cret")),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            verify_secret_token(&HeaderMap::new(), Some("s3cret")),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_no_secret_configured() {
        assert_eq!(verify_secret_token(&HeaderMap::new(), None), Ok(()));
    }
}
