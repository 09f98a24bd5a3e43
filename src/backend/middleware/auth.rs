//! Trusted Identity Extraction
//!
//! Authentication and session management live in a separate service; by the
//! time a request reaches this backend, the API gateway has verified the
//! caller and stamped the request with an `x-user-id` header. The extractor
//! here only reads that header back.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::backend::error::ApiError;

/// The authenticated caller, as asserted by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct TrustedUser(pub Uuid);

impl<S> FromRequestParts<S> for TrustedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .filter(|id| !id.is_nil())
            .ok_or(ApiError::MissingIdentity)?;

        Ok(TrustedUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<TrustedUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("x-user-id", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        TrustedUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_valid_user_id() {
        let id = Uuid::new_v4();
        let user = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(user.0, id);
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        assert!(matches!(extract(None).await, Err(ApiError::MissingIdentity)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_header() {
        assert!(matches!(
            extract(Some("not-a-uuid")).await,
            Err(ApiError::MissingIdentity)
        ));
    }

    #[tokio::test]
    async fn test_rejects_nil_uuid() {
        assert!(matches!(
            extract(Some("00000000-0000-0000-0000-000000000000")).await,
            Err(ApiError::MissingIdentity)
        ));
    }
}
