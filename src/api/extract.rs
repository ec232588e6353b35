//! Request body extraction.
//!
//! Accepts JSON and URL-encoded form bodies for the same endpoint.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body extractor that parses JSON or URL-encoded form data.
///
/// Form bodies are recognised by their content type; everything else is
/// parsed as JSON. An empty body parses as `{}`.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
            return Ok(Payload(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(Payload)
            .map_err(|err| ApiError::InvalidRequest(format!("Invalid JSON body: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUserRequest;
    use axum::body::Body;

    async fn extract(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<CreateUserRequest, ApiError> {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/user");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        Payload::<CreateUserRequest>::from_request(req, &())
            .await
            .map(|Payload(value)| value)
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = extract(Some("application/json"), r#"{"username":"u1"}"#)
            .await
            .unwrap();
        assert_eq!(req.username.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_json_without_content_type() {
        let req = extract(None, r#"{"email":"a@b.com"}"#).await.unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = extract(
            Some("application/x-www-form-urlencoded"),
            "username=u1&firstname=A&lastname=B&email=a%40b.com",
        )
        .await
        .unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
        assert!(req.into_new_user().is_some());
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        let req = extract(None, "").await.unwrap();
        assert!(req.username.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let result = extract(Some("application/json"), r#"{"invalid json"#).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
