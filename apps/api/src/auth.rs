//! Access-token extraction. The OAuth dance itself happens outside this service;
//! handlers only need the resulting GitHub token.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::errors::AppError;

/// The caller's GitHub OAuth token, taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(|token| AccessToken(token.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/user/me");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_bearer_token_is_extracted() {
        let mut parts = parts_with(Some("Bearer gho_abc123"));
        let AccessToken(token) = AccessToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token, "gho_abc123");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut parts = parts_with(None);
        let result = AccessToken::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_blank_or_non_bearer_token_is_unauthorized() {
        for value in ["Bearer   ", "Basic dXNlcjpwYXNz"] {
            let mut parts = parts_with(Some(value));
            let result = AccessToken::from_request_parts(&mut parts, &()).await;
            assert!(matches!(result, Err(AppError::Unauthorized)), "{value}");
        }
    }
}
