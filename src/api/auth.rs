//! Acting-user extraction.
//!
//! Authentication happens upstream; the authenticated user id arrives in the
//! `X-User-Id` header. Handlers that modify owned data take [`ActingUser`],
//! which rejects the request with 401 when the header is missing.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;

use super::ApiError;
use crate::domain::UserId;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads a non-blank user id from the request headers.
#[must_use]
pub fn user_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(UserId::from)
}

fn record_user(user: &UserId) {
    tracing::Span::current().record("user_id", user.as_str());
}

/// The authenticated caller. Required.
#[derive(Debug, Clone)]
pub struct ActingUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing X-User-Id header"))?;
        record_user(&user);
        Ok(Self(user))
    }
}

/// The caller when known. Anonymous requests are accepted.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserId>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_from_headers(&parts.headers);
        if let Some(user) = &user {
            record_user(user);
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_user_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(user_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(user_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static(" user-1 "));
        assert_eq!(
            user_from_headers(&headers).map(UserId::into_inner),
            Some("user-1".to_string())
        );
    }
}
