//! 请求守卫：将 Bearer 令牌解析为用户身份
//!
//! - [`CurrentUser`]：未认证请求返回 401
//! - [`MaybeUser`]：从不拒绝，任何失败都视为 `None`
//! - [`AdminUser`]：基于 `MaybeUser`，非管理员一律 403

use crate::{error::AppError, middleware::AppState, models::user::User, services::AuthService};
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use std::convert::Infallible;
use std::sync::Arc;

/// 已认证用户（必须）
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 可选身份，拒绝类型为 `Infallible`
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

/// 已认证管理员
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// 从 Authorization 头提取 Bearer 令牌
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers);
        state.auth_service.authenticate(token).await.map(CurrentUser)
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers);
        Ok(MaybeUser(state.auth_service.authenticate_optional(token).await))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(identity) = match MaybeUser::from_request_parts(parts, state).await {
            Ok(identity) => identity,
            Err(never) => match never {},
        };
        AuthService::require_admin(identity).map(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        assert_eq!(extract_token(&headers), Some("test_token_123"));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "InvalidFormat".parse().unwrap());
        assert!(extract_token(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn test_extract_token_empty_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer    ".parse().unwrap());
        assert!(extract_token(&headers).is_none());
    }
}
