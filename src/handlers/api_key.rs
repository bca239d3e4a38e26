//! 当前用户 API 密钥的 HTTP 处理器

use crate::{
    auth::middleware::CurrentUser,
    error::AppError,
    middleware::AppState,
    models::api_key::*,
    repository::ApiKeyRepository,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 列出有效密钥
pub async fn list_api_keys(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let repo = ApiKeyRepository::new(state.db.clone());
    let keys = repo.list_active(user.id).await?;

    let responses: Vec<ApiKeyResponse> = keys.into_iter().map(ApiKeyResponse::from).collect();

    Ok(Json(responses))
}

/// 创建或更新密钥
pub async fn upsert_api_key(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ApiKeyRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = ApiKeyRepository::new(state.db.clone());
    let outcome = repo
        .upsert(user.id, &req.service_name, &req.api_key, req.base_url.as_deref())
        .await?;

    tracing::info!(
        user_id = user.id,
        service_name = %req.service_name,
        outcome = ?outcome,
        "API key stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": outcome.message(&req.service_name) })),
    ))
}

/// 按服务名获取有效密钥
pub async fn get_api_key(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(service_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ApiKeyRepository::new(state.db.clone());
    let key = repo
        .get_active(user.id, &service_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No active API key found for {}", service_name)))?;

    Ok(Json(ApiKeyResponse::from(key)))
}

/// 删除密钥
pub async fn delete_api_key(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(service_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ApiKeyRepository::new(state.db.clone());
    if !repo.delete(user.id, &service_name).await? {
        return Err(AppError::NotFound(format!("API key for {} not found", service_name)));
    }

    tracing::info!(user_id = user.id, service_name = %service_name, "API key deleted");

    Ok(StatusCode::NO_CONTENT)
}
