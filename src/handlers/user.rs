//! 用户与管理员用户管理的 HTTP 处理器

use crate::{
    auth::middleware::{AdminUser, CurrentUser},
    error::AppError,
    middleware::AppState,
    models::user::*,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 当前用户信息
pub async fn get_current_user(
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserResponse::from(user)))
}

/// 列出所有用户（管理员）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_service.list_users().await?;

    let user_responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(user_responses))
}

/// 创建用户（管理员，可指定角色）
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.create_user(req, Some(&admin)).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// 删除用户（管理员，不能删除自己）
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete_user(id, &admin).await?;

    Ok(StatusCode::NO_CONTENT)
}
