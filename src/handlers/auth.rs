//! 认证相关的 HTTP 处理器

use crate::{
    auth::middleware::MaybeUser,
    error::AppError,
    middleware::AppState,
    models::{auth::LoginRequest, user::*},
};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use std::sync::Arc;

/// 登录表单，同时接受 urlencoded 与 multipart/form-data 两种编码
pub struct LoginForm(pub LoginRequest);

impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(login) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(LoginForm(login));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut username = None;
        let mut password = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;

            match name.as_str() {
                "username" => username = Some(value),
                "password" => password = Some(value),
                _ => {}
            }
        }

        match (username, password) {
            (Some(username), Some(password)) => Ok(LoginForm(LoginRequest { username, password })),
            _ => Err(AppError::Validation(
                "username and password are required".to_string(),
            )),
        }
    }
}

/// 注册（开放注册或由已登录管理员代为创建）
pub async fn register(
    State(state): State<Arc<AppState>>,
    MaybeUser(actor): MaybeUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.create_user(req, actor.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// 登录（表单提交 username/password）
pub async fn login(
    State(state): State<Arc<AppState>>,
    LoginForm(req): LoginForm,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}
