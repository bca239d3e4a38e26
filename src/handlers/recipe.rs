//! 菜谱提取转发

use crate::{
    auth::middleware::CurrentUser, error::AppError, middleware::AppState,
    models::recipe::VideoRequest,
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 将视频地址转发给提取服务
///
/// 任何失败都折叠为 400，保留原始错误信息但丢弃错误类别。
pub async fn extract_recipe(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<VideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let recipe = state.recipe_client.extract(&req).await.map_err(|e| {
        tracing::warn!(user_id = user.id, error = %e, "Recipe extraction failed");
        AppError::BadRequest(e.to_string())
    })?;

    Ok(Json(recipe))
}
