//! 用户的外部服务凭据

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 已存储的 API 密钥记录
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApiKey {
    pub id: i64,
    pub user_id: i64,
    pub service_name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 创建或更新请求
#[derive(Debug, Deserialize, Validate)]
pub struct ApiKeyRequest {
    #[validate(length(min = 1, max = 100, message = "service_name must be 1-100 characters"))]
    pub service_name: String,

    #[validate(length(min = 1, message = "api_key must not be empty"))]
    pub api_key: String,

    #[validate(url(message = "base_url must be a valid URL"))]
    pub base_url: Option<String>,
}

/// API 密钥响应，从不返回密钥本身
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: i64,
    pub service_name: String,
    pub base_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            service_name: key.service_name,
            base_url: key.base_url,
            is_active: key.is_active,
            created_at: key.created_at,
        }
    }
}

/// 按 (user, service_name) 写入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn message(&self, service_name: &str) -> String {
        match self {
            UpsertOutcome::Created => format!("{} API key created successfully", service_name),
            UpsertOutcome::Updated => format!("{} API key updated successfully", service_name),
        }
    }
}
