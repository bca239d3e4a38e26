//! 外部菜谱提取服务客户端

use crate::{config::RecipeConfig, error::AppError, models::recipe::VideoRequest};
use std::time::Duration;

/// 调用提取服务失败
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("Recipe service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Recipe service returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

pub struct RecipeClient {
    http: reqwest::Client,
    service_url: String,
}

impl RecipeClient {
    pub fn from_config(config: &RecipeConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            service_url: config.service_url.clone(),
        })
    }

    /// 将视频转发给提取服务，原样返回其 JSON
    pub async fn extract(&self, req: &VideoRequest) -> Result<serde_json::Value, RecipeError> {
        tracing::info!(
            url = %req.url,
            target_language = %req.target_language,
            "Forwarding recipe extraction request"
        );

        let response = self.http.post(&self.service_url).json(req).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecipeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}
