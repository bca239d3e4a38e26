//! 菜谱提取请求

use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_target_language() -> String {
    "english".to_string()
}

/// 待提取菜谱的视频
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VideoRequest {
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,

    #[serde(default = "default_target_language")]
    pub target_language: String,
}
