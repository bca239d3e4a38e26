//! JWT 令牌签发与校验
//! 访问令牌以用户名作为 subject

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 访问令牌声明
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 主体（用户名）
    pub sub: String,

    /// 签发时间
    pub iat: i64,

    /// 过期时间
    pub exp: i64,

    /// 令牌唯一标识
    pub jti: String,
}

/// JWT 服务
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_exp_secs: u64,
}

impl JwtService {
    /// 从配置创建 JWT 服务
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 要求密钥至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_exp_secs: config.security.access_token_exp_secs,
        })
    }

    /// 新签发访问令牌的有效期（秒）
    pub fn access_token_ttl(&self) -> u64 {
        self.access_token_exp_secs
    }

    /// 为用户名签发访问令牌
    pub fn generate_access_token(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.access_token_exp_secs as i64);

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// 解析令牌，失败即拒绝
    ///
    /// 格式错误、过期、签名不符都返回 `None`，
    /// 调用方一律按未认证处理。
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if !data.claims.sub.is_empty() => Some(data.claims),
            Ok(_) => {
                tracing::debug!("Token has empty subject");
                None
            }
            Err(e) => {
                tracing::debug!("Token validation failed: {:?}", e.kind());
                None
            }
        }
    }
}
