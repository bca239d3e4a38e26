//! 认证服务：登录、令牌解析、管理员校验

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::{auth::*, user::*},
    repository::user_repo::UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct AuthService {
    users: UserRepository,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(db: SqlitePool, jwt_service: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        Self {
            users: UserRepository::new(db),
            jwt_service,
            hasher,
        }
    }

    /// 用户登录，签发访问令牌
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .authenticate_user(&req.username, &req.password)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %req.username, "Login failed");
                AppError::authentication("Incorrect username or password")
            })?;

        let access_token = self.jwt_service.generate_access_token(&user.username)?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_service.access_token_ttl(),
        })
    }

    /// 校验用户名和密码
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        // Argon2 是 CPU 密集型操作，放到阻塞线程池
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = user.hashed_password.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

        Ok(valid.then_some(user))
    }

    /// 必须认证：令牌缺失、无效或用户不存在都拒绝
    pub async fn authenticate(&self, token: Option<&str>) -> Result<User, AppError> {
        let token = token.ok_or(AppError::Unauthorized)?;

        let claims = self
            .jwt_service
            .decode_token(token)
            .ok_or_else(|| AppError::authentication("Invalid token"))?;

        self.users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(subject = %claims.sub, "Token subject no longer exists");
                AppError::authentication("User not found")
            })
    }

    /// 可选认证：任何失败都视为匿名，从不返回错误
    pub async fn authenticate_optional(&self, token: Option<&str>) -> Option<User> {
        let token = token?;
        let claims = self.jwt_service.decode_token(token)?;

        match self.users.find_by_username(&claims.sub).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Identity lookup failed, treating request as anonymous");
                None
            }
        }
    }

    /// 管理员校验：身份必须存在且为 ADMIN
    pub fn require_admin(identity: Option<User>) -> Result<User, AppError> {
        match identity {
            Some(user) if user.is_admin() => Ok(user),
            Some(user) => {
                tracing::warn!(user_id = user.id, "Non-admin attempted admin operation");
                Err(AppError::forbidden("Admin privileges required"))
            }
            None => Err(AppError::forbidden("Admin privileges required")),
        }
    }
}
