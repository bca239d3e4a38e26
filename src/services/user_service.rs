//! 用户服务：注册、管理员创建、列表与删除

use crate::{
    auth::password::PasswordHasher,
    config::SecurityConfig,
    error::AppError,
    models::user::{CreateUserRequest, User},
    repository::UserRepository,
    services::registration,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

pub struct UserService {
    users: UserRepository,
    hasher: PasswordHasher,
    security: Arc<SecurityConfig>,
}

impl UserService {
    pub fn new(db: SqlitePool, hasher: PasswordHasher, security: Arc<SecurityConfig>) -> Self {
        Self {
            users: UserRepository::new(db),
            hasher,
            security,
        }
    }

    /// 创建用户
    ///
    /// 先按注册策略确定角色，再依次检查邮箱、用户名冲突；
    /// 只有全部通过才写入一行。
    pub async fn create_user(
        &self,
        req: CreateUserRequest,
        actor: Option<&User>,
    ) -> Result<User, AppError> {
        req.validate()?;
        PasswordHasher::validate_password_policy(&req.password, &self.security)?;

        let count = self.users.count().await?;
        let role = match registration::resolve_role(
            count == 0,
            self.security.allow_registration,
            req.role,
            actor,
        ) {
            Ok(role) => role,
            Err(e) => {
                tracing::warn!(
                    username = %req.username,
                    actor = actor.map(|a| a.username.as_str()),
                    "Registration rejected: closed and no acting admin"
                );
                return Err(e);
            }
        };

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }
        if self.users.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::conflict("Username already taken"));
        }

        let hasher = self.hasher.clone();
        let password = req.password;
        let hashed_password = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .users
            .create(&req.email, &req.username, &hashed_password, role)
            .await
            .map_err(map_unique_violation)?;

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            role = %user.role,
            bootstrap = count == 0,
            created_by = actor.map(|a| a.id),
            "User created"
        );

        Ok(user)
    }

    /// 列出所有用户
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// 管理员删除用户，不允许删除自己
    pub async fn delete_user(&self, user_id: i64, acting_admin: &User) -> Result<(), AppError> {
        if user_id == acting_admin.id {
            return Err(AppError::BadRequest("Cannot delete your own account".to_string()));
        }

        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!(user_id, deleted_by = acting_admin.id, "User deleted");
        Ok(())
    }
}

/// 并发注册时由唯一约束兜底
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("users.email") {
                AppError::conflict("Email already registered")
            } else {
                AppError::conflict("Username already taken")
            };
        }
    }
    AppError::Database(e)
}
