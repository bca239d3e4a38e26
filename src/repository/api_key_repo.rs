//! API 密钥仓库
//! 所有查询都限定在所属用户范围内

use crate::{
    error::AppError,
    models::api_key::{ApiKey, UpsertOutcome},
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ApiKeyRepository {
    db: SqlitePool,
}

impl ApiKeyRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// 列出用户的有效密钥
    pub async fn list_active(&self, user_id: i64) -> Result<Vec<ApiKey>, AppError> {
        let keys = sqlx::query_as::<_, ApiKey>(
            "SELECT * FROM api_keys WHERE user_id = ? AND is_active = 1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(keys)
    }

    /// 按服务名查找有效密钥
    pub async fn get_active(&self, user_id: i64, service_name: &str) -> Result<Option<ApiKey>, AppError> {
        let key = sqlx::query_as::<_, ApiKey>(
            "SELECT * FROM api_keys WHERE user_id = ? AND service_name = ? AND is_active = 1",
        )
        .bind(user_id)
        .bind(service_name)
        .fetch_optional(&self.db)
        .await?;

        Ok(key)
    }

    /// 创建或覆盖 (user, service_name) 对应的密钥，覆盖时强制重新激活
    ///
    /// 单条 UPSERT 语句完成，并发写同一服务不会触发唯一约束冲突。
    /// 插入时 created_at 等于本次绑定的时间戳，覆盖时保留原值，据此区分结果。
    pub async fn upsert(
        &self,
        user_id: i64,
        service_name: &str,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<UpsertOutcome, AppError> {
        let now = chrono::Utc::now();

        let created: bool = sqlx::query_scalar(
            r#"
            INSERT INTO api_keys (user_id, service_name, api_key, base_url, is_active, created_at)
            VALUES (?, ?, ?, ?, 1, ?)
            ON CONFLICT (user_id, service_name) DO UPDATE
            SET api_key = excluded.api_key, base_url = excluded.base_url, is_active = 1
            RETURNING created_at = ?
            "#,
        )
        .bind(user_id)
        .bind(service_name)
        .bind(api_key)
        .bind(base_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(if created {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }

    /// 删除密钥（不区分是否有效）
    pub async fn delete(&self, user_id: i64, service_name: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE user_id = ? AND service_name = ?")
            .bind(user_id)
            .bind(service_name)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
