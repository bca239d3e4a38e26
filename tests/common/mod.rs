//! 测试公共模块
//! 提供测试配置、内存数据库和请求辅助函数

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jarit::{
    auth::password::PasswordHasher,
    config::{
        AppConfig, CorsConfig, DatabaseConfig, LoggingConfig, RecipeConfig, SecurityConfig,
        ServerConfig,
    },
    db,
    middleware::AppState,
    models::{api_key::ApiKey, user::UserRole},
};
use secrecy::Secret;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "TestPass123";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new("sqlite::memory:".to_string()),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            access_token_exp_secs: 300,
            password_min_length: 8,
            // 测试中使用低开销参数
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            password_hash_parallelism: 1,
            allow_registration: false,
        },
        cors: CorsConfig {
            allowed_origin: "http://localhost".to_string(),
        },
        recipe: RecipeConfig {
            service_url: "http://127.0.0.1:9/extract".to_string(),
            timeout_secs: 5,
        },
    }
}

/// 初始化内存测试数据库
pub async fn setup_test_db(config: &AppConfig) -> SqlitePool {
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to create test database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// 创建测试应用状态
pub fn create_test_app_state(config: AppConfig, pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(config, pool).expect("Failed to build app state"))
}

/// 一步构建状态和路由
pub async fn setup_app(config: AppConfig) -> (Arc<AppState>, Router) {
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(config, pool);
    let app = jarit::routes::create_router(state.clone());
    (state, app)
}

/// 直接写库创建测试用户，绕过注册策略
pub async fn create_test_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    role: UserRole,
) -> i64 {
    let hasher = PasswordHasher::from_config(&create_test_config().security).unwrap();
    let password_hash = hasher.hash(TEST_PASSWORD).unwrap();

    sqlx::query_scalar(
        r#"
        INSERT INTO users (email, username, hashed_password, role, is_active, created_at)
        VALUES (?, ?, ?, ?, 1, ?)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(username)
    .bind(&password_hash)
    .bind(role)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .expect("Failed to create test user")
}

/// 为用户签发访问令牌
pub fn token_for(state: &AppState, username: &str) -> String {
    state
        .jwt_service
        .generate_access_token(username)
        .expect("Failed to issue token")
}

/// 统计用户数
pub async fn count_users(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// 发送请求，返回状态码和 JSON 响应体（无响应体时为 Null）
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// 表单登录，返回状态码和 JSON 响应体
pub async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let form = format!("username={}&password={}", username, password);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// 统计用户的全部密钥（含无效）
pub async fn count_api_keys(pool: &SqlitePool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM api_keys WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// 直接修改密钥的有效状态
pub async fn set_api_key_active(pool: &SqlitePool, user_id: i64, service_name: &str, active: bool) {
    let result = sqlx::query("UPDATE api_keys SET is_active = ? WHERE user_id = ? AND service_name = ?")
        .bind(active)
        .bind(user_id)
        .bind(service_name)
        .execute(pool)
        .await
        .unwrap();
    assert_eq!(result.rows_affected(), 1, "api key {} not found", service_name);
}

/// 读取存储的密钥（不区分是否有效）
pub async fn find_api_key(pool: &SqlitePool, user_id: i64, service_name: &str) -> Option<ApiKey> {
    sqlx::query_as::<_, ApiKey>("SELECT * FROM api_keys WHERE user_id = ? AND service_name = ?")
        .bind(user_id)
        .bind(service_name)
        .fetch_optional(pool)
        .await
        .unwrap()
}

/// multipart/form-data 登录（浏览器 FormData 的编码方式）
pub async fn login_multipart(
    app: &Router,
    username: &str,
    password: &str,
) -> (StatusCode, serde_json::Value) {
    let boundary = "----jarit-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"username\"\r\n\r\n{u}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"password\"\r\n\r\n{p}\r\n\
         --{b}--\r\n",
        b = boundary,
        u = username,
        p = password,
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
