//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{handlers, middleware::AppState};

/// 请求体大小上限
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 注册与登录
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // 当前用户及其 API 密钥
    let user_routes = Router::new()
        .route("/me", get(handlers::user::get_current_user))
        .route(
            "/me/api-keys",
            get(handlers::api_key::list_api_keys).post(handlers::api_key::upsert_api_key),
        )
        .route(
            "/me/api-keys/{service_name}",
            get(handlers::api_key::get_api_key).delete(handlers::api_key::delete_api_key),
        );

    // 管理员用户管理
    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/users/{id}", delete(handlers::user::delete_user));

    let recipe_routes =
        Router::new().route("/extract-recipe", post(handlers::recipe::extract_recipe));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/admin", admin_routes)
        .nest("/recipes", recipe_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.cors.allowed_origin))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}

/// 跨域配置，只允许配置中的前端来源
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
        .allow_credentials(true);

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(allowed_origin, "Invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}
