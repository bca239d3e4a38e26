//! 业务逻辑服务层

pub mod auth_service;
pub mod recipe_service;
pub mod registration;
pub mod user_service;

pub use auth_service::AuthService;
pub use recipe_service::RecipeClient;
pub use user_service::UserService;
