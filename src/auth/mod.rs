//! 认证与授权模块

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, AdminUser, CurrentUser, MaybeUser};
pub use password::PasswordHasher;
