//! 数据库仓库层

pub mod api_key_repo;
pub mod user_repo;

pub use api_key_repo::*;
pub use user_repo::*;
