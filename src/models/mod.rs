//! 数据模型模块

pub mod api_key;
pub mod auth;
pub mod recipe;
pub mod user;
