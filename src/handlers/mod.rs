//! HTTP 处理器模块

pub mod api_key;
pub mod auth;
pub mod health;
pub mod recipe;
pub mod user;
