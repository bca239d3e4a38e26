//! JarIt API 服务库
//! 用户注册与认证、API 密钥管理、菜谱提取转发

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
