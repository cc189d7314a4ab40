//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 请求级错误类型
//! - [`AppResponse`] - API 响应结构
//! - 日志初始化

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, ok_with_message};

/// 请求处理 Result 类型
pub type AppResult<T> = Result<T, AppError>;
