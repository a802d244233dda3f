//! 工具模块 - 错误类型与日志

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
