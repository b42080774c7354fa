//! 工具模块 - 日志、输入校验、日期
//!
//! # 内容
//!
//! - [`logger`] - tracing 初始化与日志清理
//! - [`validation`] - 文本长度限制与校验
//! - [`time`] - 账本日期

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
