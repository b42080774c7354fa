//! 核心模块 - 配置、错误与引擎入口
//!
//! # 模块结构
//!
//! - [`Config`] - 引擎配置
//! - [`EngineError`] - 引擎错误
//! - [`FrontHouse`] - 组装好的服务集合

pub mod config;
pub mod error;
pub mod state;

pub use config::{Config, FreeTablePolicy};
pub use error::{EngineError, EngineResult, Entity, ErrorKind};
pub use state::FrontHouse;
