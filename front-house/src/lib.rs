//! Front House - 餐厅前厅引擎
//!
//! # 架构概述
//!
//! 餐桌占用、菜单、用户与角色、订单状态机、账单 (10% 服务费与人均分摊)
//! 以及按日幂等入账的营业额。没有 HTTP / CLI 界面，由展示层直接调用。
//!
//! # 模块结构
//!
//! ```text
//! front-house/src/
//! ├── core/          # 配置、错误、FrontHouse 入口
//! ├── store/         # Store trait、redb / 内存后端、默认数据
//! ├── catalog/       # 菜品与餐桌
//! ├── users/         # 用户、登录、个人资料
//! ├── session.rs     # 当前操作者与角色
//! ├── orders/        # 占桌、购物车、订单、账单、营业额
//! ├── order_money/   # Decimal 金额计算
//! └── utils/         # 日志、校验、日期
//! ```

pub mod catalog;
pub mod core;
pub mod order_money;
pub mod orders;
pub mod session;
pub mod store;
pub mod users;
pub mod utils;

// Re-export 公共类型
pub use catalog::CatalogService;
pub use crate::core::{
    Config, EngineError, EngineResult, Entity, ErrorKind, FreeTablePolicy, FrontHouse,
};
pub use orders::{OrderEngine, OrderRules, PendingCart};
pub use session::{ConfirmAction, SessionContext};
pub use store::{MemoryStore, RedbStore, Store};
pub use users::UserDirectory;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{
    cleanup_old_logs, init_logger, init_logger_from_config, init_logger_with_file,
};
