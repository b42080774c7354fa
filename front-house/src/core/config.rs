use std::path::PathBuf;
use std::str::FromStr;

/// 释放餐桌时对订单的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreeTablePolicy {
    /// Remove every order of the table (baseline behaviour)
    #[default]
    DeleteOrders,
    /// Keep orders for history: release them and cancel the unfinished ones
    CancelOrders,
}

impl FromStr for FreeTablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(FreeTablePolicy::DeleteOrders),
            "cancel" => Ok(FreeTablePolicy::CancelOrders),
            other => Err(format!("unknown free table policy: {}", other)),
        }
    }
}

/// 前厅引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (数据库与日志) |
/// | STORE_FILE | front_house.redb | redb 文件名 |
/// | SERVICE_TAX_PERCENT | 10 | 服务费百分比 |
/// | MAX_ITEM_QUANTITY | 99 | 购物车单行数量上限 |
/// | FREE_TABLE_POLICY | delete | delete 或 cancel |
/// | SEED_DEFAULTS | true | 首次运行写入演示数据 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/front-house FREE_TABLE_POLICY=cancel ./pos
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// redb 数据库文件名 (位于 work_dir 下)
    pub store_file: String,
    /// 服务费百分比
    pub service_tax_percent: u32,
    /// 购物车单行数量上限
    pub max_item_quantity: u32,
    /// 释放餐桌策略
    pub free_table_policy: FreeTablePolicy,
    /// 是否写入默认数据
    pub seed_defaults: bool,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "./work_dir".into(),
            store_file: "front_house.redb".into(),
            service_tax_percent: 10,
            max_item_quantity: 99,
            free_table_policy: FreeTablePolicy::DeleteOrders,
            seed_defaults: true,
            log_level: "info".into(),
            log_json: false,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 先读取 `.env`，未设置的项使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or(defaults.work_dir),
            store_file: std::env::var("STORE_FILE").unwrap_or(defaults.store_file),
            service_tax_percent: env_parse("SERVICE_TAX_PERCENT")
                .unwrap_or(defaults.service_tax_percent),
            max_item_quantity: env_parse("MAX_ITEM_QUANTITY")
                .filter(|max: &u32| *max > 0)
                .unwrap_or(defaults.max_item_quantity),
            free_table_policy: env_parse("FREE_TABLE_POLICY")
                .unwrap_or(defaults.free_table_policy),
            seed_defaults: env_parse("SEED_DEFAULTS").unwrap_or(defaults.seed_defaults),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_parse("LOG_JSON").unwrap_or(defaults.log_json),
        }
    }

    /// 使用自定义工作目录
    ///
    /// 常用于测试场景 (不读取环境变量)
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    /// 数据库文件完整路径
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.store_file)
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}
