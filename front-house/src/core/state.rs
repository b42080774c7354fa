use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::core::{Config, EngineResult};
use crate::orders::{OrderEngine, OrderRules};
use crate::store::{MemoryStore, RedbStore, Store, seed_defaults};
use crate::users::UserDirectory;

/// 前厅引擎 - 持有所有服务的共享引用
///
/// 所有服务共享同一个 [`Store`]，克隆只复制 Arc。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn Store> | 持久化存储 |
/// | catalog | CatalogService | 菜品与餐桌 |
/// | users | UserDirectory | 用户与登录 |
/// | orders | OrderEngine | 占桌、订单、账单、营业额 |
///
/// # 使用示例
///
/// ```ignore
/// let config = Config::from_env();
/// let house = FrontHouse::open(&config)?;
/// let tables = house.catalog.list_tables()?;
/// ```
#[derive(Clone)]
pub struct FrontHouse {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub catalog: CatalogService,
    pub users: UserDirectory,
    pub orders: OrderEngine,
}

impl FrontHouse {
    /// 打开 (或创建) 工作目录下的 redb 数据库
    ///
    /// `seed_defaults` 为 true 时补齐缺失的集合
    pub fn open(config: &Config) -> EngineResult<Self> {
        let store = RedbStore::open(config.store_path())?;
        tracing::info!(path = %config.store_path().display(), "Store opened");
        Self::from_store(Arc::new(store), config)
    }

    /// 使用已有的存储后端
    pub fn from_store(store: Arc<dyn Store>, config: &Config) -> EngineResult<Self> {
        if config.seed_defaults {
            seed_defaults(store.as_ref())?;
        }

        Ok(Self {
            config: config.clone(),
            catalog: CatalogService::new(store.clone()),
            users: UserDirectory::new(store.clone()),
            orders: OrderEngine::new(store.clone(), OrderRules::from(config)),
            store,
        })
    }

    /// 内存存储 (测试用)
    pub fn in_memory(config: &Config) -> EngineResult<Self> {
        Self::from_store(Arc::new(MemoryStore::new()), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    #[test]
    fn test_in_memory_is_seeded() {
        let house = FrontHouse::in_memory(&Config::default()).unwrap();
        assert_eq!(house.catalog.list_tables().unwrap().len(), 20);
        assert_eq!(house.catalog.list_dishes().unwrap().len(), 25);

        let admin = house
            .users
            .authenticate("admin@restaurante.com", "password")
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let config = Config {
            seed_defaults: false,
            ..Config::default()
        };
        let house = FrontHouse::in_memory(&config).unwrap();
        assert!(house.catalog.list_tables().unwrap().is_empty());
        assert!(house.users.list_users().unwrap().is_empty());
    }

    #[test]
    fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy());
        let house = FrontHouse::open(&config).unwrap();
        assert_eq!(house.orders.dashboard(crate::utils::time::today()).unwrap().total_tables, 20);
        assert!(config.store_path().exists());
    }
}
