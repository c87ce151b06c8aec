use chrono::Utc;
use shared::MinimumSpendPolicy;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::JwtService;
use crate::catalog::{MenuCatalog, default_menu};
use crate::core::Config;
use crate::events::{EventBoard, default_events};
use crate::orders::OrderBook;
use crate::reservations::{ReservationDesk, default_tables};
use crate::staff::StaffDirectory;
use crate::utils::{AppError, AppResult, ErrorCode};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，axum 每个请求克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | policy | MinimumSpendPolicy | 最低消费规则 |
/// | catalog | Arc<MenuCatalog> | 菜单 |
/// | orders | Arc<OrderBook> | 订单 |
/// | reservations | Arc<ReservationDesk> | 桌台与预订 |
/// | events | Arc<EventBoard> | 活动 |
/// | staff | Arc<StaffDirectory> | 员工账号 |
/// | started_at | Instant | 启动时刻 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub jwt_service: Arc<JwtService>,
    pub policy: MinimumSpendPolicy,
    pub catalog: Arc<MenuCatalog>,
    pub orders: Arc<OrderBook>,
    pub reservations: Arc<ReservationDesk>,
    pub events: Arc<EventBoard>,
    pub staff: Arc<StaffDirectory>,
    pub started_at: Instant,
}

impl ServerState {
    /// Empty stores wired to the configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        let policy = MinimumSpendPolicy::new(config.bar_minimum_spend, config.event_multiplier)?;

        Ok(Self {
            config: config.clone(),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            policy,
            catalog: Arc::new(MenuCatalog::new()),
            orders: Arc::new(OrderBook::new()),
            reservations: Arc::new(ReservationDesk::new(policy, config.reservation_ttl_minutes)),
            events: Arc::new(EventBoard::new()),
            staff: Arc::new(StaffDirectory::new()),
            started_at: Instant::now(),
        })
    }

    /// 初始化服务器状态
    ///
    /// 1. 校验最低消费配置
    /// 2. 载入默认菜单、桌台、活动
    /// 3. 创建初始管理员 (ADMIN_PASSWORD 已设置时)
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let state = Self::new(config)?;

        for item in default_menu() {
            state.catalog.create(item)?;
        }
        for table in default_tables() {
            state.reservations.create_table(table, Utc::now())?;
        }
        for event in default_events(Utc::now().date_naive()) {
            state.events.create(event)?;
        }

        match &config.admin_password {
            Some(password) => {
                let admin = state.staff.seed_admin(&config.admin_email, password)?;
                tracing::info!(email = %admin.email, "Initial admin ready");
            }
            None if config.is_production() => {
                return Err(AppError::with_message(
                    ErrorCode::ConfigError,
                    "ADMIN_PASSWORD must be set in production",
                ));
            }
            None => tracing::warn!(
                "ADMIN_PASSWORD not set, no admin account created; staff endpoints are unreachable"
            ),
        }

        tracing::info!(
            menu_items = state.catalog.count(),
            tables = state.reservations.list_tables().len(),
            events = state.events.list().len(),
            bar_minimum = state.policy.bar_threshold,
            event_multiplier = state.policy.event_multiplier,
            "Server state initialized"
        );
        Ok(state)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_requires_admin_password() {
        let mut config = Config::with_overrides(0, "admin@lounge.test", "secret");
        config.admin_password = None;
        config.environment = "production".into();
        let err = ServerState::initialize(&config).err().unwrap();
        assert_eq!(err.code, ErrorCode::ConfigError);

        config.environment = "development".into();
        let state = ServerState::initialize(&config).unwrap();
        assert!(state.catalog.count() > 0);
        let staff = state.staff.list(&shared::models::PageQuery::default(), 10);
        assert_eq!(staff.total, 0);
    }
}
