//! Lounge Server - 餐厅/酒廊点单与预订后端
//!
//! # 架构概述
//!
//! - **菜单** (`catalog`): 菜品维护、上下架、推荐
//! - **订单** (`orders`): 结账下单、状态流转
//! - **预订** (`reservations`): 桌台占用、过期、候补
//! - **活动** (`events`): 活动列表
//! - **员工** (`staff`): 账号与角色
//! - **后台** (`admin`): 过滤、统计、分页
//! - **认证** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! lounge-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── api/           # HTTP 路由和处理器
//! ├── admin/         # 过滤、KPI、分页
//! ├── catalog/       # 菜单
//! ├── orders/        # 订单
//! ├── reservations/  # 桌台与预订
//! ├── events/        # 活动
//! ├── staff/         # 员工
//! └── utils/         # 工具函数
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod events;
pub mod orders;
pub mod reservations;
pub mod staff;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并初始化日志
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // .env is optional
        eprintln!("No .env loaded: {}", e);
    }
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    __                                
   / /   ____  __  ______  ____ ____  
  / /   / __ \/ / / / __ \/ __ `/ _ \ 
 / /___/ /_/ / /_/ / / / / /_/ /  __/ 
/_____/\____/\__,_/_/ /_/\__, /\___/  
                        /____/        
    "#
    );
}
