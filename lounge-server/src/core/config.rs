use crate::auth::JwtConfig;
use shared::policy::{DEFAULT_BAR_THRESHOLD, DEFAULT_EVENT_MULTIPLIER};

/// 服务器配置 - lounge 后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件由 dotenv 加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | MAX_CONNECTIONS | 1000 | 最大并发请求数 |
/// | BAR_MINIMUM_SPEND | 2500 | 吧台/活动预订最低酒水消费 |
/// | EVENT_MULTIPLIER | 1.5 | 主题夜桌台最低消费倍数 |
/// | RESERVATION_PENDING_TTL_MINUTES | 15 | 待确认预订过期时间(分钟) |
/// | DEFAULT_PAGE_SIZE | 6 | 列表默认每页数量 |
/// | ADMIN_EMAIL | admin@lounge.local | 初始管理员邮箱 |
/// | ADMIN_PASSWORD | - | 初始管理员密码 (未设置时不创建) |
/// | JWT_SECRET | 随机生成 | JWT 密钥 (至少 32 字符) |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
/// | JWT_ISSUER | lounge-server | 令牌签发者 |
/// | JWT_AUDIENCE | lounge-clients | 令牌受众 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 BAR_MINIMUM_SPEND=3000 cargo run -p lounge-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 最大并发请求数
    pub max_connections: usize,
    /// JWT 认证配置
    pub jwt: JwtConfig,

    // === 业务规则 ===
    pub bar_minimum_spend: f64,
    pub event_multiplier: f64,
    pub reservation_ttl_minutes: i64,
    pub default_page_size: u32,

    // === 初始管理员 ===
    pub admin_email: String,
    pub admin_password: Option<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            max_connections: env_or("MAX_CONNECTIONS", 1000),
            jwt: JwtConfig::default(),
            bar_minimum_spend: env_or("BAR_MINIMUM_SPEND", DEFAULT_BAR_THRESHOLD),
            event_multiplier: env_or("EVENT_MULTIPLIER", DEFAULT_EVENT_MULTIPLIER),
            reservation_ttl_minutes: env_or("RESERVATION_PENDING_TTL_MINUTES", 15),
            default_page_size: env_or("DEFAULT_PAGE_SIZE", 6u32).max(1),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@lounge.local".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, admin_email: &str, admin_password: &str) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.admin_email = admin_email.to_string();
        config.admin_password = Some(admin_password.to_string());
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
