//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 无需登录的 API 路由 (顾客侧)
fn is_public_api_route(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    match *method {
        Method::GET => {
            path == "/api/menu-items"
                || path.starts_with("/api/menu-items/")
                || path == "/api/tables"
                || path == "/api/tables/availability"
                || path == "/api/events"
                || path == "/api/policy/minimum-spend"
        }
        Method::POST => {
            path == "/api/auth/login" || path == "/api/orders" || path == "/api/reservations"
        }
        _ => false,
    }
}

/// Resolve the staff session behind a request's `Authorization` header
fn session_user(jwt: &JwtService, req: &Request) -> Result<CurrentUser, AppError> {
    let Some(header) = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", path = req.uri().path().to_string());
        return Err(AppError::unauthorized());
    };

    let token = JwtService::bearer(header)
        .ok_or_else(|| AppError::invalid_token("Expected a Bearer token"))?;

    let claims = jwt.verify(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            path = req.uri().path().to_string()
        );
        match e {
            JwtError::Expired => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims).map_err(|e| AppError::invalid_token(e.to_string()))
}

/// 员工路由认证
///
/// 顾客侧公共路由、CORS 预检和 `/api/` 之外的路径直接放行;
/// 其余请求必须携带有效的员工令牌, 通过后 [`CurrentUser`] 进入请求扩展。
///
/// | 情况 | 响应 |
/// |------|------|
/// | 缺少 Authorization | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 令牌无效 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let open = req.method() == Method::OPTIONS
        || !path.starts_with("/api/")
        || is_public_api_route(req.method(), path);

    if !open {
        let user = session_user(&state.get_jwt_service(), &req)?;
        req.extensions_mut().insert(user);
    }
    Ok(next.run(req).await)
}

/// Route layer that rejects staff lacking `permission` with 403.
/// Must sit inside [`require_auth`].
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if user.has_permission(permission) {
                return Ok(next.run(req).await);
            }

            security_log!(
                "WARN",
                "permission_denied",
                staff_id = user.id,
                role = user.role.as_str(),
                required = permission
            );
            Err(AppError::permission_denied(format!(
                "{} is required for this action",
                permission
            )))
        })
    }
}
