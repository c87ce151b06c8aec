//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::CurrentUser;
use crate::auth::permissions::permissions_for;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResult, AppError, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Unknown email and wrong password both answer "Invalid email or password"
/// after the same fixed delay.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state.staff.authenticate(&req.email, &req.password);

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let staff = match result {
        Ok(staff) => staff,
        Err(e) => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(e);
        }
    };

    let token = state
        .get_jwt_service()
        .issue(&staff)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        staff_id = staff.id,
        email = %staff.email,
        role = staff.role.as_str(),
        "Staff logged in"
    );

    Ok(ok(LoginResponse {
        token,
        user: UserInfo {
            id: staff.id,
            name: staff.name,
            email: staff.email,
            role: staff.role,
            permissions: permissions_for(staff.role),
        },
    }))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> ApiResult<UserInfo> {
    Ok(ok(UserInfo {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        permissions: user.permissions,
    }))
}
