//! 员工会话令牌
//!
//! Staff sessions are HS256 JWTs. The token carries the role and the
//! resolved permission list so the middleware never touches the staff
//! directory on a request.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use shared::models::{Staff, StaffRole};
use thiserror::Error;

use crate::auth::permissions::permissions_for;

const MIN_SECRET_LEN: usize = 32;
const GENERATED_SECRET_LEN: usize = 64;
const DEFAULT_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret, at least 32 bytes
    pub secret: String,
    /// Session lifetime in minutes
    pub ttl_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_*` variables; a missing or short secret falls back to a
    /// random one, which invalidates every session on restart.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").ok();
        let secret = match secret {
            Some(s) if s.len() >= MIN_SECRET_LEN => s,
            Some(_) => {
                tracing::warn!(
                    min_len = MIN_SECRET_LEN,
                    "JWT_SECRET too short, using a random secret"
                );
                random_secret()
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using a random secret");
                random_secret()
            }
        };

        Self {
            secret,
            ttl_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TTL_MINUTES),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "lounge-server".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "lounge-clients".into()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 令牌载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff id
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("bad signature")]
    BadSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("could not sign token: {0}")]
    Signing(String),
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }

    /// Sign a session for this staff member with the permissions of their role
    pub fn issue(&self, staff: &Staff) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: staff.id.to_string(),
            name: staff.name.clone(),
            email: staff.email.clone(),
            role: staff.role,
            permissions: permissions_for(staff.role),
            exp: (now + Duration::minutes(self.config.ttl_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::BadSignature,
                _ => JwtError::Malformed(e.to_string()),
            })
    }

    /// `Bearer <token>` -> `<token>`
    pub fn bearer(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::with_config(JwtConfig::default())
    }
}

/// 当前登录员工, 由 [`require_auth`](crate::auth::require_auth) 放入请求扩展
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub permissions: Vec<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| JwtError::Malformed(format!("subject is not a staff id: {}", claims.sub)))?;
        Ok(Self {
            id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
            permissions: claims.permissions,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    /// Admins and holders of `all` pass every check. `orders:*` grants any
    /// `orders:` permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        self.permissions.iter().any(|granted| {
            granted == "all"
                || granted == permission
                || granted.strip_suffix('*').is_some_and(|scope| {
                    scope.ends_with(':') && permission.starts_with(scope)
                })
        })
    }
}
