use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::model::role::Role;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    /// Lifetime of tokens handed out by `POST /token`, in seconds
    pub access_token_ttl: u64,

    pub roles: RoleTable,

    // Recognition
    pub face_match_tolerance: f64,
    pub embedding_socket: String,
    pub max_image_bytes: usize,

    // Rate limiting, 0 disables the limiter
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, applying defaults for unset keys.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| var(key).with_context(|| format!("{key} must be set"));
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl: parsed("ACCESS_TOKEN_TTL", &or("ACCESS_TOKEN_TTL", "1800"))?, // 30 min

            roles: RoleTable {
                admins: list(&or("ADMIN_USERS", "admin")),
                teachers: list(&or("TEACHER_USERS", "teacher1,teacher2")),
            },

            face_match_tolerance: parsed("FACE_MATCH_TOLERANCE", &or("FACE_MATCH_TOLERANCE", "0.6"))?,
            embedding_socket: or("EMBEDDING_SOCKET", "/run/attendance/embedding.sock"),
            max_image_bytes: parsed("MAX_IMAGE_BYTES", &or("MAX_IMAGE_BYTES", "10485760"))?,

            rate_login_per_min: parsed("RATE_LOGIN_PER_MIN", &or("RATE_LOGIN_PER_MIN", "60"))?,
            rate_protected_per_min: parsed(
                "RATE_PROTECTED_PER_MIN",
                &or("RATE_PROTECTED_PER_MIN", "1000"),
            )?,

            log_dir: or("LOG_DIR", "logs"),
        })
    }
}

fn parsed<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {key} value {raw:?}: {e}"))
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Which usernames act as administrators and which as teachers.
#[derive(Clone, Debug, Default)]
pub struct RoleTable {
    pub admins: Vec<String>,
    pub teachers: Vec<String>,
}

impl RoleTable {
    pub fn roles_for(&self, username: &str) -> Vec<Role> {
        let mut roles = Vec::new();
        if self.admins.iter().any(|u| u == username) {
            roles.push(Role::Admin);
        }
        if self.teachers.iter().any(|u| u == username) {
            roles.push(Role::Teacher);
        }
        roles
    }
}
