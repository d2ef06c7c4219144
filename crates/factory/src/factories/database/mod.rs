pub mod error;
pub mod implementation;

use serde::Deserialize;
use sqlx::PgPool;

use crate::factories::tls::TlsConfig;

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
    /// One of `Disable`, `Allow`, `Prefer`, `Require`, `VerifyCa`, `VerifyFull`.
    #[serde(default)]
    pub pg_ssl_mode: Option<String>,
    #[serde(default)]
    pub tls_config: Option<TlsConfig>,
}

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}
