use std::{net::SocketAddr, path::PathBuf};

use admins_core::{jwt::JwtConfig, signup::SignupConfig};
use config::{ConfigBuilder, ConfigError, Environment, File, builder::AsyncState};
use factory::factories::{database::DatabaseConfig, observability::ObservabilityConfig};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server_address: SocketAddr,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub signup: SignupConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Reads the JSON settings file at `path`, then lets environment
    /// variables override nested keys, e.g. `DATABASE__URL` or
    /// `SIGNUP__LOOKUP_TIMEOUT_MS`.
    pub async fn init(path: PathBuf) -> Result<Self, ConfigError> {
        let cfg = ConfigBuilder::<AsyncState>::default()
            .add_source(File::from(path))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .try_parsing(true),
            )
            .build()
            .await?;

        cfg.try_deserialize()
    }
}
