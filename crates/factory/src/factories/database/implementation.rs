use sqlx::{
    migrate::Migrator,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use tracing::info;

use crate::factories::database::{Database, DatabaseConfig, error::DatabaseError};

const DEFAULT_MAX_CONNECTIONS: u32 = 20;

impl Database {
    pub async fn new(cfg: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options: PgConnectOptions =
            cfg.url.parse().map_err(DatabaseError::InvalidUrl)?;

        options = options.ssl_mode(parse_ssl_mode(cfg.pg_ssl_mode.as_deref())?);

        if let Some(tls_config) = &cfg.tls_config {
            if let Some(ca) = &tls_config.ca {
                options = options.ssl_root_cert_from_pem(ca.as_bytes().to_owned());
            } else if let Some(ca_path) = &tls_config.ca_path
                && ca_path.exists()
            {
                options = options.ssl_root_cert(ca_path);
            }

            if let Some(client_cert) = &tls_config.client_cert {
                options = options.ssl_client_cert_from_pem(client_cert.as_bytes());
            } else if let Some(client_cert_path) = &tls_config.client_cert_path
                && client_cert_path.exists()
            {
                options = options.ssl_client_cert(client_cert_path);
            }

            if let Some(client_key) = &tls_config.client_key {
                options = options.ssl_client_key_from_pem(client_key.as_bytes());
            } else if let Some(client_key_path) = &tls_config.client_key_path
                && client_key_path.exists()
            {
                options = options.ssl_client_key(client_key_path);
            }
        }

        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connect)?;

        info!("✅ Postgres pool created");

        Ok(Self { pool })
    }

    pub async fn migrate(&self, migrator: &Migrator) -> Result<(), DatabaseError> {
        migrator.run(&self.pool).await?;
        info!("✅ Postgres migrations applied");
        Ok(())
    }
}

fn parse_ssl_mode(raw: Option<&str>) -> Result<PgSslMode, DatabaseError> {
    match raw {
        None | Some("Disable") => Ok(PgSslMode::Disable),
        Some("Allow") => Ok(PgSslMode::Allow),
        Some("Prefer") => Ok(PgSslMode::Prefer),
        Some("Require") => Ok(PgSslMode::Require),
        Some("VerifyCa") => Ok(PgSslMode::VerifyCa),
        Some("VerifyFull") => Ok(PgSslMode::VerifyFull),
        Some(other) => Err(DatabaseError::UnknownSslMode(other.to_string())),
    }
}
