use std::path::PathBuf;

use serde::Deserialize;

/// PEM material for verified Postgres connections. Inline PEM wins over the
/// matching path when both are set.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct TlsConfig {
    pub ca: Option<String>,
    pub ca_path: Option<PathBuf>,
    pub client_cert: Option<String>,
    pub client_cert_path: Option<PathBuf>,
    pub client_key: Option<String>,
    pub client_key_path: Option<PathBuf>,
}
