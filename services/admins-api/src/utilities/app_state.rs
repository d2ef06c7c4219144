use std::sync::Arc;

use admins_core::{
    jwt::{JwtCapability, JwtConfig},
    signup::{ProfileStore, SignupConfig, SignupService},
};
use axum::extract::FromRef;
use factory::factories::database::Database;

use crate::{config::Config, error::AppError, features::implementations::PgProfileStore};

pub type AdminSignupService = SignupService<Arc<dyn ProfileStore>>;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub signup_service: AdminSignupService,
    pub jwt: JwtConfig,
}

impl AppState {
    pub async fn init(cfg: &Config) -> Result<Self, AppError> {
        let database = Database::new(&cfg.database).await?;
        database.migrate(&sqlx::migrate!("./migrations")).await?;

        Ok(Self::with_store(
            Arc::new(PgProfileStore::new(database)),
            cfg.jwt.clone(),
            &cfg.signup,
        ))
    }

    pub fn with_store(store: Arc<dyn ProfileStore>, jwt: JwtConfig, signup: &SignupConfig) -> Self {
        Self {
            signup_service: SignupService::new(store, signup),
            jwt,
        }
    }
}

impl FromRef<AppState> for Box<dyn JwtCapability> {
    fn from_ref(state: &AppState) -> Self {
        Box::new(state.jwt.clone())
    }
}
