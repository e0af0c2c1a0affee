use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::{AppConfig, ConfigError};
use crate::database::Store;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: Arc<TokenService>,
    pub passwords: PasswordHasher,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the services from a validated configuration. Fails when the
    /// signing secret or hashing cost is unusable, before any request is
    /// served.
    pub fn new(config: AppConfig, store: Store) -> Result<Self, ConfigError> {
        config.validate()?;
        let tokens = TokenService::new(&config.security)?;
        let passwords = PasswordHasher::new(config.security.bcrypt_cost);
        Ok(Self {
            store,
            tokens: Arc::new(tokens),
            passwords,
            config: Arc::new(config),
        })
    }
}
