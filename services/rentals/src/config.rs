//! Service configuration
//!
//! Values come from built-in defaults overridden by `RENTMYBIKE_*`
//! environment variables, with `__` separating nested keys:
//!
//! - `RENTMYBIKE_BIND_ADDR` (default `0.0.0.0:3001`)
//! - `RENTMYBIKE_PAYMENTS__API_URL` (default `https://api.balancedpayments.com`)
//! - `RENTMYBIKE_PAYMENTS__API_KEY_SECRET` (required)
//! - `RENTMYBIKE_PAYMENTS__MARKETPLACE_URI` (required)

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Top-level configuration for the rentals service
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub payments: PaymentsConfig,
}

/// Payments provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    pub api_url: String,
    pub api_key_secret: String,
    pub marketplace_uri: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:3001")?
            .set_default("payments.api_url", "https://api.balancedpayments.com")?
            .add_source(
                Environment::with_prefix("RENTMYBIKE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
