use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub access: AccessConfig,
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    /// The system owner: may grant admins and bind the escrow ledger.
    pub owner: String,
    /// Admin identities granted at startup, validated before any grant.
    pub initial_admins: Vec<String>,
    /// "bind-once" or "rebind".
    #[serde(default = "default_bind_policy")]
    pub bind_policy: String,
}

fn default_bind_policy() -> String {
    "bind-once".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub geocoder_url: String,
    pub geocode_timeout_ms: u64,
    pub quote_debounce_ms: u64,
    pub rate_per_km_cents: i64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of ZACLINE)
            // Eg.. `ZACLINE__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("ZACLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
