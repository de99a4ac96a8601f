use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub stripe: StripeConfig,
    pub mail: MailConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    #[serde(default = "default_stripe_api_base")]
    pub api_base: String,
}

fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    pub owner_email: String,
    pub public_base_url: String,
    #[serde(default = "default_deposit_minor")]
    pub deposit_minor: i64,
    #[serde(default = "default_deposit_currency")]
    pub deposit_currency: String,
    #[serde(default = "default_pickup_instructions")]
    pub pickup_instructions: String,
}

fn default_deposit_minor() -> i64 {
    5000
}

fn default_deposit_currency() -> String {
    "gbp".to_string()
}

fn default_pickup_instructions() -> String {
    "Your vehicle will be ready for collection at the agreed pickup location.".to_string()
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
            // Add in settings from the environment (with a prefix of ROADHIRE)
            // Eg.. `ROADHIRE_SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("ROADHIRE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
