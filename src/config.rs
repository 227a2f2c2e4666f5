use crate::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub throttle_drones_per_minute: u32,
    pub throttle_pilots_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS", "0.0.0.0:8080"),
            throttle_drones_per_minute: parsed("THROTTLE_DRONES_PER_MINUTE", 60)?,
            throttle_pilots_per_minute: parsed("THROTTLE_PILOTS_PER_MINUTE", 60)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVariable(name))
}

fn optional(name: &'static str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidVariable(name)),
        Err(_) => Ok(default),
    }
}
