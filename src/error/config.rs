use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVariable(&'static str),
    #[error("Invalid value for environment variable {0}")]
    InvalidVariable(&'static str),
}
