use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid server address {address}: set EDUVANE_SERVER__HOST and EDUVANE_SERVER__PORT")]
    InvalidAddress { address: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}
