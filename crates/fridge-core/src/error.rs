use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed recipe data: {0}")]
    DataFormat(String),

    #[error("No ingredients provided")]
    EmptyInput,

    #[error("Vision provider failed: {0}")]
    VisionProvider(String),

    #[error("Value out of range: {0}")]
    Range(String),
}

pub type Result<T> = std::result::Result<T, Error>;
