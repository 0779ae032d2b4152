use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("invalid filter '{0}': expected ROLE=VALUE")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
