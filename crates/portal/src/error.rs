use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("invalid portal address: {0}")]
    InvalidAddress(String),
}
