use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid portal url: {0}")]
    InvalidPortalUrl(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}
