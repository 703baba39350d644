mod error;
mod provider;
mod store;

pub use error::SettingsError;
pub use provider::SettingsProvider;
pub use store::{PortalSettings, is_plausible_identity};
