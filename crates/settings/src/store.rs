use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use portalcheck_portal::{Credentials, PortalAddress, Secret};

use crate::error::SettingsError;
use crate::provider::SettingsProvider;

struct SettingsData {
    portal_address: Option<PortalAddress>,
    identity: Option<String>,
    secret: Option<Secret>,
    run_at_login: bool,
    show_notifications: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            portal_address: None,
            identity: None,
            secret: None,
            run_at_login: false,
            show_notifications: true,
        }
    }
}

/// In-memory operator settings shared between the editor and the test workflows.
///
/// Setters validate before storing. A rejected value leaves the previous
/// one in place, so the editor can flag the field without losing the last
/// good configuration.
#[derive(Default)]
pub struct PortalSettings {
    inner: RwLock<SettingsData>,
}

impl PortalSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SettingsData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SettingsData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// # Errors
    /// Returns [`SettingsError::InvalidPortalUrl`] unless `raw` is an `http`/`https` URL.
    pub fn set_portal_url(&self, raw: &str) -> Result<(), SettingsError> {
        let address = PortalAddress::parse(raw).map_err(|e| {
            tracing::debug!(error = %e, "portal url rejected");
            SettingsError::InvalidPortalUrl(raw.to_string())
        })?;
        self.write().portal_address = Some(address);
        Ok(())
    }

    /// # Errors
    /// Returns [`SettingsError::InvalidIdentity`] unless `raw` looks like an email address.
    pub fn set_identity(&self, raw: &str) -> Result<(), SettingsError> {
        if !is_plausible_identity(raw) {
            return Err(SettingsError::InvalidIdentity(raw.to_string()));
        }
        self.write().identity = Some(raw.to_string());
        Ok(())
    }

    pub fn set_secret(&self, raw: &str) {
        self.write().secret = Some(Secret::new(raw));
    }

    pub fn identity(&self) -> Option<String> {
        self.read().identity.clone()
    }

    pub fn has_secret(&self) -> bool {
        self.read().secret.is_some()
    }

    pub fn run_at_login(&self) -> bool {
        self.read().run_at_login
    }

    pub fn set_run_at_login(&self, enabled: bool) {
        self.write().run_at_login = enabled;
    }

    pub fn show_notifications(&self) -> bool {
        self.read().show_notifications
    }

    pub fn set_show_notifications(&self, enabled: bool) {
        self.write().show_notifications = enabled;
    }
}

impl SettingsProvider for PortalSettings {
    fn portal_address(&self) -> Option<PortalAddress> {
        self.read().portal_address.clone()
    }

    fn credentials(&self) -> Option<Credentials> {
        let data = self.read();
        Some(Credentials {
            identity: data.identity.clone()?,
            secret: data.secret.clone()?,
        })
    }
}

/// Email-shaped identity: one `@`, a non-empty local part and a dotted domain.
pub fn is_plausible_identity(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 254 || raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
