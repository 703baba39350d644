use portalcheck_portal::{Credentials, PortalAddress, PortalEndpoint};

/// Read side of the operator settings, as seen by the test workflows.
///
/// Getters return `None` while a value has not been configured.
pub trait SettingsProvider: Send + Sync {
    fn portal_address(&self) -> Option<PortalAddress>;

    fn credentials(&self) -> Option<Credentials>;

    /// Address and credentials together, if both are configured.
    fn portal_endpoint(&self) -> Option<PortalEndpoint> {
        Some(PortalEndpoint::new(
            self.portal_address()?,
            self.credentials()?,
        ))
    }
}
