mod client;
mod endpoint;
mod error;
mod status;

pub use client::PortalClient;
pub use endpoint::{Credentials, PortalAddress, PortalEndpoint, Secret};
pub use error::PortalError;
pub use status::{AuthResult, ConnectivityState};
