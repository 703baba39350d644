use std::fmt;

use zeroize::Zeroize;

use crate::error::PortalError;

/// Base URL of the authentication portal, e.g. `https://portal.example.net:4100`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PortalAddress(String);

impl PortalAddress {
    /// Wrap an address without checking it.
    ///
    /// Callers that take the address from an operator should go through
    /// [`PortalAddress::parse`] instead.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Accepts `http`/`https` URLs with a non-empty host and an optional numeric port.
    ///
    /// # Errors
    /// Returns [`PortalError::InvalidAddress`] when the scheme, host or port is malformed.
    pub fn parse(raw: &str) -> Result<Self, PortalError> {
        let invalid = || PortalError::InvalidAddress(raw.to_string());

        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (scheme, rest) = raw.split_once("://").ok_or_else(invalid)?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let authority = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        // userinfo is not something a portal URL should carry
        if authority.contains('@') {
            return Err(invalid());
        }

        let (host, port) = if let Some(literal) = authority.strip_prefix('[') {
            // IPv6 literals must be bracketed; only a port may follow
            let (inner, after) = literal.split_once(']').ok_or_else(invalid)?;
            if inner.is_empty() || inner.contains(['[', ']']) {
                return Err(invalid());
            }
            match after {
                "" => (inner, None),
                _ => (inner, Some(after.strip_prefix(':').ok_or_else(invalid)?)),
            }
        } else {
            match authority.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            }
        };
        if host.is_empty() || host.contains(['[', ']']) {
            return Err(invalid());
        }
        if let Some(port) = port
            && (port.is_empty() || port.parse::<u16>().is_err())
        {
            return Err(invalid());
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PortalAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Secret half of a credential pair. Wiped from memory on drop.
///
/// Has no `Display` or `Serialize` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Plain value, for handing to the portal only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Identity/secret pair presented to the portal on logon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub secret: Secret,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: Secret::new(secret),
        }
    }
}

/// Everything a credential test needs: where the portal is and who to log on as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalEndpoint {
    pub address: PortalAddress,
    pub credentials: Credentials,
}

impl PortalEndpoint {
    pub fn new(address: PortalAddress, credentials: Credentials) -> Self {
        Self {
            address,
            credentials,
        }
    }
}
