use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// The CDN serves one bundle per project, keyed by the public key alone;
// host and path of the credential never appear in the bundle URL.
const BUNDLE_URL_PREFIX: &str = "https://js.sentry-cdn.com/";
const BUNDLE_URL_SUFFIX: &str = ".min.js";

/// A project access credential of the form `scheme://<public-key>@<host>/<path>`.
///
/// The loader uses it twice: the public key is substituted into the CDN
/// template to derive the agent bundle URL, and the whole credential is
/// handed to the constructed client untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    raw: String,
    public_key: String,
}

impl Dsn {
    /// The public key component of the credential.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The credential exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// URL of the agent bundle for this project.
    pub fn bundle_url(&self) -> String {
        format!("{}{}{}", BUNDLE_URL_PREFIX, self.public_key, BUNDLE_URL_SUFFIX)
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Dsn {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| DsnError::MissingScheme(s.into()))?;

        // Split on the rightmost `@`: public keys never contain one, but
        // carelessly percent-encoded paths might.
        let (public_key, host) = rest
            .rsplit_once('@')
            .ok_or_else(|| DsnError::MissingPublicKey(s.into()))?;

        if public_key.is_empty() {
            return Err(DsnError::MissingPublicKey(s.into()));
        }

        if host.is_empty() {
            return Err(DsnError::MissingHost(s.into()));
        }

        Ok(Dsn {
            raw: s.into(),
            public_key: public_key.into(),
        })
    }
}

/// A credential that does not have the `scheme://key@host/path` shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DsnError {
    /// No `://` separator.
    #[error("credential {0:?} has no scheme")]
    MissingScheme(String),
    /// No public key in front of the `@`.
    #[error("credential {0:?} has no public key")]
    MissingPublicKey(String),
    /// Nothing after the `@`.
    #[error("credential {0:?} has no host")]
    MissingHost(String),
}
