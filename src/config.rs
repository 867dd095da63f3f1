use std::time::Duration;
use anyhow::{bail, Context};
use url::Url;

pub(crate) const DEVELOPMENT_URL: &str = "http://localhost:8080";
pub(crate) const PRODUCTION_URL: &str = "https://player-portal.example.com";

const BACKEND_URL_VAR: &str = "PLAYER_PORTAL_BACKEND_URL";
const ENVIRONMENT_VAR: &str = "PLAYER_PORTAL_ENV";
const TIMEOUT_VAR: &str = "PLAYER_PORTAL_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Base url every REST path is resolved against
    pub backend_url: Url,
    pub timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEVELOPMENT_URL).expect("Development url is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PortalConfig {

    /// Uses the given url as backend, with the default timeout
    pub fn with_backend(backend_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads the configuration from the process environment. \
    /// See [`PortalConfig::from_lookup()`] for the resolution order.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from a variable lookup:
    /// 1. `PLAYER_PORTAL_BACKEND_URL`, if set, is used as is
    /// 2. `PLAYER_PORTAL_ENV=production` selects the production backend
    /// 3. Otherwise the local development backend is used
    ///
    /// `PLAYER_PORTAL_TIMEOUT_SECS` overrides the request timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend_url = match lookup(BACKEND_URL_VAR) {
            Some(url) => parse_backend_url(&url)
                .with_context(|| format!("Invalid {}", BACKEND_URL_VAR))?,
            None => {
                let production = lookup(ENVIRONMENT_VAR)
                    .is_some_and(|env| env.trim().eq_ignore_ascii_case("production"));
                let domain = if production { PRODUCTION_URL } else { DEVELOPMENT_URL };
                parse_backend_url(domain)?
            }
        };
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(secs) => {
                let secs: u64 = secs.trim().parse()
                    .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self { backend_url, timeout })
    }

}

fn parse_backend_url(url: &str) -> anyhow::Result<Url> {
    let url = Url::parse(url.trim()).context("Could not parse backend url")?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Backend url must be http or https, got: {}", url.scheme());
    }
    if url.cannot_be_a_base() {
        bail!("Backend url cannot be used as a base: {}", url);
    }
    Ok(url)
}
