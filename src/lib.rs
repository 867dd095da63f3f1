pub mod alert;
pub mod api;
pub mod config;
pub mod navigation;
pub mod session;
pub mod user;
pub mod views;

use std::sync::Arc;
use anyhow::{anyhow, Context};
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use url::Url;
use crate::alert::Notifier;
use crate::navigation::Navigator;
use crate::session::SessionStore;
use crate::views::ViewContext;

pub use crate::alert::{Alert, AlertLog, LogNotifier};
pub use crate::api::UserBackend;
pub use crate::config::PortalConfig;
pub use crate::navigation::{History, Route};
pub use crate::session::{FileSession, MemorySession};
pub use crate::user::User;
pub use crate::views::ActionOutcome;

/// The entry point into talking to the player portal backend
#[derive(Debug, Clone)]
pub struct PlayerPortal {
    pub client: Arc<PortalClient>,
    pub session: Arc<dyn SessionStore>,
}

impl PlayerPortal {

    /// Sets up a client for the backend described by `config`. \
    /// Nothing is sent until a view performs an action.
    pub fn connect(config: &PortalConfig, session: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Arc::new(PortalClient::new(config)?),
            session,
        })
    }

    /// Bundles everything a view needs. \
    /// The `navigator` and `notifier` are provided by the frontend, that renders the views.
    pub fn view_context(&self, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> ViewContext {
        ViewContext {
            backend: self.client.clone(),
            session: self.session.clone(),
            navigator,
            notifier,
        }
    }

}

/// A wrapped reqwest [`Client`], that resolves every request path against the backend url
#[derive(Debug)]
pub struct PortalClient {
    pub client: Client,
    pub backend_url: Url,
}

impl PortalClient {

    pub fn new(config: &PortalConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: Self::make_client(config)?,
            backend_url: config.backend_url.clone(),
        })
    }

    fn make_client(config: &PortalConfig) -> anyhow::Result<Client> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .gzip(true)
            .build()
            .context("Could not build reqwest client")
    }

    /// Appends `segments` to the backend url. \
    /// Every segment is percent encoded as a whole, so a `/` inside an id stays in its segment.
    pub fn url_segments(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.backend_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Backend url cannot be a base: {}", self.backend_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

macro_rules! impl_client_wrap {
    ($($method:ident),+) => {
        impl PortalClient {
            $(
                pub fn $method(&self, segments: &[&str]) -> anyhow::Result<RequestBuilder> {
                    let url = self.url_segments(segments)?;
                    #[cfg(feature = "verbose")]
                    {
                        log::debug!("{}: {}", stringify!($method), url.as_str());
                    }
                    Ok(self.client.$method(url))
                }
            )+
        }
    };
}

impl_client_wrap!(get, post, put);


#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(backend_url: &str) -> PortalClient {
        PortalClient::new(&PortalConfig::with_backend(backend_url).unwrap()).unwrap()
    }

    #[test]
    fn test_url_joins_onto_root() {
        let client = client_for("http://localhost:8080");
        assert_eq!(client.url_segments(&["users", "1"]).unwrap().as_str(), "http://localhost:8080/users/1");
        assert_eq!(client.url_segments(&["users"]).unwrap().as_str(), "http://localhost:8080/users");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = client_for("https://player-portal.example.com/api/");
        assert_eq!(client.url_segments(&["users", "1"]).unwrap().as_str(), "https://player-portal.example.com/api/users/1");
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = client_for("http://localhost:8080");
        let url = client.url_segments(&["users", "a b?"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users/a%20b%3F");
        // A slash in an id does not create another path segment
        let url = client.url_segments(&["users", "1/edit"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users/1%2Fedit");
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn test_view_context_shares_session() {
        let session = Arc::new(MemorySession::with_token("T"));
        let portal = PlayerPortal::connect(&PortalConfig::default(), session.clone()).unwrap();
        let ctx = portal.view_context(Arc::new(History::default()), Arc::new(LogNotifier));
        session.clear().unwrap();
        assert_eq!(ctx.session.token(), None);
    }
}
