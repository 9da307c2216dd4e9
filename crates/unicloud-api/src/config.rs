// ── Runtime client configuration ──
//
// Describes *how* to reach the Site Manager API. Carries the credential and
// connection tuning, but never touches disk: `unicloud-config` (or any other
// caller) builds a `ClientConfig` and hands it to `Client::new`.

use std::sync::LazyLock;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.ui.com";

/// Parsed once; the constant above is checked by `default_base_url_parses`.
static DEFAULT_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"));

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for one Site Manager API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as `X-API-KEY`.
    /// Generated at: <https://unifi.ui.com> > Settings > API Keys.
    pub api_key: SecretString,
    /// Base address every request path is appended to.
    pub base_url: Url,
    /// Ask the transport for verbose connection logging.
    pub debug: bool,
    /// Per-request timeout. Must be at least one second.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config for the public API host with default timeout and debug off.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            debug: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The parsed [`DEFAULT_BASE_URL`].
pub fn default_base_url() -> Url {
    DEFAULT_URL.clone()
}
