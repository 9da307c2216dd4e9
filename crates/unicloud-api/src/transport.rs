// Transport: the pair of reqwest clients behind the gateway.
//
// Debug mode can be toggled between calls, so both a quiet and a
// connection-verbose client are built up front and picked per request.
// Timeouts are applied per request, never on the client itself.

use crate::error::Error;

const USER_AGENT: &str = concat!("unicloud/", env!("CARGO_PKG_VERSION"));

/// HTTP clients shared by every request of one gateway.
#[derive(Debug, Clone)]
pub struct Transport {
    quiet: reqwest::Client,
    verbose: reqwest::Client,
}

impl Transport {
    /// Build both clients.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            quiet: Self::builder().build().map_err(Error::Transport)?,
            verbose: Self::builder()
                .connection_verbose(true)
                .build()
                .map_err(Error::Transport)?,
        })
    }

    /// Wrap an existing `reqwest::Client` for both modes (caller manages TLS, proxies, ...).
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self {
            quiet: http.clone(),
            verbose: http,
        }
    }

    /// The client to use for the next request.
    pub fn client(&self, debug: bool) -> &reqwest::Client {
        if debug { &self.verbose } else { &self.quiet }
    }

    fn builder() -> reqwest::ClientBuilder {
        reqwest::Client::builder().user_agent(USER_AGENT)
    }
}
