// Client: owner of the gateway and the per-family accessor registry.
//
// Accessors are created on first use and cached for the client's lifetime.
// `OnceLock` makes first access race-free: concurrent callers all get the
// same instance.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::gateway::Gateway;
use crate::services::{DeviceService, HostService, Service, ServiceName, SiteService};
use crate::transport::Transport;

/// Version of this client library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Async client for the UniFi Site Manager API.
///
/// Construct one per API key and share it (it is `Send + Sync`); there is
/// no process-wide instance.
#[derive(Debug)]
pub struct Client {
    gateway: Arc<Gateway>,
    hosts: OnceLock<HostService>,
    sites: OnceLock<SiteService>,
    devices: OnceLock<DeviceService>,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_gateway(Gateway::new(config)?))
    }

    /// Build on an existing `reqwest::Client` (caller manages TLS, proxies, ...).
    pub fn from_reqwest(config: ClientConfig, http: reqwest::Client) -> Result<Self, Error> {
        let gateway = Gateway::with_transport(config, Transport::from_reqwest(http))?;
        Ok(Self::from_gateway(gateway))
    }

    fn from_gateway(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            hosts: OnceLock::new(),
            sites: OnceLock::new(),
            devices: OnceLock::new(),
        }
    }

    /// Version of this client library.
    pub fn version() -> &'static str {
        VERSION
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// The gateway shared by all accessors, for calls outside the three families.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn base_url(&self) -> &Url {
        self.gateway.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.gateway.timeout()
    }

    /// Applies to calls issued after this returns; in-flight calls keep their timeout.
    pub fn set_timeout(&self, timeout: Duration) -> Result<(), Error> {
        self.gateway.set_timeout(timeout)
    }

    pub fn debug(&self) -> bool {
        self.gateway.debug()
    }

    pub fn set_debug(&self, debug: bool) {
        self.gateway.set_debug(debug);
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn hosts(&self) -> &HostService {
        self.hosts.get_or_init(|| {
            debug!("creating hosts accessor");
            HostService::new(Arc::clone(&self.gateway))
        })
    }

    pub fn sites(&self) -> &SiteService {
        self.sites.get_or_init(|| {
            debug!("creating sites accessor");
            SiteService::new(Arc::clone(&self.gateway))
        })
    }

    pub fn devices(&self) -> &DeviceService {
        self.devices.get_or_init(|| {
            debug!("creating devices accessor");
            DeviceService::new(Arc::clone(&self.gateway))
        })
    }

    /// The accessor for a known family.
    pub fn resolve(&self, name: ServiceName) -> Service<'_> {
        match name {
            ServiceName::Hosts => Service::Hosts(self.hosts()),
            ServiceName::Sites => Service::Sites(self.sites()),
            ServiceName::Devices => Service::Devices(self.devices()),
        }
    }

    /// The accessor for a family given by name (`hosts`, `sites`, `devices`).
    pub fn service(&self, name: &str) -> Result<Service<'_>, Error> {
        let family = name.parse::<ServiceName>().map_err(|_| Error::UnknownService {
            name: name.to_owned(),
        })?;
        Ok(self.resolve(family))
    }
}
