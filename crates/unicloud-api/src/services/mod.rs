// Resource accessors: one per Site Manager resource family.
//
// Each accessor builds paths and query parameters for its family and hands
// the call to the shared `Gateway`. `Service` is the by-name view the
// client registry hands out.

pub mod devices;
pub mod hosts;
pub mod sites;

use std::future::Future;

use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::Error;

pub use devices::{DeviceFilter, DeviceService};
pub use hosts::HostService;
pub use sites::SiteService;

/// The resource families an accessor can be resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceName {
    Hosts,
    Sites,
    Devices,
}

/// The `list` / `get` capability shared by every accessor.
///
/// `SUPPORTS_GET` is `false` for families whose `get` always fails with
/// [`Error::NotImplemented`] without touching the network.
pub trait Resource {
    const NAME: ServiceName;
    const SUPPORTS_GET: bool;

    /// List every resource of this family (no filters).
    fn list(&self) -> impl Future<Output = Result<Value, Error>> + Send;

    /// Fetch one resource by identifier.
    fn get(&self, id: &str) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// An accessor resolved by family name.
#[derive(Debug, Clone, Copy)]
pub enum Service<'a> {
    Hosts(&'a HostService),
    Sites(&'a SiteService),
    Devices(&'a DeviceService),
}

impl Service<'_> {
    pub fn name(&self) -> ServiceName {
        match self {
            Self::Hosts(_) => HostService::NAME,
            Self::Sites(_) => SiteService::NAME,
            Self::Devices(_) => DeviceService::NAME,
        }
    }

    /// Whether `get` issues a request rather than failing with `NotImplemented`.
    pub fn supports_get(&self) -> bool {
        match self {
            Self::Hosts(_) => HostService::SUPPORTS_GET,
            Self::Sites(_) => SiteService::SUPPORTS_GET,
            Self::Devices(_) => DeviceService::SUPPORTS_GET,
        }
    }

    pub async fn list(&self) -> Result<Value, Error> {
        match self {
            Self::Hosts(s) => Resource::list(*s).await,
            Self::Sites(s) => Resource::list(*s).await,
            Self::Devices(s) => Resource::list(*s).await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Value, Error> {
        match self {
            Self::Hosts(s) => Resource::get(*s, id).await,
            Self::Sites(s) => Resource::get(*s, id).await,
            Self::Devices(s) => Resource::get(*s, id).await,
        }
    }
}
