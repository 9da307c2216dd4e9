// Device endpoints
//
// `GET /ea/devices`, optionally narrowed to a set of hosts and a point in
// time. Single-device lookup is not offered by the API.

use std::future::{self, Future};
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::{Resource, ServiceName};
use crate::error::Error;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{Envelope, HostDevices};
use crate::query::{Query, QueryValue};

const DEVICES_PATH: &str = "/ea/devices";

/// Filters for [`DeviceService::list_filtered`].
///
/// Empty host lists and empty or absent times are left out of the request
/// entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub host_ids: Vec<String>,
    pub time: Option<String>,
}

impl DeviceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// The query for this filter, or `None` when nothing survives filtering.
    pub fn to_query(&self) -> Option<Query> {
        let mut query = Query::new();
        query.insert("hostIds".into(), QueryValue::List(self.host_ids.clone()));
        query.insert("time".into(), QueryValue::Scalar(self.time.clone().unwrap_or_default()));
        query.retain(|_, value| !value.is_empty());
        (!query.is_empty()).then_some(query)
    }
}

/// Accessor for devices across the account's hosts.
#[derive(Debug)]
pub struct DeviceService {
    gateway: Arc<Gateway>,
}

impl DeviceService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// List all devices.
    ///
    /// `GET /ea/devices`
    pub async fn list(&self) -> Result<Value, Error> {
        self.list_filtered(&DeviceFilter::default()).await
    }

    /// List devices, optionally restricted to `hostIds[]` and a `time`.
    ///
    /// `GET /ea/devices?hostIds[]=..&time=..`
    pub async fn list_filtered(&self, filter: &DeviceFilter) -> Result<Value, Error> {
        debug!(hosts = filter.host_ids.len(), time = ?filter.time, "listing devices");
        self.gateway
            .call(Method::GET, DEVICES_PATH, options(filter))
            .await
    }

    /// [`list_filtered`](Self::list_filtered), deserialized.
    pub async fn list_typed(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Envelope<Vec<HostDevices>>, Error> {
        self.gateway
            .call_as(Method::GET, DEVICES_PATH, options(filter))
            .await
    }
}

fn options(filter: &DeviceFilter) -> RequestOptions {
    let mut options = RequestOptions::new();
    options.query = filter.to_query();
    options
}

impl Resource for DeviceService {
    const NAME: ServiceName = ServiceName::Devices;
    const SUPPORTS_GET: bool = false;

    async fn list(&self) -> Result<Value, Error> {
        DeviceService::list(self).await
    }

    /// Always [`Error::NotImplemented`]; no request is made.
    fn get(&self, _id: &str) -> impl Future<Output = Result<Value, Error>> + Send {
        future::ready(Err(Error::NotImplemented {
            operation: "Get device by ID",
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::query::encode;

    #[test]
    fn empty_filter_produces_no_query() {
        assert_eq!(DeviceFilter::new().to_query(), None);
        assert_eq!(DeviceFilter::new().time("").to_query(), None);
        assert_eq!(
            DeviceFilter::new().host_ids(Vec::<String>::new()).to_query(),
            None
        );
    }

    #[test]
    fn host_ids_come_before_time() {
        let query = DeviceFilter::new()
            .time("2024-06-01T00:00:00Z")
            .host_ids(["a", "b"])
            .to_query()
            .expect("non-empty filter");
        assert_eq!(
            encode(&query),
            "hostIds[]=a&hostIds[]=b&time=2024-06-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn time_alone_is_kept() {
        let query = DeviceFilter::new()
            .time("now")
            .to_query()
            .expect("non-empty filter");
        assert_eq!(encode(&query), "time=now");
    }
}
