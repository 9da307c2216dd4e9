// Host endpoints
//
// `GET /ea/hosts` and `GET /ea/hosts/{id}`.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::{Resource, ServiceName};
use crate::error::Error;
use crate::gateway::{Gateway, RequestOptions, item_path};
use crate::models::{Envelope, Host};

const HOSTS_PATH: &str = "/ea/hosts";

/// Accessor for the consoles registered to the account.
#[derive(Debug)]
pub struct HostService {
    gateway: Arc<Gateway>,
}

impl HostService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// List all hosts.
    ///
    /// `GET /ea/hosts`
    pub async fn list(&self) -> Result<Value, Error> {
        debug!("listing hosts");
        self.gateway
            .call(Method::GET, HOSTS_PATH, RequestOptions::new())
            .await
    }

    /// Fetch one host by its identifier.
    ///
    /// `GET /ea/hosts/{id}`
    pub async fn get(&self, id: &str) -> Result<Value, Error> {
        debug!(id, "fetching host");
        self.gateway
            .call(Method::GET, &item_path(HOSTS_PATH, id)?, RequestOptions::new())
            .await
    }

    /// [`list`](Self::list), deserialized.
    pub async fn list_typed(&self) -> Result<Envelope<Vec<Host>>, Error> {
        self.gateway
            .call_as(Method::GET, HOSTS_PATH, RequestOptions::new())
            .await
    }

    /// [`get`](Self::get), deserialized.
    pub async fn get_typed(&self, id: &str) -> Result<Envelope<Host>, Error> {
        self.gateway
            .call_as(Method::GET, &item_path(HOSTS_PATH, id)?, RequestOptions::new())
            .await
    }
}

impl Resource for HostService {
    const NAME: ServiceName = ServiceName::Hosts;
    const SUPPORTS_GET: bool = true;

    async fn list(&self) -> Result<Value, Error> {
        HostService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Value, Error> {
        HostService::get(self, id).await
    }
}
