// Site endpoints
//
// Only listing exists; the API has no single-site lookup.

use std::future::{self, Future};
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::{Resource, ServiceName};
use crate::error::Error;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{Envelope, Site};

const SITES_PATH: &str = "/ea/sites";

/// Accessor for the sites visible to the account.
#[derive(Debug)]
pub struct SiteService {
    gateway: Arc<Gateway>,
}

impl SiteService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// List all sites.
    ///
    /// `GET /ea/sites`
    pub async fn list(&self) -> Result<Value, Error> {
        debug!("listing sites");
        self.gateway
            .call(Method::GET, SITES_PATH, RequestOptions::new())
            .await
    }

    /// [`list`](Self::list), deserialized.
    pub async fn list_typed(&self) -> Result<Envelope<Vec<Site>>, Error> {
        self.gateway
            .call_as(Method::GET, SITES_PATH, RequestOptions::new())
            .await
    }
}

impl Resource for SiteService {
    const NAME: ServiceName = ServiceName::Sites;
    const SUPPORTS_GET: bool = false;

    async fn list(&self) -> Result<Value, Error> {
        SiteService::list(self).await
    }

    /// Always [`Error::NotImplemented`]; no request is made.
    fn get(&self, _id: &str) -> impl Future<Output = Result<Value, Error>> + Send {
        future::ready(Err(Error::NotImplemented {
            operation: "Get site by ID",
        }))
    }
}
