// unicloud-api: Async Rust client for the UniFi Site Manager cloud API (api.ui.com)

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod query;
pub mod services;
pub mod status;
pub mod transport;

pub use client::{Client, VERSION};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::Error;
pub use gateway::{Gateway, RequestOptions};
pub use query::{Query, QueryValue};
pub use services::{
    DeviceFilter, DeviceService, HostService, Resource, Service, ServiceName, SiteService,
};
pub use transport::Transport;
