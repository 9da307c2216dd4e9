// Request gateway for the Site Manager API.
//
// Turns (method, path, options) into one HTTP call and the outcome into
// either the decoded JSON body or a categorized `Error`. Owns the API key,
// base address, and the two settings that may change between calls
// (timeout and debug).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::query::{self, Query};
use crate::status::{UNKNOWN_ERROR, translate};
use crate::transport::Transport;

/// Every Site Manager endpoint lives under this version prefix.
pub const API_PREFIX: &str = "/ea";

const BODY_PREVIEW_CHARS: usize = 200;

// ── Request options ──────────────────────────────────────────────────

/// Per-call extras: query parameters, JSON body, and header overrides.
///
/// `X-API-KEY` and `Accept` in `headers` are always replaced by the gateway.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Option<Query>,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ── Gateway ──────────────────────────────────────────────────────────

/// Issues authenticated calls against the Site Manager API.
///
/// Timeout and debug are read once when a call starts, so changing them
/// only affects calls issued afterwards.
#[derive(Debug)]
pub struct Gateway {
    transport: Transport,
    base_url: Url,
    api_key: HeaderValue,
    debug: AtomicBool,
    timeout_ms: AtomicU64,
}

impl Gateway {
    /// Build a gateway with its own reqwest clients.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_transport(config, Transport::new()?)
    }

    /// Build a gateway on top of an existing transport.
    pub fn with_transport(config: ClientConfig, transport: Transport) -> Result<Self, Error> {
        let timeout_ms = timeout_to_ms(config.timeout)?;
        Ok(Self {
            api_key: auth::api_key_value(&config.api_key)?,
            transport,
            base_url: config.base_url,
            debug: AtomicBool::new(config.debug),
            timeout_ms: AtomicU64::new(timeout_ms),
        })
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.load(Ordering::Relaxed))
    }

    /// Change the timeout for subsequent calls. Must be at least one second.
    pub fn set_timeout(&self, timeout: Duration) -> Result<(), Error> {
        let ms = timeout_to_ms(timeout)?;
        self.timeout_ms.store(ms, Ordering::Relaxed);
        Ok(())
    }

    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Toggle verbose transport logging for subsequent calls.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}{path}` plus `?{query}` when the encoded query is non-empty.
    fn url(&self, path: &str, query: Option<&Query>) -> Result<Url, Error> {
        let invalid = || Error::InvalidPath {
            path: path.to_owned(),
            prefix: API_PREFIX,
        };
        if path.contains(['?', '#']) {
            return Err(invalid());
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let mut full = format!("{base}{path}");
        if let Some(encoded) = query.map(query::encode).filter(|q| !q.is_empty()) {
            full.push('?');
            full.push_str(&encoded);
        }
        let url = Url::parse(&full)?;

        // Dot-segments are resolved while parsing, so check the final path.
        let prefix = format!("{}{API_PREFIX}", self.base_url.path().trim_end_matches('/'));
        match url.path().strip_prefix(&prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Ok(url),
            _ => Err(invalid()),
        }
    }

    // ── Calls ────────────────────────────────────────────────────────

    /// Issue one call and return the decoded JSON body of a 200 response.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        let debug = self.debug();
        let timeout = self.timeout();

        let RequestOptions {
            query,
            body,
            mut headers,
        } = options;
        auth::apply(&mut headers, &self.api_key);
        let url = self.url(path, query.as_ref())?;

        debug!("{method} {url}");
        if debug {
            debug!(?headers, ?timeout, has_body = body.is_some(), "request details");
        }

        let mut builder = self
            .transport
            .client(debug)
            .request(method, url)
            .headers(headers)
            .timeout(timeout);
        if let Some(ref body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            debug!(error = %e, "request failed without a response");
            Error::Transport(e)
        })?;

        let status = resp.status();
        // reqwest only raises for 4xx/5xx when asked; keep its error as the
        // fallback message for those statuses.
        let raised = resp.error_for_status_ref().err();
        let raw = resp.text().await.map_err(Error::Transport)?;
        debug!(status = status.as_u16(), bytes = raw.len(), "response");
        if debug {
            debug!(body = %preview(&raw), "response body");
        }

        let decoded = serde_json::from_str::<Value>(&raw).ok();

        if let Some(err) = raised {
            let message = server_message(decoded.as_ref()).unwrap_or_else(|| err.to_string());
            return Err(translate(status.as_u16(), message));
        }

        if status == StatusCode::OK {
            return decoded.ok_or_else(|| Error::Deserialization {
                message: format!(
                    "response body is not valid JSON (body preview: {:?})",
                    preview(&raw)
                ),
                body: raw,
            });
        }

        let message = server_message(decoded.as_ref()).unwrap_or_else(|| UNKNOWN_ERROR.into());
        Err(translate(status.as_u16(), message))
    }

    /// Like [`call`](Self::call), then deserialize the body into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let value = self.call(method, path, options).await?;
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// `{collection}/{id}` with `id` escaped as exactly one path segment.
pub(crate) fn item_path(collection: &str, id: &str) -> Result<String, Error> {
    if matches!(id, "" | "." | "..") {
        return Err(Error::InvalidId { id: id.to_owned() });
    }
    let mut scratch = Url::parse("http://segment.invalid/")?;
    scratch
        .path_segments_mut()
        .map_err(|()| Error::InvalidId { id: id.to_owned() })?
        .pop_if_empty()
        .push(id);
    Ok(format!("{collection}{}", scratch.path()))
}

fn timeout_to_ms(timeout: Duration) -> Result<u64, Error> {
    if timeout < Duration::from_secs(1) {
        return Err(Error::InvalidTimeout);
    }
    Ok(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
}

/// The `message` field of a decoded error body, if any.
///
/// Undecodable bodies arrive here as `None` and simply have no message.
fn server_message(body: Option<&Value>) -> Option<String> {
    match body?.get("message")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(BODY_PREVIEW_CHARS).collect()
}
