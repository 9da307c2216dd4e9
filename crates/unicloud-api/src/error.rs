use thiserror::Error;

/// Top-level error type for the `unicloud-api` crate.
///
/// HTTP status failures carry the category-prefixed message produced by
/// [`translate`](crate::status::translate), so `to_string()` reads like
/// `"404 Not Found: host missing"`. Transport failures without a response
/// display the transport's own message unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP status categories ──────────────────────────────────────
    /// 401 -- the API key was missing or rejected.
    #[error("401 Unauthorized: {message}")]
    Unauthorized { message: String },

    /// 403 -- the key is valid but lacks access to the resource.
    #[error("403 Forbidden: {message}")]
    Forbidden { message: String },

    #[error("404 Not Found: {message}")]
    NotFound { message: String },

    #[error("405 Method Not Allowed: {message}")]
    MethodNotAllowed { message: String },

    /// 429 -- surfaced as-is; callers own any retry policy.
    #[error("429 Rate Limit Exceeded: {message}")]
    RateLimited { message: String },

    #[error("500 Internal Server Error: {message}")]
    ServerError { message: String },

    #[error("502 Bad Gateway: {message}")]
    BadGateway { message: String },

    #[error("503 Service Unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Any status without a dedicated category (including non-200 2xx/3xx).
    #[error("{status} Unknown status code: {message}")]
    UnknownStatus { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The call never produced an HTTP response (connection refused,
    /// DNS failure, timeout, ...).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// Base URL or joined request URL failed to parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request path outside the `/ea` API prefix.
    #[error("Invalid request path '{path}': must start with {prefix}")]
    InvalidPath { path: String, prefix: &'static str },

    /// Resource identifier that cannot form a single path segment.
    #[error("Invalid resource id '{id}'")]
    InvalidId { id: String },

    /// API key (or a caller header) is not a legal header value.
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("Invalid timeout: must be at least one second")]
    InvalidTimeout,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON decoding of a successful response failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Accessors ───────────────────────────────────────────────────
    /// The operation exists on the accessor interface but the API offers no endpoint for it.
    #[error("{operation} not implemented")]
    NotImplemented { operation: &'static str },

    /// Accessor lookup by a name outside `hosts` / `sites` / `devices`.
    #[error("Service {name} not found")]
    UnknownService { name: String },
}

impl Error {
    /// The HTTP status code behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::MethodNotAllowed { .. } => Some(405),
            Self::RateLimited { .. } => Some(429),
            Self::ServerError { .. } => Some(500),
            Self::BadGateway { .. } => Some(502),
            Self::ServiceUnavailable { .. } => Some(503),
            Self::UnknownStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-supplied (or fallback) message without the category prefix.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::MethodNotAllowed { message }
            | Self::RateLimited { message }
            | Self::ServerError { message }
            | Self::BadGateway { message }
            | Self::ServiceUnavailable { message }
            | Self::UnknownStatus { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` if the key was rejected or lacks permission.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the API asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns `true` if this is a transient error a caller may want to retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. }
            | Self::BadGateway { .. }
            | Self::ServiceUnavailable { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
