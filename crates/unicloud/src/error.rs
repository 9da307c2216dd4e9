//! CLI error types with miette diagnostics.
//!
//! Maps `unicloud_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use unicloud_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Site Manager API")]
    #[diagnostic(
        code(unicloud::connection_failed),
        help(
            "Check your network connection and the base URL.\n\
             Override the host with --base-url or base_url in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: unicloud_api::Error,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(unicloud::timeout),
        help("Increase the timeout with --timeout or `timeout` in your profile.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(unicloud::auth_failed),
        help(
            "Verify your API key (unifi.ui.com > Settings > API Keys).\n\
             Store a new one with: unicloud config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(unicloud::no_credentials),
        help(
            "Store one with: unicloud config set-key\n\
             Or set the UNICLOUD_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(unicloud::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(unicloud::unsupported),
        help("The Site Manager API has no endpoint for this; use `list` instead.")
    )]
    Unsupported { message: String },

    #[error("Unknown resource family '{name}'")]
    #[diagnostic(
        code(unicloud::unknown_service),
        help("Valid families: hosts, sites, devices")
    )]
    UnknownService { name: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(unicloud::rate_limited),
        help("The API is throttling this key. Wait a moment and try again.")
    )]
    RateLimited { message: String },

    #[error(transparent)]
    #[diagnostic(code(unicloud::api_error))]
    Api(unicloud_api::Error),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unicloud::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(unicloud::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: unicloud config set base_url https://api.ui.com --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(unicloud::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } | Self::UnknownService { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error → CliError mapping ─────────────────────────────────

impl From<unicloud_api::Error> for CliError {
    fn from(err: unicloud_api::Error) -> Self {
        use unicloud_api::Error as ApiError;

        match err {
            e if e.is_timeout() => Self::Timeout,
            e @ ApiError::Transport(_) => Self::ConnectionFailed { source: e },
            e if e.is_auth_error() => Self::AuthFailed {
                message: e.to_string(),
            },
            e @ ApiError::NotFound { .. } => Self::NotFound {
                message: e.to_string(),
            },
            e @ ApiError::RateLimited { .. } => Self::RateLimited {
                message: e.to_string(),
            },
            e @ ApiError::NotImplemented { .. } => Self::Unsupported {
                message: e.to_string(),
            },
            ApiError::UnknownService { name } => Self::UnknownService { name },
            other => Self::Api(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => Self::Config(other),
        }
    }
}
