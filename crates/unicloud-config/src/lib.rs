//! Configuration for the `unicloud` CLI.
//!
//! TOML profiles, API key resolution (env + keyring + plaintext), and
//! translation to `unicloud_api::ClientConfig`. The CLI layers its
//! `GlobalOpts` overrides on top of what this crate produces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unicloud_api::{ClientConfig, DEFAULT_TIMEOUT_SECS};

/// Environment prefix for config overrides (`UNICLOUD_DEFAULTS__TIMEOUT=30`).
pub const ENV_PREFIX: &str = "UNICLOUD_";

/// Keyring service name under which API keys are stored.
pub const KEYRING_SERVICE: &str = "unicloud";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API key profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub debug: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            debug: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// A named API key profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API host override (defaults to `https://api.ui.com`).
    pub base_url: Option<String>,

    /// API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Override debug mode.
    pub debug: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unicloud", "unicloud").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unicloud");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))
}

/// Resolve an API key from the credential chain (no CLI flag step).
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store an API key for `profile_name` in the system keyring.
pub fn store_api_key(profile_name: &str, key: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(key.expose_secret())?;
    Ok(())
}

// ── ClientConfig construction ───────────────────────────────────────

/// Parse a base URL, rejecting anything that isn't http(s).
pub fn parse_base_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Validate a timeout in seconds.
pub fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be a positive number of seconds".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Build a `ClientConfig` from a profile and the global defaults.
///
/// Profile values win over `defaults`; no CLI flag overrides are applied.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let api_key = resolve_api_key(profile, profile_name)?;
    client_config_with_key(profile, defaults, api_key)
}

/// Like [`profile_to_client_config`], with an already-resolved API key.
///
/// Callers with their own overrides fold them into `profile` first.
pub fn client_config_with_key(
    profile: &Profile,
    defaults: &Defaults,
    api_key: SecretString,
) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::new(api_key)
        .with_timeout(timeout_from_secs(profile.timeout.unwrap_or(defaults.timeout))?)
        .with_debug(profile.debug.unwrap_or(defaults.debug));

    if let Some(ref raw) = profile.base_url {
        config = config.with_base_url(parse_base_url(raw)?);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    // Profile names unlikely to exist in a developer's keyring.
    const PROFILE: &str = "unicloud-config-test-profile";

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&dir.path().join("absent.toml")).expect("loads");
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.output, "table");
        assert!(!cfg.defaults.debug);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn file_and_env_layers_merge() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "work"

                [defaults]
                timeout = 20

                [profiles.work]
                base_url = "https://mock.example"
                api_key = "plain"
                "#,
            )?;
            jail.set_env("UNICLOUD_DEFAULTS__TIMEOUT", "25");
            jail.set_env("UNICLOUD_DEFAULTS__DEBUG", "true");

            let cfg = load_config_from(Path::new("config.toml")).expect("loads");
            assert_eq!(cfg.default_profile.as_deref(), Some("work"));
            assert_eq!(cfg.defaults.timeout, 25);
            assert!(cfg.defaults.debug);
            let work = cfg.profile("work").expect("profile exists");
            assert_eq!(work.base_url.as_deref(), Some("https://mock.example"));
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                api_key_env: Some("HOME_KEY".into()),
                timeout: Some(15),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).expect("saves");

        let loaded = load_config_from(&path).expect("loads");
        let home = loaded.profile("home").expect("profile exists");
        assert_eq!(home.api_key_env.as_deref(), Some("HOME_KEY"));
        assert_eq!(home.timeout, Some(15));
    }

    #[test]
    fn active_profile_prefers_explicit_name() {
        let cfg = Config::default();
        assert_eq!(cfg.active_profile_name(Some("x")), "x");
        assert_eq!(cfg.active_profile_name(None), "default");
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn api_key_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("UNICLOUD_TEST_KEY_VAR", "from-env");
            let profile = Profile {
                api_key: Some("plain".into()),
                api_key_env: Some("UNICLOUD_TEST_KEY_VAR".into()),
                ..Profile::default()
            };
            let key = resolve_api_key(&profile, PROFILE).expect("resolves");
            assert_eq!(key.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn plaintext_key_is_the_last_resort() {
        let profile = Profile {
            api_key: Some("plain".into()),
            api_key_env: Some("UNICLOUD_TEST_UNSET_VAR".into()),
            ..Profile::default()
        };
        let key = resolve_api_key(&profile, PROFILE).expect("resolves");
        assert_eq!(key.expose_secret(), "plain");

        let err = resolve_api_key(&Profile::default(), PROFILE).expect_err("no key");
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn profile_overrides_defaults() {
        let profile = Profile {
            base_url: Some("http://127.0.0.1:8080".into()),
            api_key: Some("k".into()),
            timeout: Some(3),
            ..Profile::default()
        };
        let defaults = Defaults {
            debug: true,
            ..Defaults::default()
        };
        let cfg = profile_to_client_config(&profile, PROFILE, &defaults).expect("builds");
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert!(cfg.debug);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = Profile {
            base_url: Some("ftp://example.com".into()),
            api_key: Some("k".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_config(&bad_url, PROFILE, &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));

        let zero = Profile {
            api_key: Some("k".into()),
            timeout: Some(0),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_config(&zero, PROFILE, &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));
    }
}
