//! CLI configuration: thin wrapper around `unicloud_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--base-url, --api-key, --timeout, ...).

use clap::ValueEnum;
use secrecy::SecretString;

use unicloud_api::ClientConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use unicloud_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Comma-separated profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Output format: flag > config default > table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// Build a `ClientConfig` from the config file, active profile, and flags.
///
/// Flags win over profile values, which win over `[defaults]`. A missing
/// profile is fine as long as an API key arrives by flag or environment,
/// unless the profile was named explicitly.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let mut profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    // API key: flag/env > profile chain
    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => unicloud_config::resolve_api_key(&profile, &profile_name)?,
    };

    // Remaining flags override the profile before defaults fill the gaps.
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.debug {
        profile.debug = Some(true);
    }
    if let Some(ref url) = global.base_url {
        profile.base_url = Some(url.clone());
    }

    Ok(unicloud_config::client_config_with_key(
        &profile,
        &config.defaults,
        api_key,
    )?)
}
