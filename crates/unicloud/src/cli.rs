//! Clap derive structures for the `unicloud` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unicloud -- query the UniFi Site Manager cloud API
#[derive(Debug, Parser)]
#[command(
    name = "unicloud",
    version,
    about = "Query UniFi hosts, sites, and devices through the Site Manager API",
    long_about = "A CLI for the UniFi Site Manager cloud API (api.ui.com).\n\n\
        Lists the consoles, sites, and devices visible to an API key.\n\
        Create a key at unifi.ui.com > Settings > API Keys.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "UNICLOUD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "UNICLOUD_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Site Manager API key
    #[arg(long, env = "UNICLOUD_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "UNICLOUD_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "UNICLOUD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Verbose HTTP connection logging
    #[arg(long, env = "UNICLOUD_DEBUG", global = true)]
    pub debug: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect consoles registered to the account
    #[command(alias = "h")]
    Hosts(HostsArgs),

    /// List sites across all hosts
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// List devices across all hosts
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Call a resource family by name and print the raw response
    Fetch(FetchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Hosts ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HostsArgs {
    #[command(subcommand)]
    pub command: HostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum HostsCommand {
    /// List hosts
    #[command(alias = "ls")]
    List,

    /// Get one host's details
    Get {
        /// Host ID
        id: String,
    },
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    #[command(alias = "ls")]
    List,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, optionally limited to some hosts
    #[command(alias = "ls")]
    List(DevicesListArgs),
}

#[derive(Debug, Args)]
pub struct DevicesListArgs {
    /// Only devices behind this host (repeatable)
    #[arg(long = "host-id", value_name = "ID")]
    pub host_ids: Vec<String>,

    /// Point in time to query (RFC 3339, e.g. 2024-06-01T00:00:00Z)
    #[arg(long)]
    pub time: Option<String>,
}

// ── Fetch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Resource family: hosts, sites, or devices
    pub service: String,

    /// Fetch one resource by ID instead of listing
    pub id: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Set a profile value
    Set {
        /// Profile key: base_url, api_key, api_key_env, timeout, debug
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile to store the key for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
