//! Clap derive structures for the `grafctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use grafctl_api::models::OrgRole;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// grafctl -- manage Grafana dashboards, folders, data sources and keys
#[derive(Debug, Parser)]
#[command(
    name = "grafctl",
    version,
    about = "Manage Grafana servers from the command line",
    long_about = "A CLI for the Grafana HTTP management API.\n\n\
        Talks to the server through a version-specific client picked by\n\
        --api-version (or the profile's api_version, default 5.x).",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "GRAFCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Grafana base URL (overrides profile)
    #[arg(long, short = 'u', env = "GRAFCTL_URL", global = true)]
    pub url: Option<String>,

    /// Server API version, e.g. "5.x" (overrides profile)
    #[arg(long, env = "GRAFCTL_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// API key, sent as a Bearer token
    #[arg(long, env = "GRAFCTL_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Username for basic auth
    #[arg(long, env = "GRAFCTL_USERNAME", global = true)]
    pub user: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "GRAFCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GRAFCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "GRAFCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "GRAFCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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
    /// Manage dashboards
    #[command(alias = "dash", alias = "db")]
    Dashboards(DashboardsArgs),

    /// Manage dashboard folders
    #[command(alias = "f")]
    Folders(FoldersArgs),

    /// Manage data sources
    #[command(alias = "ds")]
    Datasources(DatasourcesArgs),

    /// Manage alert notification channels
    #[command(alias = "ch")]
    Channels(ChannelsArgs),

    /// Manage API keys
    Keys(KeysArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DashboardsArgs {
    #[command(subcommand)]
    pub command: DashboardsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DashboardsCommand {
    /// List dashboards
    #[command(alias = "ls")]
    List {
        /// Only dashboards in this folder id
        #[arg(long)]
        folder: Option<i64>,
    },

    /// Search dashboards by title within a folder
    Search {
        /// Title query
        title: String,

        /// Folder id (0 = General)
        #[arg(long, default_value = "0")]
        folder: i64,
    },

    /// Show a dashboard by uid
    Get {
        /// Dashboard uid
        uid: String,

        /// Include the server's metadata envelope
        #[arg(long)]
        meta: bool,
    },

    /// Look up a dashboard by exact title; exits 4 if none matches
    Exists {
        /// Dashboard title (case-sensitive)
        title: String,
    },

    /// Create or update a dashboard from a JSON file
    Create {
        /// Dashboard JSON (bare model or `{"dashboard": ...}` envelope)
        #[arg(long, short = 'F')]
        from_file: PathBuf,

        /// Target folder id (0 = General)
        #[arg(long, default_value = "0")]
        folder: i64,

        /// Replace an existing dashboard with the same uid/title
        #[arg(long)]
        overwrite: bool,

        /// Override the title from the file
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a dashboard by uid
    #[command(alias = "rm")]
    Delete {
        /// Dashboard uid
        uid: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FOLDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FoldersArgs {
    #[command(subcommand)]
    pub command: FoldersCommand,
}

#[derive(Debug, Subcommand)]
pub enum FoldersCommand {
    /// List folders
    #[command(alias = "ls")]
    List,

    /// Show a folder by id
    Get {
        /// Folder id
        id: i64,
    },

    /// Create a folder
    Create {
        /// Folder uid
        #[arg(long)]
        uid: String,

        /// Folder title
        #[arg(long)]
        title: String,
    },

    /// Create the folder unless one with this id already exists
    Ensure {
        /// Folder id to look up
        id: i64,

        /// Uid for the folder if it has to be created
        #[arg(long)]
        uid: String,

        /// Title for the folder if it has to be created
        #[arg(long)]
        title: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATA SOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DatasourcesArgs {
    #[command(subcommand)]
    pub command: DatasourcesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DatasourcesCommand {
    /// List data sources
    #[command(alias = "ls")]
    List,

    /// Show a data source by id
    Get {
        /// Data source id
        id: i64,
    },

    /// Create a data source from a JSON file
    Create {
        /// Data source JSON
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a data source by id
    #[command(alias = "rm")]
    Delete {
        /// Data source id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NOTIFICATION CHANNELS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ChannelsArgs {
    #[command(subcommand)]
    pub command: ChannelsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChannelsCommand {
    /// List notification channels
    #[command(alias = "ls")]
    List,

    /// Create a notification channel from a JSON file
    Create {
        /// Channel JSON
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  API KEYS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// List API keys
    #[command(alias = "ls")]
    List,

    /// Issue an API key; the secret is printed once
    Create {
        /// Key name
        name: String,

        /// Organisation role granted to the key
        #[arg(long, default_value = "viewer")]
        role: RoleArg,

        /// Lifetime in seconds (omit for a non-expiring key)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Delete an API key by id
    #[command(alias = "rm")]
    Delete {
        /// Key id
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Viewer,
    Editor,
    Admin,
}

impl From<RoleArg> for OrgRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Viewer => Self::Viewer,
            RoleArg::Editor => Self::Editor,
            RoleArg::Admin => Self::Admin,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the current configuration (secrets masked)
    Show,

    /// List the server API versions this build supports
    Versions,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Set a value on the active profile
    Set {
        /// Profile key (url, api_version, auth, api_key_env, username, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// Store the active profile's API key or password in the system keyring
    SetSecret,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
