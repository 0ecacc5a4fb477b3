//! Clap derive structures for the `switchboard` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// switchboard -- manage bots, lights and training jobs from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "switchboard",
    version,
    about = "Manage Switchboard bots, lights and training jobs",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SWITCHBOARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend API root URL (overrides profile)
    #[arg(long, short = 'b', env = "SWITCHBOARD_BACKEND", global = true)]
    pub backend: Option<String>,

    /// API token (overrides profile and keyring)
    #[arg(long, env = "SWITCHBOARD_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SWITCHBOARD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', env = "SWITCHBOARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SWITCHBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Rounded table for terminals
    Table,
    /// Indented JSON
    Json,
    /// JSON on one line
    JsonCompact,
    /// YAML
    Yaml,
    /// IDs only, one per line
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage chat bots
    Bots(BotsArgs),

    /// Control smart lights
    Lights(LightsArgs),

    /// Inspect and start bot training jobs
    #[command(alias = "training")]
    Jobs(JobsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BotsArgs {
    #[command(subcommand)]
    pub command: BotsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BotsCommand {
    /// List bots
    #[command(alias = "ls")]
    List,

    /// Show one bot
    Get {
        /// Bot ID
        id: String,
    },

    /// Create a bot
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        /// Bot account username
        #[arg(long)]
        username: Option<String>,

        /// Webhook URL for incoming messages
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Change a bot's name, webhook or active flag
    Update {
        /// Bot ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        webhook: Option<String>,

        /// Activate or deactivate the bot
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a bot
    #[command(alias = "rm")]
    Delete {
        /// Bot ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LIGHTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LightsArgs {
    #[command(subcommand)]
    pub command: LightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightsCommand {
    /// List lights
    #[command(alias = "ls")]
    List,

    /// Show one light
    Get {
        /// Light ID
        id: String,
    },

    /// Set brightness in percent
    Brightness {
        /// Light ID
        id: String,

        /// 0 through 100
        value: u8,
    },

    /// Set white color temperature
    Temperature {
        /// Light ID
        id: String,

        /// Kelvin, 1000 through 10000
        kelvin: u16,
    },

    /// Rename a light
    Rename {
        /// Light ID
        id: String,

        name: String,
    },

    /// Switch a light on
    On {
        /// Light ID
        id: String,
    },

    /// Switch a light off
    Off {
        /// Light ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRAINING JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List training jobs
    #[command(alias = "ls")]
    List,

    /// Show one training job
    Get {
        /// Job ID
        id: String,
    },

    /// Start a training job for a bot
    Create {
        /// Bot ID to train
        #[arg(long)]
        bot: String,

        /// Job title
        #[arg(long)]
        title: String,
    },
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
    /// Create a profile with guided setup
    Init,

    /// Display the current configuration (tokens redacted)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to make the default
        name: String,
    },

    /// Store an API token for the active profile in the system keyring
    SetToken,

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
