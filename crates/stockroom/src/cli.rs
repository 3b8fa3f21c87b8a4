//! Clap derive structures for the `stockroom` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockroom -- inspect a remote product inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Inspect a remote product inventory from the command line",
    long_about = "Inspect a remote product inventory from the command line.\n\n\
        Loads the product catalog once, derives stock statistics,\n\
        and renders them as tables, JSON, YAML, or plain text.",
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
    /// Catalog profile to use
    #[arg(long, short = 'p', env = "STOCKROOM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog base URL (overrides profile)
    #[arg(long, short = 'u', env = "STOCKROOM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Product list path below the base URL (overrides profile)
    #[arg(long, short = 'e', env = "STOCKROOM_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKROOM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

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
    #[arg(long, short = 'k', env = "STOCKROOM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STOCKROOM_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect products
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// Show inventory statistics
    Stats,

    /// Summarize products per category
    #[command(alias = "cat")]
    Categories,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Show one product by id (its catalog name)
    Get {
        /// Product id or name (case-insensitive fallback)
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Only products in this category (case-insensitive)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only products at or below the low-stock threshold
    #[arg(long)]
    pub low_stock: bool,

    /// Sort order
    #[arg(long, short = 's', default_value = "catalog")]
    pub sort: SortKey,

    /// Reverse the sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    /// Order served by the catalog
    Catalog,
    Name,
    Category,
    Price,
    Quantity,
    Value,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: base_url, endpoint, role, insecure, timeout, ca_cert
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

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
