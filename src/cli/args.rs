//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// liquidctl-backed cooling control tool
///
/// Read cooling telemetry and set fan/pump duty cycles through liquidctl.
#[derive(Parser, Debug)]
#[command(name = "liqctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LIQCTL_CONFIG")]
    pub config: Option<String>,

    /// Path to the liquidctl executable (overrides config)
    #[arg(long, global = true, env = "LIQCTL_EXE")]
    pub exe: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List detected cooling devices and their capabilities
    List,

    /// Show current sensor readings
    Status,

    /// Set a duty cycle on one device channel
    Set(SetArgs),

    /// Load the sensor set and poll repeatedly
    Watch(WatchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the set command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Device address as shown by `liqctl list`
    pub address: String,

    /// Channel to write (e.g. fan1, pump)
    pub channel: String,

    /// Duty percentage (0-100)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub duty: u8,
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Poll interval in seconds (defaults to the configured interval)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Poll once and exit (single-use mode)
    #[arg(long)]
    pub single_use: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
