//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// buildroot-cdt - Describe Buildroot cross-toolchains to Eclipse CDT
#[derive(Parser)]
#[command(name = "buildroot-cdt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Toolchain manifest (defaults to ~/.buildroot-eclipse.toolchains)
    #[arg(long, global = true, env = "BUILDROOT_CDT_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Configuration file, taking precedence over ~/.buildroot-cdt/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the toolchains of the manifest
    List(ListArgs),

    /// Print the descriptors of every toolchain
    Generate(GenerateArgs),

    /// Write plug-in fragments for every toolchain into a directory
    Register(RegisterArgs),

    /// Print the build environment of a toolchain as shell exports
    Env(EnvArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Also show lines that were skipped
    #[arg(long)]
    pub all: bool,
}

/// Output format of `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Xml,
    Json,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "xml")]
    pub format: Format,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the Autotools descriptors
    #[arg(long)]
    pub no_autotools: bool,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Directory receiving one fragment file per contribution
    #[arg(long)]
    pub out: PathBuf,

    /// Skip the Autotools descriptors
    #[arg(long)]
    pub no_autotools: bool,

    /// Don't contribute launch configurations
    #[arg(long)]
    pub no_launch: bool,
}

#[derive(Args)]
pub struct EnvArgs {
    /// Install path of the toolchain, as listed in the manifest
    pub path: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
