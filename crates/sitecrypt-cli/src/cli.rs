use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use sitecrypt_core::VERSION;

/// sitecrypt - Seal a site's private data behind a password at build time
#[derive(Parser)]
#[command(name = "sitecrypt")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ./sitecrypt.toml when present)
    #[arg(short, long, global = true, env = "SITECRYPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Password source shared by every command that touches the artifact
#[derive(Args)]
pub struct PasswordArgs {
    /// Password (falls back to SITECRYPT_PASSWORD, then an interactive prompt)
    #[arg(value_name = "PASSWORD", env = "SITECRYPT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Artifact locations
#[derive(Args)]
pub struct ArtifactArgs {
    /// Ciphertext output path
    #[arg(long, value_name = "FILE")]
    pub ciphertext: Option<PathBuf>,

    /// Salt/iv record output path
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,
}

/// Arguments for the `build` and `verify` commands
#[derive(Args)]
pub struct SealArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Source document (.yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Write plaintext to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt the source document and verify the written artifact
    Build(SealArgs),

    /// Check that existing artifacts decrypt to the current source document
    Verify(SealArgs),

    /// Decrypt existing artifacts
    Decrypt(DecryptArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
