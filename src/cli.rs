//! Command-line interface for the `remix` binary.
//!
//! Help and version output are fixed text, so clap's generated `--help` and
//! `--version` flags are disabled and handled here instead. Both flags are
//! global: they are honored after a subcommand and may be repeated.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Usage text printed by `remix --help`.
pub const HELP_TEXT: &str = "
  Usage
    $ remix build [remixRoot]
    $ remix run [remixRoot]

  Options
    --help              Print this help message and exit
    --version, -v       Print the CLI version and exit

  Examples
    $ remix build my-website
    $ remix run my-website

";

/// Version reported by `remix --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "remix",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    args_override_self = true
)]
pub struct Cli {
    /// Print this help message and exit
    #[arg(long, global = true)]
    pub help: bool,

    /// Print the CLI version and exit
    #[arg(long, short = 'v', global = true)]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Write the route manifest into the app's build directory
    #[command(disable_help_flag = true)]
    Build {
        #[arg(value_name = "remixRoot", default_value = ".")]
        remix_root: PathBuf,
    },
    /// Serve the app
    #[command(disable_help_flag = true)]
    Run {
        #[arg(value_name = "remixRoot", default_value = ".")]
        remix_root: PathBuf,
    },
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Build(PathBuf),
    Run(PathBuf),
    /// Neither a flag nor a subcommand was given.
    Usage,
}

impl Cli {
    /// Resolve flags and subcommand. `--help` wins over everything, then
    /// `--version`.
    pub fn invocation(self) -> Invocation {
        if self.help {
            return Invocation::Help;
        }
        if self.version {
            return Invocation::Version;
        }
        match self.command {
            Some(Commands::Build { remix_root }) => Invocation::Build(remix_root),
            Some(Commands::Run { remix_root }) => Invocation::Run(remix_root),
            None => Invocation::Usage,
        }
    }
}
