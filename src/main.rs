//! `remix` command-line entry point.
//!
//! ```text
//! remix --help              fixed usage text on stdout
//! remix --version | -v      package version on stdout
//! remix build [remixRoot]   config → route table → build/manifest.json
//! remix run [remixRoot]     config → logging → metrics → serve until SIGINT/SIGTERM
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use remix_actions::cli::{Cli, Invocation, HELP_TEXT, VERSION};
use remix_actions::config::{self, AppConfig, ConfigError};
use remix_actions::lifecycle::startup;
use remix_actions::observability::logging;
use remix_actions::{build, routes};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    match Cli::parse().invocation() {
        Invocation::Help => {
            print!("{HELP_TEXT}");
        }
        Invocation::Version => {
            println!("{VERSION}");
        }
        Invocation::Usage => {
            eprint!("{HELP_TEXT}");
            return Ok(ExitCode::from(2));
        }
        Invocation::Build(root) => {
            let config = load(&root)?;
            let output = build::build(&root, &config, &routes::app_routes()?)?;
            println!(
                "Built {} route(s) to {}",
                output.manifest.routes.len(),
                output.path.display()
            );
        }
        Invocation::Run(root) => {
            let config = load(&root)?;
            tracing::info!(root = %root.display(), "remix v{VERSION} starting");
            startup::run(config).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Load the app config and start logging with its level.
fn load(root: &Path) -> Result<AppConfig, ConfigError> {
    let config = config::load_from_root(root)?;
    if let Err(e) = logging::init(&config.observability) {
        eprintln!("logging already initialized: {e}");
    }
    Ok(config)
}
