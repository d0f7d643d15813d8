use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use devvy::config::DevvyToml;
use devvy::detect::detect;
use devvy::errors::DevvyError;
use devvy::exec::SystemRunner;
use devvy::interact::TerminalInteraction;
use devvy::session::{MenuController, SessionEnd};

pub const NO_PROJECT_MESSAGE: &str = "No supported project type detected.";

#[derive(Parser)]
#[command(name = "devvy")]
#[command(version, about = "Devvy (Development + savvy): a command menu for your project's toolchain")]
pub struct Cli {
    /// Project directory to inspect
    #[arg(default_value = ".")]
    pub project_path: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_dir =
        cli.project_path
            .canonicalize()
            .map_err(|source| DevvyError::ProjectPathNotFound {
                path: cli.project_path.clone(),
                source,
            })?;

    let kind = detect(&project_dir);
    if !kind.is_supported() {
        println!("{}", NO_PROJECT_MESSAGE);
        return Ok(());
    }

    let config = DevvyToml::load_user()?.sanitized();
    let mut controller = MenuController::new(
        project_dir,
        kind,
        config,
        TerminalInteraction::new(),
        SystemRunner,
    );

    if controller.run()? == SessionEnd::InputClosed {
        tracing::debug!(
            project = %controller.project_dir().display(),
            kind = %controller.kind(),
            "input closed, leaving menu"
        );
    }

    Ok(())
}
