//! Point d'entrée CLI pour gcp-editor

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Charge `.env` (ex: `GCP_IMPORT_CONFIG=latlng`, `RUST_LOG=gcp=debug`):
/// répertoire courant et parents, puis à côté de l'exécutable
fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")));
    if let Some(path) = beside_exe {
        let _ = dotenvy::from_path(path);
    }
}

mod cli;

use cli::Commands;

/// Importer, valider et exporter des points de contrôle au sol
#[derive(Parser)]
#[command(name = "gcp-editor")]
#[command(author, version)]
#[command(about = "Import, validate and export ground control point files")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // GCP_IMPORT_CONFIG doit être visible avant la résolution du preset
    load_env();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Import {
            path,
            output,
            config,
        } => {
            debug!(path = %path.display(), output = %output.display(), "Import");
            cli::cmd_import(&path, &output, config)?;
        }
        Commands::Validate { project, report } => {
            debug!(project = %project.display(), "Validate");
            cli::cmd_validate(&project, report.as_deref())?;
        }
        Commands::Export {
            project,
            output,
            force,
        } => {
            debug!(project = %project.display(), output = %output.display(), force, "Export");
            cli::cmd_export(&project, &output, force)?;
        }
    }

    Ok(())
}

/// `-q`: warn, défaut: info, `-v`: debug, `-vv`: trace; `RUST_LOG` s'ajoute
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbose > 0)
        .with_file(false)
        .with_line_number(false)
        .init();
}
