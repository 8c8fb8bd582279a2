//! Définition et implémentation des commandes CLI
//!
//! - `import`: fichier de contrôle hérité -> projet JSON
//! - `validate`: règles de validation sur un projet
//! - `export`: projet -> fichier GCP

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};

use gcp_editor::{Config, Project, ValidationReport};

#[derive(Subcommand)]
pub enum Commands {
    /// Import a legacy control file into a project file
    Import {
        /// Path to the control file (tab, comma or space separated)
        #[arg(short, long)]
        path: PathBuf,

        /// Output project file (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Column preset (odm/latlng) or path to a JSON config (défaut : env GCP_IMPORT_CONFIG / odm)
        #[arg(long)]
        config: Option<String>,
    },

    /// Check that a project has enough control objects
    Validate {
        /// Project file (JSON)
        #[arg(short, long)]
        project: PathBuf,

        /// Save the validation report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Write the GCP file of a project
    Export {
        /// Project file (JSON)
        #[arg(short, long)]
        project: PathBuf,

        /// Output GCP file
        #[arg(short, long)]
        output: PathBuf,

        /// Write the file even if the project does not validate
        #[arg(long)]
        force: bool,
    },
}

/// Exécute la commande import
pub fn cmd_import(path: &Path, output: &Path, config: Option<String>) -> Result<()> {
    let name = Config::name_from_env(config);
    let config = Config::resolve(&name).context(format!("Failed to load config: {}", name))?;

    let data = std::fs::read(path)
        .context(format!("Failed to read control file: {}", path.display()))?;
    let result = gcp::import_control_file(&data, &config.schema)
        .context(format!("Failed to import control file: {}", path.display()))?;

    if let Some(header) = &result.header {
        info!(header = %header, "Coordinate system header ignored");
    }
    if !result.errors.is_empty() {
        warn!(skipped = result.errors.len(), "Some control rows were skipped");
    }

    let project = Project::from(result);
    info!(
        points = project.points.len(),
        objects = project.joins.len(),
        output = %output.display(),
        "Control file imported"
    );
    project.save(output)
}

/// Exécute la commande validate
pub fn cmd_validate(project_path: &Path, report_path: Option<&Path>) -> Result<()> {
    let project = Project::load(project_path)?;
    let report = ValidationReport::new(&project_name(project_path), &project);

    report.display();

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
        info!(report = %path.display(), "Validation report saved");
    }

    info!("{}", report.summary());

    if !report.is_valid() {
        anyhow::bail!(
            "Project is not valid ({} error(s))",
            report.result.errors.len()
        );
    }
    Ok(())
}

/// Exécute la commande export
pub fn cmd_export(project_path: &Path, output: &Path, force: bool) -> Result<()> {
    let project = Project::load(project_path)?;
    let result = project.validate();

    if !result.valid {
        for message in result.messages() {
            warn!("{}", message);
        }
        if !force {
            anyhow::bail!("Project is not valid, use --force to export anyway");
        }
        warn!("Exporting an invalid project (--force)");
    }

    let rows = project.gcp_rows();
    std::fs::write(output, gcp::to_gcp_file(&rows))
        .context(format!("Failed to write GCP file: {}", output.display()))?;

    info!(rows = rows.len(), output = %output.display(), "GCP file written");
    Ok(())
}

fn project_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name() {
        assert_eq!(project_name(Path::new("/tmp/site-a.json")), "site-a");
        assert_eq!(project_name(Path::new("project")), "project");
    }
}
