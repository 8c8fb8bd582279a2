//! # gcp-editor
//!
//! Import, validation et export des fichiers de points de contrôle au sol.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Fichier de contrôle hérité -> projet JSON
//! gcp-editor import --path ./gcp_list.txt --output ./project.json --config latlng
//!
//! # Vérifier le projet
//! gcp-editor validate --project ./project.json --report ./report.json
//!
//! # Générer le fichier GCP
//! gcp-editor export --project ./project.json --output ./gcp_list.txt
//! ```

pub mod config;
pub mod project;
pub mod report;

pub use config::Config;
pub use project::Project;
pub use report::ValidationReport;
