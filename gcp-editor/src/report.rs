//! Rapport de validation d'un projet
//!
//! Regroupe les décomptes du projet et les messages de validation, pour
//! l'affichage console ou l'export JSON.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use gcp::number::format_fixed;
use gcp::{map_extent, summarize, Summary, ValidationResult};

use crate::project::Project;

/// Nombre maximum de points invalides listés à l'écran
const MAX_LISTED_POINTS: usize = 10;

/// Rapport complet de validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Nom du projet (fichier source)
    pub project: String,
    /// Décomptes des points et objets
    pub summary: Summary,
    /// Résultat des règles de validation
    pub result: ValidationResult,
    /// Points dont les coordonnées sont hors limites
    pub invalid_points: Vec<String>,
    /// Emprise des points carte `[lng min, lat min, lng max, lat max]`
    pub extent: Option<[f64; 4]>,
}

impl ValidationReport {
    /// Valide un projet et construit le rapport
    pub fn new(name: &str, project: &Project) -> Self {
        Self {
            project: name.to_string(),
            summary: summarize(&project.points, &project.joins),
            result: project.validate(),
            invalid_points: project
                .invalid_points()
                .into_iter()
                .map(str::to_string)
                .collect(),
            extent: map_extent(&project.points)
                .map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.valid
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("GCP VALIDATION REPORT - {}", self.project);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {}", if self.is_valid() { "VALID" } else { "INVALID" });

        println!("\n--- SUMMARY ---");
        println!(
            "Points: {} total, {} map, {} image",
            self.summary.points, self.summary.map_points, self.summary.image_points
        );
        println!(
            "Control objects: {} referenced, {} with at least 3 image points",
            self.summary.join_keys, self.summary.complete_objects
        );
        if let Some([min_lng, min_lat, max_lng, max_lat]) = self.extent {
            println!(
                "Extent: lng {} .. {}, lat {} .. {}",
                format_fixed(min_lng, 6),
                format_fixed(max_lng, 6),
                format_fixed(min_lat, 6),
                format_fixed(max_lat, 6)
            );
        }

        if !self.invalid_points.is_empty() {
            println!("\n--- INVALID POINTS ({}) ---", self.invalid_points.len());
            for id in self.invalid_points.iter().take(MAX_LISTED_POINTS) {
                println!("  {}", id);
            }
            if self.invalid_points.len() > MAX_LISTED_POINTS {
                println!(
                    "  ... and {} more",
                    self.invalid_points.len() - MAX_LISTED_POINTS
                );
            }
        }

        if !self.result.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.result.errors.len());
            for message in self.result.messages() {
                println!("  {}", message);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} map points, {} image points, {}/{} complete objects, {} errors",
            self.project,
            self.summary.map_points,
            self.summary.image_points,
            self.summary.complete_objects,
            self.summary.join_keys,
            self.result.errors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcp::ValidationIssue;

    #[test]
    fn test_empty_project_report() {
        let report = ValidationReport::new("empty", &Project::default());

        assert!(!report.is_valid());
        assert_eq!(report.result.errors, vec![ValidationIssue::TooFewPoints]);
        assert_eq!(report.summary, Summary::default());
        assert_eq!(report.extent, None);
    }

    #[test]
    fn test_extent_from_map_points() {
        let project: Project = serde_json::from_str(
            r#"{"points":[
                {"type":"map","id":"m1","coord":[45.1,5.7,210]},
                {"type":"map","id":"m2","coord":[45.3,5.2]},
                {"type":"image","id":"i1","coord":[100,200],"img_name":"a.jpg"}
            ]}"#,
        )
        .unwrap();
        let report = ValidationReport::new("extent", &project);

        assert_eq!(report.extent, Some([5.2, 45.1, 5.7, 45.3]));
    }

    #[test]
    fn test_summary_line() {
        let report = ValidationReport::new("site-a", &Project::default());
        let line = report.summary();

        assert!(line.starts_with("site-a:"));
        assert!(line.contains("0/0 complete objects"));
        assert!(line.ends_with("1 errors"));
    }

    #[test]
    fn test_save_to_file() {
        let report = ValidationReport::new("saved", &Project::default());
        let path = std::env::temp_dir().join("gcp_editor_test_report.json");
        report.save_to_file(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["project"], "saved");
        assert_eq!(json["result"]["valid"], false);
        assert_eq!(json["summary"]["points"], 0);

        std::fs::remove_file(path).ok();
    }
}
