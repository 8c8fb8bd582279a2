//! Fichier projet: points de contrôle et table de jointure au format JSON

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gcp::point::{valid_image_coordinate, valid_map_coordinate};
use gcp::{generate_gcp_output, validate, ImportResult, JoinTable, Point, ValidationResult};

/// Contenu d'un fichier projet
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Project {
    /// Points carte et image
    pub points: Vec<Point>,

    /// Objets de contrôle: point carte -> points image
    #[serde(default)]
    pub joins: JoinTable,
}

impl Project {
    /// Charge un projet depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read project file: {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse project file: {}", path.display()))
    }

    /// Sauvegarde le projet en JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write project file: {}", path.display()))?;
        Ok(())
    }

    /// Identifiants des points dont les coordonnées ne passent pas la validation
    /// de construction (un fichier projet peut avoir été édité à la main)
    pub fn invalid_points(&self) -> Vec<&str> {
        self.points
            .iter()
            .filter(|p| match p {
                Point::Map(m) => !valid_map_coordinate(&m.coord),
                Point::Image(i) => !valid_image_coordinate(&i.coord),
            })
            .map(Point::id)
            .collect()
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.points, &self.joins)
    }

    /// Lignes du fichier GCP
    pub fn gcp_rows(&self) -> Vec<String> {
        generate_gcp_output(&self.joins, &self.points)
    }
}

impl From<ImportResult> for Project {
    fn from(result: ImportResult) -> Self {
        Self {
            points: result.points,
            joins: result.joins,
        }
    }
}
