//! Configuration de l'import des fichiers de contrôle

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use gcp::Schema;

/// Variable d'environnement donnant le preset ou le fichier de configuration
pub const CONFIG_ENV: &str = "GCP_IMPORT_CONFIG";

/// Preset utilisé par défaut
pub const DEFAULT_PRESET: &str = "odm";

/// Configuration principale
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Disposition des colonnes du fichier de contrôle
    pub schema: Schema,
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).context(format!("Invalid config file: {}", path.display()))
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "odm" => Self::parse(include_str!("presets/odm.json")),
            "latlng" => Self::parse(include_str!("presets/latlng.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: odm, latlng", preset),
        }
    }

    /// Résout un nom de preset ou un chemin de fichier JSON
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if name_or_path.ends_with(".json") || Path::new(name_or_path).is_file() {
            Self::load(Path::new(name_or_path))
        } else {
            Self::from_preset(name_or_path)
        }
    }

    /// Preset ou chemin: argument, sinon `GCP_IMPORT_CONFIG`, sinon `odm`
    pub fn name_from_env(arg: Option<String>) -> String {
        arg.or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_PRESET.to_string())
    }

    fn parse(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.schema.check()?;
        Ok(config)
    }
}
