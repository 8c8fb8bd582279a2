//! Types d'erreurs pour le crate gcp

use thiserror::Error;

/// Erreurs pouvant survenir lors de l'import d'un fichier de points de contrôle
#[derive(Debug, Error)]
pub enum GcpError {
    /// Ligne rejetée lors de la conversion en points
    #[error("Row {row}: {reason}")]
    Row { row: usize, reason: String },

    /// Fichier de contrôle vide ou illisible
    #[error("Invalid control file: {0}")]
    InvalidControlFile(String),

    /// Schéma d'import incohérent
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl GcpError {
    /// Crée une erreur de ligne avec contexte
    pub fn row(row: usize, reason: impl Into<String>) -> Self {
        Self::Row {
            row,
            reason: reason.into(),
        }
    }
}
