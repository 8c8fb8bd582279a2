//! Règles de validation d'un jeu de points de contrôle
//!
//! Un fichier GCP exploitable demande au moins 5 objets de contrôle, chacun
//! référencé par au moins 3 points image.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::join::JoinTable;
use crate::types::{Point, PointKind};

/// Nombre minimal de points pour tenter la validation détaillée
pub const MIN_POINTS: usize = 15;

/// Seuil appliqué au nombre de points image.
///
/// Le message annonce 10 points image mais le seuil vérifié est 9;
/// ce décalage est conservé tel quel.
pub const MIN_IMAGE_POINTS: usize = 9;

/// Nombre minimal d'objets de contrôle
pub const MIN_CONTROL_OBJECTS: usize = 5;

/// Nombre minimal de points image par objet de contrôle
pub const MIN_IMAGE_POINTS_PER_OBJECT: usize = 3;

/// Problème détecté par la validation (message destiné à l'utilisateur)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("A ground control point file must have a minimum of 15 points. There needs to 5 control objects and each control object must have 3 image points referenced. Please see this <a href=\"https://github.com/OpenDroneMap/OpenDroneMap/wiki/Running-OpenDroneMap#running-odm-with-ground-control\" target=\"_blank\">article</a> for more information.")]
    TooFewPoints,

    #[error("Need at least 10 image points.")]
    TooFewImagePoints,

    #[error("Seems you have enough image points but not enough control objects. There must be at least 5.")]
    TooFewControlObjects,

    #[error("There must be at least 5 control points that have image points referenced.")]
    TooFewReferencedControlPoints,

    #[error("Control objects must have at least 3 image points referenced.")]
    TooFewImagePointsPerObject,
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Résultat de la validation: `{ "valid": bool, "errors": [message] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Messages lisibles, dans l'ordre des règles
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Décompte des points et des objets de contrôle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Nombre total de points
    pub points: usize,
    /// Points carte
    pub map_points: usize,
    /// Points image
    pub image_points: usize,
    /// Clés de la table de jointure
    pub join_keys: usize,
    /// Objets référencés par au moins 3 points image
    pub complete_objects: usize,
}

/// Compte les points et les objets de contrôle complets
pub fn summarize(points: &[Point], joins: &JoinTable) -> Summary {
    let map_points = points.iter().filter(|p| p.kind() == PointKind::Map).count();
    let complete_objects = joins
        .iter()
        .filter(|(_, ids)| ids.len() >= MIN_IMAGE_POINTS_PER_OBJECT)
        .count();

    Summary {
        points: points.len(),
        map_points,
        image_points: points.len() - map_points,
        join_keys: joins.len(),
        complete_objects,
    }
}

/// Valide un jeu de points et sa table de jointure.
///
/// Moins de 15 points: un seul message, les autres règles ne sont pas évaluées.
/// La provenance des points image (3 images distinctes par objet) n'est pas
/// vérifiée.
pub fn validate(points: &[Point], joins: &JoinTable) -> ValidationResult {
    if points.len() < MIN_POINTS {
        return ValidationResult::from_errors(vec![ValidationIssue::TooFewPoints]);
    }

    let summary = summarize(points, joins);
    let mut errors = Vec::new();

    if summary.image_points < MIN_IMAGE_POINTS {
        errors.push(ValidationIssue::TooFewImagePoints);
    }

    if summary.map_points < MIN_CONTROL_OBJECTS {
        errors.push(ValidationIssue::TooFewControlObjects);
    } else if summary.join_keys < MIN_CONTROL_OBJECTS {
        errors.push(ValidationIssue::TooFewReferencedControlPoints);
    } else if summary.complete_objects < MIN_CONTROL_OBJECTS {
        errors.push(ValidationIssue::TooFewImagePointsPerObject);
    }

    ValidationResult::from_errors(errors)
}
