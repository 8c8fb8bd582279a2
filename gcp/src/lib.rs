//! # gcp
//!
//! Modèle des points de contrôle au sol (GCP) d'un éditeur de photogrammétrie:
//! construction des points, import de fichiers de contrôle hérités, génération
//! du fichier GCP et règles de validation.
//!
//! ## Features
//!
//! - Points carte `[lat, lng, z]` et image `[x, y]` validés à la construction
//! - Remappage des colonnes d'un fichier de contrôle par schéma
//! - Génération des lignes GCP tabulées (`lng lat z x y image`)
//! - Validation du nombre de points et d'objets de contrôle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gcp::{generate_gcp_output, import_control_file, validate, CONTROLFILE_SCHEMA};
//!
//! let result = import_control_file(&std::fs::read("gcp_list.txt")?, &CONTROLFILE_SCHEMA)?;
//! let check = validate(&result.points, &result.joins);
//! if check.valid {
//!     for row in generate_gcp_output(&result.joins, &result.points) {
//!         println!("{}", row);
//!     }
//! }
//! ```

pub mod error;
pub mod join;
pub mod mode;
pub mod number;
pub mod output;
pub mod parser;
pub mod point;
pub mod schema;
pub mod types;
pub mod validate;

pub use error::GcpError;
pub use join::JoinTable;
pub use mode::{mode_from_id, ControlPointsState, EditMode};
pub use output::{generate_gcp_output, to_gcp_file};
pub use parser::rows::points_from_rows;
pub use point::{image_point, map_point};
pub use schema::{create_rows, CanonicalRow, Column, Schema, CONTROLFILE_SCHEMA};
pub use types::{map_extent, ImagePoint, ImportResult, MapPoint, Point, PointKind};
pub use validate::{summarize, validate, Summary, ValidationIssue, ValidationResult};

use tracing::debug;

/// Importe un fichier de contrôle (contenu brut) selon un schéma.
///
/// Une première ligne dont la cellule `xcoord` n'est pas numérique (ou réduite
/// à une seule cellule non numérique) est conservée comme en-tête.
/// Les lignes invalides sont reportées dans `ImportResult::errors`.
///
/// # Errors
///
/// Retourne `GcpError` si le schéma ne déclare aucune colonne ou si le fichier
/// ne contient aucune ligne de données.
pub fn import_control_file(data: &[u8], schema: &Schema) -> Result<ImportResult, GcpError> {
    schema.check()?;

    let text = parser::text::decode(data);
    let mut raw_rows = parser::text::split_rows(&text);

    let has_header = raw_rows
        .first()
        .map_or(false, |first| parser::rows::is_header(first, schema));
    let header = if has_header {
        raw_rows.remove(0);
        text.lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    if raw_rows.is_empty() {
        return Err(GcpError::InvalidControlFile("no data rows".to_string()));
    }

    let rows = create_rows(schema, &raw_rows);
    debug!(rows = rows.len(), header = ?header, "Control file rows remapped");

    let mut result = points_from_rows(&rows);
    result.header = header;
    Ok(result)
}
