//! Conversion des lignes canoniques en points de contrôle
//!
//! Chaque ligne décrit un couple (point carte, point image). Les lignes qui
//! partagent exactement les mêmes coordonnées carte forment un seul objet de
//! contrôle.

use std::collections::HashMap;

use tracing::warn;

use crate::number::parse_number;
use crate::point::{image_point, map_point};
use crate::schema::{CanonicalRow, Column, Schema};
use crate::types::ImportResult;
use crate::GcpError;

/// Construit points et jointure à partir de lignes canoniques.
///
/// Les lignes invalides sont ignorées et reportées dans `errors`
/// (numérotation à partir de 1).
pub fn points_from_rows<S: AsRef<str>>(rows: &[CanonicalRow<S>]) -> ImportResult {
    let mut result = ImportResult::default();
    // coordonnées carte (bits) -> id du point carte
    let mut objects: HashMap<[u64; 3], String> = HashMap::new();

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;

        let (map_coord, image) = match read_row(row) {
            Ok(parsed) => parsed,
            Err(reason) => {
                warn!(row = row_number, reason = %reason, "Control row skipped");
                result.errors.push(GcpError::row(row_number, reason));
                continue;
            }
        };

        let Some(img_pt) = image_point(&[image.0, image.1], &image.2, false) else {
            let reason = "invalid image coordinate";
            warn!(row = row_number, reason, "Control row skipped");
            result.errors.push(GcpError::row(row_number, reason));
            continue;
        };

        let key = map_coord.map(f64::to_bits);
        let map_id = match objects.get(&key) {
            Some(id) => id.clone(),
            None => {
                let Some(map_pt) = map_point(&map_coord) else {
                    let reason = format!(
                        "map coordinate out of range (lat {}, lng {})",
                        map_coord[0], map_coord[1]
                    );
                    warn!(row = row_number, reason = %reason, "Control row skipped");
                    result.errors.push(GcpError::row(row_number, reason));
                    continue;
                };
                let id = map_pt.id().to_string();
                objects.insert(key, id.clone());
                result.points.push(map_pt);
                id
            }
        };

        result.joins.link(&map_id, img_pt.id());
        result.points.push(img_pt);
    }

    result
}

/// Coordonnées `[lat, lng, z]` et `(x, y, image)` d'une ligne
fn read_row<S: AsRef<str>>(row: &CanonicalRow<S>) -> Result<([f64; 3], (f64, f64, String)), String> {
    let lng = required_number(row, Column::XCoord)?;
    let lat = required_number(row, Column::YCoord)?;
    let z = match cell(row, Column::ZCoord) {
        None => 0.0,
        Some(s) => parse_number(s).ok_or_else(|| format!("zcoord is not a number: {:?}", s))?,
    };

    let x = required_number(row, Column::XPoint)?;
    let y = required_number(row, Column::YPoint)?;
    let img = cell(row, Column::Img).ok_or_else(|| "missing image name".to_string())?;

    Ok(([lat, lng, z], (x, y, img.to_string())))
}

/// Cellule non vide d'une colonne
fn cell<S: AsRef<str>>(row: &CanonicalRow<S>, column: Column) -> Option<&str> {
    row[column.position()]
        .as_ref()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
}

fn required_number<S: AsRef<str>>(row: &CanonicalRow<S>, column: Column) -> Result<f64, String> {
    let s = cell(row, column).ok_or_else(|| format!("missing {}", column.name()))?;
    parse_number(s).ok_or_else(|| format!("{} is not a number: {:?}", column.name(), s))
}

/// Ligne d'en-tête d'un fichier GCP (ex: `WGS84`, `+proj=utm ...`):
/// la cellule `xcoord` n'est pas numérique, ou la ligne se réduit à une
/// seule cellule non numérique
pub(crate) fn is_header(row: &[String], schema: &Schema) -> bool {
    let Some(index) = schema.index_of(Column::XCoord) else {
        return false;
    };
    match (row.get(index), row) {
        (Some(cell), _) => parse_number(cell).is_none(),
        (None, [only]) => parse_number(only).is_none(),
        (None, _) => false,
    }
}
