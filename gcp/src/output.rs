//! Génération des lignes du fichier GCP
//!
//! Format: une ligne par couple (point carte, point image), champs séparés par
//! des tabulations `lng lat z x y image`, sans en-tête. Longitude et latitude
//! sont écrites avec 6 décimales.

use std::collections::HashMap;

use tracing::debug;

use crate::join::JoinTable;
use crate::number::{format_fixed, format_number};
use crate::types::Point;

/// Nombre de décimales de la longitude et de la latitude
pub const COORD_PRECISION: usize = 6;

/// Génère les lignes GCP à partir de la table de jointure.
///
/// Les jointures vers des identifiants inconnus (ou du mauvais type de point)
/// sont ignorées silencieusement. L'ordre suit les clés de la jointure puis
/// l'ordre des points image de chaque clé.
pub fn generate_gcp_output(joins: &JoinTable, points: &[Point]) -> Vec<String> {
    let index = index_points(points);
    let mut rows = Vec::new();

    for (map_id, image_ids) in joins.iter() {
        let Some(map_pt) = index.get(map_id).copied().and_then(Point::as_map) else {
            debug!(map_id, "Join without map point, skipped");
            continue;
        };

        let lat = format_fixed(map_pt.latitude(), COORD_PRECISION);
        let lng = format_fixed(map_pt.longitude(), COORD_PRECISION);
        let z = format_number(map_pt.elevation());

        for image_id in image_ids {
            let Some(img_pt) = index.get(image_id.as_str()).copied().and_then(Point::as_image) else {
                debug!(map_id, image_id = %image_id, "Joined image point not found, skipped");
                continue;
            };

            let x = format_number(img_pt.coord[0]);
            let y = format_number(img_pt.coord[1]);
            rows.push(
                [
                    lng.as_str(),
                    lat.as_str(),
                    z.as_str(),
                    x.as_str(),
                    y.as_str(),
                    img_pt.img_name.as_str(),
                ]
                .join("\t"),
            );
        }
    }

    rows
}

/// Assemble les lignes en contenu de fichier (une ligne par couple, `\n` final)
pub fn to_gcp_file(rows: &[String]) -> String {
    let mut content = rows.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    content
}

/// Index par identifiant; en cas de doublon le premier point gagne
fn index_points(points: &[Point]) -> HashMap<&str, &Point> {
    let mut index = HashMap::with_capacity(points.len());
    for p in points {
        index.entry(p.id()).or_insert(p);
    }
    index
}
