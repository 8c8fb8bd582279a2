//! Construction des points de contrôle
//!
//! Les constructeurs valident les coordonnées et ne renvoient jamais de point
//! partiellement construit: une entrée invalide donne `None`.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::number::format_number;
use crate::types::{ImagePoint, MapPoint, Point};

/// Longueur du suffixe aléatoire des identifiants
const TOKEN_LEN: usize = 9;

/// Crée un point image `[x, y]` sur l'image `img_name`
pub fn image_point(coord: &[f64], img_name: &str, has_image: bool) -> Option<Point> {
    if !valid_image_coordinate(coord) {
        return None;
    }

    Some(Point::Image(ImagePoint {
        id: generate_id(coord, img_name),
        coord: [coord[0], coord[1]],
        img_name: img_name.to_string(),
        has_image,
    }))
}

/// Crée un point carte `[lat, lng, z]`
pub fn map_point(coord: &[f64]) -> Option<Point> {
    if !valid_map_coordinate(coord) {
        return None;
    }

    Some(Point::Map(MapPoint {
        id: generate_id(coord, ""),
        coord: [coord[0], coord[1], coord[2]],
    }))
}

/// Vérifie une coordonnée image: exactement 2 composantes finies
pub fn valid_image_coordinate(coord: &[f64]) -> bool {
    coord.len() == 2 && is_finite(coord)
}

/// Vérifie une coordonnée carte: 3 composantes finies, lat ∈ [-90, 90], lng ∈ [-180, 180]
pub fn valid_map_coordinate(coord: &[f64]) -> bool {
    if coord.len() != 3 || !is_finite(coord) {
        return false;
    }
    (-180.0..=180.0).contains(&coord[1]) && (-90.0..=90.0).contains(&coord[0])
}

fn is_finite(coord: &[f64]) -> bool {
    coord.iter().all(|d| d.is_finite())
}

/// Identifiant `c0_c1[_c2]_<image>_<jeton>`
fn generate_id(coord: &[f64], img_name: &str) -> String {
    let coords: Vec<String> = coord.iter().map(|&c| format_number(c)).collect();
    format!("{}_{}_{}", coords.join("_"), img_name, random_token())
}

fn random_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointKind;

    #[test]
    fn test_image_point() {
        let p = image_point(&[100.0, 200.5], "a.jpg", true).unwrap();
        assert_eq!(p.kind(), PointKind::Image);
        assert_eq!(p.coord(), &[100.0, 200.5]);

        let img = p.as_image().unwrap();
        assert_eq!(img.img_name, "a.jpg");
        assert!(img.has_image);
        assert!(p.id().starts_with("100_200.5_a.jpg_"));
    }

    #[test]
    fn test_image_point_without_loaded_image() {
        let p = image_point(&[1.0, 2.0], "b.jpg", false).unwrap();
        assert!(!p.as_image().unwrap().has_image);
    }

    #[test]
    fn test_image_point_invalid() {
        assert!(image_point(&[1.0], "a.jpg", true).is_none());
        assert!(image_point(&[1.0, 2.0, 3.0], "a.jpg", true).is_none());
        assert!(image_point(&[f64::NAN, 2.0], "a.jpg", true).is_none());
        assert!(image_point(&[1.0, f64::INFINITY], "a.jpg", true).is_none());
    }

    #[test]
    fn test_map_point() {
        let p = map_point(&[45.19, 5.72, 212.0]).unwrap();
        assert_eq!(p.kind(), PointKind::Map);
        assert_eq!(p.coord(), &[45.19, 5.72, 212.0]);
        // Pas de nom d'image: double séparateur avant le jeton
        assert!(p.id().starts_with("45.19_5.72_212__"));
    }

    #[test]
    fn test_map_point_bounds() {
        assert!(map_point(&[90.0, 180.0, 0.0]).is_some());
        assert!(map_point(&[-90.0, -180.0, 0.0]).is_some());
        assert!(map_point(&[90.5, 0.0, 0.0]).is_none());
        assert!(map_point(&[-91.0, 0.0, 0.0]).is_none());
        assert!(map_point(&[0.0, 180.1, 0.0]).is_none());
        assert!(map_point(&[0.0, -181.0, 0.0]).is_none());
    }

    #[test]
    fn test_map_point_invalid_shape() {
        assert!(map_point(&[45.0, 5.0]).is_none());
        assert!(map_point(&[45.0, 5.0, f64::NAN]).is_none());
        assert!(map_point(&[45.0, f64::NEG_INFINITY, 0.0]).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = map_point(&[1.0, 2.0, 3.0]).unwrap();
        let b = map_point(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.coord(), b.coord());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_coord_is_copied() {
        let mut coord = vec![10.0, 20.0];
        let p = image_point(&coord, "a.jpg", true).unwrap();
        coord[0] = 99.0;
        assert_eq!(p.coord(), &[10.0, 20.0]);
    }
}
