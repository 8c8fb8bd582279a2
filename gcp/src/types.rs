//! Types de données pour le crate gcp

use geo::{BoundingRect, MultiPoint, Rect};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::join::JoinTable;
use crate::GcpError;

/// Résultat de l'import d'un fichier de contrôle
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Ligne d'en-tête (système de coordonnées), si présente
    pub header: Option<String>,

    /// Points carte et image créés, dans l'ordre des lignes
    pub points: Vec<Point>,

    /// Objets de contrôle: point carte -> points image
    pub joins: JoinTable,

    /// Lignes rejetées (non fatales)
    pub errors: Vec<GcpError>,
}

/// Type d'un point de contrôle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// Point sur la carte (coordonnées réelles)
    Map,
    /// Point sur une image source (coordonnées pixel)
    Image,
}

/// Un point de contrôle, sur la carte ou sur une image
///
/// Sérialisé avec une étiquette `type` (`"map"` ou `"image"`), le format
/// utilisé par l'état de l'éditeur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Point {
    Map(MapPoint),
    Image(ImagePoint),
}

/// Point carte: `[latitude, longitude, altitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Identifiant unique dans la session
    pub id: String,

    /// Coordonnées `[lat, lng, z]`
    #[serde(deserialize_with = "deserialize_map_coord")]
    pub coord: [f64; 3],
}

/// Point image: `[x, y]` en pixels dans l'image `img_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    /// Identifiant unique dans la session
    pub id: String,

    /// Coordonnées pixel `[x, y]`
    pub coord: [f64; 2],

    /// Nom de l'image source
    pub img_name: String,

    /// L'image source est-elle chargée dans l'éditeur
    #[serde(rename = "hasImage", default = "default_has_image")]
    pub has_image: bool,
}

fn default_has_image() -> bool {
    true
}

impl Point {
    pub fn id(&self) -> &str {
        match self {
            Point::Map(p) => &p.id,
            Point::Image(p) => &p.id,
        }
    }

    pub fn kind(&self) -> PointKind {
        match self {
            Point::Map(_) => PointKind::Map,
            Point::Image(_) => PointKind::Image,
        }
    }

    /// Coordonnées brutes (3 composantes pour la carte, 2 pour une image)
    pub fn coord(&self) -> &[f64] {
        match self {
            Point::Map(p) => &p.coord,
            Point::Image(p) => &p.coord,
        }
    }

    pub fn as_map(&self) -> Option<&MapPoint> {
        match self {
            Point::Map(p) => Some(p),
            Point::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePoint> {
        match self {
            Point::Image(p) => Some(p),
            Point::Map(_) => None,
        }
    }
}

impl MapPoint {
    pub fn latitude(&self) -> f64 {
        self.coord[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coord[1]
    }

    pub fn elevation(&self) -> f64 {
        self.coord[2]
    }

    /// Convertit en `geo::Point` (x = longitude, y = latitude)
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude(), self.latitude())
    }
}

/// Emprise des points carte (x = longitude, y = latitude), `None` sans point carte
pub fn map_extent(points: &[Point]) -> Option<Rect<f64>> {
    let geo_points: MultiPoint<f64> = points
        .iter()
        .filter_map(Point::as_map)
        .map(MapPoint::to_geo)
        .collect();
    geo_points.bounding_rect()
}

impl From<MapPoint> for Point {
    fn from(p: MapPoint) -> Self {
        Point::Map(p)
    }
}

impl From<ImagePoint> for Point {
    fn from(p: ImagePoint) -> Self {
        Point::Image(p)
    }
}

/// Accepte `[lat, lng]`, `[lat, lng, null]` ou `[lat, lng, z]`.
/// Une altitude absente est stockée à 0.
fn deserialize_map_coord<'de, D>(deserializer: D) -> Result<[f64; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
    match raw.as_slice() {
        [Some(lat), Some(lng)] => Ok([*lat, *lng, 0.0]),
        [Some(lat), Some(lng), z] => Ok([*lat, *lng, z.unwrap_or(0.0)]),
        [_, _] | [_, _, _] => Err(de::Error::custom(
            "map coordinate needs a numeric latitude and longitude",
        )),
        _ => Err(de::Error::invalid_length(
            raw.len(),
            &"[lat, lng] or [lat, lng, z]",
        )),
    }
}
