//! Modes d'édition de l'éditeur de points de contrôle

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Mode d'édition courant; l'absence de mode est représentée par `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Ajout d'un nouveau point
    #[serde(rename = "adding")]
    Adding,
    /// Édition d'un point carte
    #[serde(rename = "map_edit")]
    MapEdit,
    /// Édition d'un point image
    #[serde(rename = "img_edit")]
    ImageEdit,
}

/// Mode d'édition associé au point `id` (le premier point portant cet id décide)
pub fn mode_from_id(id: &str, points: &[Point]) -> Option<EditMode> {
    let point = points.iter().find(|p| p.id() == id)?;
    Some(match point {
        Point::Map(_) => EditMode::MapEdit,
        Point::Image(_) => EditMode::ImageEdit,
    })
}

/// Instantané de l'état `controlpoints` de l'éditeur
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPointsState {
    /// Points, dans l'ordre de création
    pub points: Vec<Point>,
    /// Un point est en cours de placement ou d'édition
    pub active: bool,
    /// Point en cours d'édition
    #[serde(default)]
    pub point_id: Option<String>,
}

impl ControlPointsState {
    /// Mode d'édition courant
    pub fn mode(&self) -> Option<EditMode> {
        if !self.active {
            return None;
        }
        match &self.point_id {
            Some(id) => mode_from_id(id, &self.points),
            None => Some(EditMode::Adding),
        }
    }

    /// Point en cours d'édition, s'il existe encore
    pub fn editing_point(&self) -> Option<&Point> {
        let id = self.point_id.as_deref()?;
        self.points.iter().find(|p| p.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImagePoint, MapPoint};

    fn points() -> Vec<Point> {
        vec![
            Point::Map(MapPoint {
                id: "m1".to_string(),
                coord: [1.0, 2.0, 3.0],
            }),
            Point::Image(ImagePoint {
                id: "i1".to_string(),
                coord: [4.0, 5.0],
                img_name: "a.jpg".to_string(),
                has_image: true,
            }),
        ]
    }

    #[test]
    fn test_mode_from_id() {
        let points = points();
        assert_eq!(mode_from_id("m1", &points), Some(EditMode::MapEdit));
        assert_eq!(mode_from_id("i1", &points), Some(EditMode::ImageEdit));
        assert_eq!(mode_from_id("unknown", &points), None);
    }

    #[test]
    fn test_state_mode() {
        let mut state = ControlPointsState {
            points: points(),
            active: false,
            point_id: Some("i1".to_string()),
        };
        assert_eq!(state.mode(), None);

        state.active = true;
        assert_eq!(state.mode(), Some(EditMode::ImageEdit));
        assert_eq!(state.editing_point().map(Point::id), Some("i1"));

        state.point_id = None;
        assert_eq!(state.mode(), Some(EditMode::Adding));
        assert!(state.editing_point().is_none());
    }

    #[test]
    fn test_state_json() {
        let json = r#"{"points":[],"active":true,"pointId":null}"#;
        let state: ControlPointsState = serde_json::from_str(json).unwrap();
        assert!(state.active);
        assert_eq!(state.point_id, None);
        assert_eq!(serde_json::to_string(&EditMode::ImageEdit).unwrap(), r#""img_edit""#);
    }
}
