//! Schéma d'import des fichiers de contrôle
//!
//! Un schéma indique, pour chaque colonne canonique, l'index de la cellule
//! correspondante dans une ligne brute. Les lignes sont remises dans l'ordre
//! canonique `[xcoord, ycoord, zcoord, xpoint, ypoint, img]`.

use serde::{Deserialize, Serialize};

use crate::GcpError;

/// Colonnes canoniques, dans l'ordre du fichier GCP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Longitude (ou easting)
    XCoord,
    /// Latitude (ou northing)
    YCoord,
    /// Altitude
    ZCoord,
    /// Colonne pixel
    XPoint,
    /// Ligne pixel
    YPoint,
    /// Nom de l'image
    Img,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::XCoord,
        Column::YCoord,
        Column::ZCoord,
        Column::XPoint,
        Column::YPoint,
        Column::Img,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::XCoord => "xcoord",
            Column::YCoord => "ycoord",
            Column::ZCoord => "zcoord",
            Column::XPoint => "xpoint",
            Column::YPoint => "ypoint",
            Column::Img => "img",
        }
    }

    /// Position dans une ligne canonique
    pub fn position(self) -> usize {
        self as usize
    }
}

/// Ligne canonique: une cellule optionnelle par colonne
pub type CanonicalRow<T> = [Option<T>; 6];

/// Correspondance colonne canonique -> index dans la ligne source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SchemaDef", into = "SchemaDef")]
pub struct Schema {
    columns: [Option<usize>; 6],
}

/// Disposition des fichiers de contrôle: `lng lat z x y image`
pub const CONTROLFILE_SCHEMA: Schema = Schema::new([Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)]);

impl Schema {
    /// Schéma à partir des index source, dans l'ordre de [`Column::ALL`]
    pub const fn new(columns: [Option<usize>; 6]) -> Self {
        Self { columns }
    }

    /// Schéma sans aucune colonne déclarée
    pub const fn empty() -> Self {
        Self { columns: [None; 6] }
    }

    /// Déclare l'index source d'une colonne
    pub fn with(mut self, column: Column, index: usize) -> Self {
        self.columns[column.position()] = Some(index);
        self
    }

    pub fn index_of(&self, column: Column) -> Option<usize> {
        self.columns[column.position()]
    }

    /// Vérifie qu'au moins une colonne est déclarée et qu'aucun index source
    /// n'est partagé par deux colonnes
    pub fn check(&self) -> Result<(), GcpError> {
        if self.columns.iter().all(Option::is_none) {
            return Err(GcpError::InvalidSchema(
                "no column declared, every row would be dropped".to_string(),
            ));
        }
        for (i, column) in Column::ALL.iter().enumerate() {
            let Some(index) = self.columns[i] else {
                continue;
            };
            if let Some(other) = Column::ALL[i + 1..]
                .iter()
                .find(|other| self.index_of(**other) == Some(index))
            {
                return Err(GcpError::InvalidSchema(format!(
                    "{} and {} both read source column {}",
                    column.name(),
                    other.name(),
                    index
                )));
            }
        }
        Ok(())
    }
}

impl Default for Schema {
    fn default() -> Self {
        CONTROLFILE_SCHEMA
    }
}

/// Forme JSON du schéma: `{"xcoord": 0, "ycoord": 1, ...}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct SchemaDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xcoord: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ycoord: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zcoord: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xpoint: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ypoint: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    img: Option<usize>,
}

impl From<SchemaDef> for Schema {
    fn from(d: SchemaDef) -> Self {
        Schema::new([d.xcoord, d.ycoord, d.zcoord, d.xpoint, d.ypoint, d.img])
    }
}

impl From<Schema> for SchemaDef {
    fn from(s: Schema) -> Self {
        let [xcoord, ycoord, zcoord, xpoint, ypoint, img] = s.columns;
        SchemaDef {
            xcoord,
            ycoord,
            zcoord,
            xpoint,
            ypoint,
            img,
        }
    }
}

/// Remet des lignes brutes dans l'ordre canonique.
///
/// Une colonne non déclarée, ou absente de la ligne, donne `None`.
/// Les lignes entièrement vides après remappage sont supprimées.
/// Aucune validation des valeurs n'est faite ici.
pub fn create_rows<T, R>(schema: &Schema, rows: &[R]) -> Vec<CanonicalRow<T>>
where
    T: Clone,
    R: AsRef<[T]>,
{
    rows.iter()
        .map(|row| {
            let row = row.as_ref();
            Column::ALL.map(|column| {
                schema
                    .index_of(column)
                    .and_then(|i| row.get(i))
                    .cloned()
            })
        })
        .filter(|row| row.iter().any(Option::is_some))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rows_remaps_columns() {
        let schema = Schema::empty().with(Column::XCoord, 1).with(Column::YCoord, 0);
        let rows = create_rows(&schema, &[vec![10, 20]]);

        assert_eq!(rows, vec![[Some(20), Some(10), None, None, None, None]]);
    }

    #[test]
    fn test_create_rows_drops_blank_rows() {
        let schema = Schema::empty().with(Column::Img, 3);
        let rows = create_rows(&schema, &[vec!["a", "b"], vec!["a", "b", "c", "img.jpg"]]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][Column::Img.position()], Some("img.jpg"));
    }

    #[test]
    fn test_create_rows_identity_schema() {
        let raw = vec!["5.7", "45.1", "210", "100", "200", "a.jpg", "extra"];
        let rows = create_rows(&CONTROLFILE_SCHEMA, &[raw]);

        assert_eq!(
            rows[0],
            [Some("5.7"), Some("45.1"), Some("210"), Some("100"), Some("200"), Some("a.jpg")]
        );
    }

    #[test]
    fn test_create_rows_short_row() {
        let rows = create_rows(&CONTROLFILE_SCHEMA, &[vec![1.0, 2.0]]);
        assert_eq!(rows[0], [Some(1.0), Some(2.0), None, None, None, None]);
    }

    #[test]
    fn test_schema_json() {
        let schema: Schema = serde_json::from_str(r#"{"ycoord":0,"xcoord":1,"unknown":4}"#).unwrap();
        assert_eq!(schema.index_of(Column::XCoord), Some(1));
        assert_eq!(schema.index_of(Column::YCoord), Some(0));
        assert_eq!(schema.index_of(Column::Img), None);

        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"xcoord":1,"ycoord":0}"#);
    }

    #[test]
    fn test_schema_check() {
        assert!(Schema::empty().check().is_err());
        assert!(CONTROLFILE_SCHEMA.check().is_ok());
    }

    #[test]
    fn test_schema_check_shared_index() {
        let schema: Schema = serde_json::from_str(r#"{"xcoord":0,"ycoord":1,"xpoint":1}"#).unwrap();
        let err = schema.check().unwrap_err();

        assert!(matches!(err, GcpError::InvalidSchema(_)));
        assert_eq!(err.to_string(), "Invalid schema: ycoord and xpoint both read source column 1");
    }
}
