//! Table de jointure: point carte -> points image
//!
//! L'ordre d'insertion des clés est conservé: il détermine l'ordre des lignes
//! du fichier GCP généré.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Jointure ordonnée `id point carte -> [id points image]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinTable {
    entries: Vec<(String, Vec<String>)>,
    // clé -> position dans `entries`
    positions: HashMap<String, usize>,
}

impl JoinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associe une liste de points image à un point carte.
    ///
    /// Une clé existante garde sa position et sa liste est remplacée.
    pub fn insert(&mut self, map_id: impl Into<String>, image_ids: Vec<String>) -> Option<Vec<String>> {
        let map_id = map_id.into();
        match self.positions.get(&map_id) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, image_ids)),
            None => {
                self.push_entry(map_id, image_ids);
                None
            }
        }
    }

    /// Ajoute un point image à la liste d'un point carte (créée si besoin)
    pub fn link(&mut self, map_id: &str, image_id: impl Into<String>) {
        let image_id = image_id.into();
        match self.positions.get(map_id) {
            Some(&pos) => self.entries[pos].1.push(image_id),
            None => self.push_entry(map_id.to_string(), vec![image_id]),
        }
    }

    fn push_entry(&mut self, map_id: String, image_ids: Vec<String>) {
        self.positions.insert(map_id.clone(), self.entries.len());
        self.entries.push((map_id, image_ids));
    }

    pub fn get(&self, map_id: &str) -> Option<&[String]> {
        let pos = *self.positions.get(map_id)?;
        Some(self.entries[pos].1.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, ids)| (k.as_str(), ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for JoinTable {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut table = JoinTable::new();
        for (k, ids) in iter {
            table.insert(k, ids);
        }
        table
    }
}

impl Serialize for JoinTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, ids) in &self.entries {
            map.serialize_entry(k, ids)?;
        }
        map.end()
    }
}

struct JoinTableVisitor;

impl<'de> Visitor<'de> for JoinTableVisitor {
    type Value = JoinTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of map point ids to lists of image point ids")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = JoinTable::new();
        while let Some((k, ids)) = access.next_entry::<String, Vec<String>>()? {
            table.insert(k, ids);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for JoinTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(JoinTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut joins = JoinTable::new();
        joins.insert("z", ids(&["a"]));
        joins.insert("a", ids(&["b"]));
        joins.insert("m", ids(&["c"]));

        let keys: Vec<_> = joins.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut joins = JoinTable::new();
        joins.insert("m1", ids(&["i1"]));
        joins.insert("m2", ids(&["i2"]));
        let old = joins.insert("m1", ids(&["i3", "i4"]));

        assert_eq!(old, Some(ids(&["i1"])));
        assert_eq!(joins.len(), 2);
        assert_eq!(joins.keys().next(), Some("m1"));
        assert_eq!(joins.get("m1").unwrap(), ids(&["i3", "i4"]).as_slice());
    }

    #[test]
    fn test_link() {
        let mut joins = JoinTable::new();
        joins.link("m1", "i1");
        joins.link("m1", "i2");
        joins.link("m2", "i3");

        assert_eq!(joins.get("m1").unwrap().len(), 2);
        assert_eq!(joins.get("m2").unwrap(), ids(&["i3"]).as_slice());
        assert!(joins.get("m3").is_none());
    }

    #[test]
    fn test_json_keeps_document_order() {
        let json = r#"{"b":["1"],"a":["2","3"],"c":[]}"#;
        let joins: JoinTable = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = joins.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(serde_json::to_string(&joins).unwrap(), json);
    }

    #[test]
    fn test_many_objects() {
        let mut joins = JoinTable::new();
        for row in 0..20_000 {
            joins.link(&format!("m{}", row % 5_000), format!("i{}", row));
        }

        assert_eq!(joins.len(), 5_000);
        assert_eq!(joins.keys().nth(4_999), Some("m4999"));
        assert_eq!(joins.get("m7").unwrap(), ids(&["i7", "i5007", "i10007", "i15007"]).as_slice());

        joins.insert("m7", ids(&["x"]));
        assert_eq!(joins.keys().nth(7), Some("m7"));
        assert_eq!(joins.get("m7").unwrap(), ids(&["x"]).as_slice());
    }
}
