use std::fmt;

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::csv::field_name::FieldName;

const TITLE_KEYS: [&str; 4] = ["title", "Name", "TITLE", "show_title"];

pub type OrderedMap = Vec<(FieldName, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: OrderedMap,
}

impl Record {
    // A repeated key keeps its first position and its last value.
    pub fn from_pairs<I>(pairs: I) -> Record
    where
        I: IntoIterator<Item = (FieldName, String)>,
    {
        let mut fields: OrderedMap = Vec::new();
        for (key, value) in pairs {
            match fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, slot)) => *slot = value,
                None => fields.push((key, value)),
            }
        }
        Record { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn to_ordered_map(&self) -> OrderedMap {
        self.fields.clone()
    }

    pub fn title(&self) -> &str {
        TITLE_KEYS
            .iter()
            .find_map(|key| self.get(key))
            .or_else(|| self.fields.first().map(|(_, value)| value.as_str()))
            .unwrap_or("")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({:?})", self.title())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
