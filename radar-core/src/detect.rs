// Device mention detection over normalized page text

use crate::patterns::{ERROR_CATEGORY, PatternTable};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const MAX_MATCHES_PER_CATEGORY: usize = 3;

/// Message stored under the sentinel category for unreachable pages.
pub const NOT_ACCESSIBLE: &str = "Page not accessible";

/// Ordered category -> matches mapping. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    entries: Vec<(String, Vec<String>)>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sentinel mapping for a hit whose page could not be analyzed.
    pub fn inaccessible() -> Self {
        Self {
            entries: vec![(ERROR_CATEGORY.to_string(), vec![NOT_ACCESSIBLE.to_string()])],
        }
    }

    /// Insert or replace a category. Duplicates are dropped, the list is capped
    /// and empty lists are ignored.
    pub fn insert(&mut self, category: impl Into<String>, matches: Vec<String>) {
        let category = category.into();
        let mut kept: Vec<String> = Vec::with_capacity(MAX_MATCHES_PER_CATEGORY);
        for m in matches {
            if kept.len() == MAX_MATCHES_PER_CATEGORY {
                break;
            }
            if !kept.contains(&m) {
                kept.push(m);
            }
        }

        self.entries.retain(|(name, _)| *name != category);
        if !kept.is_empty() {
            self.entries.push((category, kept));
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, matches)| matches.as_slice())
    }

    /// First category in detection order.
    pub fn first_category(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, matches)| (name.as_str(), matches.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_inaccessible(&self) -> bool {
        self.get(ERROR_CATEGORY).is_some()
    }
}

impl<C: Into<String>> FromIterator<(C, Vec<String>)> for Entities {
    fn from_iter<I: IntoIterator<Item = (C, Vec<String>)>>(iter: I) -> Self {
        let mut entities = Entities::new();
        for (category, matches) in iter {
            entities.insert(category, matches);
        }
        entities
    }
}

impl Serialize for Entities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, matches) in &self.entries {
            map.serialize_entry(category, matches)?;
        }
        map.end()
    }
}

/// Match `text` against every category of `table`. Matches are kept in
/// first-seen order, without duplicates, up to [`MAX_MATCHES_PER_CATEGORY`].
pub fn detect_entities(text: &str, table: &PatternTable) -> Entities {
    let lowered = text.to_lowercase();
    let mut entries = Vec::new();

    for pattern in table.iter() {
        let mut matches: Vec<String> = Vec::new();
        for found in pattern.regex().find_iter(&lowered) {
            let found = found.as_str();
            if matches.iter().any(|seen| seen == found) {
                continue;
            }
            matches.push(found.to_string());
            if matches.len() == MAX_MATCHES_PER_CATEGORY {
                break;
            }
        }

        if !matches.is_empty() {
            entries.push((pattern.category().to_string(), matches));
        }
    }

    Entities { entries }
}

/// A detector bound to one pattern table.
#[derive(Debug, Clone)]
pub struct EntityDetector {
    table: PatternTable,
}

impl EntityDetector {
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    pub fn builtin() -> Self {
        Self::new(PatternTable::builtin().clone())
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    pub fn detect(&self, text: &str) -> Entities {
        detect_entities(text, &self.table)
    }
}

impl Default for EntityDetector {
    fn default() -> Self {
        Self::builtin()
    }
}
