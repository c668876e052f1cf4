use crate::detect::Entities;
use radar_scanner::RawHit;
use serde::Serialize;

/// A search result together with the devices detected on its page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub entities: Entities,
}

impl SearchHit {
    pub fn new(raw: RawHit, entities: Entities) -> Self {
        let RawHit {
            title,
            url,
            snippet,
        } = raw;
        Self {
            title,
            url,
            snippet,
            entities,
        }
    }

    pub fn is_accessible(&self) -> bool {
        !self.entities.is_inaccessible()
    }
}
