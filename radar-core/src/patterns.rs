// Ordered device category table

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Reserved category marking a hit whose page could not be analyzed.
pub const ERROR_CATEGORY: &str = "Error";

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid pattern for category '{category}': {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("category name '{0}' is reserved")]
    ReservedCategory(String),

    #[error("category name must not be empty")]
    EmptyCategory,
}

#[derive(Debug, Clone)]
pub struct EntityPattern {
    category: String,
    regex: Regex,
    color: String,
}

impl EntityPattern {
    /// Compile `pattern` case-insensitively.
    pub fn new(
        category: impl Into<String>,
        pattern: &str,
        color: impl Into<String>,
    ) -> Result<Self, PatternError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(PatternError::EmptyCategory);
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::InvalidPattern {
                category: category.clone(),
                source,
            })?;

        Ok(Self {
            category,
            regex,
            color: color.into(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<EntityPattern>,
}

impl PatternTable {
    pub fn new(patterns: Vec<EntityPattern>) -> Result<Self, PatternError> {
        let mut seen: Vec<&str> = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            let category = pattern.category();
            if category == ERROR_CATEGORY {
                return Err(PatternError::ReservedCategory(category.to_string()));
            }
            if seen.contains(&category) {
                return Err(PatternError::DuplicateCategory(category.to_string()));
            }
            seen.push(category);
        }

        Ok(Self { patterns })
    }

    /// The built-in consumer-device table.
    pub fn builtin() -> &'static PatternTable {
        &BUILTIN
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityPattern> {
        self.patterns.iter()
    }

    pub fn get(&self, category: &str) -> Option<&EntityPattern> {
        self.patterns.iter().find(|p| p.category() == category)
    }

    pub fn color_for(&self, category: &str) -> Option<&str> {
        self.get(category).map(EntityPattern::color)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// (category, color, pattern)
const BUILTIN_PATTERNS: &[(&str, &str, &str)] = &[
    (
        "iPhone",
        "lightcoral",
        r"\biphone\s?(?:\d{1,2}|se|xr|xs|x)(?:\s(?:pro max|pro|plus|mini))?\b",
    ),
    (
        "Samsung",
        "mediumpurple",
        r"\bgalaxy\s?(?:s|note|a|z\s?fold|z\s?flip)\s?\d{1,2}(?:\s?(?:ultra|plus|fe))?\b",
    ),
    (
        "Pixel",
        "mediumseagreen",
        r"\bpixel\s?\d{1,2}(?:\s?(?:pro|xl|a))?\b",
    ),
    (
        "OnePlus",
        "tomato",
        r"\boneplus\s?(?:nord\s?)?\d{1,2}(?:\s?(?:pro|t|r))?\b",
    ),
    (
        "Xiaomi",
        "orange",
        r"\b(?:xiaomi|redmi)\s?(?:note\s?)?\d{1,2}(?:\s?(?:pro|ultra|lite))?\b",
    ),
    (
        "iPad",
        "lightskyblue",
        r"\bipad(?:\s(?:pro|air|mini))?(?:\s?\d{1,2})?\b",
    ),
    (
        "MacBook",
        "slategray",
        r"\bmacbook(?:\s(?:pro|air))?(?:\s?m[1-4](?:\s(?:pro|max))?)?\b",
    ),
    (
        "Apple Watch",
        "palevioletred",
        r"\bapple\s?watch(?:\s(?:series\s?\d{1,2}|ultra(?:\s?\d)?|se))?\b",
    ),
    (
        "AirPods",
        "khaki",
        r"\bairpods(?:\s(?:pro|max))?(?:\s?\d)?\b",
    ),
];

static BUILTIN: Lazy<PatternTable> = Lazy::new(|| {
    let patterns = BUILTIN_PATTERNS
        .iter()
        .map(|(category, color, pattern)| {
            EntityPattern::new(*category, pattern, *color).expect("invalid built-in pattern")
        })
        .collect();
    PatternTable::new(patterns).expect("invalid built-in pattern table")
});
