//! Configuration for the normalization pipeline.
//!
//! All heuristic inputs (keyword sets, scan window, numeric-ratio threshold)
//! live here as explicit configuration passed into the pipeline, never as
//! hidden globals. The defaults match the behavior the tool is documented
//! with; callers can override any of them.

use serde::{Deserialize, Serialize};

use crate::role::SemanticRole;

/// Keyword sets matched case-insensitively as substrings against cleaned
/// column identifiers, one set per semantic role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSets {
    pub name: Vec<String>,
    pub id: Vec<String>,
    pub description: Vec<String>,
    pub hourly_rate: Vec<String>,
    pub available_from: Vec<String>,
    pub available_to: Vec<String>,
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            name: keywords(&[
                "name", "nazev", "název", "půjčovna", "produkt", "product", "title",
            ]),
            id: keywords(&["id", "kod", "číslo", "cislo", "sku"]),
            description: keywords(&["desc", "popis", "detai", "pozn", "note"]),
            hourly_rate: keywords(&["price", "cena", "rate", "hod", "hour"]),
            available_from: keywords(&[
                "available_from",
                "dostupne_od",
                "od",
                "from",
                "start",
                "datum",
            ]),
            available_to: keywords(&["available_to", "dostupne_do", "do", "to", "end"]),
        }
    }
}

impl KeywordSets {
    #[must_use]
    pub fn for_role(&self, role: SemanticRole) -> &[String] {
        match role {
            SemanticRole::Name => &self.name,
            SemanticRole::Id => &self.id,
            SemanticRole::Description => &self.description,
            SemanticRole::HourlyRate => &self.hourly_rate,
            SemanticRole::AvailableFrom => &self.available_from,
            SemanticRole::AvailableTo => &self.available_to,
        }
    }
}

/// Options for the whole normalization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// How many leading rows the header locator examines.
    pub header_scan_window: usize,
    /// Minimum share of plain-number samples for the rate shape fallback.
    pub numeric_ratio_threshold: f64,
    /// Keyword sets for the role keyword pass.
    pub keywords: KeywordSets,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            header_scan_window: 10,
            numeric_ratio_threshold: 0.6,
            keywords: KeywordSets::default(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header_scan_window(mut self, window: usize) -> Self {
        self.header_scan_window = window;
        self
    }

    #[must_use]
    pub fn with_numeric_ratio_threshold(mut self, threshold: f64) -> Self {
        self.numeric_ratio_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSets) -> Self {
        self.keywords = keywords;
        self
    }
}
