use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod product;
pub mod quiz;

pub use product::ProductPage;
pub use quiz::{Budget, Height, QuizInput, Sizes};

/// Number of outfits generated when the caller does not ask for a specific count
pub const DEFAULT_MAX_OUTFITS: usize = 3;

/// Normalized representation of the answers collected from the quiz
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height_ft: Option<u32>,
    #[serde(default)]
    pub height_in: Option<u32>,
    /// Free-text body type key (e.g. "athletic", "petite")
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Soft constraints expressed by the user for a single request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    /// Preferred colors, most preferred first
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    /// Substrings of items the user does not want to see
    #[serde(default)]
    pub disliked_items: Vec<String>,
    /// Budget descriptor, e.g. "<$100" or "premium"
    #[serde(default)]
    pub budget: Option<String>,
}

/// An item the user already owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WardrobeItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub dominant_color: Option<String>,
}

/// A single outfit suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub summary: String,
    pub items: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    /// Owned wardrobe items that already appear in `items`
    #[serde(default)]
    pub reuse_from_wardrobe: Vec<String>,
}

/// Complete structured output of one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationSet {
    pub summary: String,
    pub outfits: Vec<Recommendation>,
}

/// Where a stylist response came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    /// Deterministic rule engine
    Rules,
    /// Remote reasoning backend
    Backend,
}

impl Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSource::Rules => write!(f, "rules"),
            ResponseSource::Backend => write!(f, "backend"),
        }
    }
}

/// Result of a stylist request
///
/// Rule engine output is fully typed. Backend output is the parsed JSON object
/// passed through untouched: it is trusted to follow the prompt's response shape
/// and is not validated against the rule engine's invariants.
///
/// Serializes untagged, so the wire payload is exactly the recommendation set
/// or exactly the backend's object.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StylistResponse {
    Rules(RecommendationSet),
    Backend(serde_json::Value),
}

impl StylistResponse {
    pub fn source(&self) -> ResponseSource {
        match self {
            StylistResponse::Rules(_) => ResponseSource::Rules,
            StylistResponse::Backend(_) => ResponseSource::Backend,
        }
    }

    /// Top-level summary, if the payload carries one
    pub fn summary(&self) -> Option<&str> {
        match self {
            StylistResponse::Rules(set) => Some(set.summary.as_str()),
            StylistResponse::Backend(value) => value.get("summary").and_then(|s| s.as_str()),
        }
    }

    /// Number of outfits in the payload; zero when a backend payload has no outfit array
    pub fn outfit_count(&self) -> usize {
        match self {
            StylistResponse::Rules(set) => set.outfits.len(),
            StylistResponse::Backend(value) => value
                .get("outfits")
                .and_then(|o| o.as_array())
                .map_or(0, |o| o.len()),
        }
    }

    /// Returns the rule engine set, if this response came from the rules
    pub fn as_rules(&self) -> Option<&RecommendationSet> {
        match self {
            StylistResponse::Rules(set) => Some(set),
            StylistResponse::Backend(_) => None,
        }
    }
}
