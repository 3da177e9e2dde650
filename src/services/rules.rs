use std::collections::{HashMap, HashSet};

use crate::models::{
    Recommendation, RecommendationSet, UserPreferences, UserProfile, WardrobeItem,
};

/// Substituted when neither the body type nor the occasion matches a rule
pub const GENERIC_ITEMS: [&str; 3] = ["tailored trousers", "versatile knit", "layering jacket"];

/// Palette used when the user expressed no color preference
pub const DEFAULT_PALETTE: [&str; 3] = ["navy", "white", "black"];

pub const RULES_SUMMARY: &str = "Generated using Dressly's rules engine. \
     Configure AI_PROVIDER=openai to enable LLM powered suggestions.";

const BODY_TYPE_RULES: [(&str, [&str; 3]); 4] = [
    ("athletic", ["slim fit jeans", "fitted tees", "structured jackets"]),
    ("curvy", ["high-rise trousers", "wrap dresses", "tailored blazers"]),
    ("petite", ["cropped jackets", "ankle pants", "monochrome outfits"]),
    ("tall", ["wide-leg trousers", "layered knits", "longline coats"]),
];

const OCCASION_RULES: [(&str, [&str; 3]); 4] = [
    ("work", ["tailored blazer", "button-up shirt", "sleek loafers"]),
    ("casual", ["straight denim", "relaxed tee", "clean sneakers"]),
    ("date", ["silk blouse", "dark denim", "ankle boots"]),
    ("party", ["statement top", "black jeans", "chelsea boots"]),
];

/// Static garment tables keyed by body type and occasion
///
/// Keys are stored lowercase and looked up case-insensitively. Tables are built
/// once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct RuleTables {
    body_types: HashMap<String, Vec<String>>,
    occasions: HashMap<String, Vec<String>>,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::new(to_table(&BODY_TYPE_RULES), to_table(&OCCASION_RULES))
    }
}

fn to_table(rules: &[(&str, [&str; 3])]) -> HashMap<String, Vec<String>> {
    rules
        .iter()
        .map(|(key, items)| {
            (
                key.to_string(),
                items.iter().map(|i| i.to_string()).collect(),
            )
        })
        .collect()
}

impl RuleTables {
    pub fn new(
        body_types: HashMap<String, Vec<String>>,
        occasions: HashMap<String, Vec<String>>,
    ) -> Self {
        let lower = |table: HashMap<String, Vec<String>>| -> HashMap<String, Vec<String>> {
            table
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect()
        };

        Self {
            body_types: lower(body_types),
            occasions: lower(occasions),
        }
    }

    /// Replaces the body type table, keeping the default occasion rules
    pub fn with_body_types(body_types: HashMap<String, Vec<String>>) -> Self {
        Self::new(body_types, to_table(&OCCASION_RULES))
    }

    pub fn body_type(&self, key: &str) -> &[String] {
        self.body_types
            .get(&key.to_lowercase())
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn occasion(&self, key: &str) -> &[String] {
        self.occasions
            .get(&key.to_lowercase())
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Deterministic, table-driven recommender
///
/// `evaluate` is total: absent or unknown inputs fall back to defaults and the
/// function never fails.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    tables: RuleTables,
}

impl RuleEngine {
    pub fn new(tables: RuleTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn evaluate(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> RecommendationSet {
        let selection = self.select_items(profile, preferences);

        let palette: Vec<&str> = match preferences {
            Some(prefs) if !prefs.colors.is_empty() => {
                prefs.colors.iter().map(String::as_str).collect()
            }
            _ => DEFAULT_PALETTE.to_vec(),
        };

        let disliked: &[String] = preferences.map_or(&[][..], |p| p.disliked_items.as_slice());

        let reuse_from_wardrobe: Vec<String> = wardrobe
            .iter()
            .filter(|item| selection.contains(&item.name))
            .map(|item| item.name.clone())
            .collect();

        let body_type = profile
            .body_type
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or("balanced");

        let outfits = (0..max_outfits)
            .map(|idx| {
                let accent = palette[idx % palette.len()];

                let accessories = [
                    format!("{} belt", accent),
                    "minimal watch".to_string(),
                    "textured bag".to_string(),
                ]
                .into_iter()
                .filter(|accessory| !disliked.iter().any(|d| accessory.contains(d.as_str())))
                .collect();

                Recommendation {
                    title: format!("Outfit {}", idx + 1),
                    summary: format!(
                        "Blends Dressly's core rules for {} body types with {} accents.",
                        body_type, accent
                    ),
                    items: selection.clone(),
                    accessories,
                    reuse_from_wardrobe: reuse_from_wardrobe.clone(),
                }
            })
            .collect();

        RecommendationSet {
            summary: RULES_SUMMARY.to_string(),
            outfits,
        }
    }

    /// Body type garments followed by occasion garments, deduplicated in order
    fn select_items(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
    ) -> Vec<String> {
        let body_items = profile
            .body_type
            .as_deref()
            .map_or(&[][..], |b| self.tables.body_type(b));

        let occasion_items = preferences
            .and_then(|p| p.occasion.as_deref())
            .map_or(&[][..], |o| self.tables.occasion(o));

        let mut seen = HashSet::new();
        let selection: Vec<String> = body_items
            .iter()
            .chain(occasion_items)
            .filter(|item| seen.insert(item.as_str()))
            .cloned()
            .collect();

        if selection.is_empty() {
            GENERIC_ITEMS.iter().map(|i| i.to_string()).collect()
        } else {
            selection
        }
    }
}
