use serde::Serialize;
use std::fmt::Display;

use crate::models::{UserPreferences, UserProfile, WardrobeItem};

/// Instruction that fixes the response shape the reasoning gateway parses
pub const INSTRUCTION: &str = "You are Dressly, an expert fashion stylist. \
     Return JSON with a `summary` string and an `outfits` array. \
     Each outfit must include `title`, `summary`, `items`, and optional `accessories`.";

/// Field order of this struct is the field order of the rendered prompt
#[derive(Serialize)]
struct PromptDocument<'a> {
    instruction: &'a str,
    profile: &'a UserProfile,
    preferences: Option<&'a UserPreferences>,
    wardrobe: &'a [WardrobeItem],
    max_outfits: usize,
}

/// Rendered instruction document sent to the reasoning backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload(String);

impl PromptPayload {
    /// Wraps already rendered prompt text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PromptPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serializes the request context into the backend prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCompiler;

impl PromptCompiler {
    pub fn compile(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> serde_json::Result<PromptPayload> {
        let document = PromptDocument {
            instruction: INSTRUCTION,
            profile,
            preferences,
            wardrobe,
            max_outfits,
        };

        serde_json::to_string_pretty(&document).map(PromptPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
    ) -> String {
        PromptCompiler
            .compile(profile, preferences, wardrobe, 3)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_field_order_is_stable() {
        let text = compile(&UserProfile::default(), None, &[]);

        let positions: Vec<usize> = [
            "\"instruction\"",
            "\"profile\"",
            "\"preferences\"",
            "\"wardrobe\"",
            "\"max_outfits\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_absent_preferences_render_as_null() {
        let text = compile(&UserProfile::default(), None, &[]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(value["preferences"].is_null());
        assert_eq!(value["wardrobe"], serde_json::json!([]));
        assert_eq!(value["max_outfits"], 3);
        assert_eq!(value["instruction"], INSTRUCTION);
    }

    #[test]
    fn test_context_is_embedded() {
        let profile = UserProfile {
            age: Some(31),
            body_type: Some("athletic".to_string()),
            ..UserProfile::default()
        };
        let preferences = UserPreferences {
            colors: vec!["olive".to_string()],
            occasion: Some("work".to_string()),
            disliked_items: vec!["bag".to_string()],
            budget: Some("premium".to_string()),
        };
        let wardrobe = vec![WardrobeItem {
            name: "white sneakers".to_string(),
            category: "shoes".to_string(),
            dominant_color: Some("white".to_string()),
        }];

        let text = compile(&profile, Some(&preferences), &wardrobe);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["profile"]["age"], 31);
        assert_eq!(value["profile"]["body_type"], "athletic");
        assert!(value["profile"]["gender"].is_null());
        assert_eq!(value["preferences"]["occasion"], "work");
        assert_eq!(value["preferences"]["disliked_items"][0], "bag");
        assert_eq!(value["wardrobe"][0]["name"], "white sneakers");
    }

    #[test]
    fn test_instruction_names_response_fields() {
        for field in ["summary", "outfits", "title", "items", "accessories"] {
            assert!(INSTRUCTION.contains(&format!("`{}`", field)));
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let profile = UserProfile {
            body_type: Some("tall".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(
            compile(&profile, None, &[]),
            compile(&profile, None, &[])
        );
    }
}
