use serde::{Deserialize, Serialize};

use super::{UserPreferences, UserProfile};
use crate::error::{AppError, AppResult};

/// User height in feet and inches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Height {
    pub ft: u32,
    #[serde(rename = "in_", default)]
    pub inches: Option<u32>,
}

/// User clothing sizes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sizes {
    /// Top size (e.g. S, M, L, XL)
    pub tops: String,
    /// Bottom size (e.g. 28, 30, 32)
    pub bottoms: String,
}

/// Price range per item in the user's currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
}

impl Budget {
    /// Budget descriptor handed to the stylist, e.g. "20-80"
    pub fn descriptor(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Complete quiz submission from the front end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizInput {
    /// Shopping occasions, at least one
    pub occasion: Vec<String>,
    /// Style preferences, at least one
    pub style_vibe: Vec<String>,
    #[serde(default)]
    pub colors_like: Option<Vec<String>>,
    #[serde(default)]
    pub height: Option<Height>,
    pub sizes: Sizes,
    pub budget: Budget,
}

impl QuizInput {
    /// Checks the field constraints the quiz form promises
    pub fn validate(&self) -> AppResult<()> {
        if self.occasion.iter().all(|o| o.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "At least one occasion is required".to_string(),
            ));
        }

        if self.style_vibe.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "At least one style vibe is required".to_string(),
            ));
        }

        if let Some(height) = &self.height {
            if !(3..=8).contains(&height.ft) {
                return Err(AppError::InvalidInput(format!(
                    "Height in feet must be between 3 and 8, got {}",
                    height.ft
                )));
            }
            if height.inches.is_some_and(|i| i > 11) {
                return Err(AppError::InvalidInput(
                    "Height in inches must be between 0 and 11".to_string(),
                ));
            }
        }

        if self.sizes.tops.trim().is_empty() || self.sizes.bottoms.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Top and bottom sizes are required".to_string(),
            ));
        }

        if self.budget.min < 0.0 || self.budget.max <= 0.0 {
            return Err(AppError::InvalidInput(
                "Budget must be non-negative with a positive maximum".to_string(),
            ));
        }
        if self.budget.min > self.budget.max {
            return Err(AppError::InvalidInput(
                "Budget minimum cannot exceed maximum".to_string(),
            ));
        }

        Ok(())
    }

    /// Profile derived from the quiz; the quiz does not ask for body type, age or gender
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            height_ft: self.height.as_ref().map(|h| h.ft),
            height_in: self.height.as_ref().and_then(|h| h.inches),
            ..UserProfile::default()
        }
    }

    /// Preferences derived from the quiz, keyed on the first non-blank occasion
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            colors: self
                .colors_like
                .iter()
                .flatten()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
            occasion: self
                .occasion
                .iter()
                .map(|o| o.trim())
                .find(|o| !o.is_empty())
                .map(str::to_string),
            disliked_items: Vec::new(),
            budget: Some(self.budget.descriptor()),
        }
    }
}
