use serde::{Deserialize, Serialize};

/// Safety category for content filtering in the Gemini AI API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Content that harasses, bullies, or threatens individuals or groups.
    HarmCategoryHarassment,
    /// Content that expresses hateful, biased, or discriminatory views.
    HarmCategoryHateSpeech,
    /// Content of a sexual nature or containing explicit material.
    HarmCategorySexuallyExplicit,
    /// Content that promotes or provides instructions for dangerous activities.
    HarmCategoryDangerousContent,
    /// Content that may undermine or manipulate civic processes and institutions.
    HarmCategoryCivicIntegrity,
    /// Any category this crate does not know about.
    #[serde(other)]
    HarmCategoryUnspecified,
}

/// Threshold at which content is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Use the service default
    HarmBlockThresholdUnspecified,
    /// Block low, medium and high probability content
    BlockLowAndAbove,
    /// Block medium and high probability content
    BlockMediumAndAbove,
    /// Block only high probability content
    BlockOnlyHigh,
    /// Never block
    BlockNone,
    /// Turn the safety filter off
    Off,
}

/// Safety setting for a specific harm category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// The category of harm to filter
    pub category: HarmCategory,
    /// The threshold level for filtering
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Creates a setting for one category.
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }
}
