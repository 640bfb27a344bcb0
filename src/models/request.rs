//! Content and request models for the Gemini AI API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{Part, SafetySetting};

/// Author of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content written by the caller
    User,
    /// Content produced by the model
    Model,
}

/// A content object made of parts and an optional role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    /// Who produced this content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates user content from a list of parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }

    /// Creates model content from a list of parts.
    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::Model),
            parts,
        }
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::user(vec![Part::text(text)])
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::user(vec![Part::text(text)])
    }
}

impl From<Part> for Content {
    fn from(part: Part) -> Self {
        Self::user(vec![part])
    }
}

impl From<Vec<Part>> for Content {
    fn from(parts: Vec<Part>) -> Self {
        Self::user(parts)
    }
}

/// The `contents` of a request: one or more turns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contents(pub Vec<Content>);

impl Contents {
    /// Returns the turns as a slice.
    pub fn as_slice(&self) -> &[Content] {
        &self.0
    }
}

impl From<&str> for Contents {
    fn from(text: &str) -> Self {
        Self(vec![text.into()])
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Self {
        Self(vec![text.into()])
    }
}

impl From<Content> for Contents {
    fn from(content: Content) -> Self {
        Self(vec![content])
    }
}

impl From<Vec<Content>> for Contents {
    fn from(contents: Vec<Content>) -> Self {
        Self(contents)
    }
}

/// Optional configuration for content generation and chat sessions.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct GenerateContentConfig {
    /// Instruction applied to every turn
    #[builder(default, setter(strip_option, into))]
    pub system_instruction: Option<Content>,
    /// Safety settings for content filtering
    #[builder(default, setter(strip_option))]
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f32>,
    /// Nucleus sampling probability
    #[builder(default, setter(strip_option))]
    pub top_p: Option<f32>,
    /// Top-k sampling
    #[builder(default, setter(strip_option))]
    pub top_k: Option<u32>,
    /// Upper bound on generated tokens
    #[builder(default, setter(strip_option))]
    pub max_output_tokens: Option<u32>,
    /// Number of candidates to return
    #[builder(default, setter(strip_option))]
    pub candidate_count: Option<u32>,
    /// Sequences that stop generation
    #[builder(default, setter(strip_option))]
    pub stop_sequences: Option<Vec<String>>,
    /// MIME type of the response, e.g. `application/json`
    #[builder(default, setter(strip_option, into))]
    pub response_mime_type: Option<String>,
}

impl GenerateContentConfig {
    /// The `generationConfig` object, or `None` if no sampling option is set.
    pub(crate) fn generation_config(&self) -> Option<GenerationConfig> {
        let config = GenerationConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
            candidate_count: self.candidate_count,
            stop_sequences: self.stop_sequences.clone(),
            response_mime_type: self.response_mime_type.clone(),
        };
        (config != GenerationConfig::default()).then_some(config)
    }
}

/// Wire form of the sampling options.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Body of `generateContent` and `streamGenerateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>, config: Option<&GenerateContentConfig>) -> Self {
        Self {
            contents,
            system_instruction: config.and_then(|c| c.system_instruction.clone()),
            generation_config: config.and_then(GenerateContentConfig::generation_config),
            safety_settings: config.and_then(|c| c.safety_settings.clone()),
        }
    }
}
