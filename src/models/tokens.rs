//! Token counting and token computation models.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::Content;

/// Optional configuration for `countTokens`.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct CountTokensConfig {
    /// Instruction counted together with the contents
    #[builder(default, setter(strip_option, into))]
    pub system_instruction: Option<Content>,
}

/// Response from token counting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// Total number of tokens in the request.
    #[serde(default)]
    pub total_tokens: u32,
    /// Number of tokens served from cached content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_content_token_count: Option<u32>,
}

/// Response from token computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeTokensResponse {
    /// Tokens per input content.
    #[serde(default)]
    pub tokens_info: Vec<TokensInfo>,
}

/// The tokens of one piece of content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensInfo {
    /// Role of the content the tokens belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Token ids, as decimal strings.
    #[serde(default)]
    pub token_ids: Vec<String>,
    /// Base64-encoded token bytes.
    #[serde(default)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountTokensRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<Vec<Content>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generate_content_request: Option<WrappedContentRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WrappedContentRequest {
    model: String,
    contents: Vec<Content>,
    system_instruction: Content,
}

impl CountTokensRequest {
    /// Plain `contents` unless a system instruction must be counted too.
    pub fn new(model: String, contents: Vec<Content>, config: Option<&CountTokensConfig>) -> Self {
        match config.and_then(|c| c.system_instruction.clone()) {
            Some(system_instruction) => Self {
                contents: None,
                generate_content_request: Some(WrappedContentRequest {
                    model,
                    contents,
                    system_instruction,
                }),
            },
            None => Self {
                contents: Some(contents),
                generate_content_request: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ComputeTokensRequest {
    pub contents: Vec<Content>,
}
