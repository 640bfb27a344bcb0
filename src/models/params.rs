//! Parameter objects handed from the facade to the client traits.
//!
//! Each one bundles the configured model with the caller's input and optional
//! per-call configuration, mirroring the `{model, contents|prompt, config}`
//! shape the service expects.

use super::{
    Content, Contents, CountTokensConfig, EmbedContentConfig, GenerateContentConfig,
    GenerateImagesConfig, GenerateVideosConfig, Image, Model, UploadFileConfig, UploadSource,
};

/// Input to `generate_content` and `generate_content_stream`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateContentParameters {
    /// Model to generate with
    pub model: Model,
    /// Conversation turns
    pub contents: Contents,
    /// Optional generation options
    pub config: Option<GenerateContentConfig>,
}

/// Input to `generate_images`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateImagesParameters {
    /// Image model
    pub model: Model,
    /// Text prompt
    pub prompt: String,
    /// Optional image options
    pub config: Option<GenerateImagesConfig>,
}

/// Input to `generate_videos`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateVideosParameters {
    /// Video model
    pub model: Model,
    /// Text prompt
    pub prompt: String,
    /// Optional starting frame
    pub image: Option<Image>,
    /// Optional video options
    pub config: Option<GenerateVideosConfig>,
}

/// Input to `compute_tokens`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeTokensParameters {
    /// Model whose tokenizer is used
    pub model: Model,
    /// Contents to tokenize
    pub contents: Contents,
}

/// Input to `count_tokens`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountTokensParameters {
    /// Model whose tokenizer is used
    pub model: Model,
    /// Contents to count
    pub contents: Contents,
    /// Optional counting options
    pub config: Option<CountTokensConfig>,
}

/// Input to `embed_content`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedContentParameters {
    /// Embedding model
    pub model: Model,
    /// Contents to embed, one embedding each
    pub contents: Contents,
    /// Optional embedding options
    pub config: Option<EmbedContentConfig>,
}

/// Input to the chat factory.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateChatParameters {
    /// Model used for every turn
    pub model: Model,
    /// Options applied to every turn
    pub config: GenerateContentConfig,
    /// Turns to seed the session with
    pub history: Vec<Content>,
}

/// Input to a chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageParameters {
    /// The user's message
    pub message: Content,
}

/// Input to a file upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFileParameters {
    /// Bytes or path to upload
    pub source: UploadSource,
    /// Optional upload options
    pub config: Option<UploadFileConfig>,
}
