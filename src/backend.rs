//! Traits describing the client the facade forwards to.
//!
//! [`crate::RestClient`] implements all of them against the Gemini REST API.
//! Tests and alternative transports can supply their own implementations
//! through [`ClientFactory`] or by injecting a [`GenAIClient`] directly.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{
    ComputeTokensParameters, ComputeTokensResponse, Content, CountTokensParameters,
    CountTokensResponse, CreateChatParameters, DeleteFileResponse, EmbedContentParameters,
    EmbedContentResponse, FileInfo, GenerateContentParameters, GenerateContentResponse,
    GenerateImagesParameters, GenerateImagesResponse, GenerateVideosOperation,
    GenerateVideosParameters, ResponseStream, SendMessageParameters, UploadFileParameters,
};

/// A fully constructed client: model operations, a chat factory and files.
pub trait GenAIClient: Send + Sync {
    /// Model operations
    fn models(&self) -> &dyn Models;
    /// Chat session factory
    fn chats(&self) -> &dyn Chats;
    /// File operations
    fn files(&self) -> &dyn Files;
}

/// Builds clients from a configuration.
pub trait ClientFactory: Send + Sync {
    /// Builds a new client. Called at most once per cached handle.
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn GenAIClient>>;
}

/// Model operations.
#[async_trait]
pub trait Models: Send + Sync {
    /// Generates a complete response.
    async fn generate_content(
        &self,
        params: GenerateContentParameters,
    ) -> Result<GenerateContentResponse>;

    /// Generates a response as a stream of chunks.
    async fn generate_content_stream(
        &self,
        params: GenerateContentParameters,
    ) -> Result<ResponseStream>;

    /// Generates images from a prompt.
    async fn generate_images(
        &self,
        params: GenerateImagesParameters,
    ) -> Result<GenerateImagesResponse>;

    /// Starts video generation.
    async fn generate_videos(
        &self,
        params: GenerateVideosParameters,
    ) -> Result<GenerateVideosOperation>;

    /// Returns the tokens of the contents.
    async fn compute_tokens(&self, params: ComputeTokensParameters)
        -> Result<ComputeTokensResponse>;

    /// Counts the tokens of the contents.
    async fn count_tokens(&self, params: CountTokensParameters) -> Result<CountTokensResponse>;

    /// Embeds each content.
    async fn embed_content(&self, params: EmbedContentParameters) -> Result<EmbedContentResponse>;
}

/// Chat session factory.
pub trait Chats: Send + Sync {
    /// Creates a new session. No request is made until the first message.
    fn create(&self, params: CreateChatParameters) -> Arc<dyn ChatSession>;
}

/// A stateful conversation.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Sends a message and waits for the full reply.
    async fn send_message(&self, params: SendMessageParameters)
        -> Result<GenerateContentResponse>;

    /// Sends a message and streams the reply.
    async fn send_message_stream(&self, params: SendMessageParameters) -> Result<ResponseStream>;

    /// The turns recorded so far.
    fn history(&self) -> Vec<Content>;
}

/// File operations. `None` means the service returned no file.
#[async_trait]
pub trait Files: Send + Sync {
    /// Uploads a file.
    async fn upload(&self, params: UploadFileParameters) -> Result<Option<FileInfo>>;

    /// Looks up a file by name.
    async fn get(&self, name: &str) -> Result<Option<FileInfo>>;

    /// Deletes a file by name.
    async fn delete(&self, name: &str) -> Result<Option<DeleteFileResponse>>;
}
