//! In-memory client used to observe what the facade forwards.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use genai_facade::backend::{ChatSession, Chats, ClientFactory, Files, GenAIClient, Models};
use genai_facade::models::{
    ComputeTokensParameters, ComputeTokensResponse, Content, CountTokensParameters,
    CountTokensResponse, CreateChatParameters, DeleteFileResponse, EmbedContentParameters,
    EmbedContentResponse, FileInfo, GenerateContentParameters, GenerateContentResponse,
    GenerateImagesParameters, GenerateImagesResponse, GenerateVideosOperation,
    GenerateVideosParameters, GeneratedImage, Image, Part, ResponseStream, SendMessageParameters,
    TokensInfo, UploadFileParameters,
};
use genai_facade::{ClientConfig, Result};

/// Routes `RUST_LOG`-filtered output to the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a response whose first candidate says `text`.
pub fn reply(text: &str) -> GenerateContentResponse {
    serde_json::from_value(serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
    .unwrap()
}

/// One image whose bytes are the prompt.
pub fn canned_images(prompt: &str) -> GenerateImagesResponse {
    GenerateImagesResponse {
        generated_images: vec![GeneratedImage {
            image: Some(Image::from_bytes(prompt.as_bytes(), "image/png")),
            rai_filtered_reason: None,
        }],
    }
}

/// One token per word of `text`.
pub fn canned_tokens(text: &str) -> ComputeTokensResponse {
    ComputeTokensResponse {
        tokens_info: vec![TokensInfo {
            role: Some("user".to_string()),
            token_ids: (1..=text.split(' ').count()).map(|i| i.to_string()).collect(),
            tokens: text.split(' ').map(str::to_string).collect(),
        }],
    }
}

/// A client that records every call and answers with canned values.
#[derive(Default)]
pub struct FakeClient {
    pub calls: Mutex<Vec<String>>,
    pub last_generate: Mutex<Option<GenerateContentParameters>>,
    pub last_count: Mutex<Option<CountTokensParameters>>,
    pub chats_created: AtomicUsize,
    pub stream_chunks: Vec<String>,
    pub stored_file: Option<FileInfo>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream(chunks: &[&str]) -> Self {
        Self {
            stream_chunks: chunks.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_file(name: &str) -> Self {
        Self {
            stored_file: Some(FileInfo {
                name: name.to_string(),
                ..FileInfo::default()
            }),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn stream(&self) -> ResponseStream {
        let chunks: Vec<Result<GenerateContentResponse>> =
            self.stream_chunks.iter().map(|c| Ok(reply(c))).collect();
        ResponseStream::new(futures::stream::iter(chunks))
    }
}

impl GenAIClient for FakeClient {
    fn models(&self) -> &dyn Models {
        self
    }

    fn chats(&self) -> &dyn Chats {
        self
    }

    fn files(&self) -> &dyn Files {
        self
    }
}

#[async_trait]
impl Models for FakeClient {
    async fn generate_content(
        &self,
        params: GenerateContentParameters,
    ) -> Result<GenerateContentResponse> {
        self.record("generate_content");
        let text = format!("echo: {}", params.contents.0[0].text());
        *self.last_generate.lock().unwrap() = Some(params);
        Ok(reply(&text))
    }

    async fn generate_content_stream(
        &self,
        params: GenerateContentParameters,
    ) -> Result<ResponseStream> {
        self.record("generate_content_stream");
        *self.last_generate.lock().unwrap() = Some(params);
        Ok(self.stream())
    }

    async fn generate_images(
        &self,
        params: GenerateImagesParameters,
    ) -> Result<GenerateImagesResponse> {
        self.record("generate_images");
        Ok(canned_images(&params.prompt))
    }

    async fn generate_videos(
        &self,
        params: GenerateVideosParameters,
    ) -> Result<GenerateVideosOperation> {
        self.record("generate_videos");
        Ok(GenerateVideosOperation {
            name: format!("operations/{}", params.prompt),
            ..GenerateVideosOperation::default()
        })
    }

    async fn compute_tokens(
        &self,
        params: ComputeTokensParameters,
    ) -> Result<ComputeTokensResponse> {
        self.record("compute_tokens");
        Ok(canned_tokens(&params.contents.0[0].text()))
    }

    async fn count_tokens(&self, params: CountTokensParameters) -> Result<CountTokensResponse> {
        self.record("count_tokens");
        let total = params.contents.0.len() as u32;
        *self.last_count.lock().unwrap() = Some(params);
        Ok(CountTokensResponse {
            total_tokens: total,
            ..CountTokensResponse::default()
        })
    }

    async fn embed_content(&self, params: EmbedContentParameters) -> Result<EmbedContentResponse> {
        self.record("embed_content");
        let embeddings = params
            .contents
            .0
            .iter()
            .map(|_| genai_facade::models::ContentEmbedding { values: vec![0.5] })
            .collect();
        Ok(EmbedContentResponse { embeddings })
    }
}

impl Chats for FakeClient {
    fn create(&self, params: CreateChatParameters) -> Arc<dyn ChatSession> {
        self.record("chats.create");
        self.chats_created.fetch_add(1, Ordering::SeqCst);
        Arc::new(FakeChat {
            history: Mutex::new(params.history),
        })
    }
}

/// Echoes every message and records both turns.
pub struct FakeChat {
    history: Mutex<Vec<Content>>,
}

#[async_trait]
impl ChatSession for FakeChat {
    async fn send_message(&self, params: SendMessageParameters) -> Result<GenerateContentResponse> {
        let text = params.message.text();
        let mut history = self.history.lock().unwrap();
        history.push(params.message);
        history.push(Content::model(vec![Part::text(text.clone())]));
        Ok(reply(&text))
    }

    async fn send_message_stream(&self, params: SendMessageParameters) -> Result<ResponseStream> {
        let text = params.message.text();
        let chunks: Vec<Result<GenerateContentResponse>> =
            text.split(' ').map(|word| Ok(reply(word))).collect();
        Ok(ResponseStream::new(futures::stream::iter(chunks)))
    }

    fn history(&self) -> Vec<Content> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl Files for FakeClient {
    async fn upload(&self, _params: UploadFileParameters) -> Result<Option<FileInfo>> {
        self.record("files.upload");
        Ok(self.stored_file.clone())
    }

    async fn get(&self, _name: &str) -> Result<Option<FileInfo>> {
        self.record("files.get");
        Ok(self.stored_file.clone())
    }

    async fn delete(&self, _name: &str) -> Result<Option<DeleteFileResponse>> {
        self.record("files.delete");
        Ok(self.stored_file.as_ref().map(|_| DeleteFileResponse::default()))
    }
}

/// Hands out one shared [`FakeClient`] and remembers every config it saw.
pub struct FakeFactory {
    pub client: Arc<FakeClient>,
    pub builds: AtomicUsize,
    pub configs: Mutex<Vec<ClientConfig>>,
}

impl FakeFactory {
    pub fn new(client: FakeClient) -> Arc<Self> {
        Arc::new(Self {
            client: Arc::new(client),
            builds: AtomicUsize::new(0),
            configs: Mutex::new(Vec::new()),
        })
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn last_key(&self) -> Option<String> {
        self.configs
            .lock()
            .unwrap()
            .last()
            .map(|c| c.api_key.clone())
    }
}

impl ClientFactory for FakeFactory {
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn GenAIClient>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(config.clone());
        Ok(self.client.clone())
    }
}
