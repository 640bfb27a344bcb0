//! The facade: one entry point for every model, chat and file operation.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use typed_builder::TypedBuilder;

use crate::{
    backend::{ClientFactory, GenAIClient},
    chat::ChatHandle,
    client::RestClientFactory,
    config::ClientConfig,
    error::{GoogleGenAIError, Result},
    models::{
        ComputeTokensParameters, ComputeTokensResponse, Content, Contents, CountTokensConfig,
        CountTokensParameters, CountTokensResponse, CreateChatParameters, DeleteFileResponse,
        EmbedContentConfig, EmbedContentParameters, EmbedContentResponse, FileInfo,
        GenerateContentConfig, GenerateContentParameters, GenerateContentResponse,
        GenerateImagesConfig, GenerateImagesParameters, GenerateImagesResponse,
        GenerateVideosConfig, GenerateVideosOperation, GenerateVideosParameters, Image, Model,
        ResponseStream, SendMessageParameters, UploadFileConfig, UploadFileParameters,
        UploadSource,
    },
};

/// Construction options for [`GoogleGenAI`].
///
/// # Example
///
/// ```
/// use genai_facade::{GoogleGenAI, GoogleGenAIOptions, models::Model};
///
/// let genai = GoogleGenAI::with_options(
///     GoogleGenAIOptions::builder()
///         .api_key("your-api-key-here")
///         .model(Model::Gemini15Flash)
///         .build(),
/// );
/// assert_eq!(genai.model(), &Model::Gemini15Flash);
/// ```
#[derive(TypedBuilder)]
#[builder(doc)]
pub struct GoogleGenAIOptions {
    /// API key. Merged into `config`.
    #[builder(setter(into))]
    pub api_key: String,
    /// Options forwarded to the client factory
    #[builder(default)]
    pub config: ClientConfig,
    /// A ready client to use instead of building one
    #[builder(default, setter(strip_option))]
    pub client: Option<Arc<dyn GenAIClient>>,
    /// Model used by every operation
    #[builder(default, setter(into))]
    pub model: Model,
    /// Builds the client on first use
    #[builder(default = Arc::new(RestClientFactory) as Arc<dyn ClientFactory>)]
    pub factory: Arc<dyn ClientFactory>,
}

/// A lazily initialised facade over the generative AI client.
///
/// Every operation checks that the API key is set, builds the client on first
/// use, forwards one call and returns the result unchanged.
pub struct GoogleGenAI {
    api_key: String,
    config: ClientConfig,
    model: Model,
    factory: Arc<dyn ClientFactory>,
    client: Mutex<Option<Arc<dyn GenAIClient>>>,
    chat: Mutex<Option<ChatHandle>>,
}

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GoogleGenAI {
    /// Creates a facade that talks to the Gemini REST API with default options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_options(GoogleGenAIOptions::builder().api_key(api_key).build())
    }

    /// Creates a facade from explicit options.
    ///
    /// The API key always overwrites the key in `options.config`.
    pub fn with_options(options: GoogleGenAIOptions) -> Self {
        let config = options.config.with_api_key(options.api_key.clone());
        Self {
            api_key: options.api_key,
            config,
            model: options.model,
            factory: options.factory,
            client: Mutex::new(options.client),
            chat: Mutex::new(None),
        }
    }

    /// Creates a facade from the environment.
    ///
    /// # Environment Variables
    ///
    /// * `GEMINI_API_KEY` - The API key, falling back to `GOOGLE_API_KEY`
    /// * `GOOGLE_BASE_URL` - Optional base URL override
    ///
    /// # Errors
    ///
    /// Returns an error if no API key variable is set.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::with_options(
            GoogleGenAIOptions::builder()
                .api_key(config.api_key.clone())
                .config(config)
                .build(),
        ))
    }

    /// The current API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replaces the API key.
    ///
    /// The key is merged into the config and the cached client is dropped, so
    /// the next operation builds a client that uses the new key. The cached
    /// chat session is kept.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
        self.config.api_key = self.api_key.clone();
        if lock(&self.client).take().is_some() {
            debug!("api key changed, client will be rebuilt on next use");
        }
    }

    /// The config the next client will be built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the config and rebuilds the client from it.
    ///
    /// The current API key is merged into `config`. Nothing changes if the
    /// key is unset or the client cannot be built.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleGenAIError::MissingApiKey`] or the factory's error.
    pub fn reconfigure(&mut self, config: ClientConfig) -> Result<()> {
        self.ensure_api_key()?;
        let config = config.with_api_key(self.api_key.clone());
        let client = self.factory.build(&config)?;

        self.config = config;
        *lock(&self.client) = Some(client);
        debug!("client rebuilt from new config");
        Ok(())
    }

    /// The model used by every operation.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Replaces the model. Affects later operations and later chat sessions.
    pub fn set_model(&mut self, model: impl Into<Model>) {
        self.model = model.into();
    }

    fn ensure_api_key(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(GoogleGenAIError::MissingApiKey);
        }
        Ok(())
    }

    /// Returns the client, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleGenAIError::MissingApiKey`] if the key is empty, or the
    /// factory's error if the client cannot be built.
    pub fn client(&self) -> Result<Arc<dyn GenAIClient>> {
        self.ensure_api_key()?;

        let mut slot = lock(&self.client);
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        debug!(base_url = %self.config.base_url, "building client");
        let client = self.factory.build(&self.config)?;
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Generates content.
    pub async fn generate_content(
        &self,
        contents: impl Into<Contents>,
        config: Option<GenerateContentConfig>,
    ) -> Result<GenerateContentResponse> {
        let client = self.client()?;
        client
            .models()
            .generate_content(GenerateContentParameters {
                model: self.model.clone(),
                contents: contents.into(),
                config,
            })
            .await
    }

    /// Generates content as a stream of chunks.
    pub async fn generate_content_stream(
        &self,
        contents: impl Into<Contents>,
        config: Option<GenerateContentConfig>,
    ) -> Result<ResponseStream> {
        let client = self.client()?;
        client
            .models()
            .generate_content_stream(GenerateContentParameters {
                model: self.model.clone(),
                contents: contents.into(),
                config,
            })
            .await
    }

    /// Generates images from a prompt.
    pub async fn generate_images(
        &self,
        prompt: impl Into<String>,
        config: Option<GenerateImagesConfig>,
    ) -> Result<GenerateImagesResponse> {
        let client = self.client()?;
        client
            .models()
            .generate_images(GenerateImagesParameters {
                model: self.model.clone(),
                prompt: prompt.into(),
                config,
            })
            .await
    }

    /// Starts video generation, optionally from a starting image.
    pub async fn generate_videos(
        &self,
        prompt: impl Into<String>,
        image: Option<Image>,
        config: Option<GenerateVideosConfig>,
    ) -> Result<GenerateVideosOperation> {
        let client = self.client()?;
        client
            .models()
            .generate_videos(GenerateVideosParameters {
                model: self.model.clone(),
                prompt: prompt.into(),
                image,
                config,
            })
            .await
    }

    /// Returns the tokens of the contents.
    pub async fn compute_tokens(
        &self,
        contents: impl Into<Contents>,
    ) -> Result<ComputeTokensResponse> {
        let client = self.client()?;
        client
            .models()
            .compute_tokens(ComputeTokensParameters {
                model: self.model.clone(),
                contents: contents.into(),
            })
            .await
    }

    /// Counts the tokens of the contents.
    pub async fn count_tokens(
        &self,
        contents: impl Into<Contents>,
        config: Option<CountTokensConfig>,
    ) -> Result<CountTokensResponse> {
        let client = self.client()?;
        client
            .models()
            .count_tokens(CountTokensParameters {
                model: self.model.clone(),
                contents: contents.into(),
                config,
            })
            .await
    }

    /// Embeds each content.
    pub async fn embed_content(
        &self,
        contents: impl Into<Contents>,
        config: Option<EmbedContentConfig>,
    ) -> Result<EmbedContentResponse> {
        let client = self.client()?;
        client
            .models()
            .embed_content(EmbedContentParameters {
                model: self.model.clone(),
                contents: contents.into(),
                config,
            })
            .await
    }

    fn create_chat(&self, client: &dyn GenAIClient) -> ChatHandle {
        let session = client.chats().create(CreateChatParameters {
            model: self.model.clone(),
            config: GenerateContentConfig::default(),
            history: Vec::new(),
        });
        ChatHandle::new(session)
    }

    /// Returns the cached chat session, creating it on first use.
    ///
    /// Concurrent first calls create exactly one session.
    pub fn chat(&self) -> Result<ChatHandle> {
        let client = self.client()?;

        let mut slot = lock(&self.chat);
        if let Some(chat) = slot.as_ref() {
            return Ok(chat.clone());
        }

        let chat = self.create_chat(client.as_ref());
        debug!(chat_id = chat.id(), "chat session created");
        *slot = Some(chat.clone());
        Ok(chat)
    }

    /// Starts a new chat session, replacing the cached one.
    pub fn new_chat(&self) -> Result<ChatHandle> {
        let client = self.client()?;
        let chat = self.create_chat(client.as_ref());

        if let Some(previous) = lock(&self.chat).replace(chat.clone()) {
            debug!(previous = previous.id(), chat_id = chat.id(), "chat session replaced");
        } else {
            debug!(chat_id = chat.id(), "chat session created");
        }
        Ok(chat)
    }

    /// Sends a message through the cached chat session.
    pub async fn chat_message(
        &self,
        message: impl Into<Content>,
    ) -> Result<GenerateContentResponse> {
        let chat = self.chat()?;
        chat.session()
            .send_message(SendMessageParameters {
                message: message.into(),
            })
            .await
    }

    /// Sends a message through the cached chat session and streams the reply.
    pub async fn chat_message_stream(&self, message: impl Into<Content>) -> Result<ResponseStream> {
        let chat = self.chat()?;
        chat.session()
            .send_message_stream(SendMessageParameters {
                message: message.into(),
            })
            .await
    }

    /// Uploads a file.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleGenAIError::UploadFailed`] if the service returns no file.
    pub async fn upload_file(
        &self,
        source: impl Into<UploadSource>,
        config: Option<UploadFileConfig>,
    ) -> Result<FileInfo> {
        let client = self.client()?;
        client
            .files()
            .upload(UploadFileParameters {
                source: source.into(),
                config,
            })
            .await?
            .ok_or(GoogleGenAIError::UploadFailed)
    }

    /// Looks up a file by name.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleGenAIError::FileNotFound`] if the service returns nothing.
    pub async fn get_file(&self, name: &str) -> Result<FileInfo> {
        let client = self.client()?;
        client
            .files()
            .get(name)
            .await?
            .ok_or_else(|| GoogleGenAIError::FileNotFound(name.to_string()))
    }

    /// Deletes a file by name.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleGenAIError::FileNotFound`] if the service returns nothing.
    pub async fn delete_file(&self, name: &str) -> Result<DeleteFileResponse> {
        let client = self.client()?;
        client
            .files()
            .delete(name)
            .await?
            .ok_or_else(|| GoogleGenAIError::FileNotFound(name.to_string()))
    }
}

impl fmt::Debug for GoogleGenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleGenAI")
            .field("api_key", &"******")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("client_built", &lock(&self.client).is_some())
            .field("chat", &lock(&self.chat).as_ref().map(ChatHandle::id))
            .finish_non_exhaustive()
    }
}
