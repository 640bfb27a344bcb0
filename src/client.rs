//! REST client for the Gemini AI API.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::backend::{Chats, ClientFactory, Files, GenAIClient, Models};
use crate::config::ClientConfig;
use crate::error::{GoogleGenAIError, Result};
use crate::models::{
    BatchEmbedContentsRequest, ComputeTokensParameters, ComputeTokensRequest,
    ComputeTokensResponse, CountTokensParameters, CountTokensRequest, CountTokensResponse,
    EmbedContentParameters, EmbedContentResponse, GenerateContentParameters,
    GenerateContentRequest, GenerateContentResponse, GenerateImagesParameters,
    GenerateImagesResponse, GenerateVideosOperation, GenerateVideosParameters, JsonStreamDecoder,
    Model, OperationWire, PredictImagesRequest, PredictImagesResponse, PredictVideosRequest,
    RequestType, ResponseStream,
};

/// Default channel buffer size for streaming responses
const DEFAULT_CHANNEL_BUFFER_SIZE: usize = 16;

/// A client for the Gemini REST API.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RestClient {
    config: Arc<ClientConfig>,
    client: reqwest::Client,
}

impl RestClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GoogleGenAIError::new(format!("Invalid header name {name}: {e}")))?;
            headers.insert(name, HeaderValue::from_str(value)?);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config: Arc::new(config),
            client: builder.build()?,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub(crate) fn build_url(&self, model: &Model, request_type: RequestType) -> String {
        format!(
            "{}/{}:{}",
            self.config.versioned_url(),
            model.resource_name(),
            request_type
        )
    }

    /// Starts a request carrying the API key.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .query(&[("key", self.api_key())])
    }

    /// Makes a request to the Gemini AI API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or answers with a non-success status.
    pub(crate) async fn make_request<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self.request(Method::POST, url).json(body).send().await?;
        ensure_success(response).await
    }

    /// Sends the HTTP request and parses the response.
    async fn send_request<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(self.make_request(url, body).await?.json::<T>().await?)
    }
}

/// Turns a non-success status into [`GoogleGenAIError::Api`].
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GoogleGenAIError::Api { status, body })
}

/// Parses one streamed object, surfacing in-band API errors.
fn parse_chunk(object: &str) -> Result<GenerateContentResponse> {
    let value: serde_json::Value = serde_json::from_str(object)
        .map_err(|e| GoogleGenAIError::new(format!("Failed to parse response: {e}")))?;
    if let Some(error) = value.get("error") {
        return Err(GoogleGenAIError::new(format!("Stream error: {error}")));
    }
    Ok(serde_json::from_value(value)?)
}

/// Pumps a streaming body through the decoder into a [`ResponseStream`].
pub(crate) fn spawn_decoder(response: reqwest::Response) -> ResponseStream {
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER_SIZE);
    let mut body = response.bytes_stream();

    tokio::spawn(async move {
        let mut decoder = JsonStreamDecoder::new();

        while let Some(chunk) = body.next().await {
            let items: Vec<_> = match chunk {
                Ok(bytes) => decoder
                    .push(&bytes)
                    .into_iter()
                    .map(|object| object.and_then(|o| parse_chunk(&o)))
                    .collect(),
                Err(e) => vec![Err(GoogleGenAIError::from(e))],
            };

            for item in items {
                if tx.send(item).await.is_err() {
                    debug!("response stream dropped by consumer");
                    return;
                }
            }
        }

        if !decoder.is_idle() {
            // the receiver may already be gone; nothing left to do either way
            let _ = tx
                .send(Err(GoogleGenAIError::new(
                    "Stream ended in the middle of a response",
                )))
                .await;
        }
    });

    ResponseStream::from_receiver(rx)
}

impl GenAIClient for RestClient {
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
impl Models for RestClient {
    #[instrument(skip_all, fields(model = %params.model))]
    async fn generate_content(
        &self,
        params: GenerateContentParameters,
    ) -> Result<GenerateContentResponse> {
        let url = self.build_url(&params.model, RequestType::GenerateContent);
        let request = GenerateContentRequest::new(params.contents.0, params.config.as_ref());
        self.send_request(&url, &request).await
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn generate_content_stream(
        &self,
        params: GenerateContentParameters,
    ) -> Result<ResponseStream> {
        let url = self.build_url(&params.model, RequestType::StreamGenerateContent);
        let request = GenerateContentRequest::new(params.contents.0, params.config.as_ref());
        let response = self.make_request(&url, &request).await?;
        Ok(spawn_decoder(response))
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn generate_images(
        &self,
        params: GenerateImagesParameters,
    ) -> Result<GenerateImagesResponse> {
        let url = self.build_url(&params.model, RequestType::Predict);
        let request = PredictImagesRequest::new(params.prompt, params.config.as_ref());
        let response: PredictImagesResponse = self.send_request(&url, &request).await?;
        Ok(response.into())
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn generate_videos(
        &self,
        params: GenerateVideosParameters,
    ) -> Result<GenerateVideosOperation> {
        let url = self.build_url(&params.model, RequestType::PredictLongRunning);
        let request =
            PredictVideosRequest::new(params.prompt, params.image, params.config.as_ref());
        let operation: OperationWire = self.send_request(&url, &request).await?;
        Ok(operation.into())
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn compute_tokens(
        &self,
        params: ComputeTokensParameters,
    ) -> Result<ComputeTokensResponse> {
        let url = self.build_url(&params.model, RequestType::ComputeTokens);
        let request = ComputeTokensRequest {
            contents: params.contents.0,
        };
        self.send_request(&url, &request).await
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn count_tokens(&self, params: CountTokensParameters) -> Result<CountTokensResponse> {
        let url = self.build_url(&params.model, RequestType::CountTokens);
        let request = CountTokensRequest::new(
            params.model.resource_name(),
            params.contents.0,
            params.config.as_ref(),
        );
        self.send_request(&url, &request).await
    }

    #[instrument(skip_all, fields(model = %params.model))]
    async fn embed_content(&self, params: EmbedContentParameters) -> Result<EmbedContentResponse> {
        let url = self.build_url(&params.model, RequestType::BatchEmbedContents);
        let request = BatchEmbedContentsRequest::new(
            &params.model.resource_name(),
            params.contents.0,
            params.config.as_ref(),
        );
        self.send_request(&url, &request).await
    }
}

/// Builds [`RestClient`]s. The default factory used by [`crate::GoogleGenAI`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RestClientFactory;

impl ClientFactory for RestClientFactory {
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn GenAIClient>> {
        Ok(Arc::new(RestClient::new(config.clone())?))
    }
}
