//! Chat session management for the Gemini AI API.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;
use uuid::Uuid;

use crate::{
    backend::{ChatSession, Chats},
    error::Result,
    client::{spawn_decoder, RestClient},
    models::{
        Content, CreateChatParameters, GenerateContentConfig, GenerateContentRequest,
        GenerateContentResponse, Model, Part, RequestType, ResponseStream, Role,
        SendMessageParameters,
    },
};

/// A chat session paired with the identifier the facade generated for it.
#[derive(Clone)]
pub struct ChatHandle {
    id: String,
    session: Arc<dyn ChatSession>,
}

impl ChatHandle {
    /// Tags a session with a fresh random identifier.
    pub fn new(session: Arc<dyn ChatSession>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session,
        }
    }

    /// The generated identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying session.
    pub fn session(&self) -> &Arc<dyn ChatSession> {
        &self.session
    }
}

impl fmt::Debug for ChatHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A chat session backed by `generateContent`.
///
/// The full history is sent with every turn. A turn is recorded only once the
/// model has answered it.
pub struct RestChatSession {
    /// The model client
    client: RestClient,
    /// Model used for every turn
    model: Model,
    /// Options applied to every turn
    config: GenerateContentConfig,
    /// Chat history
    history: Arc<Mutex<Vec<Content>>>,
    /// Serialises turns, streamed ones included
    turn: Arc<tokio::sync::Mutex<()>>,
}

impl RestChatSession {
    /// Creates a new chat session.
    pub fn new(client: RestClient, params: CreateChatParameters) -> Self {
        Self {
            client,
            model: params.model,
            config: params.config,
            history: Arc::new(Mutex::new(params.history)),
            turn: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Clears the chat history while keeping the configuration.
    pub fn clear_history(&self) {
        lock(&self.history).clear();
    }

    fn request_with(&self, message: &Content) -> GenerateContentRequest {
        let mut contents = lock(&self.history).clone();
        contents.push(message.clone());
        GenerateContentRequest::new(contents, Some(&self.config))
    }
}

fn lock(history: &Mutex<Vec<Content>>) -> std::sync::MutexGuard<'_, Vec<Content>> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

fn user_turn(message: Content) -> Content {
    Content {
        role: Some(Role::User),
        parts: message.parts,
    }
}

#[async_trait]
impl ChatSession for RestChatSession {
    async fn send_message(
        &self,
        params: SendMessageParameters,
    ) -> Result<GenerateContentResponse> {
        let _turn = self.turn.lock().await;
        let user_message = user_turn(params.message);
        let request = self.request_with(&user_message);

        let url = self
            .client
            .build_url(&self.model, RequestType::GenerateContent);
        let response: GenerateContentResponse =
            self.client.make_request(&url, &request).await?.json().await?;

        if let Some(content) = response.first_content() {
            let mut history = lock(&self.history);
            history.push(user_message);
            history.push(Content {
                role: Some(Role::Model),
                parts: content.parts.clone(),
            });
        }

        Ok(response)
    }

    /// Streams the reply to `params`.
    ///
    /// The session's turn lock is held until the stream ends or is dropped,
    /// so later turns wait for it. The turn is recorded only when the stream
    /// is read to the end without an error.
    async fn send_message_stream(&self, params: SendMessageParameters) -> Result<ResponseStream> {
        let turn = Arc::clone(&self.turn).lock_owned().await;
        let user_message = user_turn(params.message);
        let request = self.request_with(&user_message);

        let url = self
            .client
            .build_url(&self.model, RequestType::StreamGenerateContent);
        let mut chunks = spawn_decoder(self.client.make_request(&url, &request).await?);

        let history = Arc::clone(&self.history);
        let stream = async_stream::stream! {
            let _turn = turn;
            let mut reply: Vec<Part> = Vec::new();
            let mut failed = false;

            while let Some(chunk) = chunks.next().await {
                match &chunk {
                    Ok(response) => {
                        if let Some(content) = response.first_content() {
                            reply.extend(content.parts.iter().cloned());
                        }
                    }
                    Err(_) => failed = true,
                }
                yield chunk;
            }

            if !failed && !reply.is_empty() {
                let mut recorded = lock(&history);
                recorded.push(user_message);
                recorded.push(Content::model(reply));
            }
        };

        Ok(ResponseStream::new(stream))
    }

    fn history(&self) -> Vec<Content> {
        lock(&self.history).clone()
    }
}

impl Chats for RestClient {
    fn create(&self, params: CreateChatParameters) -> Arc<dyn ChatSession> {
        debug!(model = %params.model, "creating chat session");
        Arc::new(RestChatSession::new(self.clone(), params))
    }
}
