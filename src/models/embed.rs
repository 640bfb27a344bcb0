//! Embedding models.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::Content;

/// What the embedding will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Unset
    TaskTypeUnspecified,
    /// Query in a search or retrieval setting
    RetrievalQuery,
    /// Document in a search or retrieval setting
    RetrievalDocument,
    /// Semantic text similarity
    SemanticSimilarity,
    /// Classification
    Classification,
    /// Clustering
    Clustering,
}

/// Optional configuration for `embedContent`.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct EmbedContentConfig {
    /// Intended use of the embedding
    #[builder(default, setter(strip_option))]
    pub task_type: Option<TaskType>,
    /// Document title, used with [`TaskType::RetrievalDocument`]
    #[builder(default, setter(strip_option, into))]
    pub title: Option<String>,
    /// Truncate the embedding to this many dimensions
    #[builder(default, setter(strip_option))]
    pub output_dimensionality: Option<u32>,
}

/// Embeddings for each input content, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedContentResponse {
    /// One embedding per content
    #[serde(default)]
    pub embeddings: Vec<ContentEmbedding>,
}

/// A single embedding vector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentEmbedding {
    /// The embedding values
    #[serde(default)]
    pub values: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchEmbedContentsRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dimensionality: Option<u32>,
}

impl BatchEmbedContentsRequest {
    pub fn new(model: &str, contents: Vec<Content>, config: Option<&EmbedContentConfig>) -> Self {
        let requests = contents
            .into_iter()
            .map(|content| EmbedContentRequest {
                model: model.to_string(),
                content,
                task_type: config.and_then(|c| c.task_type),
                title: config.and_then(|c| c.title.clone()),
                output_dimensionality: config.and_then(|c| c.output_dimensionality),
            })
            .collect();
        Self { requests }
    }
}
