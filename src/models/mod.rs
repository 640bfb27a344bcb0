//! Data structures for the Gemini AI API requests and responses.

mod embed;
mod file;
mod image;
mod model;
mod params;
mod part;
mod request;
mod request_type;
mod response;
mod safety;
mod stream;
mod tokens;
mod video;

pub use embed::{ContentEmbedding, EmbedContentConfig, EmbedContentResponse, TaskType};
pub use file::{DeleteFileResponse, FileInfo, FileState, UploadFileConfig, UploadSource};
pub use image::{GenerateImagesConfig, GenerateImagesResponse, GeneratedImage, Image};
pub use model::Model;
pub use params::{
    ComputeTokensParameters, CountTokensParameters, CreateChatParameters, EmbedContentParameters,
    GenerateContentParameters, GenerateImagesParameters, GenerateVideosParameters,
    SendMessageParameters, UploadFileParameters,
};
pub use part::{Blob, FileData, Part};
pub use request::{Content, Contents, GenerateContentConfig, Role};
pub use request_type::RequestType;
pub use response::{
    Candidate, Citation, CitationMetadata, FinishReason, GenerateContentResponse, HarmProbability,
    PromptFeedback, SafetyRating, UsageMetadata,
};
pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};
pub use stream::{JsonStreamDecoder, ResponseStream};
pub use tokens::{ComputeTokensResponse, CountTokensConfig, CountTokensResponse, TokensInfo};
pub use video::{
    GenerateVideosConfig, GenerateVideosOperation, GenerateVideosResponse, GeneratedVideo, Video,
};

pub(crate) use embed::BatchEmbedContentsRequest;
pub(crate) use image::{PredictImagesRequest, PredictImagesResponse};
pub(crate) use request::GenerateContentRequest;
pub(crate) use tokens::{ComputeTokensRequest, CountTokensRequest};
pub(crate) use video::{OperationWire, PredictVideosRequest};
