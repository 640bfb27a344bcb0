use std::fmt;

/// The model method a request is sent to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestType {
    /// A request to generate content.
    GenerateContent,
    /// A request to generate content in a streaming fashion.
    StreamGenerateContent,
    /// A request to count tokens.
    CountTokens,
    /// A request to return the tokens themselves.
    ComputeTokens,
    /// A request to embed one or more contents.
    BatchEmbedContents,
    /// A prediction request, used for image generation.
    Predict,
    /// A long-running prediction request, used for video generation.
    PredictLongRunning,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerateContent => write!(f, "generateContent"),
            Self::StreamGenerateContent => write!(f, "streamGenerateContent"),
            Self::CountTokens => write!(f, "countTokens"),
            Self::ComputeTokens => write!(f, "computeTokens"),
            Self::BatchEmbedContents => write!(f, "batchEmbedContents"),
            Self::Predict => write!(f, "predict"),
            Self::PredictLongRunning => write!(f, "predictLongRunning"),
        }
    }
}
