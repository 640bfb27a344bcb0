//! Video generation models.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::Image;

/// Optional configuration for video generation.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct GenerateVideosConfig {
    /// How many videos to generate
    #[builder(default, setter(strip_option))]
    pub number_of_videos: Option<u32>,
    /// Aspect ratio such as `16:9`
    #[builder(default, setter(strip_option, into))]
    pub aspect_ratio: Option<String>,
    /// Length of each video in seconds
    #[builder(default, setter(strip_option))]
    pub duration_seconds: Option<u32>,
    /// What to keep out of the video
    #[builder(default, setter(strip_option, into))]
    pub negative_prompt: Option<String>,
    /// `dont_allow` or `allow_adult`
    #[builder(default, setter(strip_option, into))]
    pub person_generation: Option<String>,
}

/// A long-running video generation operation.
///
/// Generation is asynchronous on the service side; poll the operation by
/// `name` until `done` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideosOperation {
    /// Resource name of the operation
    #[serde(default)]
    pub name: String,
    /// Whether the operation has finished
    #[serde(default)]
    pub done: bool,
    /// Error reported by the service, if the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    /// Generated videos, once done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<GenerateVideosResponse>,
}

/// Videos produced by a finished operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideosResponse {
    /// Generated videos
    #[serde(default)]
    pub generated_videos: Vec<GeneratedVideo>,
}

/// One generated video.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedVideo {
    /// The video, if it survived filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
}

/// A reference to a generated video.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Download URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Base64-encoded video bytes, when returned inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bytes: Option<String>,
    /// MIME type of the video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictVideosRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
struct VideoInstance {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<Image>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person_generation: Option<String>,
}

impl PredictVideosRequest {
    pub fn new(prompt: String, image: Option<Image>, config: Option<&GenerateVideosConfig>) -> Self {
        let parameters = config
            .map(|c| VideoParameters {
                sample_count: c.number_of_videos,
                aspect_ratio: c.aspect_ratio.clone(),
                duration_seconds: c.duration_seconds,
                negative_prompt: c.negative_prompt.clone(),
                person_generation: c.person_generation.clone(),
            })
            .unwrap_or_default();

        Self {
            instances: vec![VideoInstance { prompt, image }],
            parameters,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    response: Option<OperationResponseWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponseWire {
    #[serde(default)]
    generate_video_response: Option<GeneratedSamplesWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedSamplesWire {
    #[serde(default)]
    generated_samples: Vec<GeneratedVideo>,
}

impl From<OperationWire> for GenerateVideosOperation {
    fn from(wire: OperationWire) -> Self {
        let response = wire
            .response
            .and_then(|r| r.generate_video_response)
            .map(|samples| GenerateVideosResponse {
                generated_videos: samples.generated_samples,
            });

        Self {
            name: wire.name,
            done: wire.done,
            error: wire.error,
            response,
        }
    }
}
