//! Image generation models.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{GoogleGenAIError, Result};

/// Optional configuration for image generation.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct GenerateImagesConfig {
    /// How many images to generate
    #[builder(default, setter(strip_option))]
    pub number_of_images: Option<u32>,
    /// Aspect ratio such as `1:1` or `16:9`
    #[builder(default, setter(strip_option, into))]
    pub aspect_ratio: Option<String>,
    /// What to keep out of the image
    #[builder(default, setter(strip_option, into))]
    pub negative_prompt: Option<String>,
    /// `dont_allow`, `allow_adult` or `allow_all`
    #[builder(default, setter(strip_option, into))]
    pub person_generation: Option<String>,
    /// Output MIME type, e.g. `image/jpeg`
    #[builder(default, setter(strip_option, into))]
    pub output_mime_type: Option<String>,
}

/// An image, either generated or used as input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Base64-encoded image bytes
    #[serde(
        default,
        rename = "bytesBase64Encoded",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_bytes: Option<String>,
    /// MIME type of the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Image {
    /// Builds an image from raw bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            image_bytes: Some(STANDARD.encode(bytes)),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Decodes the base64 payload. Returns an empty vector if there is none.
    pub fn decode(&self) -> Result<Vec<u8>> {
        match &self.image_bytes {
            Some(encoded) => STANDARD
                .decode(encoded)
                .map_err(|e| GoogleGenAIError::new(format!("Invalid image data: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// The image, absent when it was filtered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Why the image was filtered, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_filtered_reason: Option<String>,
}

/// Result of image generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesResponse {
    /// Generated images in service order
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictImagesRequest {
    instances: Vec<PromptInstance>,
    parameters: ImageParameters,
}

#[derive(Debug, Serialize)]
struct PromptInstance {
    prompt: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person_generation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_options: Option<OutputOptions>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

impl PredictImagesRequest {
    pub fn new(prompt: String, config: Option<&GenerateImagesConfig>) -> Self {
        let parameters = config
            .map(|c| ImageParameters {
                sample_count: c.number_of_images,
                aspect_ratio: c.aspect_ratio.clone(),
                negative_prompt: c.negative_prompt.clone(),
                person_generation: c.person_generation.clone(),
                output_options: c
                    .output_mime_type
                    .clone()
                    .map(|mime_type| OutputOptions { mime_type }),
            })
            .unwrap_or_default();

        Self {
            instances: vec![PromptInstance { prompt }],
            parameters,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PredictImagesResponse {
    #[serde(default)]
    predictions: Vec<ImagePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePrediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    rai_filtered_reason: Option<String>,
}

impl From<PredictImagesResponse> for GenerateImagesResponse {
    fn from(response: PredictImagesResponse) -> Self {
        let generated_images = response
            .predictions
            .into_iter()
            .map(|prediction| GeneratedImage {
                image: prediction.bytes_base64_encoded.map(|bytes| Image {
                    image_bytes: Some(bytes),
                    mime_type: prediction.mime_type,
                }),
                rai_filtered_reason: prediction.rai_filtered_reason,
            })
            .collect();
        Self { generated_images }
    }
}
