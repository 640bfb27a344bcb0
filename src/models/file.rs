//! File models for the Gemini AI API.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Information about a file stored in the Gemini AI system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileInfo {
    /// Resource name, e.g. `files/abc-123`.
    pub name: String,
    /// Optional display name for the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// MIME type of the file content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size of the file in bytes as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<String>,
    /// Time when the file was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Time when the file was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// Optional expiration time for the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    /// Optional SHA256 hash of the file content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256_hash: Option<String>,
    /// URI that can be used to reference this file in API calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Current processing state of the file.
    pub state: FileState,
    /// Error reported when processing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    /// Optional metadata for video files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_metadata: Option<serde_json::Value>,
}

/// Represents the processing state of a file in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileState {
    /// File is currently being processed.
    Processing,
    /// File is processed and ready for use.
    Active,
    /// An error occurred during file processing.
    Failed,
    /// State is not specified.
    #[default]
    #[serde(rename = "STATE_UNSPECIFIED")]
    #[serde(other)]
    Unspecified,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Unspecified => write!(f, "Unspecified"),
            FileState::Processing => write!(f, "Processing"),
            FileState::Active => write!(f, "Active"),
            FileState::Failed => write!(f, "Failed"),
        }
    }
}

/// What to upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadSource {
    /// Raw bytes held in memory
    Bytes(Vec<u8>),
    /// A file on the local filesystem
    Path(PathBuf),
}

impl From<Vec<u8>> for UploadSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for UploadSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Optional configuration for an upload.
#[derive(Debug, Clone, PartialEq, Default, TypedBuilder)]
#[builder(doc)]
pub struct UploadFileConfig {
    /// Resource name to request, e.g. `files/my-file`
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    /// Human readable name; defaults to the file name for path uploads
    #[builder(default, setter(strip_option, into))]
    pub display_name: Option<String>,
    /// MIME type; guessed from the path when absent
    #[builder(default, setter(strip_option, into))]
    pub mime_type: Option<String>,
}

/// Response to a successful delete. The API returns an empty object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteFileResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_sparse_file_info() {
        let info: FileInfo = serde_json::from_value(json!({
            "name": "files/abc",
            "mimeType": "text/plain",
            "state": "ACTIVE",
            "uri": "https://example.com/files/abc"
        }))
        .unwrap();
        assert_eq!(info.name, "files/abc");
        assert_eq!(info.state, FileState::Active);
        assert!(info.display_name.is_none());
    }

    #[test]
    fn unknown_state_is_unspecified() {
        let info: FileInfo = serde_json::from_value(json!({ "state": "ARCHIVED" })).unwrap();
        assert_eq!(info.state, FileState::Unspecified);
    }
}
