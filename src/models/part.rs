//! Common part model used in both requests and responses.

use serde::{Deserialize, Serialize};

/// A single piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// A text part containing a string value
    Text {
        /// The text content of the part
        text: String,
    },
    /// A part containing inline data
    InlineData {
        /// The inline data content of the part
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: Blob,
    },
    /// A part referencing an uploaded file
    FileData {
        /// Reference to the uploaded file
        #[serde(rename = "fileData", alias = "file_data")]
        file_data: FileData,
    },
    /// Any other part kind, kept as raw JSON
    Other(serde_json::Value),
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an inline data part from base64-encoded data.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// Creates a part referencing an uploaded file by URI.
    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self::FileData {
            file_data: FileData {
                mime_type: Some(mime_type.into()),
                file_uri: file_uri.into(),
            },
        }
    }

    /// Returns the text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Inline binary data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the inline data
    pub mime_type: String,
    /// Base64-encoded data
    pub data: String,
}

/// A reference to an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// The MIME type of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// URI returned by the files API
    pub file_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_wire_parts() {
        let parts: Vec<Part> = serde_json::from_value(json!([
            { "text": "hello" },
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
            { "fileData": { "mimeType": "video/mp4", "fileUri": "https://x/files/abc" } },
            { "functionCall": { "name": "f", "args": {} } }
        ]))
        .unwrap();

        assert_eq!(parts[0], Part::text("hello"));
        assert_eq!(parts[1], Part::inline_data("image/png", "AAAA"));
        assert_eq!(parts[2], Part::file_data("video/mp4", "https://x/files/abc"));
        assert!(matches!(parts[3], Part::Other(_)));
    }

    #[test]
    fn serializes_camel_case_keys() {
        let value = serde_json::to_value(Part::inline_data("image/png", "AAAA")).unwrap();
        assert_eq!(
            value,
            json!({ "inlineData": { "mimeType": "image/png", "data": "AAAA" } })
        );
    }
}
