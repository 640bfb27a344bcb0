//! File operations for the Gemini AI API.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    backend::Files,
    client::{ensure_success, RestClient},
    error::{GoogleGenAIError, Result},
    models::{DeleteFileResponse, FileInfo, UploadFileParameters, UploadSource},
};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Deserialize)]
struct FileResponse {
    file: Option<FileInfo>,
}

/// Upload body plus the metadata derived from it.
struct PreparedUpload {
    bytes: Vec<u8>,
    mime_type: String,
    display_name: Option<String>,
}

async fn prepare(params: UploadFileParameters) -> Result<PreparedUpload> {
    let config = params.config.unwrap_or_default();

    match params.source {
        UploadSource::Bytes(bytes) => Ok(PreparedUpload {
            bytes,
            mime_type: config
                .mime_type
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            display_name: config.display_name,
        }),
        UploadSource::Path(path) => {
            let bytes = tokio::fs::read(&path).await?;
            Ok(PreparedUpload {
                bytes,
                mime_type: config.mime_type.unwrap_or_else(|| guess_mime_type(&path)),
                display_name: config.display_name.or_else(|| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .map(str::to_string)
                }),
            })
        }
    }
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
}

/// Accepts `files/abc` or `abc` and returns `abc`.
fn parse_file_id(file_id: &str) -> Result<&str> {
    let id = file_id.strip_prefix("files/").unwrap_or(file_id);
    if id.is_empty() {
        Err(GoogleGenAIError::InvalidFileId(
            "File ID must not be empty".to_string(),
        ))
    } else {
        Ok(id)
    }
}

impl RestClient {
    fn file_url(&self, file_id: &str) -> Result<String> {
        Ok(format!(
            "{}/files/{}",
            self.config().versioned_url(),
            parse_file_id(file_id)?
        ))
    }

    fn upload_start_url(&self) -> String {
        format!(
            "{}/upload/{}/files",
            self.config().base_url.trim_end_matches('/'),
            self.config().api_version
        )
    }
}

#[async_trait]
impl Files for RestClient {
    #[instrument(skip_all)]
    async fn upload(&self, params: UploadFileParameters) -> Result<Option<FileInfo>> {
        let requested_name = params.config.as_ref().and_then(|c| c.name.clone());
        let upload = prepare(params).await?;

        // Initial resumable upload request
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-upload-protocol", "resumable".parse()?);
        headers.insert("x-goog-upload-command", "start".parse()?);
        headers.insert(
            "x-goog-upload-header-content-length",
            upload.bytes.len().to_string().parse()?,
        );
        headers.insert(
            "x-goog-upload-header-content-type",
            upload.mime_type.parse()?,
        );

        let mut file = serde_json::Map::new();
        if let Some(name) = requested_name {
            file.insert("name".into(), name.into());
        }
        if let Some(display_name) = upload.display_name {
            file.insert("displayName".into(), display_name.into());
        }
        let metadata = serde_json::json!({ "file": file });

        let response = self
            .request(Method::POST, &self.upload_start_url())
            .headers(headers)
            .json(&metadata)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let upload_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| GoogleGenAIError::new("Missing upload URL"))?
            .to_string();

        // Upload file content
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-upload-offset", "0".parse()?);
        headers.insert("x-goog-upload-command", "upload, finalize".parse()?);

        let response = self
            .http()
            .post(&upload_url)
            .headers(headers)
            .body(upload.bytes)
            .send()
            .await?;
        let response: FileResponse = ensure_success(response).await?.json().await?;

        debug!(uploaded = response.file.is_some(), "upload finalized");
        Ok(response.file)
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<Option<FileInfo>> {
        let response = self
            .request(Method::GET, &self.file_url(name)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success(response).await?.json().await?))
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> Result<Option<DeleteFileResponse>> {
        let response = self
            .request(Method::DELETE, &self.file_url(name)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = ensure_success(response).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(Some(DeleteFileResponse::default()));
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}
