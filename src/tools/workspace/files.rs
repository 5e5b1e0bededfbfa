//! Workspace file operations: download and upload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::{ImportFile, ImportFormat, Language, WorkspaceApi};
use crate::lib::encoding;

/// Input for `download_workspace_file`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadFileRequest {
    /// Absolute workspace path to the file
    /// (e.g. "/Workspace/Users/user@company.com/my_notebook").
    pub path: String,
}

/// Input for `upload_workspace_file`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadFileRequest {
    /// Absolute workspace path where to save the file.
    pub path: String,
    /// File content as a string (base64 encoded when `is_binary` is set).
    pub content: String,
    /// Whether the content is binary and base64 encoded.
    #[serde(default)]
    pub is_binary: bool,
    /// Whether to overwrite an existing file (default: true).
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Notebook language (PYTHON, SQL, SCALA, R), matched case-insensitively;
    /// unrecognized values are ignored.
    #[serde(default)]
    pub language: Option<String>,
}

fn default_overwrite() -> bool {
    true
}

/// Result of `download_workspace_file`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DownloadFileResponse {
    pub path: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_binary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `upload_workspace_file`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct UploadFileResponse {
    pub path: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Download a workspace file. Text content is returned as UTF-8; undecodable
/// content falls back to base64 with the binary flag set. No partial content
/// is ever returned on failure.
pub async fn download_file(client: &dyn WorkspaceApi, path: &str) -> DownloadFileResponse {
    match client.export_file(path).await {
        Ok(bytes) => {
            let size_bytes = bytes.len() as u64;
            let payload = encoding::encode_payload(bytes);
            DownloadFileResponse {
                path: path.to_string(),
                success: true,
                content: Some(payload.content),
                is_binary: Some(payload.is_binary),
                size_bytes: Some(size_bytes),
                error: None,
            }
        }
        Err(err) => {
            warn!(target: "dbx_mcp::tools", path, error = %err, "File download failed");
            DownloadFileResponse {
                path: path.to_string(),
                success: false,
                content: None,
                is_binary: None,
                size_bytes: None,
                error: Some(format!("Failed to download file: {err}")),
            }
        }
    }
}

/// Upload content to a workspace file, honoring the inverse of the download
/// encoding convention. Malformed base64 input is a failure result, never a
/// transport error.
pub async fn upload_file(client: &dyn WorkspaceApi, request: UploadFileRequest) -> UploadFileResponse {
    let failure = |path: &str, error: String| UploadFileResponse {
        path: path.to_string(),
        success: false,
        size_bytes: None,
        overwrite: None,
        language: None,
        error: Some(error),
    };

    let content = match encoding::decode_payload(&request.content, request.is_binary) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(target: "dbx_mcp::tools", path = %request.path, error = %err, "Upload content rejected");
            return failure(&request.path, format!("Failed to upload file: {err}"));
        }
    };
    let size_bytes = content.len() as u64;

    let language = request.language.as_deref().and_then(Language::parse);
    let import = ImportFile {
        path: request.path.clone(),
        content,
        format: ImportFormat::Source,
        language,
        overwrite: request.overwrite,
    };

    match client.import_file(import).await {
        Ok(()) => UploadFileResponse {
            path: request.path,
            success: true,
            size_bytes: Some(size_bytes),
            overwrite: Some(request.overwrite),
            language: request.language,
            error: None,
        },
        Err(err) => {
            warn!(target: "dbx_mcp::tools", path = %request.path, error = %err, "File upload failed");
            failure(&request.path, format!("Failed to upload file: {err}"))
        }
    }
}
