//! Remote workspace client: the trait seam and its Databricks REST implementation.

pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::lib::errors::WorkspaceError;

pub use rest::RestWorkspaceClient;

/// App descriptor as reported by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub compute_status: Option<ComputeStatus>,
    #[serde(default)]
    pub active_deployment: Option<AppDeployment>,
}

/// Compute state of an app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeStatus {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A versioned association between an app and a source code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDeployment {
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub source_code_path: Option<String>,
    #[serde(default)]
    pub status: Option<DeploymentStatus>,
}

/// Status label of a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentStatus {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Workspace import format. Fixed to `SOURCE` by the upload tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportFormat {
    Source,
}

/// Notebook language tag accepted by the workspace import endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Python,
    Sql,
    Scala,
    R,
}

impl Language {
    /// Case-insensitive lookup over the closed set of accepted tokens.
    /// Unrecognized tokens are treated as unspecified, not as an error.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "PYTHON" => Some(Language::Python),
            "SQL" => Some(Language::Sql),
            "SCALA" => Some(Language::Scala),
            "R" => Some(Language::R),
            _ => None,
        }
    }
}

/// Parameters for a workspace file import.
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub path: String,
    pub content: Vec<u8>,
    pub format: ImportFormat,
    pub language: Option<Language>,
    pub overwrite: bool,
}

/// Capabilities consumed from the remote workspace control plane.
///
/// Every method maps to a single remote call and may fail with not-found,
/// permission, or transport errors; the operation wrappers catch all of them
/// uniformly.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn list_apps(&self) -> Result<Vec<App>, WorkspaceError>;
    async fn get_app(&self, name: &str) -> Result<App, WorkspaceError>;
    async fn start_app(&self, name: &str) -> Result<(), WorkspaceError>;
    async fn stop_app(&self, name: &str) -> Result<(), WorkspaceError>;
    async fn deploy_app(
        &self,
        name: &str,
        source_code_path: &str,
    ) -> Result<AppDeployment, WorkspaceError>;
    async fn export_file(&self, path: &str) -> Result<Vec<u8>, WorkspaceError>;
    async fn import_file(&self, request: ImportFile) -> Result<(), WorkspaceError>;
}
