//! Databricks REST API implementation of [`WorkspaceApi`].

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lib::errors::WorkspaceError;
use crate::server::config::DatabricksSection;

use super::{App, AppDeployment, ImportFile, WorkspaceApi};

const APPS_ENDPOINT: &str = "/api/2.0/apps";
const WORKSPACE_EXPORT_ENDPOINT: &str = "/api/2.0/workspace/export";
const WORKSPACE_IMPORT_ENDPOINT: &str = "/api/2.0/workspace/import";

/// Authenticated `reqwest` client for the Databricks control plane.
///
/// Shareable across concurrent tool invocations; holds no per-call state
/// beyond the connection pool inside `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct RestWorkspaceClient {
    host: String,
    token: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AppsListResponse {
    #[serde(default)]
    apps: Option<Vec<App>>,
}

#[derive(Debug, Serialize)]
struct DeployRequest<'a> {
    source_code_path: &'a str,
}

#[derive(Debug, Serialize)]
struct ImportRequestBody<'a> {
    path: &'a str,
    content: String,
    format: &'a super::ImportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a super::Language>,
    overwrite: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestWorkspaceClient {
    pub fn new(settings: &DatabricksSection) -> Self {
        let host = normalize_host(&settings.host);
        Self {
            host,
            token: settings.token.clone(),
            http: reqwest::Client::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.host, endpoint)
    }

    /// Build an apps URL from raw path segments. Segments pushed through
    /// `Url` are percent-encoded, so an app name containing `/` or spaces
    /// stays a single segment instead of rewriting the route.
    fn apps_url(&self, segments: &[&str]) -> String {
        if let Ok(mut url) = reqwest::Url::parse(&self.host) {
            let ok = url
                .path_segments_mut()
                .map(|mut path| {
                    path.pop_if_empty()
                        .extend(["api", "2.0", "apps"])
                        .extend(segments);
                })
                .is_ok();
            if ok {
                return url.to_string();
            }
        }
        format!("{}{}/{}", self.host, APPS_ENDPOINT, segments.join("/"))
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&impl Serialize>,
        query: Option<&[(&str, &str)]>,
    ) -> Result<reqwest::Response, WorkspaceError> {
        debug!(target: "dbx_mcp::client", %method, %url, "Sending request to control plane");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| WorkspaceError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(WorkspaceError::Api {
            url,
            status: status.as_u16(),
            message: api_error_message(&text),
        })
    }

    async fn request_json<T>(
        &self,
        method: Method,
        url: String,
        body: Option<&impl Serialize>,
    ) -> Result<T, WorkspaceError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, url.clone(), body, None).await?;
        let text = response
            .text()
            .await
            .map_err(|err| WorkspaceError::Decode {
                url: url.clone(),
                message: err.to_string(),
            })?;
        serde_json::from_str(&text).map_err(|err| WorkspaceError::Decode {
            url,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl WorkspaceApi for RestWorkspaceClient {
    async fn list_apps(&self) -> Result<Vec<App>, WorkspaceError> {
        let response: AppsListResponse = self
            .request_json(Method::GET, self.url(APPS_ENDPOINT), None::<&()>)
            .await?;
        Ok(response.apps.unwrap_or_default())
    }

    async fn get_app(&self, name: &str) -> Result<App, WorkspaceError> {
        let url = self.apps_url(&[name]);
        self.request_json(Method::GET, url, None::<&()>).await
    }

    async fn start_app(&self, name: &str) -> Result<(), WorkspaceError> {
        let url = self.apps_url(&[name, "start"]);
        self.send(Method::POST, url, Some(&serde_json::json!({})), None)
            .await?;
        Ok(())
    }

    async fn stop_app(&self, name: &str) -> Result<(), WorkspaceError> {
        let url = self.apps_url(&[name, "stop"]);
        self.send(Method::POST, url, Some(&serde_json::json!({})), None)
            .await?;
        Ok(())
    }

    async fn deploy_app(
        &self,
        name: &str,
        source_code_path: &str,
    ) -> Result<AppDeployment, WorkspaceError> {
        let url = self.apps_url(&[name, "deployments"]);
        self.request_json(Method::POST, url, Some(&DeployRequest { source_code_path }))
            .await
    }

    async fn export_file(&self, path: &str) -> Result<Vec<u8>, WorkspaceError> {
        let url = self.url(WORKSPACE_EXPORT_ENDPOINT);
        let response = self
            .send(
                Method::GET,
                url.clone(),
                None::<&()>,
                Some(&[("path", path), ("direct_download", "true")]),
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| WorkspaceError::Decode {
                url,
                message: err.to_string(),
            })?;
        Ok(bytes.to_vec())
    }

    async fn import_file(&self, request: ImportFile) -> Result<(), WorkspaceError> {
        let url = self.url(WORKSPACE_IMPORT_ENDPOINT);
        let body = ImportRequestBody {
            path: &request.path,
            content: BASE64.encode(&request.content),
            format: &request.format,
            language: request.language.as_ref(),
            overwrite: request.overwrite,
        };
        self.send(Method::POST, url, Some(&body), None).await?;
        Ok(())
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Databricks error bodies carry `error_code` and `message`; fall back to the
/// raw body when the shape differs.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match (parsed.error_code, parsed.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            _ => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
