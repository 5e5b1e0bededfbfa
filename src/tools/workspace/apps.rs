//! App lifecycle operations: list, start, stop, redeploy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::{App, WorkspaceApi};

/// One entry of the `list_databricks_apps` result. The whole listing fails
/// together: any failure collapses to a single `Error` entry, never partial
/// per-app results.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AppEntry {
    Listed {
        name: String,
        description: Option<String>,
        app_url: Option<String>,
        source_code_path: Option<String>,
    },
    Error {
        error: String,
    },
}

impl AppEntry {
    fn project(app: &App) -> Self {
        AppEntry::Listed {
            name: app.name.clone(),
            description: app.description.clone(),
            app_url: app.url.clone(),
            source_code_path: app
                .active_deployment
                .as_ref()
                .and_then(|deployment| deployment.source_code_path.clone()),
        }
    }
}

/// List all apps in the workspace, projected to their public descriptors.
pub async fn list_apps(client: &dyn WorkspaceApi) -> Vec<AppEntry> {
    match client.list_apps().await {
        Ok(apps) => apps.iter().map(AppEntry::project).collect(),
        Err(err) => {
            warn!(target: "dbx_mcp::tools", error = %err, "App listing failed");
            vec![AppEntry::Error {
                error: format!("Failed to list apps: {err}"),
            }]
        }
    }
}

/// Input for `start_databricks_app`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StartAppRequest {
    /// Name of the app to start.
    pub app_name: String,
}

/// Input for `stop_databricks_app`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StopAppRequest {
    /// Name of the app to stop.
    pub app_name: String,
}

/// Input for `redeploy_databricks_app`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RedeployAppRequest {
    /// Name of the app to redeploy.
    pub app_name: String,
    /// Path to source code for the new deployment; defaults to the app's
    /// active deployment path.
    #[serde(default)]
    pub source_code_path: Option<String>,
}

/// Result of `start_databricks_app`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StartAppResponse {
    pub app_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `stop_databricks_app`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StopAppResponse {
    pub app_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `redeploy_databricks_app`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RedeployAppResponse {
    pub app_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn compute_state(app: &App) -> String {
    app.compute_status
        .as_ref()
        .and_then(|status| status.state.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Start a stopped app, then re-fetch it to report the updated status and URL.
/// A failure in either call is reported as one overall failure.
pub async fn start_app(client: &dyn WorkspaceApi, app_name: &str) -> StartAppResponse {
    let started = async {
        client.start_app(app_name).await?;
        client.get_app(app_name).await
    }
    .await;

    match started {
        Ok(app) => StartAppResponse {
            app_name: app_name.to_string(),
            success: true,
            status: Some(compute_state(&app)),
            app_url: app.url,
            error: None,
        },
        Err(err) => {
            warn!(target: "dbx_mcp::tools", app_name, error = %err, "App start failed");
            StartAppResponse {
                app_name: app_name.to_string(),
                success: false,
                status: None,
                app_url: None,
                error: Some(format!("Failed to start app: {err}")),
            }
        }
    }
}

/// Stop a running app, then re-fetch it to report the updated status.
pub async fn stop_app(client: &dyn WorkspaceApi, app_name: &str) -> StopAppResponse {
    let stopped = async {
        client.stop_app(app_name).await?;
        client.get_app(app_name).await
    }
    .await;

    match stopped {
        Ok(app) => StopAppResponse {
            app_name: app_name.to_string(),
            success: true,
            status: Some(compute_state(&app)),
            error: None,
        },
        Err(err) => {
            warn!(target: "dbx_mcp::tools", app_name, error = %err, "App stop failed");
            StopAppResponse {
                app_name: app_name.to_string(),
                success: false,
                status: None,
                error: Some(format!("Failed to stop app: {err}")),
            }
        }
    }
}

/// Redeploy an app by creating a new deployment.
///
/// The app is fetched first: a missing app fails with a not-found error and
/// no deployment call is issued. An omitted source path falls back to the
/// active deployment's path; when neither is available the operation fails
/// with a distinct "no source code path" error.
pub async fn redeploy_app(
    client: &dyn WorkspaceApi,
    app_name: &str,
    source_code_path: Option<String>,
) -> RedeployAppResponse {
    let failure = |error: String| RedeployAppResponse {
        app_name: app_name.to_string(),
        success: false,
        deployment_id: None,
        source_code_path: None,
        status: None,
        error: Some(error),
    };

    let app = match client.get_app(app_name).await {
        Ok(app) => app,
        Err(err) => {
            warn!(target: "dbx_mcp::tools", app_name, error = %err, "App lookup failed before redeploy");
            return failure(format!("App not found: {err}"));
        }
    };

    let source_code_path = source_code_path.or_else(|| {
        app.active_deployment
            .as_ref()
            .and_then(|deployment| deployment.source_code_path.clone())
    });
    let Some(source_code_path) = source_code_path.filter(|path| !path.is_empty()) else {
        return failure("No source code path available for deployment".to_string());
    };

    match client.deploy_app(app_name, &source_code_path).await {
        Ok(deployment) => RedeployAppResponse {
            app_name: app_name.to_string(),
            success: true,
            deployment_id: deployment.deployment_id,
            source_code_path: Some(source_code_path),
            status: Some(
                deployment
                    .status
                    .and_then(|status| status.state)
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            error: None,
        },
        Err(err) => {
            warn!(target: "dbx_mcp::tools", app_name, error = %err, "App redeploy failed");
            failure(format!("Failed to redeploy app: {err}"))
        }
    }
}
