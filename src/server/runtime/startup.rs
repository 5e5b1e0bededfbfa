use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    cli::{LaunchProfile, TransportMode},
    client::RestWorkspaceClient,
    server::{
        config::ServerConfig,
        runtime::{build_instructions, WorkspaceServer},
    },
};

/// Sub-path the MCP tool surface is mounted under in HTTP mode; the root path
/// is reserved for the static landing page.
pub const MCP_MOUNT_PATH: &str = "/mcp";

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Start the MCP server and select stdio/HTTP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let client = RestWorkspaceClient::new(&config.databricks);
    let instructions = build_instructions(&profile, &config);
    let server = WorkspaceServer::new(Arc::new(client), instructions.clone());

    crate::lib::telemetry::emit_runtime_mode(&crate::lib::telemetry::RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        databricks_host: &config.databricks.host,
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Http => run_http(server, &config).await,
    }
}

async fn run_stdio(server: WorkspaceServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_http(server: WorkspaceServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let static_dir = Arc::new(config.server.static_dir.clone());
    let router = Router::new()
        .route("/", get(serve_index))
        .with_state(static_dir)
        .nest_service(MCP_MOUNT_PATH, mcp_service)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "dbx_mcp::runtime",
        transport = "http",
        bind_addr = %addr,
        mcp_mount = MCP_MOUNT_PATH,
        "Started listening in HTTP mode"
    );

    axum::serve(listener, router)
        .await
        .map_err(RuntimeExit::from_error)
}

/// Serve the static landing page at the root path: 200 with the file body,
/// 404 when the file is missing.
async fn serve_index(State(static_dir): State<Arc<PathBuf>>) -> Response {
    let index = static_dir.join("index.html");
    match tokio::fs::read(&index).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(
                target: "dbx_mcp::runtime",
                path = %index.display(),
                error = %err,
                "Landing page not available"
            );
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
