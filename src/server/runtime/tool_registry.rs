use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{
        ErrorData, ListResourceTemplatesResult, ListResourcesResult, PaginatedRequestParam,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, Json,
};

use crate::{
    client::WorkspaceApi,
    tools::{
        self,
        demo::{self, AddRequest},
        workspace::{
            self, AppEntry, DownloadFileRequest, DownloadFileResponse, RedeployAppRequest,
            RedeployAppResponse, StartAppRequest, StartAppResponse, StopAppRequest,
            StopAppResponse, UploadFileRequest, UploadFileResponse,
        },
        ServerToolRouter,
    },
};

/// The MCP server: binds every operation wrapper to a tool name and exposes
/// the greeting resource.
#[derive(Clone)]
pub struct WorkspaceServer {
    client: Arc<dyn WorkspaceApi>,
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
}

impl WorkspaceServer {
    pub fn new(client: Arc<dyn WorkspaceApi>, instructions: String) -> Self {
        Self {
            client,
            instructions: Arc::new(instructions),
            tool_router: tools::build_router(Self::tool_router),
        }
    }
}

#[tool_router(router = tool_router)]
impl WorkspaceServer {
    #[tool(name = "add", description = "Add two numbers")]
    async fn add(&self, Parameters(request): Parameters<AddRequest>) -> Result<Json<i64>, ErrorData> {
        Ok(Json(demo::add(request.a, request.b)))
    }

    #[tool(
        name = "list_databricks_apps",
        description = "List all Databricks apps in the workspace"
    )]
    async fn list_databricks_apps(&self) -> Result<Json<Vec<AppEntry>>, ErrorData> {
        Ok(Json(workspace::list_apps(self.client.as_ref()).await))
    }

    #[tool(
        name = "download_workspace_file",
        description = "Download the contents of a file from the Databricks workspace"
    )]
    async fn download_workspace_file(
        &self,
        Parameters(request): Parameters<DownloadFileRequest>,
    ) -> Result<Json<DownloadFileResponse>, ErrorData> {
        Ok(Json(
            workspace::download_file(self.client.as_ref(), &request.path).await,
        ))
    }

    #[tool(
        name = "upload_workspace_file",
        description = "Upload content to a file in the Databricks workspace"
    )]
    async fn upload_workspace_file(
        &self,
        Parameters(request): Parameters<UploadFileRequest>,
    ) -> Result<Json<UploadFileResponse>, ErrorData> {
        Ok(Json(
            workspace::upload_file(self.client.as_ref(), request).await,
        ))
    }

    #[tool(
        name = "start_databricks_app",
        description = "Start a stopped Databricks app"
    )]
    async fn start_databricks_app(
        &self,
        Parameters(request): Parameters<StartAppRequest>,
    ) -> Result<Json<StartAppResponse>, ErrorData> {
        Ok(Json(
            workspace::start_app(self.client.as_ref(), &request.app_name).await,
        ))
    }

    #[tool(
        name = "stop_databricks_app",
        description = "Stop a running Databricks app"
    )]
    async fn stop_databricks_app(
        &self,
        Parameters(request): Parameters<StopAppRequest>,
    ) -> Result<Json<StopAppResponse>, ErrorData> {
        Ok(Json(
            workspace::stop_app(self.client.as_ref(), &request.app_name).await,
        ))
    }

    #[tool(
        name = "redeploy_databricks_app",
        description = "Redeploy (restart) a Databricks app by creating a new deployment"
    )]
    async fn redeploy_databricks_app(
        &self,
        Parameters(request): Parameters<RedeployAppRequest>,
    ) -> Result<Json<RedeployAppResponse>, ErrorData> {
        Ok(Json(
            workspace::redeploy_app(
                self.client.as_ref(),
                &request.app_name,
                request.source_code_path,
            )
            .await,
        ))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WorkspaceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![demo::greeting_template()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        match demo::read_greeting(&request.uri) {
            Some(greeting) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(greeting, request.uri)],
            }),
            None => Err(ErrorData::resource_not_found(
                format!("unknown resource URI: {}", request.uri),
                None,
            )),
        }
    }
}
