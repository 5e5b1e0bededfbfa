use crate::{cli::LaunchProfile, server::config::ServerConfig};

use super::MCP_MOUNT_PATH;

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "Loaded config {path}; exposing Databricks workspace tools for {databricks} in {transport} mode (host={host}, port={port}, MCP mount={mount}). Apps can be listed, started, stopped, and redeployed; workspace files can be uploaded and downloaded.",
        path = config.source_path.display(),
        databricks = config.databricks.host,
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port,
        mount = MCP_MOUNT_PATH
    )
}
