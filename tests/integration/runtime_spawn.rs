use std::time::Duration;

use anyhow::Result;
use rmcp::{
    model::{ClientInfo, ReadResourceRequestParam, ResourceContents},
    serve_client,
};
use tokio::time::timeout;

use crate::common::spawn_server_process;

#[tokio::test]
async fn inspector_style_spawn_lists_tools_and_reads_greeting() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;

    let list = client.list_tools(None).await?;
    for expected in [
        "add",
        "list_databricks_apps",
        "download_workspace_file",
        "upload_workspace_file",
        "start_databricks_app",
        "stop_databricks_app",
        "redeploy_databricks_app",
    ] {
        assert!(
            list.tools.iter().any(|tool| tool.name.as_ref() == expected),
            "list_tools should include {expected}: {:?}",
            list.tools
        );
    }

    let greeting = client
        .read_resource(ReadResourceRequestParam {
            uri: "greeting://Ann".to_string(),
        })
        .await?;
    match greeting.contents.first() {
        Some(ResourceContents::TextResourceContents { text, .. }) => {
            assert_eq!(text, "Hello, Ann!");
        }
        other => panic!("expected text resource contents, got {other:?}"),
    }

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}
