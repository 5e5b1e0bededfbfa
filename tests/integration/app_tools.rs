use dbx_mcp::tools::workspace::{list_apps, redeploy_app, start_app, stop_app, AppEntry};

use crate::common::{sample_app, MockWorkspace};

#[tokio::test]
async fn list_apps_projects_every_remote_record() {
    let mock = MockWorkspace::new()
        .with_app(sample_app(
            "sales-dashboard",
            Some("Team dashboard"),
            Some("https://apps.example.com/sales"),
            Some("/Workspace/apps/sales"),
        ))
        .with_app(sample_app("scratch-app", None, None, None));

    let entries = list_apps(&mock).await;

    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0],
        AppEntry::Listed {
            name: "sales-dashboard".to_string(),
            description: Some("Team dashboard".to_string()),
            app_url: Some("https://apps.example.com/sales".to_string()),
            source_code_path: Some("/Workspace/apps/sales".to_string()),
        }
    );
    assert_eq!(
        entries[1],
        AppEntry::Listed {
            name: "scratch-app".to_string(),
            description: None,
            app_url: None,
            source_code_path: None,
        }
    );
}

#[tokio::test]
async fn listing_failure_collapses_to_a_single_error_entry() {
    let mock = MockWorkspace::new()
        .with_app(sample_app("present-but-unreachable", None, None, None))
        .failing_listing();

    let entries = list_apps(&mock).await;

    assert_eq!(entries.len(), 1);
    match &entries[0] {
        AppEntry::Error { error } => {
            assert!(
                error.starts_with("Failed to list apps:"),
                "error should name the failed action: {error}"
            );
        }
        other => panic!("expected an error entry, got {other:?}"),
    }
}

#[tokio::test]
async fn start_app_reports_post_start_status_and_url() {
    let mock = MockWorkspace::new().with_app(sample_app(
        "app-y",
        None,
        Some("https://apps.example.com/app-y"),
        Some("/Workspace/apps/app-y"),
    ));

    let response = start_app(&mock, "app-y").await;

    assert!(response.success);
    assert_eq!(response.app_name, "app-y");
    assert_eq!(response.status.as_deref(), Some("ACTIVE"));
    assert_eq!(
        response.app_url.as_deref(),
        Some("https://apps.example.com/app-y")
    );
    assert!(response.error.is_none());
}

#[tokio::test]
async fn start_app_missing_returns_failure_result() {
    let mock = MockWorkspace::new();

    let response = start_app(&mock, "missing-app").await;

    assert!(!response.success);
    assert_eq!(response.app_name, "missing-app");
    let error = response.error.expect("failure must carry an error");
    assert!(
        error.starts_with("Failed to start app:"),
        "unexpected error: {error}"
    );
    assert!(response.status.is_none());
}

#[tokio::test]
async fn stop_app_reports_post_stop_status() {
    let mock = MockWorkspace::new().with_app(sample_app("app-z", None, None, None));

    let started = start_app(&mock, "app-z").await;
    assert_eq!(started.status.as_deref(), Some("ACTIVE"));

    let response = stop_app(&mock, "app-z").await;

    assert!(response.success);
    assert_eq!(response.status.as_deref(), Some("STOPPED"));
    assert!(response.error.is_none());
}

#[tokio::test]
async fn redeploy_missing_app_is_not_found_and_issues_no_deployment() {
    let mock = MockWorkspace::new();

    let response = redeploy_app(&mock, "missing-app", None).await;

    assert!(!response.success);
    let error = response.error.expect("failure must carry an error");
    assert!(
        error.starts_with("App not found:"),
        "unexpected error: {error}"
    );
    assert!(
        mock.deployments.lock().unwrap().is_empty(),
        "no deployment call may be issued for a missing app"
    );
}

#[tokio::test]
async fn redeploy_falls_back_to_the_active_deployment_path() {
    let mock = MockWorkspace::new().with_app(sample_app(
        "app-x",
        None,
        None,
        Some("/Workspace/x"),
    ));

    let response = redeploy_app(&mock, "app-x", None).await;

    assert!(response.success);
    assert_eq!(response.source_code_path.as_deref(), Some("/Workspace/x"));
    assert_eq!(response.deployment_id.as_deref(), Some("dep-1"));
    assert_eq!(response.status.as_deref(), Some("IN_PROGRESS"));
    assert_eq!(
        mock.deployments.lock().unwrap().as_slice(),
        &[("app-x".to_string(), "/Workspace/x".to_string())]
    );
}

#[tokio::test]
async fn redeploy_prefers_the_explicit_source_path() {
    let mock = MockWorkspace::new().with_app(sample_app(
        "app-x",
        None,
        None,
        Some("/Workspace/x"),
    ));

    let response = redeploy_app(&mock, "app-x", Some("/Workspace/override".to_string())).await;

    assert!(response.success);
    assert_eq!(
        response.source_code_path.as_deref(),
        Some("/Workspace/override")
    );
}

#[tokio::test]
async fn redeploy_without_any_source_path_is_a_distinct_failure() {
    let mock = MockWorkspace::new().with_app(sample_app("bare-app", None, None, None));

    let response = redeploy_app(&mock, "bare-app", None).await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("No source code path available for deployment")
    );
    assert!(mock.deployments.lock().unwrap().is_empty());
}
