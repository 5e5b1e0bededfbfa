use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use dbx_mcp::client::Language;
use dbx_mcp::tools::workspace::{download_file, upload_file, UploadFileRequest};

use crate::common::MockWorkspace;

fn upload_request(path: &str, content: &str) -> UploadFileRequest {
    UploadFileRequest {
        path: path.to_string(),
        content: content.to_string(),
        is_binary: false,
        overwrite: true,
        language: None,
    }
}

#[tokio::test]
async fn text_upload_then_download_round_trips() {
    let mock = MockWorkspace::new();
    let body = "select * from sales limit 10\n";

    let uploaded = upload_file(&mock, upload_request("/Workspace/q.sql", body)).await;
    assert!(uploaded.success);
    assert_eq!(uploaded.size_bytes, Some(body.len() as u64));

    let downloaded = download_file(&mock, "/Workspace/q.sql").await;
    assert!(downloaded.success);
    assert_eq!(downloaded.content.as_deref(), Some(body));
    assert_eq!(downloaded.is_binary, Some(false));
    assert_eq!(downloaded.size_bytes, Some(body.len() as u64));
}

#[tokio::test]
async fn binary_upload_then_download_round_trips() {
    let mock = MockWorkspace::new();
    let raw: Vec<u8> = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
    let encoded = BASE64.encode(&raw);

    let mut request = upload_request("/Workspace/logo.png", &encoded);
    request.is_binary = true;
    let uploaded = upload_file(&mock, request).await;
    assert!(uploaded.success);
    assert_eq!(uploaded.size_bytes, Some(raw.len() as u64));
    assert_eq!(mock.stored_file("/Workspace/logo.png"), Some(raw.clone()));

    let downloaded = download_file(&mock, "/Workspace/logo.png").await;
    assert!(downloaded.success);
    assert_eq!(downloaded.is_binary, Some(true));
    assert_eq!(downloaded.content.as_deref(), Some(encoded.as_str()));
    assert_eq!(downloaded.size_bytes, Some(raw.len() as u64));
}

#[tokio::test]
async fn download_of_a_missing_path_is_a_failure_result() {
    let mock = MockWorkspace::new();

    let response = download_file(&mock, "/Workspace/missing").await;

    assert!(!response.success);
    assert_eq!(response.path, "/Workspace/missing");
    assert!(response.content.is_none());
    let error = response.error.expect("failure must carry an error");
    assert!(
        error.starts_with("Failed to download file:"),
        "unexpected error: {error}"
    );
}

#[tokio::test]
async fn malformed_base64_upload_is_a_failure_result() {
    let mock = MockWorkspace::new();

    let mut request = upload_request("/Workspace/bad.bin", "this is not base64!!");
    request.is_binary = true;
    let response = upload_file(&mock, request).await;

    assert!(!response.success);
    let error = response.error.expect("failure must carry an error");
    assert!(
        error.starts_with("Failed to upload file:"),
        "unexpected error: {error}"
    );
    assert!(mock.stored_file("/Workspace/bad.bin").is_none());
}

#[tokio::test]
async fn language_tokens_map_case_insensitively_and_unknown_is_dropped() {
    let mock = MockWorkspace::new();

    let mut request = upload_request("/Workspace/nb-python", "print(1)\n");
    request.language = Some("python".to_string());
    let response = upload_file(&mock, request).await;
    assert!(response.success);
    assert_eq!(response.language.as_deref(), Some("python"));

    let mut request = upload_request("/Workspace/nb-unknown", "say hi\n");
    request.language = Some("fortran".to_string());
    let response = upload_file(&mock, request).await;
    assert!(response.success);

    let imports = mock.imports.lock().unwrap();
    assert_eq!(imports[0].language, Some(Language::Python));
    assert_eq!(imports[1].language, None);
}

#[tokio::test]
async fn overwrite_false_surfaces_the_remote_conflict() {
    let mock = MockWorkspace::new().with_file("/Workspace/existing", b"original");

    let mut request = upload_request("/Workspace/existing", "replacement");
    request.overwrite = false;
    let response = upload_file(&mock, request).await;

    assert!(!response.success);
    assert!(response
        .error
        .as_deref()
        .is_some_and(|error| error.contains("RESOURCE_ALREADY_EXISTS")));
    assert_eq!(
        mock.stored_file("/Workspace/existing"),
        Some(b"original".to_vec())
    );
}
