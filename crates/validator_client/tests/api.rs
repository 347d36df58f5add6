use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use validator_client::{ApiClient, ApiError, ApiSettings, TaskStatus, UploadOptions};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    ApiClient::new(settings).expect("client builds")
}

fn input_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("temp file");
    file.write_all(bytes).expect("write input");
    file
}

#[tokio::test]
async fn upload_sends_form_fields_and_returns_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("name=\"timeout\""))
        .and(body_string_contains("name=\"check_smtp\""))
        .and(body_string_contains("name=\"validation_mode\""))
        .and(body_string_contains("name=\"max_emails\""))
        .and(body_string_contains("lenient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "3f6b", "message": "File uploaded, validation started",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = input_file(b"emails");
    let options = UploadOptions {
        strict_mode: false,
        max_emails: Some(500),
        ..UploadOptions::default()
    };

    let task_id = client.upload(file.path(), &options).await.expect("upload ok");
    assert_eq!(task_id, "3f6b");
}

#[tokio::test]
async fn upload_failure_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "File not selected"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = input_file(b"emails");

    let err = client
        .upload(file.path(), &UploadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Server("File not selected".to_owned()));
}

#[tokio::test]
async fn upload_failure_without_json_body_falls_back_to_a_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = input_file(b"emails");

    let err = client
        .upload(file.path(), &UploadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Server("server error (HTTP 500)".to_owned()));
}

#[tokio::test]
async fn oversized_upload_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settings = ApiSettings {
        base_url: server.uri(),
        max_upload_bytes: 4,
        ..ApiSettings::default()
    };
    let client = ApiClient::new(settings).expect("client builds");
    let file = input_file(b"0123456789");

    let err = client
        .upload(file.path(), &UploadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::TooLarge {
            max_bytes: 4,
            actual: 10,
        }
    );
}

#[tokio::test]
async fn status_decodes_the_full_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/3f6b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "running",
            "progress": 30.0,
            "message": "processing emails.xlsx",
            "current_file": "emails.xlsx",
            "processed": 3,
            "total": 10,
            "eta_seconds": 14.5,
            "error": null,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client.status("3f6b").await.expect("status ok");

    assert_eq!(report.status, TaskStatus::Running);
    assert_eq!(report.progress, 30.0);
    assert_eq!(report.message, "processing emails.xlsx");
    assert_eq!(report.current_file.as_deref(), Some("emails.xlsx"));
    assert_eq!(report.processed, 3);
    assert_eq!(report.total, 10);
    assert_eq!(report.eta_seconds, Some(14.5));
    assert_eq!(report.error, None);
}

#[tokio::test]
async fn status_accepts_the_legacy_processing_alias_and_sparse_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/3f6b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "processing"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client.status("3f6b").await.expect("status ok");

    assert_eq!(report.status, TaskStatus::Running);
    assert_eq!(report.progress, 0.0);
    assert_eq!(report.total, 0);
    assert_eq!(report.eta_seconds, None);
}

#[tokio::test]
async fn status_of_an_unknown_task_is_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Task not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.status("gone").await.unwrap_err();
    assert_eq!(err, ApiError::Server("Task not found".to_owned()));
}

#[tokio::test]
async fn slow_status_query_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/3f6b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({"status": "running"})),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let client = ApiClient::new(settings).expect("client builds");

    let err = client.status("3f6b").await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn download_derives_the_filename_from_the_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/3f6b"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Content-Disposition",
                    "attachment; filename=validated_3f6b.xlsx",
                )
                .set_body_bytes(b"PK\x03\x04result".to_vec()),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let artifact = client.download("3f6b").await.expect("download ok");

    assert_eq!(artifact.filename, "validated_3f6b.xlsx");
    assert_eq!(artifact.bytes.as_ref(), b"PK\x03\x04result");
}

#[tokio::test]
async fn download_without_a_header_falls_back_to_the_default_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/3f6b"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let artifact = client.download("3f6b").await.expect("download ok");

    assert_eq!(artifact.filename, validator_client::DEFAULT_RESULT_NAME);
}

#[tokio::test]
async fn download_failure_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/3f6b"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "Task not finished yet"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.download("3f6b").await.unwrap_err();
    assert_eq!(err, ApiError::Server("Task not finished yet".to_owned()));
}
