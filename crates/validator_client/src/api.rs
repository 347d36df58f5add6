use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};

use crate::filename::result_filename;
use crate::types::{ApiError, ErrorBody, StatusReport, UploadResponse};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// The server refuses bodies above this size; checked before sending.
    pub max_upload_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Per-submission form fields, serialized exactly as the server reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub timeout_secs: u32,
    pub check_smtp: bool,
    pub strict_mode: bool,
    pub max_emails: Option<u32>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            check_smtp: true,
            strict_mode: true,
            max_emails: None,
        }
    }
}

/// Downloaded result artifact plus the filename derived from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub filename: String,
    pub bytes: bytes::Bytes,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// One multipart `POST /api/upload`; returns the new task id.
    pub async fn upload(&self, file: &Path, options: &UploadOptions) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|err| ApiError::FileRead(err.to_string()))?;
        let actual = bytes.len() as u64;
        if actual > self.settings.max_upload_bytes {
            return Err(ApiError::TooLarge {
                max_bytes: self.settings.max_upload_bytes,
                actual,
            });
        }

        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_owned();
        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("timeout", options.timeout_secs.to_string())
            .text("check_smtp", bool_field(options.check_smtp))
            .text(
                "validation_mode",
                if options.strict_mode { "strict" } else { "lenient" },
            );
        if let Some(max_emails) = options.max_emails {
            form = form.text("max_emails", max_emails.to_string());
        }

        let response = self
            .client
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_success_body(response).await?;
        let parsed: UploadResponse = serde_json::from_slice(&body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(parsed.task_id)
    }

    /// One `GET /api/status/{task_id}`.
    pub async fn status(&self, task_id: &str) -> Result<StatusReport, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/status/{task_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_success_body(response).await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// One `GET /api/download/{task_id}`; the filename comes from the
    /// `Content-Disposition` header with a fixed fallback.
    pub async fn download(&self, task_id: &str) -> Result<DownloadedArtifact, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/download/{task_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let header = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = read_success_body(response).await?;
        Ok(DownloadedArtifact {
            filename: result_filename(header.as_deref()),
            bytes: body,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Non-success responses carry `{"error": "..."}`; fall back to a generic
/// text when the body has some other shape.
async fn read_success_body(response: reqwest::Response) -> Result<bytes::Bytes, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    if status.is_success() {
        return Ok(body);
    }
    let message = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => format!("server error (HTTP {})", status.as_u16()),
    };
    Err(ApiError::Server(message))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
