// 🌐 Backend API Client - the three endpoints the screens talk to
//
// GET  {base}/api/reports        → report summaries
// GET  {base}/api/reports/{id}   → one full report (empty/null body = not found)
// POST {base}/api/upload         → multipart field `file`

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::Value;

use crate::config::Config;
use crate::error::ClientError;
use crate::models::{Report, UploadResponse};
use crate::screens::SelectedFile;

pub const UPLOAD_FIELD: &str = "file";
const XML_MIME: &str = "text/xml";

/// Shared by every screen; cheap to clone into spawned tasks
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All uploaded reports, newest first as the backend orders them.
    /// Array elements that are not report objects are skipped.
    pub async fn list_reports(&self) -> Result<Vec<Report>, ClientError> {
        let url = self.url("/api/reports");
        tracing::info!("Fetching reports: {}", url);

        let response = self.client.get(&url).send().await?;
        let body = success_body(response).await?;

        let items = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                return Err(ClientError::Decode(format!(
                    "expected a list of reports, got {}",
                    json_kind(&other)
                )))
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };

        let total = items.len();
        let reports: Vec<Report> = items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::debug!("Skipping malformed report entry: {}", e);
                    None
                }
            })
            .collect();

        if reports.len() != total {
            tracing::warn!("Skipped {} malformed report entries", total - reports.len());
        }
        tracing::info!("Fetched {} reports", reports.len());
        Ok(reports)
    }

    /// One full report; `Ok(None)` when the backend answers with no record
    pub async fn get_report(&self, id: &str) -> Result<Option<Report>, ClientError> {
        let url = self.url(&format!("/api/reports/{}", urlencoding::encode(id)));
        tracing::info!("Fetching report {}: {}", id, url);

        let response = self.client.get(&url).send().await?;
        let body = success_body(response).await?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Null) => Ok(None),
            Ok(object @ Value::Object(_)) => serde_json::from_value(object)
                .map(Some)
                .map_err(|e| ClientError::Decode(e.to_string())),
            Ok(other) => Err(ClientError::Decode(format!(
                "expected a report object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }

    /// Sends the file as multipart field `file`. A non-success answer carries
    /// the server's `error` text when it has one.
    pub async fn upload_report(&self, file: &SelectedFile) -> Result<UploadResponse, ClientError> {
        let url = self.url("/api/upload");
        tracing::info!("Uploading {} ({} bytes) to {}", file.name, file.size, url);

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ClientError::File(format!("{}: {}", file.path.display(), e)))?;

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(XML_MIME)
            .map_err(|e| ClientError::File(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<UploadResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .filter(|m| !m.trim().is_empty());
            tracing::warn!("Upload rejected with {}: {:?}", status, message);
            return Err(ClientError::Status { status: status.as_u16(), message });
        }

        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::info!(
            "Upload accepted: id={:?} name={:?} score={:?}",
            parsed.id,
            parsed.name,
            parsed.credit_score
        );
        Ok(parsed)
    }
}

/// Body text of a 2xx answer; anything else becomes `ClientError::Status`
async fn success_body(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Backend returned {}: {}", status, text);
        return Err(ClientError::Status { status: status.as_u16(), message: None });
    }
    Ok(response.text().await?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
