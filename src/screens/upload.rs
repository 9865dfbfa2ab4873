// 📤 Upload Screen - file gate, submission and result summary
//
// idle → file-selected → uploading → succeeded | failed
// Clearing returns to idle from anywhere. The in-flight request outlives a
// reselect or clear; nothing new is sent until it settles.

use std::path::{Path, PathBuf};

use crate::error::ClientError;
use crate::format::{kilobytes, non_empty, number_text, PLACEHOLDER};
use crate::models::UploadResponse;
use crate::route::Route;
use crate::screens::RequestKey;
use crate::view::{Notice, Tone, ViewLine};

pub const XML_SUFFIX: &str = ".xml";

pub const MSG_NOT_XML: &str = "Please upload an XML file";
pub const MSG_NO_FILE: &str = "Please choose an XML file";
pub const MSG_UPLOADING: &str = "Uploading and parsing XML...";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed";
pub const MSG_NETWORK: &str = "Network error. Please try again.";

/// Case-sensitive: `report.XML` is rejected
pub fn accepts_file_name(name: &str) -> bool {
    name.ends_with(XML_SUFFIX)
}

// ============================================================================
// SELECTED FILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, size }
    }

    /// Reads size from disk; directories and missing paths are errors
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| ClientError::File(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(ClientError::File(format!("{} is not a file", path.display())));
        }
        Ok(Self::new(path, metadata.len()))
    }

    pub fn size_label(&self) -> String {
        kilobytes(self.size)
    }
}

/// A dropped path arrives quoted, escaped or as a file:// URL depending on the terminal
pub fn normalize_dropped_path(raw: &str) -> PathBuf {
    let mut text = raw.trim().trim_matches(|c| c == '\'' || c == '"').to_string();
    if let Some(stripped) = text.strip_prefix("file://") {
        text = urlencoding::decode(stripped)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| stripped.to_string());
    }
    PathBuf::from(text.replace("\\ ", " "))
}

// ============================================================================
// STATE MACHINE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    FileSelected(SelectedFile),
    Uploading(SelectedFile),
    Succeeded { file: SelectedFile, response: UploadResponse },
    Failed { file: SelectedFile },
}

#[derive(Debug, Clone)]
pub struct UploadScreen {
    state: UploadState,
    notice: Option<Notice>,
    /// Outstanding POST, cleared only when its response arrives
    in_flight: Option<RequestKey>,
    /// Path typed into the picker
    pub path_input: String,
    /// Picker focused; rendered as the drop zone's "active" look
    pub editing: bool,
}

impl Default for UploadScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadScreen {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            notice: None,
            in_flight: None,
            path_input: String::new(),
            editing: false,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.state {
            UploadState::Idle => None,
            UploadState::FileSelected(file)
            | UploadState::Uploading(file)
            | UploadState::Succeeded { file, .. }
            | UploadState::Failed { file } => Some(file),
        }
    }

    pub fn response(&self) -> Option<&UploadResponse> {
        match &self.state {
            UploadState::Succeeded { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file().is_some() && !self.is_uploading()
    }

    /// Link target once the upload succeeded with an id
    pub fn report_route(&self) -> Option<Route> {
        let id = non_empty(self.response()?.id.as_deref())?;
        Some(Route::ReportDetail(id.to_string()))
    }

    /// Drop or pick. Rejected files leave the current selection untouched.
    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if !accepts_file_name(&file.name) {
            tracing::info!("Rejected non-XML file: {}", file.name);
            self.notice = Some(Notice::error(MSG_NOT_XML));
            return false;
        }

        tracing::info!("Selected {} ({} bytes)", file.name, file.size);
        self.state = UploadState::FileSelected(file);
        self.notice = None;
        true
    }

    /// Selection from a typed or dropped path; the name is checked before the disk
    pub fn select_path(&mut self, raw: &str) -> bool {
        let path = normalize_dropped_path(raw);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !accepts_file_name(&name) {
            self.notice = Some(Notice::error(MSG_NOT_XML));
            return false;
        }

        match SelectedFile::from_path(&path) {
            Ok(file) => self.select_file(file),
            Err(e) => {
                tracing::warn!("Cannot select {}: {}", path.display(), e);
                self.notice = Some(Notice::error(e.to_string()));
                false
            }
        }
    }

    /// Picker: commit the typed path
    pub fn commit_path_input(&mut self) -> bool {
        let raw = std::mem::take(&mut self.path_input);
        self.editing = false;
        if raw.trim().is_empty() {
            return false;
        }
        self.select_path(&raw)
    }

    pub fn clear(&mut self) {
        self.state = UploadState::Idle;
        self.notice = None;
        self.path_input.clear();
    }

    /// Starts an upload, returning the file to send. `None` when there is
    /// nothing to send or an upload is already in flight.
    pub fn submit(&mut self, key: RequestKey) -> Option<SelectedFile> {
        if let Some(pending) = &self.in_flight {
            tracing::debug!("Upload {:?} still in flight, not resubmitting", pending);
            return None;
        }

        let file = match &self.state {
            UploadState::Idle => {
                self.notice = Some(Notice::error(MSG_NO_FILE));
                return None;
            }
            UploadState::Uploading(_) => return None,
            UploadState::FileSelected(file)
            | UploadState::Succeeded { file, .. }
            | UploadState::Failed { file } => file.clone(),
        };

        tracing::info!("Uploading {}", file.name);
        self.state = UploadState::Uploading(file.clone());
        self.in_flight = Some(key);
        self.notice = Some(Notice::info(MSG_UPLOADING));
        Some(file)
    }

    /// Applies a settled upload. Returns false for a stale key, or when the
    /// selection changed while it was in flight (the result is then dropped).
    pub fn finish(&mut self, key: &RequestKey, result: Result<UploadResponse, ClientError>) -> bool {
        if self.in_flight.as_ref() != Some(key) {
            return false;
        }
        self.in_flight = None;

        let file = match &self.state {
            UploadState::Uploading(file) => file.clone(),
            _ => {
                tracing::info!("Upload settled after the selection changed; result dropped");
                return false;
            }
        };

        match result {
            Ok(response) => {
                self.notice = Some(Notice::success(success_message(&response)));
                self.state = UploadState::Succeeded { file, response };
            }
            Err(e) => {
                tracing::warn!("Upload of {} failed: {}", file.name, e);
                self.notice = Some(Notice::error(failure_message(&e)));
                self.state = UploadState::Failed { file };
            }
        }
        true
    }

    /// Summary card under the message once the upload succeeded
    pub fn summary_lines(&self) -> Vec<ViewLine> {
        let Some(response) = self.response() else {
            return Vec::new();
        };

        let count = |value: Option<f64>| number_text(value.unwrap_or(0.0));
        let mut lines = vec![
            ViewLine::text("Report Summary:", Tone::Default),
            ViewLine::new()
                .push("Total Accounts: ", Tone::Muted)
                .push_strong(count(response.accounts_count), Tone::Accent),
            ViewLine::new()
                .push("Credit Cards: ", Tone::Muted)
                .push_strong(count(response.credit_cards_count), Tone::Accent),
        ];
        if let Some(route) = self.report_route() {
            lines.push(
                ViewLine::new()
                    .push_strong("View Full Report →", Tone::Accent)
                    .push(format!("  {}", route.path()), Tone::Muted),
            );
        }
        lines
    }
}

pub fn success_message(response: &UploadResponse) -> String {
    let name = non_empty(response.name.as_deref()).unwrap_or(PLACEHOLDER);
    let score = match response.credit_score {
        Some(score) if score != 0.0 && !score.is_nan() => number_text(score),
        _ => "N/A".to_string(),
    };
    format!("Successfully uploaded for {}! Credit Score: {}", name, score)
}

pub fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Status { message, .. } => non_empty(message.as_deref())
            .unwrap_or(MSG_UPLOAD_FAILED)
            .to_string(),
        ClientError::File(detail) => format!("Could not read file: {}", detail),
        ClientError::Network(_) | ClientError::Decode(_) => MSG_NETWORK.to_string(),
    }
}
