// 🖥️ Screens - per-screen state machines
// Each screen owns its fetch result; state lives from mount to unmount.

pub mod report_detail;
pub mod report_list;
pub mod upload;

/// Identifies one issued request. A screen accepts a completion only when
/// the key matches the one it is waiting on; anything else is stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub ticket: u64,
    /// Identifier the request targets (report id for detail fetches)
    pub target: Option<String>,
}

impl RequestKey {
    pub fn new(ticket: u64, target: Option<String>) -> Self {
        Self { ticket, target }
    }
}

pub use report_detail::{DetailState, DetailView, ReportDetailScreen};
pub use report_list::{EmptyState, ListState, ReportCard, ReportListScreen};
pub use upload::{SelectedFile, UploadScreen, UploadState};
