// 📋 Report List Screen - fetch once, filter locally, open a report

use crate::error::ClientError;
use crate::format::{non_empty, number_text, rupees_whole, short_date, PLACEHOLDER};
use crate::models::Report;
use crate::route::Route;
use crate::score::ScoreTier;
use crate::screens::upload::MSG_NETWORK;
use crate::screens::RequestKey;
use crate::search::filter_reports;

pub const MSG_FETCH_FAILED: &str = "Failed to fetch reports";
pub const MSG_UNEXPECTED: &str = "Unexpected response from server";

/// Rows moved by PageUp/PageDown
const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading { key: RequestKey },
    Loaded(Vec<Report>),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoReports,
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoReports => "No reports uploaded yet",
            EmptyState::NoMatches => "No reports found",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EmptyState::NoReports => "Upload your first credit report to get started",
            EmptyState::NoMatches => "Try adjusting your search query",
        }
    }

    /// Only the "nothing uploaded" state points at the upload screen
    pub fn call_to_action(&self) -> Option<&'static str> {
        match self {
            EmptyState::NoReports => Some("Upload Report"),
            EmptyState::NoMatches => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportListScreen {
    state: ListState,
    query: String,
    selected: usize,
    pub search_focused: bool,
}

impl ReportListScreen {
    /// Mounts in `loading`; the caller issues the fetch for `key`
    pub fn new(key: RequestKey) -> Self {
        Self {
            state: ListState::Loading { key },
            query: String::new(),
            selected: 0,
            search_focused: false,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Manual retry, only offered from the error state
    pub fn retry(&mut self, key: RequestKey) -> bool {
        if !matches!(self.state, ListState::Error(_)) {
            return false;
        }
        tracing::info!("Retrying report list fetch");
        self.state = ListState::Loading { key };
        true
    }

    /// Applies a settled fetch. Returns false for a stale key.
    pub fn finish(&mut self, key: &RequestKey, result: Result<Vec<Report>, ClientError>) -> bool {
        match &self.state {
            ListState::Loading { key: pending } if pending == key => {}
            _ => return false,
        }

        self.state = match result {
            Ok(reports) => {
                tracing::info!("Loaded {} reports", reports.len());
                ListState::Loaded(reports)
            }
            Err(e) => {
                tracing::warn!("Report list fetch failed: {}", e);
                ListState::Error(fetch_error_message(&e))
            }
        };
        self.selected = 0;
        true
    }

    pub fn reports(&self) -> &[Report] {
        match &self.state {
            ListState::Loaded(reports) => reports,
            _ => &[],
        }
    }

    /// Total before filtering
    pub fn total(&self) -> usize {
        self.reports().len()
    }

    pub fn visible(&self) -> Vec<&Report> {
        filter_reports(self.reports(), &self.query)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !matches!(self.state, ListState::Loaded(_)) || !self.visible().is_empty() {
            return None;
        }
        if self.query.is_empty() {
            Some(EmptyState::NoReports)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    // ------------------------------------------------------------------
    // Search box
    // ------------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    // ------------------------------------------------------------------
    // Selection over the visible entries
    // ------------------------------------------------------------------

    pub fn selected_index(&self) -> Option<usize> {
        let len = self.visible().len();
        if len == 0 {
            None
        } else {
            Some(self.selected.min(len - 1))
        }
    }

    pub fn selected_report(&self) -> Option<&Report> {
        let index = self.selected_index()?;
        self.visible().get(index).copied()
    }

    pub fn selected_route(&self) -> Option<Route> {
        let id = non_empty(self.selected_report()?.id.as_deref())?;
        Some(Route::ReportDetail(id.to_string()))
    }

    pub fn next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.selected.min(len - 1);
        self.selected = if current >= len - 1 { 0 } else { current + 1 };
    }

    pub fn previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.selected.min(len - 1);
        self.selected = if current == 0 { len - 1 } else { current - 1 };
    }

    pub fn page_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + PAGE_STEP).min(len - 1);
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_STEP);
    }

    pub fn home(&mut self) {
        self.selected = 0;
    }

    pub fn end(&mut self) {
        self.selected = self.visible().len().saturating_sub(1);
    }
}

pub fn fetch_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Status { .. } => MSG_FETCH_FAILED.to_string(),
        ClientError::Network(_) => MSG_NETWORK.to_string(),
        ClientError::Decode(_) => MSG_UNEXPECTED.to_string(),
        other => other.to_string(),
    }
}

/// "1 report uploaded" / "3 reports uploaded"
pub fn count_caption(count: usize) -> String {
    format!("{} {} uploaded", count, if count == 1 { "report" } else { "reports" })
}

// ============================================================================
// CARD
// ============================================================================

/// Display fields of one report entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub name: String,
    pub pan: Option<String>,
    pub uploaded: String,
    pub total_accounts: String,
    pub credit_cards: String,
    pub balance: String,
    pub score: String,
    pub tier: ScoreTier,
}

impl ReportCard {
    pub fn from_report(report: &Report) -> Self {
        let score = report.headline_score();
        let tier = ScoreTier::from_score(score);
        Self {
            name: non_empty(report.name.as_deref()).unwrap_or(PLACEHOLDER).to_string(),
            pan: non_empty(report.pan.as_deref()).map(String::from),
            uploaded: short_date(report.uploaded_at.as_deref()),
            total_accounts: number_text(report.total_accounts.unwrap_or(0.0)),
            credit_cards: number_text(report.total_credit_cards.unwrap_or(0.0)),
            balance: rupees_whole(report.current_balance.unwrap_or(0.0)),
            score: match tier {
                ScoreTier::Unrated => PLACEHOLDER.to_string(),
                _ => score.map(number_text).unwrap_or_else(|| PLACEHOLDER.to_string()),
            },
            tier,
        }
    }
}
