// 🔍 Report Detail Screen - one report, every section rendered defensively
//
// Rendering is total over the partial record: any missing field shows the
// placeholder, any missing group renders its empty form.

use crate::error::ClientError;
use crate::format::{
    non_empty, number_or_placeholder, number_text, rupees, text_or_placeholder, timestamp,
    PLACEHOLDER,
};
use crate::models::{Account, Enquiry, Report};
use crate::score::{ScoreBand, Swatch};
use crate::screens::upload::MSG_NETWORK;
use crate::screens::RequestKey;
use crate::view::{info_row, info_row_toned, Section, Tone, ViewLine};

pub const MSG_FETCH_FAILED: &str = "Failed to fetch report";
pub const MSG_NOT_FOUND: &str = "Report not found";
pub const MSG_LOADING: &str = "Loading report...";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading { key: RequestKey },
    Error(String),
    NotFound,
    Loaded(Box<Report>),
}

#[derive(Debug, Clone)]
pub struct ReportDetailScreen {
    id: String,
    state: DetailState,
    /// First visible body line, at most `max_scroll`
    pub scroll: u16,
    body_lines: usize,
}

impl ReportDetailScreen {
    /// Mounts in `loading` for `id`; a different id means a new screen
    pub fn new(id: impl Into<String>, key: RequestKey) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading { key },
            scroll: 0,
            body_lines: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            DetailState::Loaded(report) => Some(&**report),
            _ => None,
        }
    }

    /// Applies a settled fetch. `Ok(None)` is an empty or `null` body.
    /// Returns false for a stale key.
    pub fn finish(&mut self, key: &RequestKey, result: Result<Option<Report>, ClientError>) -> bool {
        match &self.state {
            DetailState::Loading { key: pending } if pending == key => {}
            _ => return false,
        }

        self.state = match result {
            Ok(Some(report)) => {
                tracing::info!("Loaded report {}", self.id);
                self.body_lines = detail_view(&report).line_count();
                DetailState::Loaded(Box::new(report))
            }
            Ok(None) => {
                tracing::info!("Report {} not found", self.id);
                DetailState::NotFound
            }
            Err(e) => {
                tracing::warn!("Report {} fetch failed: {}", self.id, e);
                DetailState::Error(fetch_error_message(&e))
            }
        };
        self.scroll = 0;
        true
    }

    /// Offset of the last body line; 0 until a report is loaded
    pub fn max_scroll(&self) -> u16 {
        u16::try_from(self.body_lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }
}

pub fn fetch_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Status { .. } | ClientError::Decode(_) => MSG_FETCH_FAILED.to_string(),
        ClientError::Network(_) => MSG_NETWORK.to_string(),
        other => other.to_string(),
    }
}

/// Inline error line: "Error: Failed to fetch report"
pub fn error_line(message: &str) -> String {
    format!("Error: {}", message)
}

// ============================================================================
// VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub heading: String,
    /// Report info banner; only when metadata is present
    pub info_line: Option<ViewLine>,
    pub sections: Vec<Section>,
}

impl DetailView {
    pub fn line_count(&self) -> usize {
        let info = usize::from(self.info_line.is_some());
        let body: usize = self.sections.iter().map(|s| s.lines.len() + 2).sum();
        1 + info + body
    }

    pub fn plain_text(&self) -> String {
        let mut out = format!("{}\n", self.heading);
        if let Some(info) = &self.info_line {
            out.push_str(&info.plain_text());
            out.push('\n');
        }
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.plain_text());
        }
        out
    }
}

pub fn detail_view(report: &Report) -> DetailView {
    let name = report.basic_details.as_ref().and_then(|b| b.name.as_deref());

    DetailView {
        heading: format!("Credit Report - {}", text_or_placeholder(name)),
        info_line: report_info_line(report),
        sections: vec![
            personal_section(report),
            score_section(report),
            summary_section(report),
            cards_section(report),
            addresses_section(report),
            accounts_section(report),
            enquiries_section(&report.credit_enquiries),
        ],
    }
}

fn report_info_line(report: &Report) -> Option<ViewLine> {
    let meta = report.metadata.as_ref()?;
    let text = format!(
        "Generated on {} at {} | Report #{} | Version: {} | Uploaded: {}",
        text_or_placeholder(meta.report_date.as_deref()),
        text_or_placeholder(meta.report_time.as_deref()),
        text_or_placeholder(meta.report_number.as_deref()),
        text_or_placeholder(meta.version.as_deref()),
        timestamp(report.uploaded_at.as_deref()),
    );
    Some(
        ViewLine::new()
            .push_strong("Report Info: ", Tone::Info)
            .push(text, Tone::Info),
    )
}

fn personal_section(report: &Report) -> Section {
    let basic = report.basic_details.clone().unwrap_or_default();
    let mut section = Section::new("Personal Information");
    section
        .line(info_row("Full Name", basic.name.as_deref()))
        .line(info_row("Date of Birth", basic.date_of_birth.as_deref()))
        .line(info_row("Gender", basic.gender.as_deref()))
        .line(info_row("Mobile", basic.mobile.as_deref()))
        .line(info_row("Email", basic.email.as_deref()))
        .line(info_row("PAN", basic.pan.as_deref()))
        .line(info_row("Passport", basic.passport_number.as_deref()))
        .line(info_row("Voter ID", basic.voter_id.as_deref()))
        .line(info_row("Driving License", basic.driving_license.as_deref()))
        .line(info_row("UID/Aadhaar", basic.uid_number.as_deref()));
    section
}

fn score_section(report: &Report) -> Section {
    let details = report.score_details().cloned().unwrap_or_default();
    let band = ScoreBand::from_score(details.bureau_score);
    let score_text = match band {
        ScoreBand::Unrated => PLACEHOLDER.to_string(),
        _ => number_or_placeholder(details.bureau_score),
    };

    let mut section = Section::new("Credit Score");
    section.line(
        ViewLine::new()
            .push("Score: ", Tone::Muted)
            .push_strong(score_text, Tone::Score(band.swatch())),
    );
    if let Some(confidence) = non_empty(details.confidence_level.as_deref()) {
        section.line(ViewLine::text(format!("Confidence: {}", confidence), Tone::Muted));
    }
    section
        .line(info_row("Score Name", details.score_name.as_deref()))
        .line(info_row("Score Date", details.score_date.as_deref()))
        .line(info_row("Scorecard", details.score_card_name.as_deref()));
    if !details.reason_codes.is_empty() {
        section.line(
            ViewLine::new()
                .push_strong("Reason Codes: ", Tone::Default)
                .push(details.reason_codes.join(", "), Tone::Default),
        );
    }
    section
}

fn enquiry_count(value: Option<f64>) -> String {
    format!("{} enquiries", number_or_placeholder(value))
}

fn summary_section(report: &Report) -> Section {
    let summary = report.report_summary.clone().unwrap_or_default();
    let mut section = Section::new("Account Summary");
    section
        .line(info_row_toned("Total Accounts", &number_or_placeholder(summary.total_accounts), Tone::Default))
        .line(info_row_toned(
            "Active Accounts",
            &number_or_placeholder(summary.active_accounts),
            Tone::Score(Swatch::Emerald),
        ))
        .line(info_row_toned("Closed Accounts", &number_or_placeholder(summary.closed_accounts), Tone::Default))
        .line(info_row_toned("Default Accounts", &number_or_placeholder(summary.default_accounts), Tone::Danger))
        .line(ViewLine::blank())
        .line(info_row_toned("Total Balance", &rupees(summary.current_balance), Tone::Default))
        .line(info_row_toned("Secured Amount", &rupees(summary.secured_amount), Tone::Default))
        .line(info_row_toned("Unsecured Amount", &rupees(summary.unsecured_amount), Tone::Default))
        .line(ViewLine::blank())
        .line(info_row_toned("Last 7 Days", &enquiry_count(summary.last_7_days_enquiries), Tone::Default))
        .line(info_row_toned("Last 30 Days", &enquiry_count(summary.last_30_days_enquiries), Tone::Default))
        .line(info_row_toned("Last 90 Days", &enquiry_count(summary.last_90_days_enquiries), Tone::Default))
        .line(info_row_toned("Last 180 Days", &enquiry_count(summary.last_180_days_enquiries), Tone::Default));
    section
}

fn cards_section(report: &Report) -> Section {
    let info = report.credit_accounts_information.clone().unwrap_or_default();
    let mut section = Section::new("Credit Cards & Banks");
    section.line(info_row_toned(
        "Total Credit Cards",
        &number_or_placeholder(info.total_credit_cards),
        Tone::Default,
    ));
    if !info.banks_of_credit_cards.is_empty() {
        section.line(ViewLine::text("Banks:", Tone::Muted));
        let mut chips = ViewLine::new();
        for (i, bank) in info.banks_of_credit_cards.iter().enumerate() {
            if i > 0 {
                chips = chips.push("  ", Tone::Default);
            }
            chips = chips.push(format!("[{}]", bank), Tone::Info);
        }
        section.line(chips);
    }
    section
}

fn addresses_section(report: &Report) -> Section {
    let addresses = report
        .credit_accounts_information
        .as_ref()
        .map(|info| info.addresses.as_slice())
        .unwrap_or(&[]);

    let mut section = Section::new("Addresses");
    if addresses.is_empty() {
        section.line(ViewLine::text("No addresses found", Tone::Muted));
    }
    for address in addresses {
        section.line(ViewLine::text(format!("• {}", address), Tone::Default));
    }
    section
}

fn accounts_section(report: &Report) -> Section {
    let accounts = report.accounts();
    let mut section = Section::new(format!("Accounts ({})", accounts.len()));
    if accounts.is_empty() {
        section.line(ViewLine::text("No accounts found", Tone::Muted));
    }
    for (i, account) in accounts.iter().enumerate() {
        if i > 0 {
            section.line(ViewLine::blank());
        }
        for line in account_lines(account) {
            section.line(line);
        }
    }
    section
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

pub fn account_lines(account: &Account) -> Vec<ViewLine> {
    let mut lines = Vec::new();

    lines.push(ViewLine::new().push_strong(
        text_or_placeholder(account.subscriber_name.as_deref()),
        Tone::Default,
    ));
    lines.push(ViewLine::text(
        format!(
            "{} • {} • {}",
            text_or_placeholder(account.account_type.as_deref()),
            text_or_placeholder(account.portfolio_type.as_deref()),
            text_or_placeholder(account.ownership_indicator.as_deref()),
        ),
        Tone::Muted,
    ));
    lines.push(info_row_toned("Balance", &rupees(account.current_balance), Tone::Default));
    lines.push(match positive(account.amount_overdue) {
        Some(overdue) => ViewLine::new().push_strong(format!("Overdue: {}", rupees(Some(overdue))), Tone::Danger),
        None => ViewLine::new().push_strong("No Dues", Tone::Score(Swatch::Emerald)),
    });

    lines.push(info_row("Account #", account.account_number.as_deref()));
    lines.push(info_row("Status", account.account_status.as_deref()));
    lines.push(info_row_toned("Credit Limit", &rupees(account.credit_limit), Tone::Default));
    lines.push(info_row("Open Date", account.open_date.as_deref()));
    lines.push(info_row("Reported", account.date_reported.as_deref()));
    if let Some(closed) = non_empty(account.date_closed.as_deref()) {
        lines.push(info_row("Closed", Some(closed)));
    }
    if let Some(emi) = positive(account.emi) {
        lines.push(info_row_toned("EMI", &rupees(Some(emi)), Tone::Default));
    }
    if let Some(rate) = positive(account.interest_rate) {
        lines.push(info_row_toned("Interest Rate", &format!("{}%", number_text(rate)), Tone::Default));
    }
    if let Some(tenure) = positive(account.repayment_tenure) {
        lines.push(info_row_toned("Tenure", &format!("{} months", number_text(tenure)), Tone::Default));
    }
    let rating = non_empty(account.payment_rating_description.as_deref())
        .or_else(|| non_empty(account.payment_rating.as_deref()));
    lines.push(info_row("Payment Rating", rating));
    if account.suit_filed.as_deref() == Some("Yes") {
        lines.push(info_row_toned("Suit Filed", "Yes", Tone::Danger));
    }

    if let Some(history) = non_empty(account.payment_history.as_deref()) {
        lines.push(
            ViewLine::new()
                .push_strong("Payment History: ", Tone::Muted)
                .push(history, Tone::Muted),
        );
    }
    if let Some(holder) = account.holder_details.as_ref() {
        if let Some(full_name) = non_empty(holder.full_name.as_deref()) {
            let mut text = full_name.to_string();
            if let Some(pan) = non_empty(holder.pan.as_deref()) {
                text.push_str(&format!(" (PAN: {})", pan));
            }
            lines.push(
                ViewLine::new()
                    .push_strong("Holder: ", Tone::Muted)
                    .push(text, Tone::Muted),
            );
        }
    }
    if let Some(address) = account
        .address_details
        .as_ref()
        .and_then(|a| non_empty(a.full_address.as_deref()))
    {
        lines.push(
            ViewLine::new()
                .push_strong("Address: ", Tone::Muted)
                .push(address, Tone::Muted),
        );
    }

    lines
}

fn enquiries_section(enquiries: &[Enquiry]) -> Section {
    let mut section = Section::new(format!("Credit Enquiries ({})", enquiries.len()));
    if enquiries.is_empty() {
        section.line(ViewLine::text("No recent enquiries", Tone::Muted));
    }
    for enquiry in enquiries {
        section.line(
            ViewLine::new()
                .push_strong(text_or_placeholder(enquiry.subscriber.as_deref()), Tone::Default)
                .push("  ", Tone::Default)
                .push(rupees(enquiry.enquiry_amount), Tone::Default),
        );
        section.line(ViewLine::text(
            format!(
                "{} | {}",
                text_or_placeholder(enquiry.enquiry_purpose.as_deref()),
                text_or_placeholder(enquiry.enquiry_date.as_deref()),
            ),
            Tone::Muted,
        ));
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(ticket: u64, id: &str) -> RequestKey {
        RequestKey::new(ticket, Some(id.to_string()))
    }

    fn full_report() -> Report {
        serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "uploadedAt": "2026-10-19T09:30:00Z",
            "basicDetails": { "name": "Jane Doe", "pan": "ABCDE1234F", "voterID": "VOT123" },
            "creditScore": {
                "bureauScore": 720,
                "confidenceLevel": "High",
                "reasonCodes": ["R1", "R2"]
            },
            "reportSummary": {
                "totalAccounts": 4,
                "activeAccounts": 3,
                "currentBalance": 125000,
                "last7DaysEnquiries": 0,
                "last30DaysEnquiries": 2
            },
            "creditAccountsInformation": {
                "totalCreditCards": 2,
                "banksOfCreditCards": ["HDFC", "ICICI"],
                "addresses": [],
                "accounts": [{
                    "subscriberName": "HDFC Bank",
                    "accountType": "Credit Card",
                    "currentBalance": 15000,
                    "amountOverdue": 2500,
                    "interestRate": 0,
                    "repaymentTenure": 36,
                    "paymentRating": "0",
                    "paymentRatingDescription": "Standard",
                    "suitFiled": "Yes",
                    "holderDetails": { "fullName": "Jane Doe", "pan": "ABCDE1234F" }
                }]
            },
            "metadata": { "reportDate": "2026-10-18", "reportTime": "10:15", "reportNumber": "R-77", "version": "V2" }
        }))
        .unwrap()
    }

    fn section<'a>(view: &'a DetailView, prefix: &str) -> &'a Section {
        view.sections.iter().find(|s| s.title.starts_with(prefix)).unwrap()
    }

    fn texts(section: &Section) -> Vec<String> {
        section.lines.iter().map(|l| l.plain_text()).collect()
    }

    #[test]
    fn test_loading_then_loaded() {
        let mut screen = ReportDetailScreen::new("abc123", key(1, "abc123"));
        assert!(screen.report().is_none());
        assert!(screen.finish(&key(1, "abc123"), Ok(Some(full_report()))));
        assert_eq!(screen.report().unwrap().id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_not_found_and_error() {
        let mut screen = ReportDetailScreen::new("gone", key(1, "gone"));
        screen.finish(&key(1, "gone"), Ok(None));
        assert_eq!(screen.state(), &DetailState::NotFound);

        let mut screen = ReportDetailScreen::new("x", key(2, "x"));
        screen.finish(&key(2, "x"), Err(ClientError::Status { status: 500, message: None }));
        assert_eq!(screen.state(), &DetailState::Error(MSG_FETCH_FAILED.into()));
        assert_eq!(error_line(MSG_FETCH_FAILED), "Error: Failed to fetch report");
    }

    #[test]
    fn test_missing_status_is_fetch_failure() {
        let mut screen = ReportDetailScreen::new("gone", key(1, "gone"));
        screen.finish(&key(1, "gone"), Err(ClientError::Status { status: 404, message: None }));
        assert_eq!(screen.state(), &DetailState::Error(MSG_FETCH_FAILED.into()));
    }

    #[test]
    fn test_response_for_other_id_is_stale() {
        let mut screen = ReportDetailScreen::new("second", key(2, "second"));
        assert!(!screen.finish(&key(1, "first"), Ok(Some(full_report()))));
        assert!(matches!(screen.state(), DetailState::Loading { .. }));
    }

    #[test]
    fn test_heading_and_info_line() {
        let view = detail_view(&full_report());
        assert_eq!(view.heading, "Credit Report - Jane Doe");
        let info = view.info_line.unwrap().plain_text();
        assert!(info.starts_with("Report Info: Generated on 2026-10-18 at 10:15 | Report #R-77 | Version: V2 | Uploaded: "));
    }

    #[test]
    fn test_missing_bureau_score_renders_placeholder() {
        let report = Report::default();
        let view = detail_view(&report);
        let score = section(&view, "Credit Score");
        assert_eq!(score.lines[0].plain_text(), format!("Score: {}", PLACEHOLDER));
        assert_eq!(score.lines[0].fragments[1].tone, Tone::Score(Swatch::Neutral));
        assert_eq!(view.heading, format!("Credit Report - {}", PLACEHOLDER));
        assert!(view.info_line.is_none());
    }

    #[test]
    fn test_score_section_uses_three_bands() {
        let view = detail_view(&full_report());
        let score = section(&view, "Credit Score");
        assert_eq!(score.lines[0].plain_text(), "Score: 720");
        assert_eq!(score.lines[0].fragments[1].tone, Tone::Score(Swatch::Amber));
        let lines = texts(score);
        assert!(lines.contains(&"Confidence: High".to_string()));
        assert!(lines.contains(&"Reason Codes: R1, R2".to_string()));
        assert!(lines.contains(&format!("Score Name: {}", PLACEHOLDER)));
    }

    #[test]
    fn test_personal_rows() {
        let view = detail_view(&full_report());
        let personal = texts(section(&view, "Personal Information"));
        assert_eq!(personal.len(), 10);
        assert!(personal.contains(&"Voter ID: VOT123".to_string()));
        assert!(personal.contains(&format!("Gender: {}", PLACEHOLDER)));
    }

    #[test]
    fn test_summary_rows() {
        let view = detail_view(&full_report());
        let summary = texts(section(&view, "Account Summary"));
        assert!(summary.contains(&"Total Balance: ₹1,25,000".to_string()));
        assert!(summary.contains(&format!("Secured Amount: {}", PLACEHOLDER)));
        assert!(summary.contains(&"Last 7 Days: 0 enquiries".to_string()));
        assert!(summary.contains(&"Last 30 Days: 2 enquiries".to_string()));
    }

    #[test]
    fn test_account_lines() {
        let view = detail_view(&full_report());
        let accounts = section(&view, "Accounts");
        assert_eq!(accounts.title, "Accounts (1)");
        let lines = texts(accounts);
        assert!(lines.contains(&"HDFC Bank".to_string()));
        assert!(lines.contains(&format!("Credit Card • {} • {}", PLACEHOLDER, PLACEHOLDER)));
        assert!(lines.contains(&"Overdue: ₹2,500".to_string()));
        assert!(lines.contains(&"Tenure: 36 months".to_string()));
        assert!(lines.contains(&"Payment Rating: Standard".to_string()));
        assert!(lines.contains(&"Suit Filed: Yes".to_string()));
        assert!(lines.contains(&"Holder: Jane Doe (PAN: ABCDE1234F)".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Interest Rate")));
        assert!(!lines.iter().any(|l| l.starts_with("Closed")));
    }

    #[test]
    fn test_no_dues_when_nothing_overdue() {
        let lines: Vec<String> = account_lines(&Account::default()).iter().map(|l| l.plain_text()).collect();
        assert!(lines.contains(&"No Dues".to_string()));
        assert!(lines.contains(&format!("Payment Rating: {}", PLACEHOLDER)));
    }

    #[test]
    fn test_empty_groups() {
        let view = detail_view(&Report::default());
        assert_eq!(texts(section(&view, "Addresses")), vec!["No addresses found"]);
        assert_eq!(section(&view, "Accounts").title, "Accounts (0)");
        assert_eq!(texts(section(&view, "Accounts")), vec!["No accounts found"]);
        assert_eq!(section(&view, "Credit Enquiries").title, "Credit Enquiries (0)");
        assert_eq!(texts(section(&view, "Credit Enquiries")), vec!["No recent enquiries"]);
    }

    #[test]
    fn test_banks_listed() {
        let view = detail_view(&full_report());
        let cards = texts(section(&view, "Credit Cards & Banks"));
        assert_eq!(cards[0], "Total Credit Cards: 2");
        assert_eq!(cards[2], "[HDFC]  [ICICI]");
    }

    fn loaded(id: &str) -> ReportDetailScreen {
        let mut screen = ReportDetailScreen::new(id, key(1, id));
        screen.finish(&key(1, id), Ok(Some(full_report())));
        screen
    }

    #[test]
    fn test_scroll_saturates() {
        let mut screen = loaded("a");
        screen.scroll_up(5);
        assert_eq!(screen.scroll, 0);
        screen.scroll_down(12);
        screen.scroll_up(2);
        assert_eq!(screen.scroll, 10);
        screen.scroll_home();
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn test_scroll_stops_at_last_line() {
        let mut screen = loaded("a");
        let last = (detail_view(&full_report()).line_count() - 1) as u16;
        assert_eq!(screen.max_scroll(), last);

        for _ in 0..100 {
            screen.scroll_down(10);
        }
        assert_eq!(screen.scroll, last);
        screen.scroll_up(1);
        assert_eq!(screen.scroll, last - 1);
    }

    #[test]
    fn test_scroll_pinned_before_load() {
        let mut screen = ReportDetailScreen::new("a", key(1, "a"));
        screen.scroll_down(10);
        assert_eq!(screen.scroll, 0);
    }
}
