// 🇮🇳 Display Formatting - en-IN numbers, rupee amounts and dates
// Mirrors what an en-IN locale renders: lakh/crore digit grouping,
// "19 Oct 2026" short dates, "19/10/2026, 3:04:05 pm" timestamps.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Shown wherever a field is missing
pub const PLACEHOLDER: &str = "—";

/// en-IN abbreviated month names (note "Sept")
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

// ============================================================================
// TEXT
// ============================================================================

/// Text value or the placeholder; empty strings count as missing
pub fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Present and non-empty
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

// ============================================================================
// NUMBERS
// ============================================================================

/// Plain number: integral values without decimals, others as-is
pub fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn number_or_placeholder(value: Option<f64>) -> String {
    value.map(number_text).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// en-IN grouping with at most `max_fraction` fraction digits, trailing zeros trimmed
pub fn indian_number(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let scale = 10f64.powi(max_fraction as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let rendered = format!("{:.*}", max_fraction, rounded);
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (rendered.clone(), String::new()),
    };

    let grouped = group_indian(&int_part);
    let negative = value < 0.0 && (int_part.chars().any(|c| c != '0') || !frac_part.is_empty());

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push_str(&grouped);
    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(&frac_part);
    }
    result
}

/// "1234567" -> "12,34,567"
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Whole-rupee amount used on list cards: "₹12,34,567"
pub fn rupees_whole(amount: f64) -> String {
    format!("₹{}", indian_number(amount, 0))
}

/// Rupee amount with locale-default precision, or the placeholder
pub fn rupees(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => format!("₹{}", indian_number(value, 3)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// File size in KB with two decimals
pub fn kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

// ============================================================================
// DATES
// ============================================================================

/// Short date in local time: "19 Oct 2026"
pub fn short_date(raw: Option<&str>) -> String {
    short_date_in(raw, &Local)
}

/// Date and time in local time: "19/10/2026, 3:04:05 pm"
pub fn timestamp(raw: Option<&str>) -> String {
    timestamp_in(raw, &Local)
}

pub fn short_date_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String {
    match raw.and_then(parse_timestamp) {
        Some(instant) => {
            let local = instant.with_timezone(tz).naive_local();
            format!("{} {} {}", local.day(), MONTHS[local.month0() as usize], local.year())
        }
        None => PLACEHOLDER.to_string(),
    }
}

pub fn timestamp_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String {
    match raw.and_then(parse_timestamp) {
        Some(instant) => {
            let local = instant.with_timezone(tz).naive_local();
            local.format("%-d/%-m/%Y, %-I:%M:%S %P").to_string()
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// Accepts RFC 3339, naive "YYYY-MM-DDTHH:MM:SS" (taken as UTC) or a bare date
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let utc = FixedOffset::east_opt(0)?;

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return utc.from_local_datetime(&naive).single();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single();
    }
    None
}
