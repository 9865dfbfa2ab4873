// 🔍 Report Search - client-side filter over the loaded collection

use crate::models::Report;

/// Case-insensitive substring match against the subject name or PAN
pub fn matches(report: &Report, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    contains(report.name.as_deref(), &needle) || contains(report.pan.as_deref(), &needle)
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Reports whose name or PAN contains `query`; an empty query keeps everything.
/// Order is preserved, so filtering an already filtered set is a no-op.
pub fn filter_reports<'a, I>(reports: I, query: &str) -> Vec<&'a Report>
where
    I: IntoIterator<Item = &'a Report>,
{
    reports
        .into_iter()
        .filter(|report| matches(report, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: Option<&str>, pan: Option<&str>) -> Report {
        Report {
            name: name.map(String::from),
            pan: pan.map(String::from),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Report> {
        vec![
            report(Some("Jane Doe"), Some("ABCDE1234F")),
            report(Some("John Smith"), Some("PQRSX9876Z")),
            report(Some("Asha Rao"), None),
            report(None, Some("JANEX0000A")),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let reports = sample();
        let filtered = filter_reports(&reports, "");
        assert_eq!(filtered.len(), reports.len());
        for (a, b) in filtered.iter().zip(reports.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let reports = sample();
        let filtered = filter_reports(&reports, "jAnE");
        let names: Vec<_> = filtered.iter().map(|r| r.name.clone()).collect();
        // name match and PAN match
        assert_eq!(names, vec![Some("Jane Doe".to_string()), None]);
    }

    #[test]
    fn test_matches_pan() {
        let reports = sample();
        let filtered = filter_reports(&reports, "x9876");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_no_match() {
        let reports = sample();
        assert!(filter_reports(&reports, "zzz").is_empty());
    }

    #[test]
    fn test_result_is_exact_subset() {
        let reports = sample();
        for query in ["a", "o", "1234", " ", "rao"] {
            let filtered = filter_reports(&reports, query);
            let expected: Vec<&Report> = reports
                .iter()
                .filter(|r| {
                    let q = query.to_lowercase();
                    r.name.as_ref().map_or(false, |n| n.to_lowercase().contains(&q))
                        || r.pan.as_ref().map_or(false, |p| p.to_lowercase().contains(&q))
                })
                .collect();
            assert_eq!(filtered, expected, "query {:?}", query);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let reports = sample();
        for query in ["", "j", "doe", "0000"] {
            let once = filter_reports(&reports, query);
            let twice = filter_reports(once.iter().copied(), query);
            assert_eq!(once, twice);
        }
    }
}
