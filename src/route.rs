// 🧭 Routes - the client's three screens and the two navigation entries

use std::fmt;

/// Client-visible routes: `/`, `/reports`, `/reports/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Reports,
    ReportDetail(String),
}

impl Route {
    /// Resolve a path; unknown paths resolve to nothing
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');

        if trimmed.is_empty() {
            return Some(Route::Upload);
        }
        if trimmed == "/reports" {
            return Some(Route::Reports);
        }

        let id = trimmed.strip_prefix("/reports/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        let decoded = urlencoding::decode(id)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| id.to_string());
        Some(Route::ReportDetail(decoded))
    }

    /// Unknown paths fall back to the upload screen
    pub fn parse_or_default(path: &str) -> Route {
        Route::parse(path).unwrap_or(Route::Upload)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Upload => "/".to_string(),
            Route::Reports => "/reports".to_string(),
            Route::ReportDetail(id) => format!("/reports/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Upload,
    Reports,
}

impl NavTab {
    pub const ALL: [NavTab; 2] = [NavTab::Upload, NavTab::Reports];

    pub fn label(&self) -> &'static str {
        match self {
            NavTab::Upload => "Upload",
            NavTab::Reports => "Reports",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NavTab::Upload => "📤",
            NavTab::Reports => "📋",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            NavTab::Upload => Route::Upload,
            NavTab::Reports => Route::Reports,
        }
    }

    /// Exact match for the upload entry, prefix match for the reports area
    pub fn is_active(&self, current_path: &str) -> bool {
        match self {
            NavTab::Upload => current_path == "/",
            NavTab::Reports => current_path.starts_with("/reports"),
        }
    }

    pub fn active_for(current_path: &str) -> Option<NavTab> {
        NavTab::ALL.into_iter().find(|tab| tab.is_active(current_path))
    }

    pub fn next(&self) -> Self {
        match self {
            NavTab::Upload => NavTab::Reports,
            NavTab::Reports => NavTab::Upload,
        }
    }

    pub fn previous(&self) -> Self {
        // two entries: previous and next coincide
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Upload));
        assert_eq!(Route::parse(""), Some(Route::Upload));
        assert_eq!(Route::parse("/reports"), Some(Route::Reports));
        assert_eq!(Route::parse("/reports/"), Some(Route::Reports));
        assert_eq!(
            Route::parse("/reports/abc123"),
            Some(Route::ReportDetail("abc123".to_string()))
        );
        assert_eq!(
            Route::parse("/reports/abc123?tab=accounts"),
            Some(Route::ReportDetail("abc123".to_string()))
        );
        assert_eq!(Route::parse("/reports/a/b"), None);
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse_or_default("/settings"), Route::Upload);
    }

    #[test]
    fn test_route_paths_round_trip_encoded_ids() {
        let route = Route::ReportDetail("a b/c".to_string());
        assert_eq!(route.path(), "/reports/a%20b%2Fc");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn test_nav_highlight() {
        assert!(NavTab::Upload.is_active("/"));
        assert!(!NavTab::Upload.is_active("/reports"));
        assert!(NavTab::Reports.is_active("/reports"));
        assert!(NavTab::Reports.is_active("/reports/abc123"));
        assert!(!NavTab::Reports.is_active("/"));

        assert_eq!(NavTab::active_for("/"), Some(NavTab::Upload));
        assert_eq!(NavTab::active_for("/reports/abc123"), Some(NavTab::Reports));
        assert_eq!(NavTab::active_for("/other"), None);
    }

    #[test]
    fn test_nav_cycle() {
        assert_eq!(NavTab::Upload.next(), NavTab::Reports);
        assert_eq!(NavTab::Reports.next(), NavTab::Upload);
        assert_eq!(NavTab::Upload.previous(), NavTab::Reports);
    }
}
