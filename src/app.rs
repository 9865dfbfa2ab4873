// 🧭 App Shell - current route, the mounted screen and its requests
//
// Screen state lives from mount to unmount. Every transition that needs the
// network returns an `Effect`; its outcome comes back as a `Msg`.

use crate::error::ClientError;
use crate::models::{Report, UploadResponse};
use crate::route::{NavTab, Route};
use crate::screens::{ReportDetailScreen, ReportListScreen, RequestKey, SelectedFile, UploadScreen};

pub const BRAND: &str = "CreditSea";
pub const TAGLINE: &str = "Soft Pull Reports";
pub const FOOTER: &str = "🔒 Secure Credit Report Analysis Platform";

#[derive(Debug, Clone)]
pub enum Screen {
    Upload(UploadScreen),
    Reports(ReportListScreen),
    Detail(ReportDetailScreen),
}

/// Network work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchReports(RequestKey),
    /// Key target carries the report id
    FetchReport(RequestKey),
    Upload(RequestKey, SelectedFile),
}

/// Settled request, routed back to whichever screen issued it
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    ReportsFetched(RequestKey, Result<Vec<Report>, ClientError>),
    ReportFetched(RequestKey, Result<Option<Report>, ClientError>),
    Uploaded(RequestKey, Result<UploadResponse, ClientError>),
}

#[derive(Debug)]
pub struct App {
    route: Route,
    pub screen: Screen,
    next_ticket: u64,
    pub should_quit: bool,
}

impl App {
    /// Mounts the screen for `route` and returns its initial fetch
    pub fn start(route: Route) -> (Self, Option<Effect>) {
        let mut app = Self {
            route: Route::Upload,
            screen: Screen::Upload(UploadScreen::new()),
            next_ticket: 0,
            should_quit: false,
        };
        let effect = app.mount(route);
        (app, effect)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_path(&self) -> String {
        self.route.path()
    }

    pub fn active_tab(&self) -> Option<NavTab> {
        NavTab::active_for(&self.current_path())
    }

    fn next_key(&mut self, target: Option<String>) -> RequestKey {
        self.next_ticket += 1;
        RequestKey::new(self.next_ticket, target)
    }

    fn mount(&mut self, route: Route) -> Option<Effect> {
        tracing::info!("Navigating to {}", route);
        let (screen, effect) = match &route {
            Route::Upload => (Screen::Upload(UploadScreen::new()), None),
            Route::Reports => {
                let key = self.next_key(None);
                (
                    Screen::Reports(ReportListScreen::new(key.clone())),
                    Some(Effect::FetchReports(key)),
                )
            }
            Route::ReportDetail(id) => {
                let key = self.next_key(Some(id.clone()));
                (
                    Screen::Detail(ReportDetailScreen::new(id.clone(), key.clone())),
                    Some(Effect::FetchReport(key)),
                )
            }
        };
        self.route = route;
        self.screen = screen;
        effect
    }

    /// Re-selecting the current route keeps the mounted screen as it is
    pub fn navigate(&mut self, route: Route) -> Option<Effect> {
        if route == self.route {
            return None;
        }
        self.mount(route)
    }

    // ------------------------------------------------------------------
    // Shell actions
    // ------------------------------------------------------------------

    pub fn nav_next(&mut self) -> Option<Effect> {
        let tab = self.active_tab().map(|t| t.next()).unwrap_or(NavTab::Upload);
        self.navigate(tab.route())
    }

    pub fn nav_previous(&mut self) -> Option<Effect> {
        let tab = self.active_tab().map(|t| t.previous()).unwrap_or(NavTab::Upload);
        self.navigate(tab.route())
    }

    pub fn open_selected(&mut self) -> Option<Effect> {
        let route = match &self.screen {
            Screen::Reports(list) => list.selected_route()?,
            _ => return None,
        };
        self.navigate(route)
    }

    pub fn open_uploaded_report(&mut self) -> Option<Effect> {
        let route = match &self.screen {
            Screen::Upload(upload) => upload.report_route()?,
            _ => return None,
        };
        self.navigate(route)
    }

    /// Detail → list
    pub fn back(&mut self) -> Option<Effect> {
        match self.screen {
            Screen::Detail(_) => self.navigate(Route::Reports),
            _ => None,
        }
    }

    pub fn submit_upload(&mut self) -> Option<Effect> {
        if !matches!(self.screen, Screen::Upload(_)) {
            return None;
        }
        let key = self.next_key(None);
        let Screen::Upload(upload) = &mut self.screen else {
            return None;
        };
        let file = upload.submit(key.clone())?;
        Some(Effect::Upload(key, file))
    }

    pub fn retry(&mut self) -> Option<Effect> {
        if !matches!(self.screen, Screen::Reports(_)) {
            return None;
        }
        let key = self.next_key(None);
        let Screen::Reports(list) = &mut self.screen else {
            return None;
        };
        if list.retry(key.clone()) {
            Some(Effect::FetchReports(key))
        } else {
            None
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------
    // Completions
    // ------------------------------------------------------------------

    /// Applies a settled request; responses for an unmounted screen or a
    /// superseded key are dropped.
    pub fn handle(&mut self, msg: Msg) {
        let accepted = match (&mut self.screen, msg) {
            (Screen::Reports(list), Msg::ReportsFetched(key, result)) => list.finish(&key, result),
            (Screen::Detail(detail), Msg::ReportFetched(key, result)) => detail.finish(&key, result),
            (Screen::Upload(upload), Msg::Uploaded(key, result)) => upload.finish(&key, result),
            (_, msg) => {
                tracing::debug!("Dropping response for unmounted screen: {:?}", msg_key(&msg));
                return;
            }
        };
        if !accepted {
            tracing::debug!("Dropping stale response on {}", self.route);
        }
    }
}

fn msg_key(msg: &Msg) -> &RequestKey {
    match msg {
        Msg::ReportsFetched(key, _) | Msg::ReportFetched(key, _) | Msg::Uploaded(key, _) => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{DetailState, ListState, UploadState};

    fn report(id: &str, name: &str) -> Report {
        Report {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn effect_key(effect: &Effect) -> RequestKey {
        match effect {
            Effect::FetchReports(key) | Effect::FetchReport(key) | Effect::Upload(key, _) => key.clone(),
        }
    }

    #[test]
    fn test_start_on_upload_issues_nothing() {
        let (app, effect) = App::start(Route::Upload);
        assert!(effect.is_none());
        assert!(matches!(app.screen, Screen::Upload(_)));
        assert_eq!(app.active_tab(), Some(NavTab::Upload));
    }

    #[test]
    fn test_start_on_detail_fetches_by_id() {
        let (app, effect) = App::start(Route::ReportDetail("abc123".into()));
        let key = effect_key(effect.as_ref().unwrap());
        assert!(matches!(effect, Some(Effect::FetchReport(_))));
        assert_eq!(key.target.as_deref(), Some("abc123"));
        assert_eq!(app.active_tab(), Some(NavTab::Reports));
    }

    #[test]
    fn test_tab_cycles_between_screens() {
        let (mut app, _) = App::start(Route::Upload);
        let effect = app.nav_next();
        assert!(matches!(effect, Some(Effect::FetchReports(_))));
        assert_eq!(app.route(), &Route::Reports);
        assert!(app.nav_previous().is_none());
        assert_eq!(app.route(), &Route::Upload);
    }

    #[test]
    fn test_same_route_keeps_screen() {
        let (mut app, _) = App::start(Route::Reports);
        assert!(app.navigate(Route::Reports).is_none());
    }

    #[test]
    fn test_list_to_detail_and_back() {
        let (mut app, effect) = App::start(Route::Reports);
        let key = effect_key(&effect.unwrap());
        app.handle(Msg::ReportsFetched(key, Ok(vec![report("r1", "Jane"), report("r2", "John")])));

        if let Screen::Reports(list) = &mut app.screen {
            list.next();
        }
        let effect = app.open_selected().unwrap();
        assert_eq!(app.route(), &Route::ReportDetail("r2".into()));
        assert_eq!(effect_key(&effect).target.as_deref(), Some("r2"));

        let effect = app.back();
        assert!(matches!(effect, Some(Effect::FetchReports(_))));
        assert_eq!(app.route(), &Route::Reports);
    }

    #[test]
    fn test_response_after_navigation_is_dropped() {
        let (mut app, effect) = App::start(Route::ReportDetail("first".into()));
        let first = effect_key(&effect.unwrap());

        app.navigate(Route::ReportDetail("second".into()));
        app.handle(Msg::ReportFetched(first, Ok(Some(report("first", "Old")))));

        match &app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.id(), "second");
                assert!(matches!(detail.state(), DetailState::Loading { .. }));
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_response_for_other_screen_is_dropped() {
        let (mut app, effect) = App::start(Route::Reports);
        let key = effect_key(&effect.unwrap());
        app.navigate(Route::Upload);
        app.handle(Msg::ReportsFetched(key, Ok(vec![report("r1", "Jane")])));
        assert!(matches!(app.screen, Screen::Upload(_)));
    }

    #[test]
    fn test_retry_only_after_error() {
        let (mut app, effect) = App::start(Route::Reports);
        let key = effect_key(&effect.unwrap());
        assert!(app.retry().is_none());

        app.handle(Msg::ReportsFetched(key, Err(ClientError::Network("refused".into()))));
        let retried = app.retry().unwrap();
        match &app.screen {
            Screen::Reports(list) => {
                assert_eq!(list.state(), &ListState::Loading { key: effect_key(&retried) })
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_upload_then_view_report() {
        let (mut app, _) = App::start(Route::Upload);
        assert!(app.submit_upload().is_none());

        if let Screen::Upload(upload) = &mut app.screen {
            upload.select_file(SelectedFile::new("/tmp/jane.xml", 10));
        }
        let effect = app.submit_upload().unwrap();
        let key = effect_key(&effect);
        assert!(matches!(effect, Effect::Upload(_, ref file) if file.name == "jane.xml"));

        let response = UploadResponse {
            name: Some("Jane Doe".into()),
            id: Some("abc123".into()),
            ..Default::default()
        };
        app.handle(Msg::Uploaded(key, Ok(response)));
        match &app.screen {
            Screen::Upload(upload) => assert!(matches!(upload.state(), UploadState::Succeeded { .. })),
            other => panic!("unexpected screen {:?}", other),
        }

        let effect = app.open_uploaded_report();
        assert!(matches!(effect, Some(Effect::FetchReport(_))));
        assert_eq!(app.current_path(), "/reports/abc123");
    }

    #[test]
    fn test_tickets_are_unique() {
        let (mut app, first) = App::start(Route::Reports);
        let second = app.navigate(Route::ReportDetail("a".into()));
        assert_ne!(effect_key(&first.unwrap()).ticket, effect_key(&second.unwrap()).ticket);
    }
}
