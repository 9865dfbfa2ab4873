// 🖥️ Terminal UI - shell, event loop and key handling
// Screens render in their own modules; this one owns the frame layout.

mod detail;
mod reports;
mod upload;

use anyhow::Result;
use creditsea::api::ApiClient;
use creditsea::app::{App, Effect, Msg, Screen, BRAND, FOOTER, TAGLINE};
use creditsea::route::{NavTab, Route};
use creditsea::score::Swatch;
use creditsea::screens::EmptyState;
use creditsea::tasks;
use creditsea::view::{Tone, ViewLine};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
const SCROLL_PAGE: u16 = 10;

pub fn run_ui(app: &mut App, initial: Option<Effect>, client: &ApiClient, handle: &Handle) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Msg>();
    let mut dispatch = |effect: Effect| tasks::dispatch(handle, client, effect, &tx);
    if let Some(effect) = initial {
        dispatch(effect);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, &mut dispatch, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("UI loop failed: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatch: &mut dyn FnMut(Effect),
    rx: &mut UnboundedReceiver<Msg>,
) -> io::Result<()> {
    let mut tick: usize = 0;
    loop {
        // Settled requests first, so the frame shows their outcome
        loop {
            match rx.try_recv() {
                Ok(msg) => app.handle(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        terminal.draw(|f| ui(f, app, tick))?;
        tick = tick.wrapping_add(1);

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let effect = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Paste(text) => handle_paste(app, &text),
            _ => None,
        };
        if let Some(effect) = effect {
            dispatch(effect);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Maps one key press onto the app; returns the request it triggers, if any
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }

    // Text inputs swallow printable keys
    match &mut app.screen {
        Screen::Upload(upload) if upload.editing => {
            match key.code {
                KeyCode::Char(c) => upload.path_input.push(c),
                KeyCode::Backspace => {
                    upload.path_input.pop();
                }
                KeyCode::Enter => {
                    upload.commit_path_input();
                }
                KeyCode::Esc => {
                    upload.editing = false;
                    upload.path_input.clear();
                }
                _ => {}
            }
            return None;
        }
        Screen::Reports(list) if list.search_focused => {
            match key.code {
                KeyCode::Char(c) => list.push_query_char(c),
                KeyCode::Backspace => list.pop_query_char(),
                KeyCode::Esc | KeyCode::Enter => list.search_focused = false,
                KeyCode::Down => list.next(),
                KeyCode::Up => list.previous(),
                _ => {}
            }
            return None;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return None;
        }
        KeyCode::Tab => return app.nav_next(),
        KeyCode::BackTab => return app.nav_previous(),
        _ => {}
    }

    match &mut app.screen {
        Screen::Upload(upload) => match key.code {
            KeyCode::Char('o') | KeyCode::Char('b') => {
                upload.editing = true;
                None
            }
            KeyCode::Char('x') => {
                upload.clear();
                None
            }
            KeyCode::Enter | KeyCode::Char('s') => app.submit_upload(),
            KeyCode::Char('v') => app.open_uploaded_report(),
            _ => None,
        },
        Screen::Reports(list) => match key.code {
            KeyCode::Enter => app.open_selected(),
            KeyCode::Char('/') => {
                list.search_focused = true;
                None
            }
            KeyCode::Char('r') => app.retry(),
            KeyCode::Char('u') if list.empty_state() == Some(EmptyState::NoReports) => {
                app.navigate(Route::Upload)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                list.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                list.previous();
                None
            }
            KeyCode::PageDown => {
                list.page_down();
                None
            }
            KeyCode::PageUp => {
                list.page_up();
                None
            }
            KeyCode::Home => {
                list.home();
                None
            }
            KeyCode::End => {
                list.end();
                None
            }
            _ => None,
        },
        Screen::Detail(detail) => match key.code {
            KeyCode::Esc | KeyCode::Backspace => app.back(),
            KeyCode::Down | KeyCode::Char('j') => {
                detail.scroll_down(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                detail.scroll_up(1);
                None
            }
            KeyCode::PageDown => {
                detail.scroll_down(SCROLL_PAGE);
                None
            }
            KeyCode::PageUp => {
                detail.scroll_up(SCROLL_PAGE);
                None
            }
            KeyCode::Home => {
                detail.scroll_home();
                None
            }
            _ => None,
        },
    }
}

/// Bracketed paste: a path dropped onto the terminal, or text for the search box
pub fn handle_paste(app: &mut App, text: &str) -> Option<Effect> {
    match &mut app.screen {
        Screen::Upload(upload) => {
            upload.editing = false;
            upload.path_input.clear();
            upload.select_path(text);
        }
        Screen::Reports(list) if list.search_focused => {
            for c in text.chars().filter(|c| !c.is_control()) {
                list.push_query_char(c);
            }
        }
        _ => {}
    }
    None
}

// ============================================================================
// LAYOUT
// ============================================================================

fn ui(f: &mut Frame, app: &mut App, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Active screen
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let spinner = SPINNER[tick % SPINNER.len()];
    match &mut app.screen {
        Screen::Upload(screen) => upload::render(f, chunks[1], screen, spinner),
        Screen::Reports(screen) => reports::render(f, chunks[1], screen, spinner),
        Screen::Detail(screen) => detail::render(f, chunks[1], screen, spinner),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!("📊 {}", BRAND),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" · {}", TAGLINE), Style::default().fg(Color::DarkGray)),
        Span::raw("    "),
    ];

    let current = app.current_path();
    for (i, tab) in NavTab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let style = if tab.is_active(&current) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}", tab.icon(), tab.label()), style));
    }

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn key_hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    if !spans.is_empty() {
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(" {}", label)));
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span<'static>> = Vec::new();

    match &app.screen {
        Screen::Upload(upload) if upload.editing => {
            key_hint(&mut spans, "Enter", "Select");
            key_hint(&mut spans, "Esc", "Cancel");
        }
        Screen::Upload(upload) => {
            key_hint(&mut spans, "o", "Choose File");
            if upload.selected_file().is_some() {
                key_hint(&mut spans, "Enter", "Upload");
                key_hint(&mut spans, "x", "Remove");
            }
            if upload.report_route().is_some() {
                key_hint(&mut spans, "v", "View Report");
            }
        }
        Screen::Reports(list) if list.search_focused => {
            key_hint(&mut spans, "Esc", "Done");
            key_hint(&mut spans, "↑/↓", "Nav");
        }
        Screen::Reports(list) => {
            key_hint(&mut spans, "Enter", "Open");
            key_hint(&mut spans, "/", "Search");
            key_hint(&mut spans, "↑/↓", "Nav");
            if matches!(list.state(), creditsea::screens::ListState::Error(_)) {
                key_hint(&mut spans, "r", "Retry");
            }
        }
        Screen::Detail(_) => {
            key_hint(&mut spans, "Esc", "Back to Reports");
            key_hint(&mut spans, "↑/↓", "Scroll");
            key_hint(&mut spans, "PgUp/PgDn", "Fast");
        }
    }
    key_hint(&mut spans, "Tab", "Page");
    spans.push(Span::raw(" | "));
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(
                Title::from(format!(" {} ", FOOTER))
                    .position(Position::Bottom)
                    .alignment(Alignment::Center),
            ),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// STYLE
// ============================================================================

pub(crate) fn swatch_color(swatch: Swatch) -> Color {
    let (r, g, b) = swatch.rgb();
    Color::Rgb(r, g, b)
}

pub(crate) fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Default => Style::default().fg(Color::White),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Accent => Style::default().fg(Color::Magenta),
        Tone::Success => Style::default().fg(Color::Green),
        Tone::Info => Style::default().fg(Color::Blue),
        Tone::Danger => Style::default().fg(Color::Red),
        Tone::Score(swatch) => Style::default().fg(swatch_color(swatch)),
    }
}

pub(crate) fn to_line(line: &ViewLine) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .fragments
        .iter()
        .map(|fragment| {
            let mut style = tone_style(fragment.tone);
            if fragment.strong {
                style = style.add_modifier(Modifier::BOLD);
            }
            Span::styled(fragment.text.clone(), style)
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditsea::models::Report;
    use creditsea::screens::SelectedFile;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(app: &mut App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_list(reports: Vec<Report>) -> App {
        let (mut app, effect) = App::start(Route::Reports);
        let Some(Effect::FetchReports(key)) = effect else {
            panic!("expected a list fetch");
        };
        app.handle(Msg::ReportsFetched(key, Ok(reports)));
        app
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let (mut app, _) = App::start(Route::Upload);
        if let Screen::Upload(upload) = &mut app.screen {
            upload.editing = true;
        }
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_types_into_search_instead_of_quitting() {
        let mut app = loaded_list(vec![]);
        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        match &app.screen {
            Screen::Reports(list) => assert_eq!(list.query(), "q"),
            other => panic!("unexpected screen {:?}", other),
        }

        handle_key(&mut app, press(KeyCode::Esc));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_switches_screens() {
        let (mut app, _) = App::start(Route::Upload);
        let effect = handle_key(&mut app, press(KeyCode::Tab));
        assert!(matches!(effect, Some(Effect::FetchReports(_))));
        assert_eq!(app.route(), &Route::Reports);
    }

    #[test]
    fn test_enter_opens_detail_and_esc_returns() {
        let report = Report { id: Some("r1".into()), name: Some("Jane".into()), ..Default::default() };
        let mut app = loaded_list(vec![report]);

        let effect = handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(effect, Some(Effect::FetchReport(_))));
        assert_eq!(app.current_path(), "/reports/r1");

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.route(), &Route::Reports);
    }

    #[test]
    fn test_upload_call_to_action_from_empty_list() {
        let mut app = loaded_list(vec![]);
        handle_key(&mut app, press(KeyCode::Char('u')));
        assert_eq!(app.route(), &Route::Upload);
    }

    #[test]
    fn test_paste_rejects_non_xml() {
        let (mut app, _) = App::start(Route::Upload);
        handle_paste(&mut app, "/tmp/notes.txt");
        match &app.screen {
            Screen::Upload(upload) => {
                assert!(upload.selected_file().is_none());
                assert_eq!(upload.notice().unwrap().text, "Please upload an XML file");
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_enter_submits_selected_file() {
        let (mut app, _) = App::start(Route::Upload);
        if let Screen::Upload(upload) = &mut app.screen {
            upload.select_file(SelectedFile::new("/tmp/jane.xml", 100));
        }
        let effect = handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(effect, Some(Effect::Upload(_, _))));
    }

    #[test]
    fn test_render_upload_screen() {
        let (mut app, _) = App::start(Route::Upload);
        let screen = rendered(&mut app);
        assert!(screen.contains("CreditSea"));
        assert!(screen.contains("Upload Credit Report"));
        assert!(screen.contains("Supported Format"));
    }

    #[test]
    fn test_render_empty_list() {
        let mut app = loaded_list(vec![]);
        let screen = rendered(&mut app);
        assert!(screen.contains("No reports uploaded yet"));
        assert!(screen.contains("0 reports uploaded"));
    }

    #[test]
    fn test_render_detail_loading() {
        let (mut app, _) = App::start(Route::ReportDetail("abc".into()));
        let screen = rendered(&mut app);
        assert!(screen.contains("Loading report..."));
    }
}
