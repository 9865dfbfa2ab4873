// 🔍 Report detail page rendering

use creditsea::screens::report_detail::{detail_view, error_line, MSG_LOADING, MSG_NOT_FOUND};
use creditsea::screens::{DetailState, ReportDetailScreen};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::to_line;

pub(super) fn render(f: &mut Frame, area: Rect, screen: &ReportDetailScreen, spinner: &str) {
    let report = match screen.state() {
        DetailState::Loading { .. } => {
            let loading = Line::from(Span::styled(
                format!("{} {}", spinner, MSG_LOADING),
                Style::default().fg(Color::Blue),
            ));
            f.render_widget(Paragraph::new(loading), area);
            return;
        }
        DetailState::Error(message) => {
            let error = Line::from(Span::styled(error_line(message), Style::default().fg(Color::Red)));
            f.render_widget(Paragraph::new(error), area);
            return;
        }
        DetailState::NotFound => {
            f.render_widget(Paragraph::new(MSG_NOT_FOUND), area);
            return;
        }
        DetailState::Loaded(report) => report,
    };

    let view = detail_view(report);
    let mut lines: Vec<Line> = Vec::with_capacity(view.line_count());

    lines.push(Line::from(Span::styled(
        view.heading.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    if let Some(info) = &view.info_line {
        lines.push(to_line(info));
    }
    for section in &view.sections {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for line in &section.lines {
            let mut rendered = to_line(line);
            rendered.spans.insert(0, Span::raw("  "));
            lines.push(rendered);
        }
    }

    let max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((screen.scroll.min(max_scroll), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Report {} ", screen.id())),
        );
    f.render_widget(body, area);
}
