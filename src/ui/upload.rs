// 📤 Upload page rendering

use creditsea::screens::upload::{UploadScreen, MSG_UPLOADING};
use creditsea::view::{Tone, ViewLine};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{to_line, tone_style};

pub(super) fn render(f: &mut Frame, area: Rect, screen: &UploadScreen, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(8), // Drop zone
            Constraint::Length(2), // Upload button
            Constraint::Min(4),    // Message + summary
            Constraint::Length(6), // Supported format
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Upload Credit Report",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Upload your Experian XML file to view detailed credit analysis",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    render_drop_zone(f, chunks[1], screen);
    render_button(f, chunks[2], screen, spinner);
    render_result(f, chunks[3], screen);
    render_info(f, chunks[4]);
}

fn render_drop_zone(f: &mut Frame, area: Rect, screen: &UploadScreen) {
    let (border, lines) = match screen.selected_file() {
        Some(file) => (
            Color::Green,
            vec![
                Line::from(Span::styled("File Selected", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(format!("📄 {}", file.name)),
                Line::from(Span::styled(
                    format!("Size: {}", file.size_label()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(vec![
                    Span::styled("x", Style::default().fg(Color::Yellow)),
                    Span::raw(" Remove File"),
                ]),
            ],
        ),
        None if screen.editing => (
            Color::Blue,
            vec![
                Line::from(Span::styled("Drop your XML file here", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(screen.path_input.clone()),
                    Span::styled("▏", Style::default().fg(Color::Blue)),
                ]),
            ],
        ),
        None => (
            Color::DarkGray,
            vec![
                Line::from(Span::styled("Drag & drop your XML file", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(Span::styled("or press o to browse", Style::default().fg(Color::DarkGray))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("o", Style::default().fg(Color::Yellow)),
                    Span::raw(" Choose File"),
                ]),
            ],
        ),
    };

    let zone = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" 📁 XML Report "),
    );
    f.render_widget(zone, area);
}

fn render_button(f: &mut Frame, area: Rect, screen: &UploadScreen, spinner: &str) {
    let line = if screen.is_uploading() {
        Line::from(Span::styled(
            format!("{} Uploading...", spinner),
            Style::default().fg(Color::Blue),
        ))
    } else if screen.can_submit() {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(
                "  🚀 Upload & Analyze Report",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "🚀 Upload & Analyze Report",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_result(f: &mut Frame, area: Rect, screen: &UploadScreen) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(notice) = screen.notice() {
        // The in-flight message already shows on the button's spinner line
        if notice.text != MSG_UPLOADING || !screen.is_uploading() {
            lines.push(Line::from(Span::styled(
                format!("{} {}", notice.severity.icon(), notice.text),
                tone_style(notice.severity.tone()).add_modifier(Modifier::BOLD),
            )));
        }
    }

    let summary = screen.summary_lines();
    if !summary.is_empty() {
        lines.push(to_line(&ViewLine::blank()));
        lines.extend(summary.iter().map(to_line));
    }

    let border = match screen.notice() {
        Some(notice) => tone_style(notice.severity.tone()),
        None => tone_style(Tone::Muted),
    };
    let result = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).border_style(border));
    f.render_widget(result, area);
}

fn render_info(f: &mut Frame, area: Rect) {
    let bullet = |text: &'static str| Line::from(Span::styled(format!("  • {}", text), Style::default().fg(Color::DarkGray)));
    let info = Paragraph::new(vec![
        Line::from(Span::styled("ℹ️ Supported Format:", Style::default().add_modifier(Modifier::BOLD))),
        bullet("Experian XML credit reports"),
        bullet("Maximum file size: 10 MB"),
        bullet("Reports are automatically parsed and analyzed"),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(info, area);
}
