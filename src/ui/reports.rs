// 📋 Report list page rendering

use creditsea::screens::report_list::{count_caption, ListState, ReportCard, ReportListScreen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState as Selection, Paragraph},
    Frame,
};

use super::swatch_color;

pub(super) fn render(f: &mut Frame, area: Rect, screen: &ReportListScreen, spinner: &str) {
    match screen.state() {
        ListState::Loading { .. } => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Loading reports...", spinner),
                    Style::default().fg(Color::Blue),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(loading, area);
        }
        ListState::Error(message) => {
            let error = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("⚠️ {}", message),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("r", Style::default().fg(Color::Yellow)),
                    Span::raw(" Retry"),
                ]),
            ])
            .alignment(Alignment::Center);
            f.render_widget(error, area);
        }
        ListState::Loaded(_) => render_loaded(f, area, screen),
    }
}

fn render_loaded(f: &mut Frame, area: Rect, screen: &ReportListScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + count
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Cards
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Credit Reports",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(count_caption(screen.total()), Style::default().fg(Color::DarkGray))),
    ]);
    f.render_widget(header, chunks[0]);

    let search_line = if screen.query().is_empty() && !screen.search_focused {
        Line::from(Span::styled(
            "🔍 Search by name or PAN...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(format!("🔍 {}", screen.query()))];
        if screen.search_focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Blue)));
        }
        Line::from(spans)
    };
    let border = if screen.search_focused { Color::Blue } else { Color::DarkGray };
    let search = Paragraph::new(search_line)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)));
    f.render_widget(search, chunks[1]);

    if let Some(empty) = screen.empty_state() {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(empty.title(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(empty.hint(), Style::default().fg(Color::DarkGray))),
        ];
        if let Some(action) = empty.call_to_action() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("u", Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {}", action)),
            ]));
        }
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[2]);
        return;
    }

    let items: Vec<ListItem> = screen
        .visible()
        .into_iter()
        .map(|report| card_item(&ReportCard::from_report(report)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    let mut selection = Selection::default();
    selection.select(screen.selected_index());
    f.render_stateful_widget(list, chunks[2], &mut selection);
}

fn card_item(card: &ReportCard) -> ListItem<'static> {
    let tier_style = Style::default().fg(swatch_color(card.tier.swatch()));
    let muted = Style::default().fg(Color::DarkGray);

    let mut title = vec![Span::styled(card.name.clone(), Style::default().add_modifier(Modifier::BOLD))];
    if let Some(pan) = &card.pan {
        title.push(Span::styled(format!("  PAN: {}", pan), muted));
    }
    title.push(Span::raw("  "));
    title.push(Span::styled(card.score.clone(), tier_style.add_modifier(Modifier::BOLD)));
    title.push(Span::styled(format!(" {}", card.tier.label()), tier_style));

    let stats = Line::from(vec![
        Span::styled("Uploaded: ", muted),
        Span::raw(card.uploaded.clone()),
        Span::styled("  Accounts: ", muted),
        Span::raw(card.total_accounts.clone()),
        Span::styled("  Credit Cards: ", muted),
        Span::raw(card.credit_cards.clone()),
        Span::styled("  Balance: ", muted),
        Span::raw(card.balance.clone()),
    ]);

    ListItem::new(vec![Line::from(title), stats, Line::from("")])
}
