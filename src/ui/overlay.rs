use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::centered_rect;
use super::theme::*;
use crate::app::{App, OverlayState};

const HELP_LINES: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch pane"),
    ("F5", "Check backend health"),
    ("F2", "Show or hide the agent form"),
    ("F3", "Pick an AI provider for the form"),
    ("Ctrl+N", "New chat"),
    ("Ctrl+R", "Reload agents and chats"),
    ("Enter", "Send message / open chat / toggle agent"),
    ("Shift+Enter", "New line in message"),
    ("Space", "Enable or disable the selected agent"),
    ("c", "Disable all agents"),
    ("Ctrl+S", "Submit the agent form"),
    ("Ctrl+Q", "Quit"),
];

pub(super) fn render_overlay(f: &mut Frame<'_>, app: &App, overlay: &OverlayState) {
    match overlay {
        OverlayState::Alert { title, message } => render_alert(f, title, message),
        OverlayState::Providers { selected } => render_providers(f, app, *selected),
        OverlayState::Help => render_help(f),
    }
}

fn overlay_block<'a>(title: &str) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(OVERLAY_BORDER))
        .style(Style::default().bg(OVERLAY_BG))
}

fn render_alert(f: &mut Frame<'_>, title: &str, message: &str) {
    let area = centered_rect(50, 25, f.size());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::default(),
        Line::from(Span::styled("Enter / Esc to close", Style::default().fg(FG_DIM))),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(overlay_block(title));
    f.render_widget(paragraph, area);
}

fn render_providers(f: &mut Frame<'_>, app: &App, selected: usize) {
    let area = centered_rect(60, 50, f.size());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .providers
        .iter()
        .map(|provider| {
            let mut lines = vec![Line::from(Span::styled(
                format!(
                    "{} ({}, {})",
                    provider.name, provider.provider_id, provider.provider_type
                ),
                Style::default().fg(Color::White),
            ))];
            if let Some(model) = &provider.default_model {
                lines.push(Line::from(Span::styled(
                    format!("  Default model: {}", model),
                    Style::default().fg(FG_DIM),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected));

    let list = List::new(items)
        .block(overlay_block("AI Providers (Enter to use, Esc to close)"))
        .highlight_style(
            Style::default()
                .bg(PANEL_HIGHLIGHT_BG)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}

fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", keys),
                    Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(FG_PRIMARY)),
            ])
        })
        .collect();
    let paragraph = Paragraph::new(lines).block(overlay_block("Keys"));
    f.render_widget(paragraph, area);
}
