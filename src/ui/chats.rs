use chrono::{Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::theme::*;
use super::{is_focused, pane_block, truncate_to_width};
use crate::app::{App, FocusArea};
use crate::panels::chats::{
    EMPTY_STATE, HEADING, LOADING_TEXT, NEW_CHAT_LABEL, format_chat_date, message_count_label,
    preview,
};

pub(super) fn render_chat_history(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = pane_block(HEADING, is_focused(app, FocusArea::ChatList));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let action = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("[{}] (Ctrl+N)", NEW_CHAT_LABEL),
            Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ])
    .style(Style::default().bg(BG_PANEL));
    f.render_widget(action, rows[0]);

    let list_area = rows[1];
    if app.chats.is_loading() {
        render_placeholder(f, LOADING_TEXT, list_area);
        return;
    }
    if app.chats.chats().is_empty() {
        render_placeholder(f, EMPTY_STATE, list_area);
        return;
    }

    let width = list_area.width.max(1) as usize;
    let now = Utc::now();
    let items: Vec<ListItem> = app
        .chats
        .chats()
        .iter()
        .map(|chat| {
            let date = format_chat_date(chat.updated_at, now, &Local);
            let title_width = width.saturating_sub(UnicodeWidthStr::width(date.as_str()) + 1);
            let title = truncate_to_width(&chat.title, title_width);
            let gap = width.saturating_sub(
                UnicodeWidthStr::width(title.as_str()) + UnicodeWidthStr::width(date.as_str()),
            );

            let title_style = if app.chats.is_active(chat) {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(FG_PRIMARY)
            };
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(title, title_style),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(date, Style::default().fg(FG_DIM)),
                ]),
                Line::from(Span::styled(
                    message_count_label(chat),
                    Style::default().fg(FG_DIM),
                )),
            ];
            if let Some(text) = preview(chat) {
                let flat = text.replace('\n', " ");
                lines.push(Line::from(Span::styled(
                    truncate_to_width(&flat, width),
                    Style::default().fg(FG_DIM),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.chats.selected_index()));

    let list = List::new(items)
        .style(Style::default().bg(BG_PANEL))
        .highlight_style(Style::default().bg(PANEL_HIGHLIGHT_BG).fg(Color::White));
    f.render_stateful_widget(list, list_area, &mut state);
}

fn render_placeholder(f: &mut Frame<'_>, text: &str, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(FG_DIM).bg(BG_PANEL));
    f.render_widget(paragraph, area);
}
