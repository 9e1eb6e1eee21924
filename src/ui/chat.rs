use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::theme::*;
use super::{cursor_display_position, is_focused, pane_block, push_wrapped_line};
use crate::api::models::{Message, Sender};
use crate::app::{App, FocusArea};
use crate::panels::ChatWindow;
use crate::panels::chat::{EMPTY_HEADING, EMPTY_TEXT, WELCOME_HEADING, WELCOME_TEXT, agents_label};

pub(super) fn render_health(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = pane_block("Backend", false);
    let mut spans = vec![
        Span::styled(
            format!("[ {} ]", app.health.button_label()),
            Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" (F5)", Style::default().fg(FG_DIM)),
    ];
    for line in app.health.lines() {
        let style = if app.health.error().is_some() && line.starts_with("Error") {
            Style::default().fg(ERROR_FG)
        } else {
            Style::default().fg(SUCCESS_FG)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(line, style));
    }
    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .style(Style::default().bg(BG_PANEL));
    f.render_widget(paragraph, area);
}

pub(super) fn render_chat(f: &mut Frame<'_>, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);
    render_messages(f, app, sections[0]);
    render_composer(f, app, sections[1]);
}

fn render_messages(f: &mut Frame<'_>, app: &App, area: Rect) {
    let enabled = app.agents.enabled_count();
    let title = match ChatWindow::enabled_indicator(enabled) {
        Some(indicator) => format!("{} · {}", app.chat.title(), indicator),
        None => app.chat.title().to_string(),
    };
    let block = pane_block(title, false);
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let mut lines: Vec<Line<'static>> = Vec::new();
    match app.chat.chat() {
        None => intro(&mut lines, WELCOME_HEADING, WELCOME_TEXT, width),
        Some(chat) if chat.messages.is_empty() => {
            intro(&mut lines, EMPTY_HEADING, EMPTY_TEXT, width)
        }
        Some(chat) => {
            for message in &chat.messages {
                push_message(&mut lines, message, width);
            }
        }
    }

    // Keep the newest messages in view.
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(BG_PANEL))
        .scroll((overflow.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

fn intro(lines: &mut Vec<Line<'static>>, heading: &str, text: &str, width: usize) {
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        heading.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    push_wrapped_line(lines, text, Style::default().fg(FG_DIM), width);
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &Message, width: usize) {
    let sender_style = match message.sender {
        Sender::User => Style::default().fg(USER_FG).add_modifier(Modifier::BOLD),
        Sender::Assistant => Style::default().fg(ASSISTANT_FG).add_modifier(Modifier::BOLD),
    };
    let mut header = vec![
        Span::styled(message.sender.label().to_string(), sender_style),
        Span::styled(
            format!(
                "  {}",
                message.created_at.with_timezone(&Local).format("%H:%M")
            ),
            Style::default().fg(FG_DIM),
        ),
    ];
    if !message.enabled_agents.is_empty() {
        header.push(Span::styled(
            format!("  {}", agents_label(message.enabled_agents.len())),
            Style::default().fg(FG_DIM),
        ));
    }
    lines.push(Line::from(header));
    push_wrapped_line(lines, &message.content, Style::default().fg(FG_PRIMARY), width);
    lines.push(Line::default());
}

fn render_composer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = is_focused(app, FocusArea::Chat);
    let block = pane_block(
        format!(
            "Message (Enter to send, Shift+Enter for newline) [{}]",
            app.chat.send_label()
        ),
        focused,
    );
    let inner = block.inner(area);
    let input = app.chat.input();

    let lines: Vec<Line> = if input.is_empty() {
        vec![Line::from(Span::styled(
            ChatWindow::placeholder(app.agents.enabled_count()),
            Style::default().fg(FG_DIM),
        ))]
    } else {
        input
            .value()
            .split('\n')
            .map(|line| {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(FG_PRIMARY),
                ))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(BG_PANEL))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);

    if focused && !app.chat.is_sending() {
        let width = inner.width.max(1) as usize;
        let (col, row) = cursor_display_position(input.value(), input.cursor(), width);
        let cursor_x = inner
            .x
            .saturating_add(col.min(width.saturating_sub(1) as u16));
        let cursor_y = inner
            .y
            .saturating_add(row.min(inner.height.saturating_sub(1)));
        f.set_cursor(cursor_x, cursor_y);
    }
}
