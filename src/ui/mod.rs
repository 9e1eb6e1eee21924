use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, FocusArea};
use crate::config::ChatMode;

mod agents;
mod chat;
mod chats;
mod overlay;
mod theme;
use theme::*;

pub const APP_TITLE: &str = "AgentSwarm";
const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;

fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}

pub fn render(f: &mut Frame<'_>, app: &mut App) {
    let size = f.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let block = Paragraph::new(format!(
            "Terminal too small. Resize to at least {}x{}.",
            MIN_WIDTH, MIN_HEIGHT
        ))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(APP_TITLE)
                .borders(Borders::ALL)
                .style(Style::default().fg(FG_PRIMARY).bg(OVERLAY_BG)),
        )
        .style(Style::default().fg(FG_PRIMARY).bg(BG_PRIMARY));
        f.render_widget(block, size);
        return;
    }

    let base = Block::default().style(Style::default().bg(BG_PRIMARY));
    f.render_widget(base, size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);
    let title_area = vertical[0];
    let workspace = vertical[1];
    let status_area = vertical[2];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ])
        .split(workspace);

    render_title_bar(f, app, title_area);
    chats::render_chat_history(f, app, columns[0]);
    render_center(f, app, columns[1]);
    agents::render_agent_column(f, app, columns[2]);
    render_status_bar(f, app, status_area);

    if let Some(overlay) = app.overlay.as_ref() {
        overlay::render_overlay(f, app, overlay);
    }
}

fn render_title_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    f.render_widget(Clear, area);
    let mode = match app.settings.chat_mode {
        ChatMode::Remote => "remote chats",
        ChatMode::Local => "local chats",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_TITLE),
            Style::default()
                .fg(BAR_TEXT)
                .bg(BAR_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} · {}", app.settings.base_url, mode),
            Style::default().fg(BAR_TEXT).bg(BAR_BG),
        ),
    ]);
    let bar = Paragraph::new(line)
        .alignment(Alignment::Left)
        .style(Style::default().fg(BAR_TEXT).bg(BAR_BG));
    f.render_widget(bar, area);
}

fn render_center(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);
    chat::render_health(f, app, rows[0]);
    chat::render_chat(f, app, rows[1]);
}

fn render_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    f.render_widget(Clear, area);
    let hints = "[F1 Help] [Ctrl+Q Quit]";
    let hints_width = cell_width(hints);
    let message_width = area.width.saturating_sub(hints_width + 1) as usize;
    let message = truncate_to_width(&format!(" {}", app.status_message), message_width);
    let padding = message_width.saturating_sub(UnicodeWidthStr::width(message.as_str()));

    let line = Line::from(vec![
        Span::styled(message, Style::default().fg(BAR_TEXT).bg(BAR_BG)),
        Span::styled(" ".repeat(padding + 1), Style::default().bg(BAR_BG)),
        Span::styled(hints, Style::default().fg(BAR_TEXT).bg(BAR_BG)),
    ]);
    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(BAR_TEXT).bg(BAR_BG))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Bordered panel whose border lights up when `focused`.
fn pane_block<'a>(title: impl Into<String>, focused: bool) -> Block<'a> {
    let border = if focused {
        Style::default()
            .fg(BORDER_FOCUS)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER_IDLE)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title.into(), Style::default().fg(FG_PRIMARY)))
        .style(Style::default().bg(BG_PANEL))
}

fn is_focused(app: &App, area: FocusArea) -> bool {
    app.overlay.is_none() && app.focus == area
}

fn push_wrapped_line(lines: &mut Vec<Line<'static>>, text: &str, style: Style, width: usize) {
    for logical in text.split('\n') {
        for segment in wrap_to_width(logical, width) {
            lines.push(Line::from(Span::styled(segment, style)));
        }
    }
}

fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if current_width + ch_width > width && !current.is_empty() {
            result.push(current);
            current = String::new();
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    result.push(current);
    result
}

fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if used + ch_width > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

/// Column and row of a byte-offset cursor inside `text` once wrapped to `width`.
fn cursor_display_position(text: &str, cursor: usize, width: usize) -> (u16, u16) {
    let width = width.max(1);
    let before = &text[..cursor.min(text.len())];
    let mut logical = before.split('\n').collect::<Vec<_>>();
    let current = logical.pop().unwrap_or_default();
    let mut row: usize = logical
        .iter()
        .map(|line| wrap_to_width(line, width).len())
        .sum();
    let col = UnicodeWidthStr::width(current);
    row += col / width;
    ((col % width) as u16, row as u16)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1])[1]
}
