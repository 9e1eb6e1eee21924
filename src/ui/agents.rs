use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::theme::*;
use super::{is_focused, pane_block, push_wrapped_line, truncate_to_width};
use crate::api::models::Agent;
use crate::app::{App, FocusArea};
use crate::forms::FormField;
use crate::forms::agent_form::{FORM_TITLE, METADATA_HINT};
use crate::panels::BannerKind;
use crate::panels::agents::{CLEAR_ALL_LABEL, EMPTY_STATE, LOADING_TEXT};

const INDENT: &str = "    ";

pub(super) fn render_agent_column(f: &mut Frame<'_>, app: &App, area: Rect) {
    if app.agents.form_visible() {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Min(6)])
            .split(area);
        render_form(f, app, sections[0]);
        render_agent_list(f, app, sections[1]);
    } else {
        render_agent_list(f, app, area);
    }
}

fn render_form(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = is_focused(app, FocusArea::AgentForm);
    let block = pane_block(FORM_TITLE, focused);
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;
    let form = &app.agent_form;

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focus_line = 0usize;
    let mut cursor_line = None;

    for field in FormField::ALL {
        let is_current = form.focused() == field;
        if is_current {
            focus_line = lines.len();
        }

        if field == FormField::Submit {
            let style = if is_current && focused {
                Style::default()
                    .bg(PANEL_HIGHLIGHT_BG)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(
                format!("[ {} ]", form.submit_label()),
                style,
            )));
            lines.push(Line::from(Span::styled(
                "Ctrl+S submit · Esc hide",
                Style::default().fg(FG_DIM),
            )));
            continue;
        }

        let marker = if is_current { "▸ " } else { "  " };
        let label_style = if is_current && focused {
            Style::default().fg(BORDER_FOCUS).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(FG_PRIMARY)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, field.label()),
            label_style,
        )));

        if field == FormField::AgentType {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("< {} >", form.agent_type().label()),
                    Style::default().fg(Color::White),
                ),
            ]));
            continue;
        }

        let value = form.value(field);
        if is_current {
            cursor_line = Some(lines.len());
        }
        if value.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", field.placeholder()),
                Style::default().fg(FG_DIM),
            )));
        } else {
            for line in value.split('\n') {
                lines.push(Line::from(Span::styled(
                    truncate_to_width(&format!("  {}", line), width),
                    Style::default().fg(Color::White),
                )));
            }
        }
        if field == FormField::Metadata {
            push_wrapped_line(
                &mut lines,
                &format!("  {}", METADATA_HINT),
                Style::default().fg(FG_DIM),
                width,
            );
        }
    }

    let height = inner.height.max(1) as usize;
    let scroll = (focus_line + 2).saturating_sub(height);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(BG_PANEL))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);

    if focused
        && !form.is_submitting()
        && let (Some(line), Some(input)) = (cursor_line, form.focused_input())
    {
        let before = &input.value()[..input.cursor()];
        let row = line + before.matches('\n').count();
        let col = 2 + before
            .rsplit('\n')
            .next()
            .map(UnicodeWidthStr::width)
            .unwrap_or(0);
        if row >= scroll && row - scroll < height {
            let x = inner.x + (col.min(width.saturating_sub(1)) as u16);
            let y = inner.y + (row - scroll) as u16;
            f.set_cursor(x, y);
        }
    }
}

fn render_agent_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let panel = &app.agents;
    let block = pane_block(panel.heading(), is_focused(app, FocusArea::Agents));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let banner_height = if panel.banner().is_some() { 2 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);
    let width = inner.width.max(1) as usize;

    if let Some(banner) = panel.banner() {
        let style = match banner.kind {
            BannerKind::Success => Style::default().fg(SUCCESS_FG),
            BannerKind::Error => Style::default().fg(ERROR_FG),
        };
        let paragraph = Paragraph::new(format!("{} {}", banner.icon(), banner.text))
            .wrap(Wrap { trim: true })
            .style(style.bg(BG_PANEL));
        f.render_widget(paragraph, rows[0]);
    }

    let mut buttons = Vec::new();
    if panel.enabled_count() > 0 {
        buttons.push(Span::styled(
            format!("[{}] (c)", CLEAR_ALL_LABEL),
            Style::default().fg(BAR_TEXT),
        ));
        buttons.push(Span::raw("  "));
    }
    buttons.push(Span::styled(
        format!("[{}] (+)", panel.form_toggle_label()),
        Style::default().fg(BAR_TEXT),
    ));
    let toolbar = Paragraph::new(vec![
        Line::from(Span::styled(panel.summary(), Style::default().fg(FG_PRIMARY))),
        Line::from(buttons),
    ])
    .style(Style::default().bg(BG_PANEL));
    f.render_widget(toolbar, rows[1]);

    let list_area = rows[2];
    if panel.is_loading() {
        render_placeholder(f, LOADING_TEXT, list_area);
        return;
    }
    if panel.agents().is_empty() {
        render_placeholder(f, EMPTY_STATE, list_area);
        return;
    }

    let items: Vec<ListItem> = panel
        .agents()
        .iter()
        .map(|agent| ListItem::new(agent_lines(agent, panel.is_enabled(&agent.id), width)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(panel.selected_index()));

    let list = List::new(items)
        .style(Style::default().bg(BG_PANEL))
        .highlight_style(Style::default().bg(PANEL_HIGHLIGHT_BG).fg(Color::White));
    f.render_stateful_widget(list, list_area, &mut state);
}

fn agent_lines(agent: &Agent, enabled: bool, width: usize) -> Vec<Line<'static>> {
    let detail = Style::default().fg(FG_DIM);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            if enabled { "[x] " } else { "[ ] " },
            Style::default().fg(if enabled { SUCCESS_FG } else { FG_DIM }),
        ),
        Span::styled(
            agent.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", agent.agent_type.label()),
            Style::default().fg(BAR_TEXT).bg(BADGE_BG),
        ),
    ])];

    let body_width = width.saturating_sub(INDENT.len());
    for line in agent.description.lines() {
        for segment in super::wrap_to_width(line, body_width) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", INDENT, segment),
                Style::default().fg(FG_PRIMARY),
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        format!("{}MCP Endpoint: {}", INDENT, agent.mcp_connection.endpoint_url),
        detail,
    )));
    if let Some(metadata) = &agent.mcp_connection.metadata
        && let Ok(pretty) = serde_json::to_string_pretty(metadata)
    {
        for line in pretty.lines() {
            lines.push(Line::from(Span::styled(format!("{}{}", INDENT, line), detail)));
        }
    }
    if let Some(provider) = &agent.provider_config {
        lines.push(Line::from(Span::styled(
            format!(
                "{}AI Provider: {} ({})",
                INDENT, provider.provider_id, provider.provider_type
            ),
            detail,
        )));
        lines.push(Line::from(Span::styled(
            format!("{}Model: {}", INDENT, provider.model),
            detail,
        )));
        if !provider.fallback_providers.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(
                    "{}Fallback providers: {}",
                    INDENT,
                    provider.fallback_providers.join(", ")
                ),
                detail,
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{}Created: {}",
            INDENT,
            agent.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        detail,
    )));
    lines.push(Line::default());
    lines
}

fn render_placeholder(f: &mut Frame<'_>, text: &str, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(FG_DIM).bg(BG_PANEL));
    f.render_widget(paragraph, area);
}
