use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, CommandAction, FocusArea, OverlayState};
use crate::forms::FormField;

impl App {
    /// Routes a key press: overlays first, then global shortcuts, then the
    /// focused pane.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        if let Some(action) = global_shortcut(key) {
            self.execute_action(action);
            return;
        }

        match self.focus {
            FocusArea::ChatList => self.handle_chat_list_key(key),
            FocusArea::Chat => self.handle_chat_key(key),
            FocusArea::Agents => self.handle_agents_key(key),
            FocusArea::AgentForm => self.handle_form_key(key),
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.overlay.clone() else {
            return;
        };
        match overlay {
            OverlayState::Alert { .. } | OverlayState::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::F(1)) {
                    self.overlay = None;
                }
            }
            OverlayState::Providers { selected } => match key.code {
                KeyCode::Esc => self.overlay = None,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.overlay = Some(OverlayState::Providers {
                        selected: selected.saturating_sub(1),
                    });
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let last = self.providers.len().saturating_sub(1);
                    self.overlay = Some(OverlayState::Providers {
                        selected: (selected + 1).min(last),
                    });
                }
                KeyCode::Enter => {
                    self.overlay = None;
                    self.apply_provider(selected);
                }
                _ => {}
            },
        }
    }

    fn handle_chat_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.chats.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.chats.move_selection(1),
            KeyCode::Enter => self.execute_action(CommandAction::OpenSelectedChat),
            KeyCode::Char('n') => self.execute_action(CommandAction::NewChat),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        let newline = key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter if newline => self.chat.edit_input(|input| input.insert_newline()),
            KeyCode::Enter => self.execute_action(CommandAction::SendMessage),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.chat.edit_input(|input| input.insert_char(ch))
            }
            KeyCode::Backspace => self.chat.edit_input(|input| input.backspace()),
            KeyCode::Delete => self.chat.edit_input(|input| input.delete()),
            KeyCode::Left => self.chat.edit_input(|input| input.move_left()),
            KeyCode::Right => self.chat.edit_input(|input| input.move_right()),
            KeyCode::Home => self.chat.edit_input(|input| input.move_to_line_start()),
            KeyCode::End => self.chat.edit_input(|input| input.move_to_line_end()),
            KeyCode::Up => self.chat.edit_input(|input| {
                input.history_previous();
            }),
            KeyCode::Down => self.chat.edit_input(|input| {
                input.history_next();
            }),
            KeyCode::Esc => self.chat.edit_input(|input| input.clear()),
            _ => {}
        }
    }

    fn handle_agents_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.agents.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.agents.move_selection(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.execute_action(CommandAction::ToggleSelectedAgent)
            }
            KeyCode::Char('c') => self.execute_action(CommandAction::ClearEnabledAgents),
            KeyCode::Char('+') => self.execute_action(CommandAction::ToggleAgentForm),
            KeyCode::Char('p') => self.execute_action(CommandAction::ShowProviders),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let field = self.agent_form.focused();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let newline = key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('s') if ctrl => self.execute_action(CommandAction::SubmitAgent),
            KeyCode::Esc => self.execute_action(CommandAction::ToggleAgentForm),
            KeyCode::Up => self.agent_form.focus_previous(),
            KeyCode::Down => self.agent_form.focus_next(),
            KeyCode::Enter if field == FormField::Submit => {
                self.execute_action(CommandAction::SubmitAgent)
            }
            KeyCode::Enter if newline && field.is_multiline() => {
                self.agent_form.edit_focused(|input| input.insert_newline())
            }
            KeyCode::Enter => self.agent_form.focus_next(),
            KeyCode::Left if field == FormField::AgentType => {
                let previous = self.agent_form.agent_type().previous();
                self.agent_form.set_agent_type(previous);
            }
            KeyCode::Right | KeyCode::Char(' ') if field == FormField::AgentType => {
                let next = self.agent_form.agent_type().next();
                self.agent_form.set_agent_type(next);
            }
            KeyCode::Left => self.agent_form.edit_focused(|input| input.move_left()),
            KeyCode::Right => self.agent_form.edit_focused(|input| input.move_right()),
            KeyCode::Home => self.agent_form.edit_focused(|input| input.move_to_line_start()),
            KeyCode::End => self.agent_form.edit_focused(|input| input.move_to_line_end()),
            KeyCode::Backspace => self.agent_form.edit_focused(|input| input.backspace()),
            KeyCode::Delete => self.agent_form.edit_focused(|input| input.delete()),
            KeyCode::Char(ch) if !ctrl => self.agent_form.edit_focused(|input| input.insert_char(ch)),
            _ => {}
        }
    }
}

fn global_shortcut(key: KeyEvent) -> Option<CommandAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if ctrl => Some(CommandAction::Quit),
        KeyCode::Char('n') if ctrl => Some(CommandAction::NewChat),
        KeyCode::Char('r') if ctrl => Some(CommandAction::Reload),
        KeyCode::Tab => Some(CommandAction::FocusNext),
        KeyCode::BackTab => Some(CommandAction::FocusPrevious),
        KeyCode::F(1) => Some(CommandAction::ShowHelp),
        KeyCode::F(2) => Some(CommandAction::ToggleAgentForm),
        KeyCode::F(3) => Some(CommandAction::ShowProviders),
        KeyCode::F(5) => Some(CommandAction::CheckHealth),
        _ => None,
    }
}
