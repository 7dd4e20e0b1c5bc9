//! Conversation widget - transcript plus thinking indicator

use crate::tui::state::TuiState;
use hometown_domain::{Role, SessionState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ConversationWidget<'a> {
    session: &'a SessionState,
    state: &'a TuiState,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(session: &'a SessionState, state: &'a TuiState) -> Self {
        Self { session, state }
    }

    fn role_color(role: Role) -> Color {
        match role {
            Role::User => Color::Cyan,
            Role::Assistant => Color::Green,
        }
    }

    /// Build transcript lines; user entries are right-aligned
    fn format_messages(&self) -> Text<'static> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        for msg in self.session.transcript() {
            let role = msg.role();
            let alignment = if role.is_user() {
                Alignment::Right
            } else {
                Alignment::Left
            };
            let role_style = Style::default()
                .fg(Self::role_color(role))
                .add_modifier(Modifier::BOLD);

            lines.push(
                Line::from(Span::styled(format!("{}:", role.label()), role_style))
                    .alignment(alignment),
            );
            for content_line in msg.text().lines() {
                lines.push(Line::from(content_line.to_string()).alignment(alignment));
            }
            lines.push(Line::from(""));
        }

        if self.session.is_busy() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", Role::Assistant.label()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("thinking{}", self.state.thinking_dots()),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        Text::from(lines)
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.format_messages();
        let visible_height = area.height.saturating_sub(2); // borders

        // Approximate wrapped height: one row per started block of `width` chars
        let content_width = area.width.saturating_sub(2).max(1) as usize;
        let total_lines: usize = text
            .lines
            .iter()
            .map(|line| line.width().max(1).div_ceil(content_width))
            .sum();
        let total_lines = total_lines.min(u16::MAX as usize) as u16;

        // scroll_offset=0 means "show bottom"
        let scroll = if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            let offset = (self.state.scroll_offset.min(u16::MAX as usize) as u16).min(max_scroll);
            max_scroll - offset
        } else {
            0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Conversation ")
            .style(Style::default().fg(Color::White));

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hometown_domain::Message;

    fn rendered(session: &SessionState, state: &TuiState) -> String {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        ConversationWidget::new(session, state).render(area, &mut buf);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_transcript_roles_and_alignment() {
        let mut session = SessionState::new();
        session.append_user_message("Hello").unwrap();
        session
            .append_resolution(Message::assistant("Hi there"))
            .unwrap();

        let state = TuiState::default();
        let text = ConversationWidget::new(&session, &state).format_messages();
        assert_eq!(text.lines[0].alignment, Some(Alignment::Right));
        assert_eq!(text.lines[3].alignment, Some(Alignment::Left));

        let screen = rendered(&session, &state);
        assert!(screen.contains("You:"));
        assert!(screen.contains("Hello"));
        assert!(screen.contains("Assistant:"));
        assert!(screen.contains("Hi there"));
        assert!(!screen.contains("thinking"));
    }

    #[test]
    fn test_thinking_indicator_follows_last_item_while_busy() {
        let mut session = SessionState::new();
        session.append_user_message("When was the mill built?").unwrap();

        let mut state = TuiState::default();
        state.advance_tick();
        state.advance_tick();

        let text = ConversationWidget::new(&session, &state).format_messages();
        let last = text.lines.last().unwrap();
        let rendered_last: String = last.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered_last, "Assistant: thinking..");
    }
}
