//! Input widget - single-line text input, disabled while a send is in flight

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";

pub struct InputWidget<'a> {
    state: &'a TuiState,
    busy: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState, busy: bool) -> Self {
        Self { state, busy }
    }

    fn build_line(&self) -> Line<'static> {
        let text = self.state.input.as_str();

        if self.busy {
            let dim = Style::default().fg(Color::DarkGray);
            return Line::from(vec![
                Span::styled(PROMPT, dim.add_modifier(Modifier::BOLD)),
                Span::styled(text.to_string(), dim),
            ]);
        }

        let color = Color::Green;
        let cursor_style = Style::default().fg(Color::Black).bg(color);
        let cursor = self.state.cursor_pos.min(text.len());
        let (before, after) = text.split_at(cursor);

        let mut spans = vec![
            Span::styled(PROMPT, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(before.to_string()),
        ];

        match after.chars().next() {
            // Cursor at end of line: block cursor on a space
            None => spans.push(Span::styled(" ", cursor_style)),
            Some(ch) => {
                let ch_len = ch.len_utf8();
                spans.push(Span::styled(after[..ch_len].to_string(), cursor_style));
                if ch_len < after.len() {
                    spans.push(Span::raw(after[ch_len..].to_string()));
                }
            }
        }

        Line::from(spans)
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, border_style) = if self.busy {
            (" Waiting for answer ", Style::default().fg(Color::DarkGray))
        } else {
            (" Ask ", Style::default().fg(Color::Green))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(border_style);

        // Keep the cursor visible on long input
        let inner_width = area.width.saturating_sub(2) as usize;
        let cursor = self.state.cursor_pos.min(self.state.input.len());
        let cursor_col = PROMPT.len() + self.state.input[..cursor].chars().count() + 1;
        let scroll_x = cursor_col.saturating_sub(inner_width).min(u16::MAX as usize) as u16;

        Paragraph::new(self.build_line())
            .block(block)
            .scroll((0, scroll_x))
            .render(area, buf);
    }
}
