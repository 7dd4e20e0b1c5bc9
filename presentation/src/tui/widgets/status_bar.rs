//! Status bar widget - send state + key hints + flash messages

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const KEY_HINTS: &str = "Enter:send  Up/Down:scroll  Esc:quit";

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
    busy: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState, busy: bool) -> Self {
        Self { state, busy }
    }

    fn indicator(&self) -> (&'static str, Color) {
        if self.busy {
            ("WAITING", Color::Yellow)
        } else {
            ("READY", Color::Green)
        }
    }

    /// Flash message, else key hints, else the endpoint
    fn right_text(&self) -> String {
        if let Some((ref flash, _)) = self.state.flash_message {
            flash.clone()
        } else if self.state.show_help_hint {
            KEY_HINTS.to_string()
        } else {
            self.state.endpoint.clone()
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        // Left: send state indicator
        let (label, color) = self.indicator();
        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD);
        let mode_line = Line::from(vec![Span::styled(format!(" {} ", label), mode_style)]);
        let mode_width = label.len() as u16 + 2; // padding

        buf.set_line(area.x, area.y, &mode_line, mode_width);

        // Right-aligned hints
        let right_text = self.right_text();
        let right_width = right_text.chars().count() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + mode_width {
            let right_line = Line::from(vec![Span::styled(
                right_text,
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )]);
            buf.set_line(right_x, area.y, &right_line, right_width + 1);
        }
    }
}
