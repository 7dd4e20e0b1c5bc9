//! TUI application state
//!
//! Screen-local state only: the input buffer and cursor, scroll position
//! and animation tick. The transcript and busy flag live in the
//! session owned by the send controller.

use std::time::{Duration, Instant};

/// Central TUI state, owned by the TuiApp select! loop
pub struct TuiState {
    // -- Input buffer (mirrors the session's composing text) --
    pub input: String,
    pub cursor_pos: usize,

    // -- Transcript view (0 = pinned to bottom) --
    pub scroll_offset: usize,

    // -- Animation --
    pub tick: usize,

    // -- Status bar --
    pub endpoint: String,
    pub show_help_hint: bool,
    pub flash_message: Option<(String, Instant)>,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            tick: 0,
            endpoint: String::new(),
            show_help_hint: true,
            flash_message: None,
            should_quit: false,
        }
    }
}

impl TuiState {
    pub fn new(endpoint: impl Into<String>, show_help_hint: bool) -> Self {
        Self {
            endpoint: endpoint.into(),
            show_help_hint,
            ..Self::default()
        }
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let prev_char_len = self.prev_char_len();
            self.cursor_pos -= prev_char_len;
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos -= self.prev_char_len();
    }

    pub fn cursor_right(&mut self) {
        let next_char_len = self.input[self.cursor_pos..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(0);
        self.cursor_pos += next_char_len;
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Clear the input after an accepted submit
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn prev_char_len(&self) -> usize {
        self.input[..self.cursor_pos]
            .chars()
            .next_back()
            .map(|c| c.len_utf8())
            .unwrap_or(0)
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    // -- Animation / flash --

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Trailing dots for the thinking indicator, cycling through 0..=3
    pub fn thinking_dots(&self) -> &'static str {
        match self.tick % 4 {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }

    pub fn expire_flash(&mut self, ttl: Duration) {
        if let Some((_, shown_at)) = &self.flash_message
            && shown_at.elapsed() >= ttl
        {
            self.flash_message = None;
        }
    }
}
