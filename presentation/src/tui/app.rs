//! TUI application - main loop
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)
//!   ├─ crossterm EventStream ──> KeyHandler ──> SendController::submit / set_composing_text
//!   ├─ SendController::next_completion ─────> SendController::resolve
//!   └─ tick_interval (thinking indicator, flash expiry)
//! ```
//!
//! The controller spawns the request task itself; its completion comes
//! back through the controller's channel and is applied here, on the
//! same task that renders.

use super::keys::{Action, KeyHandler};
use super::state::TuiState;
use super::widgets::{
    MainLayout, conversation::ConversationWidget, input::InputWidget, status_bar::StatusBarWidget,
};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use hometown_application::{Completion, SendController, SubmitOutcome};
use hometown_domain::SubmitRejection;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info};

const FLASH_TTL: Duration = Duration::from_secs(4);
const PAGE_LINES: usize = 10;

/// Display options for the chat screen
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Redraw interval, drives the thinking indicator
    pub tick: Duration,
    /// Show key hints in the status bar
    pub show_help_hint: bool,
    /// Endpoint shown in the status bar when hints are hidden
    pub endpoint: String,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            show_help_hint: true,
            endpoint: String::new(),
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    controller: SendController,
    options: TuiOptions,
}

impl TuiApp {
    pub fn new(controller: SendController, options: TuiOptions) -> Self {
        Self {
            controller,
            options,
        }
    }

    /// Run the TUI main loop until the user quits
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
            original_hook(info);
        }));

        let mut state = TuiState::new(&self.options.endpoint, self.options.show_help_hint);
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(self.options.tick);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, &state)) {
                break Err(e);
            }

            if state.should_quit {
                break Ok(());
            }

            tokio::select! {
                // Terminal events (keyboard, resize)
                Some(Ok(term_event)) = event_stream.next() => {
                    self.handle_terminal_event(&mut state, term_event);
                }

                // Completion of the in-flight send cycle
                Some(completion) = self.controller.next_completion() => {
                    self.apply_completion(&mut state, completion);
                }

                // Thinking indicator animation, flash expiry
                _ = tick.tick() => {
                    state.advance_tick();
                    state.expire_flash(FLASH_TTL);
                }
            }
        };

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    /// Render all widgets
    fn render(&self, frame: &mut ratatui::Frame, state: &TuiState) {
        let layout = MainLayout::compute(frame.area());
        let session = self.controller.state();
        let busy = session.is_busy();

        frame.render_widget(ConversationWidget::new(session, state), layout.conversation);
        frame.render_widget(InputWidget::new(state, busy), layout.input);
        frame.render_widget(StatusBarWidget::new(state, busy), layout.status_bar);
    }

    /// Handle a terminal (crossterm) event
    fn handle_terminal_event(&mut self, state: &mut TuiState, event: Event) {
        match event {
            Event::Key(key) => {
                let action = KeyHandler::handle(key);
                self.handle_action(state, action);
            }
            Event::Paste(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.handle_action(state, Action::InsertChar(c));
                }
            }
            // Resize is picked up on the next draw
            _ => {}
        }
    }

    /// Handle a semantic key action
    fn handle_action(&mut self, state: &mut TuiState, action: Action) {
        if action.is_edit() && self.controller.is_busy() {
            // Input is disabled while a cycle is in flight
            return;
        }

        match action {
            Action::None => {}
            Action::Quit => state.should_quit = true,

            // Text editing
            Action::InsertChar(c) => state.insert_char(c),
            Action::DeleteChar => state.delete_char(),
            Action::DeleteForward => state.delete_forward(),
            Action::CursorLeft => state.cursor_left(),
            Action::CursorRight => state.cursor_right(),
            Action::CursorStart => state.cursor_home(),
            Action::CursorEnd => state.cursor_end(),

            // Scrolling
            Action::ScrollUp => state.scroll_up(1),
            Action::ScrollDown => state.scroll_down(1),
            Action::PageUp => state.scroll_up(PAGE_LINES),
            Action::PageDown => state.scroll_down(PAGE_LINES),

            Action::Submit => self.submit(state),
        }

        if action.is_edit() {
            self.controller.set_composing_text(state.input.clone());
        }
    }

    fn submit(&mut self, state: &mut TuiState) {
        match self.controller.submit() {
            SubmitOutcome::Accepted(cycle) => {
                debug!("Chat screen submitted cycle {}", cycle);
                state.clear_input();
                state.scroll_to_bottom();
            }
            SubmitOutcome::Rejected(SubmitRejection::EmptyInput) => {}
            SubmitOutcome::Rejected(SubmitRejection::Busy) => {
                state.set_flash("Still waiting for the previous answer");
            }
        }
    }

    /// Apply a completion from the controller's channel
    fn apply_completion(&mut self, state: &mut TuiState, completion: Completion) {
        let cycle = completion.cycle();
        match self.controller.resolve(completion) {
            Ok(message) => {
                info!("Chat screen showing reply for cycle {}", cycle);
                if !self.controller.last_sources().is_empty() {
                    state.set_flash(format!(
                        "Sources: {}",
                        self.controller.last_sources().join(", ")
                    ));
                }
                state.scroll_to_bottom();
                debug!("Reply: {}", message.text());
            }
            Err(e) => error!("Dropped completion for cycle {}: {}", cycle, e),
        }
    }
}
