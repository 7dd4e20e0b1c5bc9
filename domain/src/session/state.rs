//! Session state - the transcript plus composing/busy flags.

use super::entities::Message;
use crate::core::error::DomainError;
use crate::core::question::Question;
use thiserror::Error;

/// Why a submission was not accepted.
///
/// Both are silent no-ops for the user; they are reported to the caller
/// only so it can log or test them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("input is empty after trimming")]
    EmptyInput,

    #[error("a send cycle is already in flight")]
    Busy,
}

/// Send-cycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request in flight; a submission may be accepted
    #[default]
    Idle,
    /// A request is in flight; submissions are rejected
    Awaiting,
}

/// Mutable session aggregate.
///
/// Written only by the send controller; the presentation layer reads it
/// through the accessors. The transcript only ever grows.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Vec<Message>,
    composing_text: String,
    is_busy: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Accessors --

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    pub fn composing_text(&self) -> &str {
        &self.composing_text
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn phase(&self) -> Phase {
        if self.is_busy {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }

    // -- Mutations --

    /// Replace the unsent input.
    ///
    /// Not guarded against the busy state: the presentation layer disables
    /// input while a cycle is in flight.
    pub fn set_composing_text(&mut self, text: impl Into<String>) {
        self.composing_text = text.into();
    }

    /// Accept `text` as the next user message.
    ///
    /// On success the raw text is appended as a user message, the composing
    /// text is cleared and the session becomes busy. On rejection nothing
    /// changes.
    pub fn append_user_message(&mut self, text: &str) -> Result<Question, SubmitRejection> {
        if self.is_busy {
            return Err(SubmitRejection::Busy);
        }
        let question = Question::try_new(text).ok_or(SubmitRejection::EmptyInput)?;

        self.transcript.push(Message::user(question.content()));
        self.composing_text.clear();
        self.is_busy = true;
        Ok(question)
    }

    /// Append the message resolving the in-flight cycle and leave the busy state.
    ///
    /// Calling this while idle is a contract violation: it panics in debug
    /// builds. In release builds the transcript is left untouched and
    /// [`DomainError::NotAwaiting`] is returned.
    pub fn append_resolution(&mut self, message: Message) -> Result<(), DomainError> {
        debug_assert!(
            self.is_busy,
            "resolution appended while no send cycle is in flight"
        );
        if !self.is_busy {
            return Err(DomainError::NotAwaiting);
        }
        self.transcript.push(message);
        self.is_busy = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = SessionState::new();
        assert!(state.transcript().is_empty());
        assert_eq!(state.composing_text(), "");
        assert!(!state.is_busy());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_append_user_message_accepts_and_goes_busy() {
        let mut state = SessionState::new();
        state.set_composing_text("Hello");

        let question = state.append_user_message("Hello").unwrap();

        assert_eq!(question.content(), "Hello");
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript()[0].role(), Role::User);
        assert_eq!(state.transcript()[0].text(), "Hello");
        assert_eq!(state.composing_text(), "");
        assert_eq!(state.phase(), Phase::Awaiting);
    }

    #[test]
    fn test_append_user_message_keeps_raw_whitespace() {
        let mut state = SessionState::new();
        state.append_user_message("  indented\n").unwrap();
        assert_eq!(state.transcript()[0].text(), "  indented\n");
    }

    #[test]
    fn test_blank_input_is_rejected_without_change() {
        let mut state = SessionState::new();
        state.set_composing_text("   ");

        let result = state.append_user_message("   ");

        assert_eq!(result, Err(SubmitRejection::EmptyInput));
        assert!(state.transcript().is_empty());
        assert_eq!(state.composing_text(), "   ");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_busy_rejects_second_user_message() {
        let mut state = SessionState::new();
        state.append_user_message("A").unwrap();
        state.set_composing_text("B");

        let result = state.append_user_message("B");

        assert_eq!(result, Err(SubmitRejection::Busy));
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.composing_text(), "B");
        assert!(state.is_busy());
    }

    #[test]
    fn test_append_resolution_returns_to_idle() {
        let mut state = SessionState::new();
        state.append_user_message("Hello").unwrap();

        state.append_resolution(Message::assistant("Hi")).unwrap();

        assert_eq!(state.transcript().len(), 2);
        assert_eq!(state.last_message().unwrap().text(), "Hi");
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "resolution appended while no send cycle is in flight")]
    fn test_append_resolution_while_idle_panics_in_debug() {
        let mut state = SessionState::new();
        let _ = state.append_resolution(Message::assistant("orphan"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "resolution appended while no send cycle is in flight")]
    fn test_double_resolution_panics_in_debug() {
        let mut state = SessionState::new();
        state.append_user_message("Q").unwrap();
        state.append_resolution(Message::assistant("A1")).unwrap();

        let _ = state.append_resolution(Message::assistant("A2"));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_append_resolution_while_idle_is_contract_violation() {
        let mut state = SessionState::new();

        let result = state.append_resolution(Message::assistant("orphan"));

        assert_eq!(result, Err(DomainError::NotAwaiting));
        assert!(state.transcript().is_empty());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_double_resolution_is_rejected() {
        let mut state = SessionState::new();
        state.append_user_message("Q").unwrap();
        state.append_resolution(Message::assistant("A1")).unwrap();

        let result = state.append_resolution(Message::assistant("A2"));

        assert_eq!(result, Err(DomainError::NotAwaiting));
        assert_eq!(state.transcript().len(), 2);
        assert_eq!(state.last_message().unwrap().text(), "A1");
    }

    #[test]
    fn test_cycles_alternate_in_order() {
        let mut state = SessionState::new();
        for i in 0..3 {
            state.append_user_message(&format!("q{}", i)).unwrap();
            state
                .append_resolution(Message::assistant(format!("a{}", i)))
                .unwrap();
        }

        let texts: Vec<_> = state.transcript().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["q0", "a0", "q1", "a1", "q2", "a2"]);
        let roles: Vec<_> = state.transcript().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant
            ]
        );
    }
}
