//! Send controller use case.
//!
//! Orchestrates one send cycle at a time over a [`SessionState`]:
//!
//! ```text
//! submit()                      tokio::spawn
//!   ├─ append_user_message        └─ service.ask(question)
//!   ├─ spawn ask ───────────────────────┐
//!   └─ return Accepted(cycle)           │ Completion
//!                                       ▼
//! next_completion() <── completion channel
//! resolve(completion)
//!   └─ append_resolution (exactly once per cycle)
//! ```
//!
//! The network call runs concurrently, but its result is delivered back
//! through a channel and applied by whoever owns the controller, so the
//! session state is only ever mutated from that single owner.

use crate::ports::answer_service::{Answer, AnswerError, AnswerService};
use hometown_domain::{DomainError, Message, Question, SessionState, SubmitRejection};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Identifier of one accepted send cycle, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleId(u64);

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a [`SendController::submit`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The question was accepted and a request is in flight
    Accepted(CycleId),
    /// Nothing happened
    Rejected(SubmitRejection),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Terminal outcome of one `ask` call, waiting to be applied to the session.
#[derive(Debug)]
pub struct Completion {
    cycle: CycleId,
    question: Question,
    result: Result<Answer, AnswerError>,
}

impl Completion {
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn result(&self) -> &Result<Answer, AnswerError> {
        &self.result
    }
}

/// Errors reported by the send controller
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Submission rejected: {0}")]
    Rejected(#[from] SubmitRejection),

    #[error("Completion for cycle {cycle} does not match the in-flight cycle")]
    UnexpectedCompletion { cycle: CycleId },

    #[error("Completion channel closed")]
    SessionClosed,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case owning the session state and driving send cycles.
pub struct SendController {
    state: SessionState,
    service: Arc<dyn AnswerService>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    next_cycle: u64,
    in_flight: Option<CycleId>,
    last_sources: Vec<String>,
}

impl SendController {
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(),
            service,
            completion_tx,
            completion_rx,
            next_cycle: 1,
            in_flight: None,
            last_sources: Vec::new(),
        }
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn in_flight(&self) -> Option<CycleId> {
        self.in_flight
    }

    /// Sources reported with the most recent well-formed answer
    pub fn last_sources(&self) -> &[String] {
        &self.last_sources
    }

    /// "Composing text changed" intent
    pub fn set_composing_text(&mut self, text: impl Into<String>) {
        self.state.set_composing_text(text);
    }

    /// "Submit requested" intent.
    ///
    /// Never blocks. When accepted, the user message is appended and the
    /// request is started on the tokio runtime; its result arrives through
    /// [`next_completion`](Self::next_completion). Must be called from
    /// within a tokio runtime.
    pub fn submit(&mut self) -> SubmitOutcome {
        let text = self.state.composing_text().to_string();
        let question = match self.state.append_user_message(&text) {
            Ok(question) => question,
            Err(rejection) => {
                debug!("Submit ignored: {}", rejection);
                return SubmitOutcome::Rejected(rejection);
            }
        };

        let cycle = CycleId(self.next_cycle);
        self.next_cycle += 1;
        self.in_flight = Some(cycle);

        info!("Cycle {} accepted: {}", cycle, question.preview());

        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = service.ask(&question).await;
            let completion = Completion {
                cycle,
                question,
                result,
            };
            if tx.send(completion).is_err() {
                // Session torn down while the request was outstanding
                debug!("Dropping completion for cycle {}: session closed", cycle);
            }
        });

        SubmitOutcome::Accepted(cycle)
    }

    /// Wait for the next completion of an outstanding request.
    ///
    /// Pending forever while idle, so it can sit in a `select!` loop.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Apply a completion to the session, exactly once per accepted cycle.
    ///
    /// Returns the appended assistant message. A completion that does not
    /// belong to the in-flight cycle is a programming error: it panics in
    /// debug builds and is rejected without touching the transcript in
    /// release builds.
    pub fn resolve(&mut self, completion: Completion) -> Result<Message, ControllerError> {
        let Completion { cycle, result, .. } = completion;

        debug_assert_eq!(
            self.in_flight,
            Some(cycle),
            "completion does not belong to the in-flight send cycle"
        );
        if self.in_flight != Some(cycle) {
            error!(
                "Ignoring completion for cycle {} (in flight: {:?})",
                cycle, self.in_flight
            );
            return Err(ControllerError::UnexpectedCompletion { cycle });
        }

        let resolution = match result {
            Ok(answer) => {
                debug!(
                    "Cycle {} answered ({} bytes, {} sources)",
                    cycle,
                    answer.text.len(),
                    answer.sources.len()
                );
                self.last_sources = answer.sources.clone();
                answer.into_resolution()
            }
            Err(e) => {
                warn!("Cycle {} failed: {}", cycle, e);
                self.last_sources.clear();
                e.into_resolution()
            }
        };

        let message = resolution.into_message();
        self.state.append_resolution(message.clone())?;
        self.in_flight = None;

        info!("Cycle {} resolved", cycle);
        Ok(message)
    }

    /// Submit the composing text and wait for its resolution.
    ///
    /// Convenience for non-interactive callers that have nothing else to do
    /// while the request is in flight.
    pub async fn submit_and_resolve(&mut self) -> Result<Message, ControllerError> {
        if let SubmitOutcome::Rejected(rejection) = self.submit() {
            return Err(rejection.into());
        }
        let completion = self
            .next_completion()
            .await
            .ok_or(ControllerError::SessionClosed)?;
        self.resolve(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hometown_domain::{NO_DATA_TEXT, Phase, Role};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    // ==================== Test Mocks ====================

    /// Replies with pre-scripted results, in order.
    struct ScriptedService {
        replies: Mutex<VecDeque<Result<Answer, AnswerError>>>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(replies: Vec<Result<Answer, AnswerError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                asked: Mutex::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnswerService for ScriptedService {
        async fn ask(&self, question: &Question) -> Result<Answer, AnswerError> {
            self.asked
                .lock()
                .unwrap()
                .push(question.content().to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AnswerError::Transport("no scripted reply".into())))
        }
    }

    /// Holds every request until the gate is opened.
    struct GatedService {
        gate: Arc<Notify>,
        reply: Result<Answer, AnswerError>,
        asked: Mutex<Vec<String>>,
        finished: AtomicBool,
    }

    impl GatedService {
        fn new(reply: Result<Answer, AnswerError>) -> Self {
            Self {
                gate: Arc::new(Notify::new()),
                reply,
                asked: Mutex::new(Vec::new()),
                finished: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl AnswerService for GatedService {
        async fn ask(&self, question: &Question) -> Result<Answer, AnswerError> {
            self.asked
                .lock()
                .unwrap()
                .push(question.content().to_string());
            self.gate.notified().await;
            self.finished.store(true, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn controller_with(service: Arc<dyn AnswerService>, text: &str) -> SendController {
        let mut controller = SendController::new(service);
        controller.set_composing_text(text);
        controller
    }

    fn texts(controller: &SendController) -> Vec<(Role, String)> {
        controller
            .state()
            .transcript()
            .iter()
            .map(|m| (m.role(), m.text().to_string()))
            .collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_hello_round_trip() {
        let service = Arc::new(ScriptedService::new(vec![Ok(Answer::new("Hi"))]));
        let mut controller = controller_with(service.clone(), "Hello");

        let outcome = controller.submit();

        assert!(outcome.is_accepted());
        assert_eq!(texts(&controller), vec![(Role::User, "Hello".to_string())]);
        assert!(controller.is_busy());
        assert_eq!(controller.state().composing_text(), "");

        let completion = controller.next_completion().await.unwrap();
        let message = controller.resolve(completion).unwrap();

        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.text(), "Hi");
        assert_eq!(
            texts(&controller),
            vec![
                (Role::User, "Hello".to_string()),
                (Role::Assistant, "Hi".to_string())
            ]
        );
        assert!(!controller.is_busy());
        assert_eq!(service.asked(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_inputs_are_noops() {
        let service = Arc::new(ScriptedService::new(vec![]));
        for blank in ["", " ", "  ", "\t\n", "\u{3000}"] {
            let mut controller = controller_with(service.clone(), blank);

            let outcome = controller.submit();

            assert_eq!(
                outcome,
                SubmitOutcome::Rejected(SubmitRejection::EmptyInput)
            );
            assert!(controller.state().transcript().is_empty());
            assert_eq!(controller.state().composing_text(), blank);
            assert_eq!(controller.state().phase(), Phase::Idle);
            assert!(controller.in_flight().is_none());
        }
        tokio::task::yield_now().await;
        assert!(service.asked().is_empty());
    }

    #[tokio::test]
    async fn test_submit_while_awaiting_is_noop() {
        let service = Arc::new(GatedService::new(Ok(Answer::new("late"))));
        let mut controller = controller_with(service.clone(), "A");

        let first = controller.submit();
        assert!(first.is_accepted());

        for _ in 0..5 {
            controller.set_composing_text("B");
            let outcome = controller.submit();
            assert_eq!(outcome, SubmitOutcome::Rejected(SubmitRejection::Busy));
        }

        assert_eq!(texts(&controller), vec![(Role::User, "A".to_string())]);
        assert_eq!(controller.state().phase(), Phase::Awaiting);

        service.gate.notify_one();
        let completion = controller.next_completion().await.unwrap();
        controller.resolve(completion).unwrap();

        assert_eq!(controller.state().transcript().len(), 2);
        assert!(!controller.is_busy());
        // The rejected draft is still there and can now be sent
        assert_eq!(controller.state().composing_text(), "B");
    }

    #[tokio::test]
    async fn test_question_is_captured_at_accept_time() {
        let service = Arc::new(GatedService::new(Ok(Answer::new("ok"))));
        let mut controller = controller_with(service.clone(), "original question");

        controller.submit();
        controller.set_composing_text("edited later");
        service.gate.notify_one();

        let completion = controller.next_completion().await.unwrap();
        assert_eq!(completion.question().content(), "original question");
        controller.resolve(completion).unwrap();

        assert_eq!(
            *service.asked.lock().unwrap(),
            vec!["original question".to_string()]
        );
    }

    #[tokio::test]
    async fn test_raw_text_is_displayed_and_sent() {
        let service = Arc::new(ScriptedService::new(vec![Ok(Answer::new("ok"))]));
        let mut controller = controller_with(service.clone(), "  spaced out  ");

        controller.submit_and_resolve().await.unwrap();

        assert_eq!(controller.state().transcript()[0].text(), "  spaced out  ");
        assert_eq!(service.asked(), vec!["  spaced out  ".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_entry() {
        let service = Arc::new(ScriptedService::new(vec![Err(AnswerError::Transport(
            "connection refused".into(),
        ))]));
        let mut controller = controller_with(service, "Hello");

        let message = controller.submit_and_resolve().await.unwrap();

        assert_eq!(message.role(), Role::Assistant);
        assert!(message.text().starts_with("Error:"));
        assert!(message.text().contains("connection refused"));
        assert!(!controller.is_busy());
        assert_eq!(controller.state().transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_payload_becomes_no_data_entry() {
        let service = Arc::new(ScriptedService::new(vec![Err(
            AnswerError::MalformedPayload("missing field `answer`".into()),
        )]));
        let mut controller = controller_with(service, "Hello");

        let message = controller.submit_and_resolve().await.unwrap();

        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.text(), NO_DATA_TEXT);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_failure_does_not_block_next_send() {
        let service = Arc::new(ScriptedService::new(vec![
            Err(AnswerError::Timeout),
            Ok(Answer::new("second answer")),
        ]));
        let mut controller = controller_with(service, "first");
        controller.submit_and_resolve().await.unwrap();

        controller.set_composing_text("second");
        let message = controller.submit_and_resolve().await.unwrap();

        assert_eq!(message.text(), "second answer");
        let roles: Vec<_> = texts(&controller).into_iter().map(|(r, _)| r).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[tokio::test]
    async fn test_cycles_are_numbered_in_order() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok(Answer::new("a1")),
            Ok(Answer::new("a2")),
        ]));
        let mut controller = controller_with(service, "q1");

        let SubmitOutcome::Accepted(first) = controller.submit() else {
            panic!("first submit should be accepted");
        };
        let completion = controller.next_completion().await.unwrap();
        assert_eq!(completion.cycle(), first);
        controller.resolve(completion).unwrap();

        controller.set_composing_text("q2");
        let SubmitOutcome::Accepted(second) = controller.submit() else {
            panic!("second submit should be accepted");
        };
        assert!(second > first);
        let completion = controller.next_completion().await.unwrap();
        controller.resolve(completion).unwrap();

        let all: Vec<_> = texts(&controller).into_iter().map(|(_, t)| t).collect();
        assert_eq!(all, vec!["q1", "a1", "q2", "a2"]);
    }

    #[tokio::test]
    async fn test_sources_are_kept_for_last_answer() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok(Answer::new("Hi").with_sources(vec!["history.md".into()])),
            Err(AnswerError::Timeout),
        ]));
        let mut controller = controller_with(service, "Hello");
        controller.submit_and_resolve().await.unwrap();
        assert_eq!(controller.last_sources(), ["history.md".to_string()]);

        controller.set_composing_text("again");
        controller.submit_and_resolve().await.unwrap();
        assert!(controller.last_sources().is_empty());
    }

    #[tokio::test]
    async fn test_submit_and_resolve_reports_rejection() {
        let service = Arc::new(ScriptedService::new(vec![]));
        let mut controller = controller_with(service, "   ");

        let result = controller.submit_and_resolve().await;

        assert!(matches!(
            result,
            Err(ControllerError::Rejected(SubmitRejection::EmptyInput))
        ));
    }

    #[tokio::test]
    async fn test_dropped_session_ignores_late_completion() {
        let service = Arc::new(GatedService::new(Ok(Answer::new("too late"))));
        let mut controller = controller_with(service.clone(), "Hello");
        controller.submit();
        // Let the spawned task reach the gate before tearing down
        tokio::task::yield_now().await;
        drop(controller);

        service.gate.notify_one();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(service.finished.load(Ordering::SeqCst));
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    #[should_panic(expected = "completion does not belong to the in-flight send cycle")]
    async fn test_duplicate_completion_panics_in_debug() {
        let service = Arc::new(ScriptedService::new(vec![Ok(Answer::new("Hi"))]));
        let mut controller = controller_with(service, "Hello");
        controller.submit_and_resolve().await.unwrap();

        let stale = Completion {
            cycle: CycleId(1),
            question: Question::try_new("Hello").unwrap(),
            result: Ok(Answer::new("Hi again")),
        };
        let _ = controller.resolve(stale);
    }

    #[cfg(not(debug_assertions))]
    #[tokio::test]
    async fn test_duplicate_completion_is_rejected_in_release() {
        let service = Arc::new(ScriptedService::new(vec![Ok(Answer::new("Hi"))]));
        let mut controller = controller_with(service, "Hello");
        controller.submit_and_resolve().await.unwrap();

        let stale = Completion {
            cycle: CycleId(1),
            question: Question::try_new("Hello").unwrap(),
            result: Ok(Answer::new("Hi again")),
        };
        let result = controller.resolve(stale);

        assert!(matches!(
            result,
            Err(ControllerError::UnexpectedCompletion { .. })
        ));
        assert_eq!(controller.state().transcript().len(), 2);
    }
}
