//! Submission sequencing for the advisor chat
//!
//! `ChatSession` is a two-state machine. `submit` moves Idle -> Pending and
//! records the user's turn, `resolve` moves Pending -> Idle and records the
//! model's turn. At most one request is ever outstanding.

use thiserror::Error;
use tracing::debug;

use crate::transcript::{ChatTurn, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Pending,
}

/// Why a submission was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("query is empty")]
    Empty,
    #[error("a reply is still pending")]
    Busy,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    state: SessionState,
}

impl ChatSession {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(greeting),
            state: SessionState::Idle,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.state == SessionState::Pending
    }

    /// Accept a user query, appending it to the transcript.
    ///
    /// Returns the query that should be dispatched to the advice client.
    /// Rejected submissions leave the session exactly as it was.
    pub fn submit(&mut self, query: &str) -> Result<String, SubmitRejected> {
        if query.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.is_pending() {
            return Err(SubmitRejected::Busy);
        }

        self.transcript = self.transcript.append(ChatTurn::user(query));
        self.state = SessionState::Pending;
        debug!(turns = self.transcript.len(), "query accepted");
        Ok(query.to_string())
    }

    /// Record the reply for the outstanding request.
    ///
    /// Returns false (and changes nothing) when no request is pending.
    pub fn resolve(&mut self, reply: impl Into<String>) -> bool {
        if !self.is_pending() {
            return false;
        }

        self.transcript = self.transcript.append(ChatTurn::model(reply));
        self.state = SessionState::Idle;
        debug!(turns = self.transcript.len(), "reply recorded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::ChatRole;

    const GREETING: &str = "أهلاً بك";

    #[test]
    fn submit_appends_user_turn_and_goes_pending() {
        let mut session = ChatSession::new(GREETING);
        let dispatched = session.submit("ما هي مدة دورة الآيلتس؟").unwrap();

        assert_eq!(dispatched, "ما هي مدة دورة الآيلتس؟");
        assert!(session.is_pending());
        assert_eq!(
            session.transcript().turns(),
            &[
                ChatTurn::model(GREETING),
                ChatTurn::user("ما هي مدة دورة الآيلتس؟"),
            ]
        );
    }

    #[test]
    fn resolve_appends_model_turn_and_goes_idle() {
        let mut session = ChatSession::new(GREETING);
        session.submit("ما هي مدة دورة الآيلتس؟").unwrap();

        assert!(session.resolve("دورة الآيلتس تمتد لمدة ٨ أسابيع."));
        assert!(!session.is_pending());
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(
            session.transcript().last(),
            Some(&ChatTurn::model("دورة الآيلتس تمتد لمدة ٨ أسابيع."))
        );
    }

    #[test]
    fn blank_queries_are_no_ops() {
        let mut session = ChatSession::new(GREETING);
        for query in ["", "   ", "\t\n"] {
            assert_eq!(session.submit(query), Err(SubmitRejected::Empty));
        }
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut session = ChatSession::new(GREETING);
        session.submit("first").unwrap();

        assert_eq!(session.submit("second"), Err(SubmitRejected::Busy));
        assert_eq!(session.transcript().len(), 2);
        assert!(session.is_pending());
    }

    #[test]
    fn resolve_without_pending_request_is_ignored() {
        let mut session = ChatSession::new(GREETING);
        assert!(!session.resolve("stray"));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn user_text_is_kept_verbatim() {
        let mut session = ChatSession::new(GREETING);
        session.submit("  padded  ").unwrap();
        assert_eq!(session.transcript().last().unwrap().text(), "  padded  ");
    }

    #[test]
    fn roles_alternate_over_several_exchanges() {
        let mut session = ChatSession::new(GREETING);
        for i in 0..3 {
            session.submit(&format!("q{i}")).unwrap();
            session.resolve(format!("a{i}"));
        }

        let roles: Vec<ChatRole> = session.transcript().iter().map(|t| t.role()).collect();
        assert_eq!(roles.len(), 7);
        assert_eq!(roles[0], ChatRole::Model);
        for pair in roles[1..].chunks(2) {
            assert_eq!(pair, &[ChatRole::User, ChatRole::Model]);
        }
        assert_eq!(session.transcript().last().unwrap().text(), "a2");
    }
}
