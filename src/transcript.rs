//! Chat transcript types
//!
//! A transcript is an append-only, chronologically ordered list of turns.
//! Appending never touches an existing value: it hands back a new transcript,
//! so a clone held by a previous render keeps showing what it showed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Who produced a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A single message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: ChatRole,
    text: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Arc<[ChatTurn]>,
}

impl Transcript {
    /// Start a conversation with the model's greeting as the only turn
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            turns: Arc::from(vec![ChatTurn::model(greeting)]),
        }
    }

    /// Return a transcript with `turn` added at the end
    pub fn append(&self, turn: ChatTurn) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend(self.turns.iter().cloned());
        turns.push(turn);
        Self {
            turns: Arc::from(turns),
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatTurn;
    type IntoIter = std::slice::Iter<'a, ChatTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_model_greeting() {
        let transcript = Transcript::new("hello");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0], ChatTurn::model("hello"));
    }

    #[test]
    fn append_leaves_previous_value_untouched() {
        let first = Transcript::new("hello");
        let second = first.append(ChatTurn::user("question"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.last(), Some(&ChatTurn::user("question")));
        assert_eq!(second.turns()[0], first.turns()[0]);
    }

    #[test]
    fn turns_keep_insertion_order() {
        let transcript = Transcript::new("g")
            .append(ChatTurn::user("one"))
            .append(ChatTurn::model("two"))
            .append(ChatTurn::user("three"));

        let texts: Vec<&str> = transcript.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["g", "one", "two", "three"]);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatTurn::model("hi")).unwrap();
        assert_eq!(json, r#"{"role":"model","text":"hi"}"#);
    }
}
