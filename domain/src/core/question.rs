//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum number of characters shown by [`Question::preview`].
const PREVIEW_CHARS: usize = 80;

/// A question to be sent to the answer service (Value Object)
///
/// Emptiness is judged on the trimmed form, but the raw text is kept
/// as typed: it is both what the transcript shows and what goes over
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if it trims to empty
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the raw question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Short single-line form for log output
    pub fn preview(&self) -> String {
        let line = self.content.trim().lines().next().unwrap_or_default();
        if line.chars().count() > PREVIEW_CHARS {
            let head: String = line.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", head)
        } else {
            line.to_string()
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s.clone()).ok_or(DomainError::InvalidQuestion(s))
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\n\t ").is_none());
    }

    #[test]
    fn test_try_new_keeps_raw_text() {
        let q = Question::try_new("  What is the old market?  ").unwrap();
        assert_eq!(q.content(), "  What is the old market?  ");
    }

    #[test]
    fn test_try_from_string_rejects_blank() {
        let err = Question::try_from("  ".to_string()).unwrap_err();
        assert_eq!(err, DomainError::InvalidQuestion("  ".to_string()));
    }

    #[test]
    fn test_preview_truncates_long_first_line() {
        let long = "x".repeat(200);
        let q = Question::try_new(format!("{}\nsecond line", long)).unwrap();
        let preview = q.preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let q = Question::try_new("Hello").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"Hello\"");
        assert!(serde_json::from_str::<Question>("\" \"").is_err());
    }
}
