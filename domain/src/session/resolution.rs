//! Resolution of a send cycle into a transcript entry.

use super::entities::Message;

/// Placeholder shown when the service replied without a usable answer.
pub const NO_DATA_TEXT: &str = "No data found";

/// Shown when a request could not even be constructed.
pub const CONNECTION_FAILED_TEXT: &str = "Connection failed";

/// Classified outcome of one send cycle (Value Object)
///
/// Every variant resolves to exactly one assistant-role message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Well-formed answer text from the service
    Answered(String),
    /// Response arrived but carried no extractable answer string
    NoData,
    /// Transport-level failure with a human-readable description
    TransportFailure(String),
}

impl Resolution {
    /// Text of the transcript entry this resolution produces
    pub fn text(&self) -> String {
        match self {
            Resolution::Answered(answer) => answer.clone(),
            Resolution::NoData => NO_DATA_TEXT.to_string(),
            Resolution::TransportFailure(description) if description.trim().is_empty() => {
                CONNECTION_FAILED_TEXT.to_string()
            }
            Resolution::TransportFailure(description) => format!("Error: {}", description),
        }
    }

    /// Build the assistant-role transcript message
    pub fn into_message(self) -> Message {
        match self {
            Resolution::Answered(answer) => Message::assistant(answer),
            other => Message::assistant(other.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    #[test]
    fn test_answered_keeps_text_verbatim() {
        let msg = Resolution::Answered("  Hi\n".to_string()).into_message();
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.text(), "  Hi\n");
    }

    #[test]
    fn test_no_data_sentinel() {
        let msg = Resolution::NoData.into_message();
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.text(), NO_DATA_TEXT);
    }

    #[test]
    fn test_transport_failure_includes_description() {
        let msg = Resolution::TransportFailure("connection refused".to_string()).into_message();
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.text(), "Error: connection refused");
    }

    #[test]
    fn test_transport_failure_without_description() {
        let msg = Resolution::TransportFailure(String::new()).into_message();
        assert_eq!(msg.text(), CONNECTION_FAILED_TEXT);
    }
}
