//! Error types for mailmark.

/// Why a message could not be turned into an [`Article`](crate::Article).
///
/// Every variant carries the message's sequence id so a caller can log the
/// failure without extra bookkeeping. All of these are recoverable at the
/// per-message granularity — the batch driver logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The raw bytes could not be parsed as an RFC822 message at all.
    #[error("message {id}: malformed message")]
    Malformed { id: u32 },

    /// The owner identity is missing from the From or To header.
    #[error("message {id}: invalid 'from' or 'to'")]
    InvalidSender { id: u32 },

    /// The To header carries more than one recipient.
    #[error("message {id}: too many recipients")]
    TooManyRecipients { id: u32 },

    /// Top-level media type outside the two supported shapes.
    #[error("message {id}: has no known content type {observed}")]
    UnsupportedContentType { id: u32, observed: String },

    /// The HTML part contained no anchor passing the selection filters.
    #[error("message {id}: no extractable link in html part")]
    NoExtractableLink { id: u32 },

    /// The plain-text message has no body.
    #[error("message {id}: empty body")]
    EmptyBody { id: u32 },

    /// An attachment part declared neither a Content-Type nor a
    /// Content-Disposition filename.
    #[error("message {id}: pdf without filename")]
    MissingFilename { id: u32 },

    /// The attachment body decoded to nothing.
    #[error("message {id}: pdf with corrupt content")]
    CorruptAttachment { id: u32 },

    /// Writing the attachment into the scratch directory failed.
    #[error("message {id}: io error: {source}")]
    Io {
        id: u32,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// The sequence id of the message this failure belongs to.
    pub fn id(&self) -> u32 {
        match self {
            Self::Malformed { id }
            | Self::InvalidSender { id }
            | Self::TooManyRecipients { id }
            | Self::UnsupportedContentType { id, .. }
            | Self::NoExtractableLink { id }
            | Self::EmptyBody { id }
            | Self::MissingFilename { id }
            | Self::CorruptAttachment { id }
            | Self::Io { id, .. } => *id,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::InvalidSender { .. } => "invalid_sender",
            Self::TooManyRecipients { .. } => "too_many_recipients",
            Self::UnsupportedContentType { .. } => "unsupported_content_type",
            Self::NoExtractableLink { .. } => "no_extractable_link",
            Self::EmptyBody { .. } => "empty_body",
            Self::MissingFilename { .. } => "missing_filename",
            Self::CorruptAttachment { .. } => "corrupt_attachment",
            Self::Io { .. } => "io",
        }
    }
}

/// Result type alias for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_their_message_id() {
        let err = ExtractError::InvalidSender { id: 42 };
        assert_eq!(err.id(), 42);

        let err = ExtractError::UnsupportedContentType {
            id: 7,
            observed: "image/png".into(),
        };
        assert_eq!(err.id(), 7);
    }

    #[test]
    fn display_includes_id_and_observed_type() {
        let err = ExtractError::UnsupportedContentType {
            id: 3,
            observed: "application/json".into(),
        };
        assert_eq!(
            err.to_string(),
            "message 3: has no known content type application/json"
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ExtractError::EmptyBody { id: 1 }.label(), "empty_body");
        assert_eq!(
            ExtractError::MissingFilename { id: 1 }.label(),
            "missing_filename"
        );
    }
}
