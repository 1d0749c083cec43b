//! Error types for transcript chunking

/// Error types for transcript chunking operations
#[derive(thiserror::Error, Debug)]
pub enum TranscriptChunkingError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Segment {index} starts at {offset}ms, before the previous segment at {previous_offset}ms"
    )]
    InvalidInput {
        index: usize,
        offset: u64,
        previous_offset: u64,
    },

    #[error("has_timestamps={has_timestamps} does not match a {payload} payload")]
    InputMismatch {
        has_timestamps: bool,
        payload: &'static str,
    },

    #[error("Timed text parsing failed: {0}")]
    TimedText(String),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for transcript chunking operations
pub type Result<T> = std::result::Result<T, TranscriptChunkingError>;

impl TranscriptChunkingError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an ordering violation error
    pub fn invalid_input(index: usize, offset: u64, previous_offset: u64) -> Self {
        Self::InvalidInput {
            index,
            offset,
            previous_offset,
        }
    }

    pub fn input_mismatch(has_timestamps: bool, payload: &'static str) -> Self {
        Self::InputMismatch {
            has_timestamps,
            payload,
        }
    }

    pub fn timed_text<S: Into<String>>(msg: S) -> Self {
        Self::TimedText(msg.into())
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InvalidInput { .. } => "invalid_input",
            Self::InputMismatch { .. } => "input_mismatch",
            Self::TimedText(_) => "timed_text",
            Self::Regex(_) => "regex",
            Self::Serialization(_) => "serialization",
        }
    }

    /// True when the caller handed in data the chunker cannot accept as-is,
    /// as opposed to a misconfigured chunker.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InputMismatch { .. }
                | Self::TimedText(_)
                | Self::Serialization(_)
        )
    }
}
