//! Flag-based request shape used by callers that exchange JSON

use super::config::ChunkOptions;
use super::error::{Result, TranscriptChunkingError};
use super::types::{ChunkInput, Segment};
use serde::Deserialize;

/// Transcript payload: a segment list or a plain string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChunkContent {
    Segments(Vec<Segment>),
    Text(String),
}

impl ChunkContent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Segments(_) => "segments",
            Self::Text(_) => "text",
        }
    }
}

/// Request carrying an explicit `hasTimestamps` flag next to the content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRequest {
    pub has_timestamps: bool,
    pub content: ChunkContent,
    #[serde(default)]
    pub max_chunk_chars: Option<usize>,
}

impl ChunkRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn options(&self) -> ChunkOptions {
        ChunkOptions {
            max_chunk_chars: self.max_chunk_chars,
        }
    }

    /// Split into a typed input and options, rejecting a flag that disagrees
    /// with the payload.
    pub fn into_parts(self) -> Result<(ChunkInput, ChunkOptions)> {
        let options = self.options();
        Ok((ChunkInput::try_from(self)?, options))
    }
}

impl TryFrom<ChunkRequest> for ChunkInput {
    type Error = TranscriptChunkingError;

    fn try_from(request: ChunkRequest) -> Result<Self> {
        match (request.has_timestamps, request.content) {
            (true, ChunkContent::Segments(segments)) => Ok(ChunkInput::Timestamped { segments }),
            (false, ChunkContent::Text(text)) => Ok(ChunkInput::PlainText { text }),
            (has_timestamps, content) => Err(TranscriptChunkingError::input_mismatch(
                has_timestamps,
                content.kind(),
            )),
        }
    }
}
