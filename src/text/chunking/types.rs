//! Core data structures for transcript chunking

use serde::{Deserialize, Serialize};

/// One timed unit of transcript text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment text as delivered by the transcript source
    pub text: String,
    /// Start offset in milliseconds from the beginning of the transcript
    pub offset: u64,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: u64,
    /// Language tag (not interpreted here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Segment {
    pub fn new(text: impl Into<String>, offset: u64, duration: u64) -> Self {
        Self {
            text: text.into(),
            offset,
            duration,
            lang: None,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// End of the segment in milliseconds (`offset + duration`)
    pub fn end_ms(&self) -> u64 {
        self.offset.saturating_add(self.duration)
    }

    /// Signed silence between the end of `previous` and the start of this segment.
    /// Negative when the segments overlap.
    pub fn gap_after(&self, previous: &Segment) -> i128 {
        i128::from(self.offset) - i128::from(previous.end_ms())
    }
}

/// Why a topic boundary was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryReason {
    /// Silence between segments reached the configured threshold
    TimeGap,
    /// Segment text contains a transition cue
    Keyword,
}

impl BoundaryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryReason::TimeGap => "time_gap",
            BoundaryReason::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected topic transition. `segment_index` is never 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    pub segment_index: usize,
    pub offset_ms: u64,
    pub reason: BoundaryReason,
}

/// How a chunk was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Contiguous segments between two topic boundaries
    TopicSegment,
    /// Words accumulated up to the character limit
    LengthBounded,
    /// A single word longer than the character limit, kept whole
    OversizedWord,
}

impl ChunkType {
    /// Check if this chunk carries timing metadata
    pub fn is_timestamped(&self) -> bool {
        matches!(self, ChunkType::TopicSegment)
    }

    /// Get a human-readable description of the chunk type
    pub fn description(&self) -> &'static str {
        match self {
            ChunkType::TopicSegment => "Topic-aligned segment group",
            ChunkType::LengthBounded => "Length-bounded word group",
            ChunkType::OversizedWord => "Single word over the length limit",
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A contiguous group of segments (timestamped mode) or words (fallback mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Chunk content
    pub text: String,
    /// Offset of the first segment (timestamped mode only)
    pub start_ms: Option<u64>,
    /// `offset + duration` of the last segment (timestamped mode only)
    pub end_ms: Option<u64>,
    /// Positions of the contributing segments (timestamped mode only)
    pub segment_indices: Option<Vec<usize>>,
    /// Index of this chunk in the sequence
    pub chunk_index: usize,
    pub chunk_type: ChunkType,
    /// Reason of the boundary that opened this chunk; `None` for the first chunk
    pub opened_by: Option<BoundaryReason>,
}

impl Chunk {
    /// Create a chunk from a slice of segments starting at `first_index`
    pub fn from_segments(
        segments: &[Segment],
        first_index: usize,
        chunk_index: usize,
        opened_by: Option<BoundaryReason>,
    ) -> Self {
        use itertools::Itertools;

        Self {
            text: segments.iter().map(|s| s.text.as_str()).join(" "),
            start_ms: segments.first().map(|s| s.offset),
            end_ms: segments.last().map(Segment::end_ms),
            segment_indices: Some((first_index..first_index + segments.len()).collect()),
            chunk_index,
            chunk_type: ChunkType::TopicSegment,
            opened_by,
        }
    }

    /// Create an untimed chunk of plain text
    pub fn from_text(text: String, chunk_index: usize, chunk_type: ChunkType) -> Self {
        Self {
            text,
            start_ms: None,
            end_ms: None,
            segment_indices: None,
            chunk_index,
            chunk_type,
            opened_by: None,
        }
    }

    /// Get the length of the chunk in characters
    pub fn char_length(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of segments in this chunk (0 in fallback mode)
    pub fn segment_count(&self) -> usize {
        self.segment_indices.as_ref().map_or(0, Vec::len)
    }

    /// Duration covered by this chunk, when timed
    pub fn duration_ms(&self) -> Option<u64> {
        match (self.start_ms, self.end_ms) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Transcript content handed to the chunker.
///
/// The variant decides the chunking mode, so a timestamp flag can never disagree
/// with the payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkInput {
    /// Segments with trustworthy per-segment timing
    Timestamped { segments: Vec<Segment> },
    /// Flat text without timing
    PlainText { text: String },
}

impl ChunkInput {
    pub fn timestamped(segments: Vec<Segment>) -> Self {
        Self::Timestamped { segments }
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn has_timestamps(&self) -> bool {
        matches!(self, Self::Timestamped { .. })
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Timestamped { segments } => segments.is_empty(),
            Self::PlainText { text } => text.trim().is_empty(),
        }
    }
}

/// Join segment texts with a single space, dropping all timing.
pub fn segments_to_plain_text(segments: &[Segment]) -> String {
    use itertools::Itertools;
    segments.iter().map(|s| s.text.as_str()).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_gap() {
        let prev = Segment::new("Intro", 0, 1000);
        let next = Segment::new("Still intro", 1200, 800);
        assert_eq!(next.gap_after(&prev), 200);
        assert_eq!(next.end_ms(), 2000);

        let overlapping = Segment::new("Overlap", 900, 100);
        assert_eq!(overlapping.gap_after(&prev), -100);
    }

    #[test]
    fn test_segment_gap_at_extreme_offsets() {
        let prev = Segment::new("a", 0, u64::MAX);
        let next = Segment::new("b", i64::MAX as u64, 0);
        assert_eq!(next.gap_after(&prev), i64::MAX as i128 - u64::MAX as i128);
        assert_eq!(prev.gap_after(&Segment::new("c", u64::MAX, 0)), -(u64::MAX as i128));
    }

    #[test]
    fn test_segment_deserialize_defaults() {
        let segment: Segment = serde_json::from_str(r#"{"text":"hello","offset":1500}"#).unwrap();
        assert_eq!(segment, Segment::new("hello", 1500, 0));

        let segment: Segment =
            serde_json::from_str(r#"{"text":"hola","offset":0,"duration":700,"lang":"es"}"#)
                .unwrap();
        assert_eq!(segment.lang.as_deref(), Some("es"));
    }

    #[test]
    fn test_boundary_serialization() {
        let boundary = Boundary {
            segment_index: 2,
            offset_ms: 5500,
            reason: BoundaryReason::TimeGap,
        };
        let json = serde_json::to_value(&boundary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"segmentIndex": 2, "offsetMs": 5500, "reason": "time_gap"})
        );
        assert_eq!(BoundaryReason::Keyword.to_string(), "keyword");
    }

    #[test]
    fn test_chunk_from_segments() {
        let segments = vec![
            Segment::new("Intro part.", 0, 1000),
            Segment::new("Continuing intro.", 1200, 800),
        ];
        let chunk = Chunk::from_segments(&segments, 0, 0, None);

        assert_eq!(chunk.text, "Intro part. Continuing intro.");
        assert_eq!(chunk.start_ms, Some(0));
        assert_eq!(chunk.end_ms, Some(2000));
        assert_eq!(chunk.segment_indices, Some(vec![0, 1]));
        assert_eq!(chunk.segment_count(), 2);
        assert_eq!(chunk.duration_ms(), Some(2000));
        assert!(chunk.chunk_type.is_timestamped());
    }

    #[test]
    fn test_chunk_from_text() {
        let chunk = Chunk::from_text("naïve words".to_string(), 3, ChunkType::LengthBounded);

        assert_eq!(chunk.char_length(), 11);
        assert_eq!(chunk.chunk_index, 3);
        assert_eq!(chunk.segment_count(), 0);
        assert!(chunk.start_ms.is_none());
        assert!(chunk.duration_ms().is_none());
        assert!(!chunk.chunk_type.is_timestamped());
    }

    #[test]
    fn test_chunk_input() {
        assert!(ChunkInput::timestamped(vec![]).has_timestamps());
        assert!(ChunkInput::timestamped(vec![]).is_empty());
        assert!(!ChunkInput::plain_text("a b").has_timestamps());
        assert!(ChunkInput::plain_text("  \n ").is_empty());
    }

    #[test]
    fn test_segments_to_plain_text() {
        let segments = vec![Segment::new("one", 0, 10), Segment::new("two three", 10, 10)];
        assert_eq!(segments_to_plain_text(&segments), "one two three");
        assert_eq!(segments_to_plain_text(&[]), "");
    }
}
