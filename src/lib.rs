//! Transcript chunking and topic-boundary detection for summarization pipelines

pub mod text;
pub mod util;

pub use text::TimedTextParser;
pub use text::chunking::{
    Boundary, BoundaryReason, Chunk, ChunkInput, ChunkOptions, ChunkType, ChunkingConfig,
    Segment, TranscriptChunker, TranscriptChunkingError, chunk_transcript,
    detect_topic_boundaries,
};
