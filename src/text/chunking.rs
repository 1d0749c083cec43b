//! Transcript chunking for summarization prompts
//!
//! Timestamped transcripts are split at topic boundaries (silence gaps and
//! lexical transition cues); untimed text is split into length-bounded chunks
//! at whitespace.

pub mod assembler;
pub mod chunker;
pub mod config;
pub mod detector;
pub mod error;
pub mod fallback;
pub mod request;
pub mod rules;
pub mod types;

// Re-export main public interfaces
pub use assembler::assemble_chunks;
pub use chunker::{TranscriptChunker, chunk_transcript, detect_topic_boundaries};
pub use config::{ChunkOptions, ChunkingConfig, ChunkingStatistics};
pub use detector::{BoundaryDetector, check_ordering};
pub use error::{Result, TranscriptChunkingError};
pub use fallback::chunk_plain_text;
pub use request::{ChunkContent, ChunkRequest};
pub use rules::{BoundaryRule, KeywordRule, KeywordTable, TimeGapRule, TransitionCue};
pub use types::{
    Boundary, BoundaryReason, Chunk, ChunkInput, ChunkType, Segment, segments_to_plain_text,
};
