//! Configuration and statistics for transcript chunking

use super::error::{Result, TranscriptChunkingError};
use super::types::{BoundaryReason, Chunk, ChunkType};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Configuration for transcript chunking
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk in fallback mode
    pub max_chunk_chars: usize,
    /// Minimum silence between segments that opens a new topic
    pub time_gap_threshold_ms: u64,
    /// Reject segment sequences whose offsets decrease
    pub strict_ordering: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: Self::DEFAULT_MAX_CHUNK_CHARS,
            time_gap_threshold_ms: Self::DEFAULT_TIME_GAP_THRESHOLD_MS,
            strict_ordering: false,
        }
    }
}

impl ChunkingConfig {
    /// Approximates a safe per-chunk budget for a summarization prompt
    pub const DEFAULT_MAX_CHUNK_CHARS: usize = 7000;
    pub const DEFAULT_TIME_GAP_THRESHOLD_MS: u64 = 3000;
    pub const ENV_PREFIX: &'static str = "CHUNKING_";

    /// Create configuration sized for a downstream context window (in characters)
    pub fn for_context_window(max_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chars,
            ..Default::default()
        }
    }

    /// Load configuration from `CHUNKING_*` environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let config = envy::prefixed(Self::ENV_PREFIX)
            .from_env::<Self>()
            .map_err(|e| TranscriptChunkingError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`ChunkingConfig::from_env`] but over explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(Self::ENV_PREFIX)
            .from_iter::<_, Self>(vars)
            .map_err(|e| TranscriptChunkingError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_chars == 0 {
            return Err(TranscriptChunkingError::configuration(
                "max_chunk_chars must be greater than 0",
            ));
        }
        if self.time_gap_threshold_ms == 0 {
            return Err(TranscriptChunkingError::configuration(
                "time_gap_threshold_ms must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Return a copy with per-call overrides applied
    pub fn with_options(&self, options: &ChunkOptions) -> Result<Self> {
        let merged = Self {
            max_chunk_chars: options.max_chunk_chars.unwrap_or(self.max_chunk_chars),
            ..self.clone()
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// Per-call overrides for [`ChunkingConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkOptions {
    pub max_chunk_chars: Option<usize>,
}

impl ChunkOptions {
    pub fn with_max_chunk_chars(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: Some(max_chunk_chars),
        }
    }
}

/// Statistics for one chunking call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkingStatistics {
    /// Total processing time
    pub total_processing_time: Duration,
    /// Time spent on boundary detection
    pub boundary_detection_time: Duration,

    /// Input statistics
    pub input_segment_count: usize,
    pub input_char_count: usize,

    /// Boundaries by reason
    pub time_gap_boundaries: usize,
    pub keyword_boundaries: usize,

    /// Output chunk statistics
    pub total_chunks_created: usize,
    pub topic_chunks: usize,
    pub length_bounded_chunks: usize,
    pub oversized_chunks: usize,
    pub max_chars_in_chunk: usize,
    pub min_chars_in_chunk: usize,
    pub avg_chars_per_chunk: f32,

    total_chars_in_chunks: usize,
}

impl ChunkingStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_total_timing(&mut self) -> Instant {
        Instant::now()
    }

    pub fn finish_total_timing(&mut self, start: Instant) {
        self.total_processing_time = start.elapsed();
    }

    pub fn record_boundary_detection_time(&mut self, duration: Duration) {
        self.boundary_detection_time += duration;
    }

    pub fn record_input_segments(&mut self, segment_count: usize, char_count: usize) {
        self.input_segment_count += segment_count;
        self.input_char_count += char_count;
    }

    pub fn record_input_text(&mut self, text: &str) {
        self.input_char_count += text.chars().count();
    }

    pub fn record_boundary(&mut self, reason: BoundaryReason) {
        match reason {
            BoundaryReason::TimeGap => self.time_gap_boundaries += 1,
            BoundaryReason::Keyword => self.keyword_boundaries += 1,
        }
    }

    /// Record chunk creation by type and size
    pub fn record_chunk(&mut self, chunk: &Chunk) {
        self.total_chunks_created += 1;
        match chunk.chunk_type {
            ChunkType::TopicSegment => self.topic_chunks += 1,
            ChunkType::LengthBounded => self.length_bounded_chunks += 1,
            ChunkType::OversizedWord => self.oversized_chunks += 1,
        }

        let chars = chunk.char_length();
        self.total_chars_in_chunks += chars;
        if self.total_chunks_created == 1 || chars > self.max_chars_in_chunk {
            self.max_chars_in_chunk = chars;
        }
        if self.total_chunks_created == 1 || chars < self.min_chars_in_chunk {
            self.min_chars_in_chunk = chars;
        }
    }

    pub fn boundary_count(&self) -> usize {
        self.time_gap_boundaries + self.keyword_boundaries
    }

    /// Calculate derived metrics (call this after all processing is complete)
    pub fn calculate_derived_metrics(&mut self) {
        if self.total_chunks_created > 0 {
            self.avg_chars_per_chunk =
                self.total_chars_in_chunks as f32 / self.total_chunks_created as f32;
        }
    }

    /// Fold another call's statistics into this one
    pub fn merge(&mut self, other: &ChunkingStatistics) {
        let had_chunks = self.total_chunks_created > 0;

        self.total_processing_time += other.total_processing_time;
        self.boundary_detection_time += other.boundary_detection_time;
        self.input_segment_count += other.input_segment_count;
        self.input_char_count += other.input_char_count;
        self.time_gap_boundaries += other.time_gap_boundaries;
        self.keyword_boundaries += other.keyword_boundaries;
        self.total_chunks_created += other.total_chunks_created;
        self.topic_chunks += other.topic_chunks;
        self.length_bounded_chunks += other.length_bounded_chunks;
        self.oversized_chunks += other.oversized_chunks;
        self.total_chars_in_chunks += other.total_chars_in_chunks;

        if other.total_chunks_created > 0 {
            if !had_chunks {
                self.max_chars_in_chunk = other.max_chars_in_chunk;
                self.min_chars_in_chunk = other.min_chars_in_chunk;
            } else {
                self.max_chars_in_chunk = self.max_chars_in_chunk.max(other.max_chars_in_chunk);
                self.min_chars_in_chunk = self.min_chars_in_chunk.min(other.min_chars_in_chunk);
            }
        }
        self.calculate_derived_metrics();
    }

    /// Get summary as string for logging
    pub fn summary(&self) -> String {
        format!(
            "Chunking Stats: {} segments / {} chars -> {} chunks ({:.1} avg chars/chunk, max {}) in {}ms | \
            boundaries: {} time_gap, {} keyword | oversized: {}",
            self.input_segment_count,
            self.input_char_count,
            self.total_chunks_created,
            self.avg_chars_per_chunk,
            self.max_chars_in_chunk,
            self.total_processing_time.as_millis(),
            self.time_gap_boundaries,
            self.keyword_boundaries,
            self.oversized_chunks,
        )
    }
}
