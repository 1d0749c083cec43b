//! Transcript chunker: dispatches timestamped input to boundary detection and
//! assembly, and plain text to length-bounded chunking

use super::{
    assembler::assemble_chunks,
    config::{ChunkOptions, ChunkingConfig, ChunkingStatistics},
    detector::{BoundaryDetector, check_ordering},
    error::Result,
    fallback::chunk_plain_text,
    types::{Boundary, Chunk, ChunkInput, Segment},
};
use once_cell::sync::Lazy;
use std::time::Instant;
use tracing::{debug, info, warn};

static DEFAULT_CHUNKER: Lazy<TranscriptChunker> = Lazy::new(TranscriptChunker::default);

/// Transcript chunker for summarization prompts.
///
/// Holds no per-call state: a single instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct TranscriptChunker {
    config: ChunkingConfig,
    detector: BoundaryDetector,
}

impl TranscriptChunker {
    /// Create a chunker with the default rule table and `config`'s gap threshold
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        let detector = BoundaryDetector::from_config(&config);
        Ok(Self { config, detector })
    }

    /// Create a chunker with an explicit detector. The detector's rules take
    /// precedence over `config.time_gap_threshold_ms`.
    pub fn with_detector(config: ChunkingConfig, detector: BoundaryDetector) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, detector })
    }

    /// Create a chunker from `CHUNKING_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ChunkingConfig::from_env()?)
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub fn detector(&self) -> &BoundaryDetector {
        &self.detector
    }

    /// Detect topic boundaries, checking segment order first in strict mode
    pub fn detect_boundaries(&self, segments: &[Segment]) -> Result<Vec<Boundary>> {
        if self.config.strict_ordering {
            check_ordering(segments)?;
        }
        Ok(self.detector.detect(segments))
    }

    /// Chunk with the configured limits
    pub fn chunk(&self, input: &ChunkInput) -> Result<Vec<Chunk>> {
        self.chunk_with_options(input, &ChunkOptions::default())
    }

    /// Chunk with per-call overrides
    pub fn chunk_with_options(
        &self,
        input: &ChunkInput,
        options: &ChunkOptions,
    ) -> Result<Vec<Chunk>> {
        self.chunk_with_statistics(input, options)
            .map(|(chunks, _)| chunks)
    }

    /// Chunk and report statistics for this call
    pub fn chunk_with_statistics(
        &self,
        input: &ChunkInput,
        options: &ChunkOptions,
    ) -> Result<(Vec<Chunk>, ChunkingStatistics)> {
        let config = self.config.with_options(options)?;
        let mut statistics = ChunkingStatistics::new();
        let total_start = statistics.start_total_timing();

        let chunks = match input {
            ChunkInput::Timestamped { segments } => {
                debug!(
                    "Starting timestamped chunking for {} segments",
                    segments.len()
                );
                if config.strict_ordering {
                    check_ordering(segments).inspect_err(|e| {
                        warn!("Rejecting out-of-order transcript: {}", e);
                    })?;
                }
                statistics.record_input_segments(
                    segments.len(),
                    segments.iter().map(|s| s.text.chars().count()).sum(),
                );

                let detect_start = Instant::now();
                let boundaries = self.detector.detect(segments);
                statistics.record_boundary_detection_time(detect_start.elapsed());
                for boundary in &boundaries {
                    statistics.record_boundary(boundary.reason);
                }

                assemble_chunks(segments, &boundaries)
            }
            ChunkInput::PlainText { text } => {
                debug!(
                    "Starting fallback chunking for text of {} bytes (max_chunk_chars={})",
                    text.len(),
                    config.max_chunk_chars
                );
                statistics.record_input_text(text);
                chunk_plain_text(text, config.max_chunk_chars)
            }
        };

        for chunk in &chunks {
            statistics.record_chunk(chunk);
        }
        statistics.finish_total_timing(total_start);
        statistics.calculate_derived_metrics();

        info!("Transcript chunking completed: {} chunks", chunks.len());
        debug!("{}", statistics.summary());

        Ok((chunks, statistics))
    }

    /// Chunk several transcripts, aggregating statistics
    pub fn batch_chunk(
        &self,
        inputs: &[ChunkInput],
    ) -> Result<(Vec<Vec<Chunk>>, ChunkingStatistics)> {
        let options = ChunkOptions::default();
        let mut results = Vec::with_capacity(inputs.len());
        let mut total = ChunkingStatistics::new();

        for input in inputs {
            let (chunks, statistics) = self.chunk_with_statistics(input, &options)?;
            total.merge(&statistics);
            results.push(chunks);
        }

        info!(
            "Batch chunking completed: {} transcripts, {} total chunks",
            inputs.len(),
            total.total_chunks_created
        );
        Ok((results, total))
    }
}

/// Detect topic boundaries with the default rules (3000 ms gap, default cues)
pub fn detect_topic_boundaries(segments: &[Segment]) -> Vec<Boundary> {
    DEFAULT_CHUNKER.detector().detect(segments)
}

/// Chunk a transcript with the default configuration.
///
/// Fails only when `options` are invalid (e.g. `max_chunk_chars == 0`).
pub fn chunk_transcript(input: &ChunkInput, options: &ChunkOptions) -> Result<Vec<Chunk>> {
    DEFAULT_CHUNKER.chunk_with_options(input, options)
}
