//! Topic boundary detection over an offset-ordered segment sequence

use super::config::ChunkingConfig;
use super::error::{Result, TranscriptChunkingError};
use super::rules::{BoundaryRule, KeywordTable, default_rules};
use super::types::{Boundary, Segment};
use tracing::{debug, trace};

/// Applies an ordered rule table to every adjacent pair of segments.
///
/// For each index the first rule that fires decides the boundary reason, so a
/// time gap suppresses the keyword check at the same index.
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    rules: Vec<BoundaryRule>,
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new(ChunkingConfig::DEFAULT_TIME_GAP_THRESHOLD_MS)
    }
}

impl BoundaryDetector {
    /// Time-gap rule with the given threshold, then the default keyword table
    pub fn new(time_gap_threshold_ms: u64) -> Self {
        Self {
            rules: default_rules(time_gap_threshold_ms),
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.time_gap_threshold_ms)
    }

    /// Use an explicit rule table (evaluated in order)
    pub fn with_rules(rules: Vec<BoundaryRule>) -> Self {
        Self { rules }
    }

    /// Replace the keyword table of every keyword rule
    pub fn with_keyword_table(mut self, table: KeywordTable) -> Self {
        for rule in &mut self.rules {
            if let BoundaryRule::Keyword(keyword) = rule {
                keyword.table = table.clone();
            }
        }
        self
    }

    pub fn rules(&self) -> &[BoundaryRule] {
        &self.rules
    }

    /// Detect topic boundaries.
    ///
    /// `segments` must be ordered by non-decreasing offset; this is not checked
    /// here (see [`check_ordering`]). Index 0 never yields a boundary.
    pub fn detect(&self, segments: &[Segment]) -> Vec<Boundary> {
        let boundaries: Vec<Boundary> = segments
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let (previous, current) = (&pair[0], &pair[1]);
                self.rules
                    .iter()
                    .find(|rule| rule.fires(previous, current))
                    .map(|rule| {
                        trace!(
                            index = i + 1,
                            offset_ms = current.offset,
                            reason = %rule.reason(),
                            "topic boundary"
                        );
                        Boundary {
                            segment_index: i + 1,
                            offset_ms: current.offset,
                            reason: rule.reason(),
                        }
                    })
            })
            .collect();

        debug!(
            "Detected {} topic boundaries in {} segments",
            boundaries.len(),
            segments.len()
        );
        boundaries
    }
}

/// Verify that segment offsets never decrease
pub fn check_ordering(segments: &[Segment]) -> Result<()> {
    match segments
        .windows(2)
        .position(|pair| pair[1].offset < pair[0].offset)
    {
        Some(i) => Err(TranscriptChunkingError::invalid_input(
            i + 1,
            segments[i + 1].offset,
            segments[i].offset,
        )),
        None => Ok(()),
    }
}
