//! Timestamp-aware chunk assembly: partitions segments at topic boundaries

use super::types::{Boundary, BoundaryReason, Chunk, Segment};
use std::collections::HashMap;

/// Partition `segments` into contiguous chunks that open at each boundary.
///
/// Single linear pass. Produces `boundaries.len() + 1` chunks for non-empty
/// input and nothing for empty input. Boundaries at index 0 or past the end
/// are ignored.
pub fn assemble_chunks(segments: &[Segment], boundaries: &[Boundary]) -> Vec<Chunk> {
    if segments.is_empty() {
        return Vec::new();
    }

    let boundary_reasons: HashMap<usize, BoundaryReason> = boundaries
        .iter()
        .map(|b| (b.segment_index, b.reason))
        .collect();

    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut chunk_start = 0;
    let mut opened_by = None;

    for index in 1..segments.len() {
        if let Some(reason) = boundary_reasons.get(&index) {
            chunks.push(Chunk::from_segments(
                &segments[chunk_start..index],
                chunk_start,
                chunks.len(),
                opened_by,
            ));
            chunk_start = index;
            opened_by = Some(*reason);
        }
    }
    chunks.push(Chunk::from_segments(
        &segments[chunk_start..],
        chunk_start,
        chunks.len(),
        opened_by,
    ));

    chunks
}
