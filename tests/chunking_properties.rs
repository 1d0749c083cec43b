use itertools::Itertools;
use proptest::prelude::*;
use transcript_utils::text::chunking::{
    BoundaryReason, ChunkInput, ChunkOptions, ChunkType, KeywordTable, Segment, assemble_chunks,
    chunk_plain_text, chunk_transcript, detect_topic_boundaries,
};

const THRESHOLD_MS: i128 = 3000;

const TEXTS: [&str; 8] = [
    "and then we look at the numbers",
    "Moving on to the next part",
    "this is a detail",
    "next up is testing",
    "",
    "Another thing to consider",
    "plain words here",
    "so that wraps it",
];

/// Segments built from (text choice, gap before, duration); offsets stay ordered
fn segments_strategy() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec((0..TEXTS.len(), 0u64..6000, 0u64..3000), 0..40).prop_map(|parts| {
        let mut end = 0u64;
        parts
            .into_iter()
            .map(|(text, gap, duration)| {
                let segment = Segment::new(TEXTS[text], end + gap, duration);
                end = segment.end_ms();
                segment
            })
            .collect()
    })
}

fn text_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    prop::collection::vec(("[a-zA-Z0-9éü]{1,15}", "[ \t\n]{1,3}"), 0..200).prop_map(|parts| {
        let words = parts.iter().map(|(w, _)| w.clone()).collect::<Vec<_>>();
        let text = parts.into_iter().map(|(w, sep)| format!("{sep}{w}")).join("");
        (words, text)
    })
}

proptest! {
    #[test]
    fn boundaries_follow_gap_and_keyword_rules(segments in segments_strategy()) {
        let boundaries = detect_topic_boundaries(&segments);
        let table = KeywordTable::default();

        for i in 1..segments.len() {
            let gap = segments[i].gap_after(&segments[i - 1]);
            let found = boundaries.iter().find(|b| b.segment_index == i);
            if gap >= THRESHOLD_MS {
                prop_assert_eq!(found.map(|b| b.reason), Some(BoundaryReason::TimeGap));
            } else if table.is_match(&segments[i].text) {
                prop_assert_eq!(found.map(|b| b.reason), Some(BoundaryReason::Keyword));
            } else {
                prop_assert!(found.is_none());
            }
            if let Some(b) = found {
                prop_assert_eq!(b.offset_ms, segments[i].offset);
            }
        }
    }

    #[test]
    fn boundaries_are_strictly_increasing_and_never_zero(segments in segments_strategy()) {
        let boundaries = detect_topic_boundaries(&segments);
        prop_assert!(boundaries.iter().all(|b| b.segment_index > 0));
        prop_assert!(boundaries.iter().tuple_windows().all(|(a, b)| a.segment_index < b.segment_index));
    }

    #[test]
    fn timestamped_chunks_partition_segments(segments in segments_strategy()) {
        let boundaries = detect_topic_boundaries(&segments);
        let chunks = chunk_transcript(
            &ChunkInput::timestamped(segments.clone()),
            &ChunkOptions::default(),
        )
        .unwrap();

        if segments.is_empty() {
            prop_assert!(chunks.is_empty());
            return Ok(());
        }
        prop_assert_eq!(chunks.len(), boundaries.len() + 1);

        let indices: Vec<usize> = chunks
            .iter()
            .flat_map(|c| c.segment_indices.clone().unwrap())
            .collect();
        prop_assert_eq!(indices, (0..segments.len()).collect::<Vec<_>>());

        for chunk in &chunks {
            let members = chunk.segment_indices.as_ref().unwrap();
            let first = &segments[members[0]];
            let last = &segments[*members.last().unwrap()];
            prop_assert_eq!(chunk.start_ms, Some(first.offset));
            prop_assert_eq!(chunk.end_ms, Some(last.end_ms()));
            prop_assert_eq!(
                &chunk.text,
                &members.iter().map(|&i| segments[i].text.as_str()).join(" ")
            );
        }
    }

    #[test]
    fn rechunking_a_chunk_is_idempotent(segments in segments_strategy()) {
        let chunks = assemble_chunks(&segments, &detect_topic_boundaries(&segments));

        for chunk in &chunks {
            let members = chunk.segment_indices.as_ref().unwrap();
            let slice = &segments[members[0]..=*members.last().unwrap()];

            let inner = detect_topic_boundaries(slice);
            prop_assert!(inner.is_empty());

            let again = assemble_chunks(slice, &inner);
            prop_assert_eq!(again.len(), 1);
            prop_assert_eq!(&again[0].text, &chunk.text);
            prop_assert_eq!(again[0].start_ms, chunk.start_ms);
            prop_assert_eq!(again[0].end_ms, chunk.end_ms);
        }
    }

    #[test]
    fn fallback_chunks_preserve_words_within_limit(
        (words, text) in text_strategy(),
        max_chunk_chars in 5usize..80,
    ) {
        let chunks = chunk_plain_text(&text, max_chunk_chars);

        for chunk in &chunks {
            let single_word = !chunk.text.contains(' ');
            if chunk.chunk_type == ChunkType::OversizedWord {
                prop_assert!(single_word);
            } else {
                prop_assert!(chunk.char_length() <= max_chunk_chars);
            }
            prop_assert_eq!(chunk.text.trim(), chunk.text.as_str());
            prop_assert!(chunk.start_ms.is_none() && chunk.segment_indices.is_none());
        }

        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.text.split(' ').map(str::to_string).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(rejoined, words);
    }
}
