pub mod chunking;

use chunking::{Result, Segment, TranscriptChunkingError};
use once_cell::sync::Lazy;
use regex::Regex;

// whisper v3 style timestamp token: "<|7.54|>"
static TIMESTAMP_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\|([\d\.]+)\|>").expect("timestamp token regex"));

/// Parser for speech-to-text output with inline timestamp tokens
pub struct TimedTextParser;

impl TimedTextParser {
    pub fn split_with_div_regex<'a>(r: &Regex, text: &'a str) -> Vec<&'a str> {
        // parse timed text by token '<|time|>', and divide to vec
        // ex. "<|7.54|> All the time.<|12.34|><|12.98|> Interviews.<|15.50|>" -> vec!["<|7.54|>"," All the time.","<|12.34|>","<|12.98|>"," Interviews.","<|15.50|>"]
        let mut divided = vec![];
        let mut prev = 0;
        for m in r.find_iter(text) {
            let (start, end) = (m.start(), m.end());
            if prev < start {
                divided.push(&text[prev..start]);
            }
            divided.push(&text[start..end]);
            prev = end;
        }
        if prev < text.len() {
            divided.push(&text[prev..]);
        }
        divided
    }

    /// Convert timed text into segments.
    ///
    /// Each piece of text takes the nearest preceding token as its offset and
    /// the next token as its end. Text with no closing token gets duration 0,
    /// text before the first token starts at 0. Blank pieces are dropped.
    pub fn parse(text: &str) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut last_time_ms: u64 = 0;
        let mut pending: Option<(String, u64)> = None;

        for piece in Self::split_with_div_regex(&TIMESTAMP_TOKEN, text) {
            if let Some(caps) = TIMESTAMP_TOKEN.captures(piece) {
                let time_ms = Self::seconds_to_ms(&caps[1])?;
                if let Some((text, offset)) = pending.take() {
                    segments.push(Segment::new(text, offset, time_ms.saturating_sub(offset)));
                }
                last_time_ms = time_ms;
            } else {
                let trimmed = piece.trim();
                // text pieces are always separated by a token
                if !trimmed.is_empty() {
                    pending = Some((trimmed.to_string(), last_time_ms));
                }
            }
        }
        if let Some((text, offset)) = pending {
            segments.push(Segment::new(text, offset, 0));
        }
        Ok(segments)
    }

    fn seconds_to_ms(seconds: &str) -> Result<u64> {
        let value: f64 = seconds.parse().map_err(|_| {
            TranscriptChunkingError::timed_text(format!("invalid timestamp: {seconds}"))
        })?;
        Ok((value * 1000.0).round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_div_regex() {
        let r = Regex::new(r"<\|([\d\.]+)\|>").unwrap();
        // for whisper v3 text
        let text = r#"<|7.54|> All the time.<|12.34|><|12.98|> Interviews.<|15.50|><|16.04|> I'm your host.<|17.74|>"#;
        let expected = vec![
            "<|7.54|>",
            " All the time.",
            "<|12.34|>",
            "<|12.98|>",
            " Interviews.",
            "<|15.50|>",
            "<|16.04|>",
            " I'm your host.",
            "<|17.74|>",
        ];
        assert_eq!(TimedTextParser::split_with_div_regex(&r, text), expected);

        let expected = vec!["<text<"];
        assert_eq!(TimedTextParser::split_with_div_regex(&r, "<text<"), expected);
    }

    #[test]
    fn test_parse_timed_text() {
        let text = "<|7.54|> All the time.<|12.34|><|12.98|> Interviews.<|15.50|><|19.46|> Moving on<|24.38|>";
        let segments = TimedTextParser::parse(text).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::new("All the time.", 7540, 4800),
                Segment::new("Interviews.", 12980, 2520),
                Segment::new("Moving on", 19460, 4920),
            ]
        );
    }

    #[test]
    fn test_parse_untimed_edges() {
        let segments = TimedTextParser::parse("lead in <|2.00|> tail").unwrap();
        assert_eq!(
            segments,
            vec![Segment::new("lead in", 0, 2000), Segment::new("tail", 2000, 0)]
        );

        assert!(TimedTextParser::parse("").unwrap().is_empty());
        assert!(TimedTextParser::parse("<|1.00|><|2.00|>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        let err = TimedTextParser::parse("<|1.2.3|> text").unwrap_err();
        assert!(matches!(err, TranscriptChunkingError::TimedText(_)));
    }
}
