//! Boundary rules: the ordered rule table consulted by the boundary detector
//!
//! Each rule inspects a pair of adjacent segments and either fires with its
//! [`BoundaryReason`] or stays silent. Rules are plain data, so the transition
//! cue list can be tuned or replaced without touching detection code.

use super::error::Result;
use super::types::{BoundaryReason, Segment};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static DEFAULT_KEYWORD_TABLE: Lazy<KeywordTable> = Lazy::new(|| {
    KeywordTable::from_phrases(KeywordTable::DEFAULT_PHRASES)
        .expect("default transition cues compile")
});

/// A lexical transition cue
#[derive(Debug, Clone)]
pub struct TransitionCue {
    label: String,
    pattern: Regex,
}

impl TransitionCue {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Case-insensitive table of transition cues
#[derive(Debug, Clone)]
pub struct KeywordTable {
    cues: Vec<TransitionCue>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        DEFAULT_KEYWORD_TABLE.clone()
    }
}

impl KeywordTable {
    pub const DEFAULT_PHRASES: [&'static str; 6] = [
        "now let's talk about",
        "moving on",
        "another thing",
        "switching to",
        "turning to",
        "next up",
    ];

    /// Build a table from literal phrases.
    ///
    /// A phrase must start at a word start when its first character is a word
    /// character; its end is not anchored, so "moving on" also fires on
    /// "moving onto". Words may be separated by whitespace or hyphens, and
    /// both straight and curly apostrophes are accepted.
    pub fn from_phrases<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cues = phrases
            .into_iter()
            .map(|phrase| {
                let phrase = phrase.as_ref().trim();
                Self::compile(phrase, &Self::phrase_pattern(phrase))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cues })
    }

    fn phrase_pattern(phrase: &str) -> String {
        let body = phrase
            .split_whitespace()
            .map(|word| regex::escape(word).replace('\'', "['’]"))
            .collect::<Vec<_>>()
            .join(r"[\s-]+");
        match phrase.chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => format!(r"\b{body}"),
            _ => body,
        }
    }

    /// Build a table from raw regular expressions (compiled case-insensitive)
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cues = patterns
            .into_iter()
            .map(|p| Self::compile(p.as_ref(), p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cues })
    }

    /// Table that never matches
    pub fn empty() -> Self {
        Self { cues: Vec::new() }
    }

    fn compile(label: &str, pattern: &str) -> Result<TransitionCue> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(TransitionCue {
            label: label.to_string(),
            pattern,
        })
    }

    /// First cue found in `text`, in table order
    pub fn find(&self, text: &str) -> Option<&TransitionCue> {
        self.cues.iter().find(|cue| cue.is_match(text))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cues.iter().map(TransitionCue::label)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Fires when the silence before a segment reaches `threshold_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGapRule {
    pub threshold_ms: u64,
}

impl TimeGapRule {
    pub fn fires(&self, previous: &Segment, current: &Segment) -> bool {
        current.gap_after(previous) >= i128::from(self.threshold_ms)
    }
}

/// Fires when a segment's text contains a transition cue
#[derive(Debug, Clone, Default)]
pub struct KeywordRule {
    pub table: KeywordTable,
}

impl KeywordRule {
    pub fn fires(&self, current: &Segment) -> bool {
        self.table.is_match(&current.text)
    }
}

/// One entry of the detector's rule table
#[derive(Debug, Clone)]
pub enum BoundaryRule {
    TimeGap(TimeGapRule),
    Keyword(KeywordRule),
}

impl BoundaryRule {
    pub fn time_gap(threshold_ms: u64) -> Self {
        Self::TimeGap(TimeGapRule { threshold_ms })
    }

    pub fn keyword(table: KeywordTable) -> Self {
        Self::Keyword(KeywordRule { table })
    }

    /// Reason reported when this rule fires
    pub fn reason(&self) -> BoundaryReason {
        match self {
            Self::TimeGap(_) => BoundaryReason::TimeGap,
            Self::Keyword(_) => BoundaryReason::Keyword,
        }
    }

    pub fn fires(&self, previous: &Segment, current: &Segment) -> bool {
        match self {
            Self::TimeGap(rule) => rule.fires(previous, current),
            Self::Keyword(rule) => rule.fires(current),
        }
    }
}

/// Default rule order: time gap first, then the keyword table
pub fn default_rules(time_gap_threshold_ms: u64) -> Vec<BoundaryRule> {
    vec![
        BoundaryRule::time_gap(time_gap_threshold_ms),
        BoundaryRule::keyword(KeywordTable::default()),
    ]
}
