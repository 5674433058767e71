//! Segment list transforms: splitting, cleaning and merging.

use std::collections::HashMap;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{AlignError, Result};

/// Deterministic `segments -> segments` transform.
pub trait Modifier: Send + Sync {
    fn modify(&self, segments: &[String]) -> Vec<String>;
}

/// Splits one segment into several.
pub trait SplitAlgorithm: Send + Sync {
    fn split(&self, segment: &str) -> Vec<String>;
}

/// Rewrites one segment, or drops it by returning `None`.
pub trait CleanAlgorithm: Send + Sync {
    fn clean(&self, segment: &str) -> Option<String>;
}

pub trait MergeAlgorithm: Send + Sync {
    fn merge(&self, segments: &[String]) -> String;
}

pub fn split_all(splitter: &dyn SplitAlgorithm, segments: &[String]) -> Vec<String> {
    segments.iter().flat_map(|segment| splitter.split(segment)).collect()
}

pub fn clean_all(cleaner: &dyn CleanAlgorithm, segments: &[String]) -> Vec<String> {
    segments.iter().filter_map(|segment| cleaner.clean(segment)).collect()
}

macro_rules! split_modifier {
    ( $( $type:ty ),* ) => {
        $(
            impl Modifier for $type {
                fn modify(&self, segments: &[String]) -> Vec<String> {
                    split_all(self, segments)
                }
            }
        )*
    };
}

macro_rules! clean_modifier {
    ( $( $type:ty ),* ) => {
        $(
            impl Modifier for $type {
                fn modify(&self, segments: &[String]) -> Vec<String> {
                    clean_all(self, segments)
                }
            }
        )*
    };
}

/// Words and punctuation marks, whitespace dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordSplitter;

impl SplitAlgorithm for WordSplitter {
    fn split(&self, segment: &str) -> Vec<String> {
        segment
            .split_word_bounds()
            .filter(|word| !word.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SentenceSplitter;

impl SplitAlgorithm for SentenceSplitter {
    fn split(&self, segment: &str) -> Vec<String> {
        segment
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LineSplitter;

impl SplitAlgorithm for LineSplitter {
    fn split(&self, segment: &str) -> Vec<String> {
        segment
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Splits on every match of a regular expression.
#[derive(Clone, Debug)]
pub struct RegexSplitter {
    separator: Regex,
}

impl RegexSplitter {
    pub fn new(pattern: &str) -> Result<Self> {
        let separator =
            Regex::new(pattern).map_err(|e| AlignError::invalid_parameter("split pattern", e.to_string()))?;
        Ok(RegexSplitter { separator })
    }

    /// Paragraphs are separated by blank lines.
    pub fn paragraphs() -> Result<Self> {
        Self::new(r"\n[ \t\r]*\n")
    }
}

impl SplitAlgorithm for RegexSplitter {
    fn split(&self, segment: &str) -> Vec<String> {
        self.separator
            .split(segment)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

split_modifier!(WordSplitter, SentenceSplitter, LineSplitter, RegexSplitter);

/// Trims whitespace and drops segments left empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trimmer;

impl CleanAlgorithm for Trimmer {
    fn clean(&self, segment: &str) -> Option<String> {
        let trimmed = segment.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Lowercaser;

impl CleanAlgorithm for Lowercaser {
    fn clean(&self, segment: &str) -> Option<String> {
        Some(segment.to_lowercase())
    }
}

clean_modifier!(Trimmer, Lowercaser);

/// Replaces words occurring fewer than `threshold` times in the whole list.
///
/// Segments are re-joined with single spaces, so the segment count never changes.
#[derive(Clone, Debug)]
pub struct RareWordReplacer {
    threshold: usize,
}

impl RareWordReplacer {
    pub const PLACEHOLDER: &'static str = "{UNKNOWN}";
    pub const DEFAULT_THRESHOLD: usize = 2;

    pub fn new(threshold: usize) -> Result<Self> {
        if threshold < 1 {
            return Err(AlignError::invalid_parameter("rare word threshold", "must be at least 1"));
        }
        Ok(RareWordReplacer { threshold })
    }
}

impl Modifier for RareWordReplacer {
    fn modify(&self, segments: &[String]) -> Vec<String> {
        let words: Vec<Vec<String>> = segments.iter().map(|segment| WordSplitter.split(segment)).collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in words.iter().flatten() {
            *counts.entry(word.as_str()).or_default() += 1;
        }
        words
            .iter()
            .map(|segment_words| {
                segment_words
                    .iter()
                    .map(|word| {
                        if counts[word.as_str()] < self.threshold {
                            Self::PLACEHOLDER
                        } else {
                            word.as_str()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Joins segments with a separator.
#[derive(Clone, Debug)]
pub struct SeparatorMerger {
    separator: String,
}

impl SeparatorMerger {
    pub fn new(separator: impl Into<String>) -> Self {
        SeparatorMerger {
            separator: separator.into(),
        }
    }
}

impl MergeAlgorithm for SeparatorMerger {
    fn merge(&self, segments: &[String]) -> String {
        segments.join(&self.separator)
    }
}

/// Applies modifiers one after another.
pub struct ModifierChain(pub Vec<Box<dyn Modifier>>);

impl Modifier for ModifierChain {
    fn modify(&self, segments: &[String]) -> Vec<String> {
        let mut result = segments.to_vec();
        for modifier in &self.0 {
            result = modifier.modify(&result);
        }
        result
    }
}
