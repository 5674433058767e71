//! Scores of hypothesized correspondences between segment windows.

use std::sync::Arc;

use crate::{
    modify::{SplitAlgorithm, WordSplitter},
    score::TScore,
};

mod normal;
mod poisson;
mod translation;

pub use normal::NormalDistributionCalculator;
pub use poisson::{ln_factorial, poisson_score, PoissonDistributionCalculator};
pub use translation::{TranslationCalculator, TranslationModels, MINIMUM_TRANSLATION_PROBABILITY};

pub trait Calculator: Send + Sync {
    /// Score of `source` corresponding to `target`. Non-negative, lower is more probable.
    fn calculate_score(&self, source: &[String], target: &[String]) -> TScore;
}

/// Product of the probabilities of several calculators.
pub struct CompositeCalculator {
    calculators: Vec<Arc<dyn Calculator>>,
}

impl CompositeCalculator {
    pub fn new(calculators: Vec<Arc<dyn Calculator>>) -> Self {
        CompositeCalculator { calculators }
    }
}

impl Calculator for CompositeCalculator {
    fn calculate_score(&self, source: &[String], target: &[String]) -> TScore {
        let mut score = 0.0;
        for calculator in &self.calculators {
            score += calculator.calculate_score(source, target);
            if score == TScore::INFINITY {
                break;
            }
        }
        score
    }
}

/// Length of a segment, in whatever unit a calculator models.
pub trait LengthCounter: Send + Sync {
    fn length(&self, segment: &str) -> usize;

    fn total_length(&self, segments: &[String]) -> usize {
        segments.iter().map(|segment| self.length(segment)).sum()
    }
}

/// Counts Unicode scalar values.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharCounter;

impl LengthCounter for CharCounter {
    fn length(&self, segment: &str) -> usize {
        segment.chars().count()
    }
}

/// Counts the parts a split algorithm produces.
pub struct SplitCounter {
    splitter: Box<dyn SplitAlgorithm>,
}

impl SplitCounter {
    pub fn new(splitter: Box<dyn SplitAlgorithm>) -> Self {
        SplitCounter { splitter }
    }

    pub fn words() -> Self {
        Self::new(Box::new(WordSplitter))
    }
}

impl LengthCounter for SplitCounter {
    fn length(&self, segment: &str) -> usize {
        self.splitter.split(segment).len()
    }
}
