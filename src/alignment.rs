use std::sync::OnceLock;

use crate::{
    error::{AlignError, Result},
    score::{to_score, TScore},
};

/// Correspondence between consecutive source and target segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alignment {
    pub source: Vec<String>,
    pub target: Vec<String>,
    pub score: TScore,
}

impl Alignment {
    pub fn new(source: Vec<String>, target: Vec<String>, score: TScore) -> Self {
        Alignment { source, target, score }
    }

    /// Builds an alignment from borrowed segments, with score 0.
    pub fn from_segments<S: AsRef<str>>(source: &[S], target: &[S]) -> Self {
        Alignment {
            source: source.iter().map(|s| s.as_ref().to_owned()).collect(),
            target: target.iter().map(|s| s.as_ref().to_owned()).collect(),
            score: 0.0,
        }
    }

    pub fn add_source(&mut self, segment: impl Into<String>) {
        self.source.push(segment.into());
    }

    pub fn add_target(&mut self, segment: impl Into<String>) {
        self.target.push(segment.into());
    }

    pub fn category(&self) -> Category {
        Category::new(self.source.len(), self.target.len())
    }
}

/// Concatenates the sides of `alignments`, in order.
pub fn join_segments(alignments: &[Alignment]) -> [Vec<String>; 2] {
    let mut result = [vec![], vec![]];
    for alignment in alignments {
        result[0].extend(alignment.source.iter().cloned());
        result[1].extend(alignment.target.iter().cloned());
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    pub source_count: usize,
    pub target_count: usize,
}

impl Category {
    pub const fn new(source_count: usize, target_count: usize) -> Self {
        Category {
            source_count,
            target_count,
        }
    }

    pub fn movement(&self) -> [usize; 2] {
        [self.source_count, self.target_count]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.source_count, self.target_count)
    }
}

/// Segment count pairings an aligner may hypothesize, with their prior scores.
///
/// Iteration follows insertion order, which makes the choice between equally
/// scored categories deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap {
    entries: Vec<(Category, TScore)>,
}

impl CategoryMap {
    pub fn from_probabilities(probabilities: &[(Category, f64)]) -> Result<Self> {
        let mut entries: Vec<(Category, TScore)> = vec![];
        for &(category, probability) in probabilities {
            if category == Category::new(0, 0) {
                return Err(AlignError::invalid_parameter(
                    "category",
                    "0-0 cannot be hypothesized",
                ));
            }
            if !(probability > 0.0 && probability <= 1.0) {
                return Err(AlignError::invalid_parameter(
                    "category probability",
                    format!("{probability} for {category} is not in (0, 1]"),
                ));
            }
            if entries.iter().any(|(existing, _)| *existing == category) {
                return Err(AlignError::invalid_parameter(
                    "category",
                    format!("{category} listed twice"),
                ));
            }
            entries.push((category, to_score(probability)));
        }
        Ok(CategoryMap { entries })
    }

    /// Empirically tuned priors.
    pub fn best() -> &'static CategoryMap {
        static MAP: OnceLock<CategoryMap> = OnceLock::new();
        MAP.get_or_init(|| {
            Self::from_constants(&[
                (Category::new(1, 1), 0.9),
                (Category::new(1, 0), 0.005),
                (Category::new(0, 1), 0.005),
                (Category::new(2, 1), 0.045),
                (Category::new(1, 2), 0.045),
            ])
        })
    }

    /// Priors from Moore's sentence aligner.
    pub fn moore() -> &'static CategoryMap {
        static MAP: OnceLock<CategoryMap> = OnceLock::new();
        MAP.get_or_init(|| {
            Self::from_constants(&[
                (Category::new(1, 1), 0.94),
                (Category::new(1, 0), 0.01),
                (Category::new(0, 1), 0.01),
                (Category::new(2, 1), 0.02),
                (Category::new(1, 2), 0.02),
            ])
        })
    }

    fn from_constants(probabilities: &[(Category, f64)]) -> CategoryMap {
        CategoryMap {
            entries: probabilities
                .iter()
                .map(|&(category, probability)| (category, to_score(probability)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, TScore)> + '_ {
        self.entries.iter().copied()
    }

    pub fn score(&self, category: Category) -> Option<TScore> {
        self.iter().find(|(c, _)| *c == category).map(|(_, score)| score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
