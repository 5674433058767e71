//! Alignment algorithms over two segment lists.

use std::sync::Arc;

use clap::ValueEnum;
use serde::Deserialize;

use crate::{
    alignment::{Alignment, CategoryMap},
    calculator::Calculator,
    error::Result,
    matrix::MatrixFactory,
};

mod adaptive_band;
mod forward_backward;
mod unify;
mod viterbi;

#[cfg(test)]
mod test;

pub use adaptive_band::{AdaptiveBandAlgorithm, BandOptions, DEFAULT_INCREMENT_RATIO, DEFAULT_INITIAL_RADIUS};
pub use forward_backward::ForwardBackwardAlgorithm;
pub use unify::UnifyAligner;
pub use viterbi::ViterbiAlgorithm;

pub trait AlignAlgorithm: Send + Sync {
    fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Most probable path.
    Viterbi,
    /// Path through the best posterior steps.
    ForwardBackward,
}

/// Creates algorithms of one kind that differ only in their matrix layout.
#[derive(Clone)]
pub struct AlgorithmFactory {
    pub kind: AlgorithmKind,
    pub calculator: Arc<dyn Calculator>,
    pub categories: CategoryMap,
}

impl AlgorithmFactory {
    pub fn new(kind: AlgorithmKind, calculator: Arc<dyn Calculator>, categories: CategoryMap) -> Self {
        AlgorithmFactory {
            kind,
            calculator,
            categories,
        }
    }

    pub fn create(&self, matrix_factory: MatrixFactory) -> Box<dyn AlignAlgorithm> {
        let calculator = self.calculator.clone();
        let categories = self.categories.clone();
        match self.kind {
            AlgorithmKind::Viterbi => Box::new(ViterbiAlgorithm::new(calculator, categories, matrix_factory)),
            AlgorithmKind::ForwardBackward => {
                Box::new(ForwardBackwardAlgorithm::new(calculator, categories, matrix_factory))
            }
        }
    }
}

/// Segments `[end - count, end)` of one side.
fn window(segments: &[String], end: usize, count: usize) -> &[String] {
    &segments[end - count..end]
}

/// Position reached from `(x, y)` by taking `movement`, if it lies inside `size`.
fn step_forward([x, y]: [usize; 2], movement: [usize; 2], size: [usize; 2]) -> Option<[usize; 2]> {
    let next = [x + movement[0], y + movement[1]];
    (next[0] < size[0] && next[1] < size[1]).then_some(next)
}

/// Position from which `movement` leads to `(x, y)`.
fn step_back([x, y]: [usize; 2], movement: [usize; 2]) -> Option<[usize; 2]> {
    Some([x.checked_sub(movement[0])?, y.checked_sub(movement[1])?])
}

fn make_alignment(source: &[String], target: &[String], from: [usize; 2], to: [usize; 2], score: f64) -> Alignment {
    Alignment::new(source[from[0]..to[0]].to_vec(), target[from[1]..to[1]].to_vec(), score)
}
