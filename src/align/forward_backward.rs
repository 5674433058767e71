use std::sync::Arc;

use super::{make_alignment, step_back, step_forward, window, AlignAlgorithm};
use crate::{
    alignment::{Alignment, Category, CategoryMap},
    calculator::Calculator,
    error::{AlignError, Result},
    matrix::{Matrix, MatrixFactory},
    score::{score_sum, TScore},
};

/// Follows the steps with the highest posterior probability instead of the
/// single best path.
///
/// The forward matrix holds the score of all paths from the start to a
/// position, the backward matrix the score of all paths from a position to
/// the end.
pub struct ForwardBackwardAlgorithm {
    calculator: Arc<dyn Calculator>,
    categories: CategoryMap,
    matrix_factory: MatrixFactory,
}

impl ForwardBackwardAlgorithm {
    pub fn new(calculator: Arc<dyn Calculator>, categories: CategoryMap, matrix_factory: MatrixFactory) -> Self {
        ForwardBackwardAlgorithm {
            calculator,
            categories,
            matrix_factory,
        }
    }

    /// Prior plus calculator score of the step `category` ending at `end`.
    fn step_score(
        &self,
        source: &[String],
        target: &[String],
        category: Category,
        category_score: TScore,
        end: [usize; 2],
    ) -> TScore {
        category_score
            + self.calculator.calculate_score(
                window(source, end[0], category.source_count),
                window(target, end[1], category.target_count),
            )
    }

    fn forward(&self, source: &[String], target: &[String]) -> Result<Box<dyn Matrix<TScore>>> {
        let mut matrix = self.matrix_factory.create::<TScore>(source.len() + 1, target.len() + 1)?;
        let mut scores = Vec::with_capacity(self.categories.len());
        for (x, y) in matrix.iterator().into_positions() {
            if (x, y) == (0, 0) {
                matrix.set(0, 0, 0.0)?;
                continue;
            }
            scores.clear();
            for (category, category_score) in self.categories.iter() {
                let Some([px, py]) = step_back([x, y], category.movement()) else {
                    continue;
                };
                if let Some(&previous) = matrix.get(px, py) {
                    scores.push(self.step_score(source, target, category, category_score, [x, y]) + previous);
                }
            }
            if !scores.is_empty() {
                matrix.set(x, y, score_sum(&scores))?;
            }
        }
        Ok(matrix)
    }

    fn backward(&self, source: &[String], target: &[String]) -> Result<Box<dyn Matrix<TScore>>> {
        let size = [source.len() + 1, target.len() + 1];
        let mut matrix = self.matrix_factory.create::<TScore>(size[0], size[1])?;
        let mut scores = Vec::with_capacity(self.categories.len());
        for (x, y) in matrix.iterator().into_positions().rev() {
            if [x, y] == [source.len(), target.len()] {
                matrix.set(x, y, 0.0)?;
                continue;
            }
            scores.clear();
            for (category, category_score) in self.categories.iter() {
                let Some(next) = step_forward([x, y], category.movement(), size) else {
                    continue;
                };
                if let Some(&following) = matrix.get(next[0], next[1]) {
                    scores.push(self.step_score(source, target, category, category_score, next) + following);
                }
            }
            if !scores.is_empty() {
                matrix.set(x, y, score_sum(&scores))?;
            }
        }
        Ok(matrix)
    }
}

impl AlignAlgorithm for ForwardBackwardAlgorithm {
    fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>> {
        let size = [source.len() + 1, target.len() + 1];
        let end = [source.len(), target.len()];
        let forward = self.forward(source, target)?;
        let backward = self.backward(source, target)?;
        let Some(&total) = forward.get(end[0], end[1]) else {
            return Err(AlignError::impossible("no path reaches the last position"));
        };

        let mut result = vec![];
        let mut position = [0, 0];
        while position != end {
            let Some(&current) = forward.get(position[0], position[1]) else {
                return Err(AlignError::impossible("reconstruction left the computed cells"));
            };
            // (posterior of the next position, next position, step score)
            let mut best: Option<(TScore, [usize; 2], TScore)> = None;
            for (category, category_score) in self.categories.iter() {
                let Some(next) = step_forward(position, category.movement(), size) else {
                    continue;
                };
                let (Some(&next_forward), Some(&next_backward)) =
                    (forward.get(next[0], next[1]), backward.get(next[0], next[1]))
                else {
                    continue;
                };
                let posterior = next_forward + next_backward - total;
                if best.map_or(true, |(best_posterior, _, _)| posterior < best_posterior) {
                    let step = self.step_score(source, target, category, category_score, next);
                    best = Some((posterior, next, current + step + next_backward - total));
                }
            }
            let Some((_, next, score)) = best else {
                return Err(AlignError::impossible(format!(
                    "no step leads on from position ({}, {})",
                    position[0], position[1]
                )));
            };
            result.push(make_alignment(source, target, position, next, score));
            position = next;
        }
        Ok(result)
    }
}
