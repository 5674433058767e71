use std::sync::Arc;

use super::{make_alignment, step_back, window, AlignAlgorithm};
use crate::{
    alignment::{Alignment, Category, CategoryMap},
    calculator::Calculator,
    error::{AlignError, Result},
    matrix::{Matrix, MatrixFactory},
    score::TScore,
};

#[derive(Clone, Copy, Debug)]
struct Cell {
    category: Category,
    step: TScore,
    total: TScore,
}

/// Finds the single cheapest sequence of categories covering both lists.
pub struct ViterbiAlgorithm {
    calculator: Arc<dyn Calculator>,
    categories: CategoryMap,
    matrix_factory: MatrixFactory,
}

impl ViterbiAlgorithm {
    pub fn new(calculator: Arc<dyn Calculator>, categories: CategoryMap, matrix_factory: MatrixFactory) -> Self {
        ViterbiAlgorithm {
            calculator,
            categories,
            matrix_factory,
        }
    }

    fn best_cell(
        &self,
        matrix: &dyn Matrix<Cell>,
        source: &[String],
        target: &[String],
        position: [usize; 2],
    ) -> Option<Cell> {
        let mut best: Option<Cell> = None;
        for (category, category_score) in self.categories.iter() {
            let Some([px, py]) = step_back(position, category.movement()) else {
                continue;
            };
            let Some(previous) = matrix.get(px, py) else {
                continue;
            };
            let step = category_score
                + self.calculator.calculate_score(
                    window(source, position[0], category.source_count),
                    window(target, position[1], category.target_count),
                );
            let total = step + previous.total;
            if best.map_or(true, |best| total < best.total) {
                best = Some(Cell { category, step, total });
            }
        }
        best
    }
}

impl AlignAlgorithm for ViterbiAlgorithm {
    fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>> {
        let size = [source.len() + 1, target.len() + 1];
        let mut matrix = self.matrix_factory.create::<Cell>(size[0], size[1])?;

        for (x, y) in matrix.iterator().into_positions() {
            let cell = if (x, y) == (0, 0) {
                Some(Cell {
                    category: Category::new(0, 0),
                    step: 0.0,
                    total: 0.0,
                })
            } else {
                self.best_cell(&*matrix, source, target, [x, y])
            };
            if let Some(cell) = cell {
                matrix.set(x, y, cell)?;
            }
        }

        let mut result = vec![];
        let mut position = [source.len(), target.len()];
        while position != [0, 0] {
            let Some(cell) = matrix.get(position[0], position[1]) else {
                return Err(AlignError::impossible(format!(
                    "no path reaches position ({}, {})",
                    position[0], position[1]
                )));
            };
            let Some(previous) = step_back(position, cell.category.movement()) else {
                return Err(AlignError::impossible("backtrace left the matrix"));
            };
            result.push(make_alignment(source, target, previous, position, cell.step));
            position = previous;
        }
        result.reverse();
        Ok(result)
    }
}
