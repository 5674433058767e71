use std::ops::Range;

use super::{check_bounds, Matrix};
use crate::error::Result;

/// Matrix storing every cell.
pub struct FullMatrix<T> {
    width: usize,
    height: usize,
    values: Vec<Option<T>>,
}

impl<T> FullMatrix<T> {
    pub fn new(width: usize, height: usize) -> Self {
        FullMatrix {
            width,
            height,
            values: (0..width * height).map(|_| None).collect(),
        }
    }
}

impl<T> Matrix<T> for FullMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn row_range(&self, y: usize) -> Range<usize> {
        if y < self.height {
            0..self.width
        } else {
            0..0
        }
    }

    fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values[y * self.width + x].as_ref()
    }

    fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        check_bounds(x, y, self.width, self.height)?;
        self.values[y * self.width + x] = Some(value);
        Ok(())
    }
}
