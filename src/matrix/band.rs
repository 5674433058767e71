use std::ops::Range;

use super::{check_bounds, Matrix};
use crate::error::{AlignError, Result};

/// Matrix storing only cells within `radius` of the scaled diagonal.
///
/// Row `y` holds `x` in `[diagonal_x(y) - radius, diagonal_x(y) + radius]`,
/// clamped to the matrix, where `diagonal_x(y) = floor(y * width / height)`.
pub struct BandMatrix<T> {
    width: usize,
    height: usize,
    radius: usize,
    row_starts: Vec<usize>,
    rows: Vec<Vec<Option<T>>>,
}

impl<T> BandMatrix<T> {
    pub fn new(width: usize, height: usize, radius: usize) -> Result<Self> {
        if radius < 1 {
            return Err(AlignError::invalid_parameter("band radius", "must be at least 1"));
        }
        let mut row_starts = Vec::with_capacity(height);
        let mut rows = Vec::with_capacity(height);
        for y in 0..height {
            let range = band_range(width, height, radius, y);
            row_starts.push(range.start);
            rows.push(range.map(|_| None).collect());
        }
        Ok(BandMatrix {
            width,
            height,
            radius,
            row_starts,
            rows,
        })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn diagonal_x(&self, y: usize) -> usize {
        diagonal_x(self.width, self.height, y)
    }
}

pub(crate) fn diagonal_x(width: usize, height: usize, y: usize) -> usize {
    if height == 0 {
        return 0;
    }
    y * width / height
}

fn band_range(width: usize, height: usize, radius: usize, y: usize) -> Range<usize> {
    if width == 0 {
        return 0..0;
    }
    let diagonal = diagonal_x(width, height, y);
    let start = diagonal.saturating_sub(radius).min(width - 1);
    let end = (diagonal + radius).min(width - 1) + 1;
    start..end
}

impl<T> Matrix<T> for BandMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn size(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn row_range(&self, y: usize) -> Range<usize> {
        match self.rows.get(y) {
            Some(row) => self.row_starts[y]..self.row_starts[y] + row.len(),
            None => 0..0,
        }
    }

    fn get(&self, x: usize, y: usize) -> Option<&T> {
        let row = self.rows.get(y)?;
        let offset = x.checked_sub(self.row_starts[y])?;
        row.get(offset)?.as_ref()
    }

    fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        check_bounds(x, y, self.width, self.height)?;
        let outside = AlignError::OutsideBand {
            x,
            y,
            radius: self.radius,
        };
        let offset = match x.checked_sub(self.row_starts[y]) {
            Some(offset) if offset < self.rows[y].len() => offset,
            _ => return Err(outside),
        };
        self.rows[y][offset] = Some(value);
        Ok(())
    }
}
