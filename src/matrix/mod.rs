//! Two dimensional storage for dynamic programming over segment positions.
//!
//! Position `(x, y)` means "the first `x` source segments and the first `y`
//! target segments have been consumed". Every matrix exposes, for each row
//! `y`, the contiguous range of storable `x`; iteration visits rows in
//! increasing `y` and positions within a row in increasing `x`, so each
//! position comes after every position above and to the left of it.

use std::ops::Range;

use crate::error::{AlignError, Result};

mod band;
mod full;

pub use band::BandMatrix;
pub(crate) use band::diagonal_x;
pub use full::FullMatrix;

pub trait Matrix<T> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Number of storable cells.
    fn size(&self) -> usize;
    /// Storable x positions of row `y`. Empty for rows out of range.
    fn row_range(&self, y: usize) -> Range<usize>;
    /// Returns `None` for unset cells and for any position that cannot be stored.
    fn get(&self, x: usize, y: usize) -> Option<&T>;
    fn set(&mut self, x: usize, y: usize, value: T) -> Result<()>;

    fn iterator(&self) -> MatrixIterator {
        MatrixIterator::new((0..self.height()).map(|y| self.row_range(y)).collect())
    }
}

pub(crate) fn check_bounds(x: usize, y: usize, width: usize, height: usize) -> Result<()> {
    if x >= width || y >= height {
        return Err(AlignError::OutOfBounds { x, y, width, height });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CursorState {
    BeforeFirst,
    At { x: usize, y: usize },
    AfterLast,
}

/// Cursor over the storable positions of a matrix.
///
/// Starts before the first position. It owns a copy of the row layout, so
/// the matrix can be written to while the cursor walks over it.
#[derive(Clone, Debug)]
pub struct MatrixIterator {
    rows: Vec<Range<usize>>,
    state: CursorState,
}

impl MatrixIterator {
    pub fn new(rows: Vec<Range<usize>>) -> Self {
        MatrixIterator {
            rows,
            state: CursorState::BeforeFirst,
        }
    }

    pub fn before_first(&mut self) {
        self.state = CursorState::BeforeFirst;
    }

    pub fn after_last(&mut self) {
        self.state = CursorState::AfterLast;
    }

    pub fn has_next(&self) -> bool {
        self.following().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.preceding().is_some()
    }

    /// Current position, if the cursor stands on one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.state {
            CursorState::At { x, y } => Some((x, y)),
            _ => None,
        }
    }

    pub fn next(&mut self) -> Result<(usize, usize)> {
        let (x, y) = self.following().ok_or(AlignError::IteratorExhausted)?;
        self.state = CursorState::At { x, y };
        Ok((x, y))
    }

    pub fn previous(&mut self) -> Result<(usize, usize)> {
        let (x, y) = self.preceding().ok_or(AlignError::IteratorExhausted)?;
        self.state = CursorState::At { x, y };
        Ok((x, y))
    }

    /// All positions in dependency order; reverse it for the mirrored order.
    pub fn into_positions(self) -> impl DoubleEndedIterator<Item = (usize, usize)> {
        self.rows
            .into_iter()
            .enumerate()
            .flat_map(|(y, row)| row.map(move |x| (x, y)))
    }

    fn first_in_rows(&self, mut rows: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
        rows.find(|&y| !self.rows[y].is_empty())
            .map(|y| (self.rows[y].start, y))
    }

    fn last_in_rows(&self, mut rows: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
        rows.find(|&y| !self.rows[y].is_empty())
            .map(|y| (self.rows[y].end - 1, y))
    }

    fn following(&self) -> Option<(usize, usize)> {
        match self.state {
            CursorState::BeforeFirst => self.first_in_rows(0..self.rows.len()),
            CursorState::At { x, y } => {
                if x + 1 < self.rows[y].end {
                    Some((x + 1, y))
                } else {
                    self.first_in_rows(y + 1..self.rows.len())
                }
            }
            CursorState::AfterLast => None,
        }
    }

    fn preceding(&self) -> Option<(usize, usize)> {
        match self.state {
            CursorState::BeforeFirst => None,
            CursorState::At { x, y } => {
                if x > self.rows[y].start {
                    Some((x - 1, y))
                } else {
                    self.last_in_rows((0..y).rev())
                }
            }
            CursorState::AfterLast => self.last_in_rows((0..self.rows.len()).rev()),
        }
    }
}

/// Storage strategy used when an algorithm allocates its matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixFactory {
    Full,
    Band { radius: usize },
}

impl MatrixFactory {
    pub fn band(radius: usize) -> Result<Self> {
        if radius < 1 {
            return Err(AlignError::invalid_parameter("band radius", "must be at least 1"));
        }
        Ok(MatrixFactory::Band { radius })
    }

    pub fn create<T: 'static>(&self, width: usize, height: usize) -> Result<Box<dyn Matrix<T>>> {
        Ok(match *self {
            MatrixFactory::Full => Box::new(FullMatrix::new(width, height)),
            MatrixFactory::Band { radius } => Box::new(BandMatrix::new(width, height, radius)?),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_walks_rows_in_order() {
        let mut iterator = MatrixIterator::new(vec![0..2, 1..3]);
        assert!(!iterator.has_previous());
        assert_eq!(iterator.position(), None);
        let mut visited = vec![];
        while iterator.has_next() {
            visited.push(iterator.next().unwrap());
        }
        assert_eq!(visited, vec![(0, 0), (1, 0), (1, 1), (2, 1)]);
        assert!(matches!(iterator.next(), Err(AlignError::IteratorExhausted)));
    }

    #[test]
    fn cursor_walks_backwards() {
        let mut iterator = MatrixIterator::new(vec![0..2, 0..0, 1..3]);
        iterator.after_last();
        let mut visited = vec![];
        while iterator.has_previous() {
            visited.push(iterator.previous().unwrap());
        }
        assert_eq!(visited, vec![(2, 2), (1, 2), (1, 0), (0, 0)]);
        assert!(iterator.previous().is_err());
    }

    #[test]
    fn positions_match_cursor_order() {
        let rows = vec![0..3, 2..4, 3..4];
        let mut cursor = MatrixIterator::new(rows.clone());
        let forward: Vec<_> = MatrixIterator::new(rows.clone()).into_positions().collect();
        for &position in &forward {
            assert_eq!(cursor.next().unwrap(), position);
        }
        let mut backward: Vec<_> = MatrixIterator::new(rows).into_positions().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_cursor_is_exhausted() {
        let mut iterator = MatrixIterator::new(vec![]);
        assert!(!iterator.has_next());
        assert!(iterator.next().is_err());
        iterator.after_last();
        assert!(iterator.previous().is_err());
    }

    #[test]
    fn factory_validates_radius() {
        assert!(MatrixFactory::band(0).is_err());
        let matrix = MatrixFactory::band(1).unwrap().create::<u8>(4, 4).unwrap();
        assert!(matrix.size() < 16);
        let matrix = MatrixFactory::Full.create::<u8>(4, 4).unwrap();
        assert_eq!(matrix.size(), 16);
    }
}
