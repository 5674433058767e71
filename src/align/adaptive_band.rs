use super::{AlgorithmFactory, AlignAlgorithm};
use crate::{
    alignment::Alignment,
    error::{AlignError, Result},
    matrix::{diagonal_x, MatrixFactory},
};

pub const DEFAULT_INITIAL_RADIUS: usize = 20;
pub const DEFAULT_INCREMENT_RATIO: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandOptions {
    pub initial_radius: usize,
    pub increment_ratio: f64,
    /// Minimum distance the found path must keep from the band edge.
    pub min_margin: usize,
    /// Radius at which widening stops even if the path still touches the edge.
    pub max_radius: Option<usize>,
}

impl BandOptions {
    pub fn new(initial_radius: usize, increment_ratio: f64) -> Self {
        BandOptions {
            initial_radius,
            increment_ratio,
            min_margin: initial_radius / 4,
            max_radius: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_radius < 1 {
            return Err(AlignError::invalid_parameter("initial radius", "must be at least 1"));
        }
        if !(self.increment_ratio > 1.0) {
            return Err(AlignError::invalid_parameter(
                "increment ratio",
                format!("must be greater than 1, got {}", self.increment_ratio),
            ));
        }
        if let Some(max_radius) = self.max_radius {
            if max_radius < self.initial_radius {
                return Err(AlignError::invalid_parameter(
                    "max radius",
                    format!("{max_radius} is smaller than the initial radius {}", self.initial_radius),
                ));
            }
        }
        Ok(())
    }
}

impl Default for BandOptions {
    fn default() -> Self {
        BandOptions::new(DEFAULT_INITIAL_RADIUS, DEFAULT_INCREMENT_RATIO)
    }
}

/// Runs banded alignments with a growing radius until the path found keeps
/// `min_margin` away from the edge of the band.
pub struct AdaptiveBandAlgorithm {
    factory: AlgorithmFactory,
    options: BandOptions,
}

impl AdaptiveBandAlgorithm {
    pub fn new(factory: AlgorithmFactory, options: BandOptions) -> Result<Self> {
        options.validate()?;
        Ok(AdaptiveBandAlgorithm { factory, options })
    }

    pub fn options(&self) -> &BandOptions {
        &self.options
    }
}

/// Largest horizontal distance between the path and the band diagonal.
///
/// Measured along x, the axis the band itself is laid out on, so the result
/// compares directly with the band radius.
pub(crate) fn max_alignment_radius(alignments: &[Alignment], width: usize, height: usize) -> usize {
    let mut position = [0, 0];
    let mut result = 0;
    for alignment in alignments {
        let movement = alignment.category().movement();
        position = [position[0] + movement[0], position[1] + movement[1]];
        result = result.max(position[0].abs_diff(diagonal_x(width, height, position[1])));
    }
    result
}

impl AlignAlgorithm for AdaptiveBandAlgorithm {
    fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>> {
        let (width, height) = (source.len() + 1, target.len() + 1);
        let mut radius = self.options.initial_radius as f64 / self.options.increment_ratio;
        loop {
            radius *= self.options.increment_ratio;
            let mut band = (radius.floor() as usize).max(1);
            let mut capped = false;
            if let Some(max_radius) = self.options.max_radius {
                if band >= max_radius {
                    band = max_radius;
                    capped = true;
                }
            }
            let covers_matrix = band + 1 >= width;
            log::debug!("aligning {} x {} segments with band radius {band}", source.len(), target.len());

            let algorithm = self.factory.create(MatrixFactory::band(band)?);
            match algorithm.align(source, target) {
                Ok(alignments) => {
                    if covers_matrix {
                        return Ok(alignments);
                    }
                    let deviation = max_alignment_radius(&alignments, width, height);
                    if deviation + self.options.min_margin <= band {
                        return Ok(alignments);
                    }
                    if capped {
                        log::warn!("path deviates {deviation} from the diagonal, band radius capped at {band}");
                        return Ok(alignments);
                    }
                    log::debug!("path deviates {deviation} from the diagonal, widening band");
                }
                Err(error) if error.is_band_limited() && !covers_matrix && !capped => {
                    log::debug!("band radius {band} too narrow: {error}");
                }
                Err(error) => {
                    if capped {
                        log::warn!("alignment failed with band radius capped at {band}");
                    }
                    return Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn options_are_validated() {
        assert!(BandOptions::default().validate().is_ok());
        assert_eq!(BandOptions::default().min_margin, 5);
        assert!(BandOptions::new(0, 1.5).validate().is_err());
        assert!(BandOptions::new(10, 1.0).validate().is_err());
        assert!(BandOptions::new(10, f64::NAN).validate().is_err());
        let options = BandOptions {
            max_radius: Some(5),
            ..BandOptions::new(10, 2.0)
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn radius_of_diagonal_path() {
        let alignments: Vec<_> = (0..4).map(|_| Alignment::from_segments(&["a"], &["b"])).collect();
        assert_eq!(max_alignment_radius(&alignments, 5, 5), 0);
    }

    #[test]
    fn radius_of_skewed_path() {
        let mut alignments = vec![Alignment::from_segments(&["a", "b", "c"], &[])];
        alignments.extend((0..3).map(|_| Alignment::from_segments(&[], &["x"])));
        // After the first step the path is at (3, 0) while the diagonal is at 0.
        assert_eq!(max_alignment_radius(&alignments, 4, 4), 3);
    }
}
