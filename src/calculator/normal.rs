use super::{Calculator, CharCounter, LengthCounter};
use crate::{
    error::{AlignError, Result},
    score::{to_score, TScore},
};

/// Gale and Church length model: target length is normally distributed
/// around `c * source length` with variance proportional to the lengths.
pub struct NormalDistributionCalculator {
    counter: Box<dyn LengthCounter>,
    c: f64,
    s2: f64,
}

impl NormalDistributionCalculator {
    pub const DEFAULT_C: f64 = 1.0;
    pub const DEFAULT_S2: f64 = 6.8;

    pub fn new() -> Self {
        NormalDistributionCalculator {
            counter: Box::new(CharCounter),
            c: Self::DEFAULT_C,
            s2: Self::DEFAULT_S2,
        }
    }

    pub fn with_parameters(counter: Box<dyn LengthCounter>, c: f64, s2: f64) -> Result<Self> {
        if !(c > 0.0) {
            return Err(AlignError::invalid_parameter("c", format!("{c} is not positive")));
        }
        if !(s2 > 0.0) {
            return Err(AlignError::invalid_parameter("s2", format!("{s2} is not positive")));
        }
        Ok(NormalDistributionCalculator { counter, c, s2 })
    }

    fn length_score(&self, source_length: usize, target_length: usize) -> TScore {
        if source_length == 0 && target_length == 0 {
            return 0.0;
        }
        let source_length = source_length as f64;
        let target_length = target_length as f64;
        let mean = (source_length + target_length / self.c) / 2.0;
        let z = (self.c * source_length - target_length).abs() / (self.s2 * mean).sqrt();
        let probability = (2.0 * (1.0 - standard_normal_cdf(z))).clamp(f64::MIN_POSITIVE, 1.0);
        to_score(probability)
    }
}

impl Default for NormalDistributionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator for NormalDistributionCalculator {
    fn calculate_score(&self, source: &[String], target: &[String]) -> TScore {
        self.length_score(self.counter.total_length(source), self.counter.total_length(target))
    }
}

/// Abramowitz and Stegun 26.2.17, for `z >= 0`.
fn standard_normal_cdf(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * z);
    let polynomial = ((((1.330274429 * t - 1.821255978) * t + 1.781477937) * t - 0.356563782) * t + 0.319381530) * t;
    1.0 - 0.3989423 * (-z * z / 2.0).exp() * polynomial
}

#[cfg(test)]
mod test {
    use super::*;

    fn segments(lengths: &[usize]) -> Vec<String> {
        lengths.iter().map(|&length| "x".repeat(length)).collect()
    }

    #[test]
    fn empty_lists_score_zero() {
        assert_eq!(NormalDistributionCalculator::new().calculate_score(&[], &[]), 0.0);
        assert_eq!(
            NormalDistributionCalculator::new().calculate_score(&segments(&[0]), &segments(&[0, 0])),
            0.0
        );
    }

    #[test]
    fn cdf_matches_known_values() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((standard_normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
        assert!((standard_normal_cdf(1.96) - 0.975_002_1).abs() < 1e-6);
    }

    #[test]
    fn equal_lengths_are_most_probable() {
        let calculator = NormalDistributionCalculator::new();
        let equal = calculator.calculate_score(&segments(&[40]), &segments(&[40]));
        let close = calculator.calculate_score(&segments(&[40]), &segments(&[50]));
        let far = calculator.calculate_score(&segments(&[40]), &segments(&[120]));
        assert!(equal >= 0.0);
        assert!(equal < 1e-6);
        assert!(equal < close);
        assert!(close < far);
    }

    #[test]
    fn extreme_mismatch_is_finite() {
        let calculator = NormalDistributionCalculator::new();
        let score = calculator.calculate_score(&segments(&[10_000]), &segments(&[]));
        assert!(score.is_finite());
        assert!(score > 100.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(NormalDistributionCalculator::with_parameters(Box::new(CharCounter), 0.0, 6.8).is_err());
        assert!(NormalDistributionCalculator::with_parameters(Box::new(CharCounter), 1.0, -1.0).is_err());
    }
}
