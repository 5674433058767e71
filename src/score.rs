//! Conversions between probabilities and scores.
//!
//! A score is the negative natural logarithm of a probability, so lower
//! scores are more probable and scores add where probabilities multiply.

pub type TScore = f64;

pub fn to_score(probability: f64) -> TScore {
    -probability.ln()
}

pub fn to_probability(score: TScore) -> f64 {
    (-score).exp()
}

/// Sums the probabilities represented by `scores` and returns the result as a score.
///
/// The minimum score is factored out before exponentiating, which keeps the
/// largest term at `e^0` and avoids underflow for long products.
pub fn score_sum(scores: &[TScore]) -> TScore {
    if scores.is_empty() {
        return 0.0;
    }
    let min = scores.iter().copied().fold(TScore::INFINITY, TScore::min);
    if min == TScore::INFINITY {
        return TScore::INFINITY;
    }
    let sum: f64 = scores.iter().map(|&score| to_probability(score - min)).sum();
    min + to_score(sum)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn probability_round_trip() {
        for p in [1.0, 0.5, 0.25, 1e-3, 1e-12, 0.999_999] {
            assert!((to_probability(to_score(p)) - p).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_sum_is_certainty() {
        assert_eq!(score_sum(&[]), 0.0);
    }

    #[test]
    fn sum_of_two_halves() {
        let half = to_score(0.5);
        assert!(score_sum(&[half, half]).abs() < 1e-12);
    }

    #[test]
    fn sum_ignores_order() {
        let scores = [3.5, 0.1, 700.0, 12.25, 0.1];
        let mut reversed = scores;
        reversed.reverse();
        assert!((score_sum(&scores) - score_sum(&reversed)).abs() < 1e-12);
    }

    #[test]
    fn sum_of_tiny_probabilities_does_not_underflow() {
        let result = score_sum(&[1000.0, 1000.0]);
        assert!((result - (1000.0 - 2f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn infinite_scores() {
        assert_eq!(score_sum(&[TScore::INFINITY, TScore::INFINITY]), TScore::INFINITY);
        assert!((score_sum(&[TScore::INFINITY, 2.0]) - 2.0).abs() < 1e-12);
        assert!(!score_sum(&[TScore::INFINITY, 2.0]).is_nan());
    }
}
