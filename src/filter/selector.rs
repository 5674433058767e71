use float_ord::FloatOrd;

use super::Filter;
use crate::{
    alignment::{Alignment, Category},
    error::{check_unit_interval, Result},
    score::to_probability,
};

/// Keeps only alignments pairing one source segment with one target segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneToOneSelector;

impl Filter for OneToOneSelector {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        Ok(alignments
            .into_iter()
            .filter(|alignment| alignment.category() == Category::new(1, 1))
            .collect())
    }
}

/// Keeps the best scoring `fraction` of alignments, in their original order.
///
/// Alignments tied with the last one kept are kept as well.
#[derive(Clone, Copy, Debug)]
pub struct FractionSelector {
    fraction: f64,
}

impl FractionSelector {
    pub fn new(fraction: f64) -> Result<Self> {
        check_unit_interval("select fraction", fraction)?;
        Ok(FractionSelector { fraction })
    }
}

impl Filter for FractionSelector {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        let count = (alignments.len() as f64 * self.fraction).ceil() as usize;
        if count == 0 {
            return Ok(vec![]);
        }
        let mut scores: Vec<_> = alignments.iter().map(|alignment| FloatOrd(alignment.score)).collect();
        scores.sort_unstable();
        let threshold = scores[count.min(scores.len()) - 1].0;
        Ok(alignments
            .into_iter()
            .filter(|alignment| alignment.score <= threshold)
            .collect())
    }
}

/// Keeps alignments whose probability is at least `probability`.
#[derive(Clone, Copy, Debug)]
pub struct ProbabilitySelector {
    probability: f64,
}

impl ProbabilitySelector {
    pub fn new(probability: f64) -> Result<Self> {
        check_unit_interval("select probability", probability)?;
        Ok(ProbabilitySelector { probability })
    }
}

impl Filter for ProbabilitySelector {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        Ok(alignments
            .into_iter()
            .filter(|alignment| to_probability(alignment.score) >= self.probability)
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::score::to_score;

    fn scored(scores: &[f64]) -> Vec<Alignment> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Alignment::new(vec![format!("s{i}")], vec![format!("t{i}")], score))
            .collect()
    }

    fn scores(alignments: &[Alignment]) -> Vec<f64> {
        alignments.iter().map(|alignment| alignment.score).collect()
    }

    #[test]
    fn one_to_one() {
        let input = vec![
            Alignment::from_segments(&["a"], &["b"]),
            Alignment::from_segments(&["a", "b"], &["c"]),
            Alignment::from_segments(&[], &["c"]),
            Alignment::from_segments(&["d"], &["e"]),
        ];
        let output = OneToOneSelector.apply(input).unwrap();
        assert_eq!(output.len(), 2);
        assert!(output.iter().all(|alignment| alignment.category() == Category::new(1, 1)));
    }

    #[test]
    fn fraction_of_distinct_scores() {
        let output = FractionSelector::new(0.79).unwrap().apply(scored(&[3.0, 1.0, 5.0, 2.0, 4.0])).unwrap();
        assert_eq!(scores(&output), vec![3.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn fraction_keeps_ties() {
        let output = FractionSelector::new(0.79).unwrap().apply(scored(&[1.0; 5])).unwrap();
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn fraction_bounds() {
        assert!(FractionSelector::new(-0.1).is_err());
        assert!(FractionSelector::new(1.5).is_err());
        let input = scored(&[1.0, 2.0]);
        assert!(FractionSelector::new(0.0).unwrap().apply(input.clone()).unwrap().is_empty());
        assert_eq!(FractionSelector::new(1.0).unwrap().apply(input.clone()).unwrap(), input);
        assert!(FractionSelector::new(0.5).unwrap().apply(vec![]).unwrap().is_empty());
    }

    #[test]
    fn probability() {
        let input = scored(&[to_score(0.9), to_score(0.5), to_score(0.1)]);
        let output = ProbabilitySelector::new(0.4).unwrap().apply(input).unwrap();
        assert_eq!(output.len(), 2);
        assert!(ProbabilitySelector::new(2.0).is_err());
    }
}
