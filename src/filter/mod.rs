//! Whole alignment list transformations chained by the pipelines.

use crate::{
    align::{AlignAlgorithm, UnifyAligner},
    alignment::{join_segments, Alignment},
    error::Result,
    modify::Modifier,
};

mod selector;

pub use selector::{FractionSelector, OneToOneSelector, ProbabilitySelector};

pub trait Filter {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>>;
}

/// Realigns the content of every alignment and concatenates the results.
pub struct AlignFilter {
    algorithm: Box<dyn AlignAlgorithm>,
}

impl AlignFilter {
    pub fn new(algorithm: Box<dyn AlignAlgorithm>) -> Self {
        AlignFilter { algorithm }
    }
}

impl Filter for AlignFilter {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        let mut result = vec![];
        for alignment in alignments {
            result.extend(self.algorithm.align(&alignment.source, &alignment.target)?);
        }
        Ok(result)
    }
}

/// Rewrites segments of each side independently, keeping scores.
pub struct ModifyFilter {
    source: Box<dyn Modifier>,
    target: Box<dyn Modifier>,
}

impl ModifyFilter {
    pub fn new(source: Box<dyn Modifier>, target: Box<dyn Modifier>) -> Self {
        ModifyFilter { source, target }
    }
}

impl Filter for ModifyFilter {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        Ok(alignments
            .into_iter()
            .map(|alignment| {
                Alignment::new(
                    self.source.modify(&alignment.source),
                    self.target.modify(&alignment.target),
                    alignment.score,
                )
            })
            .collect())
    }
}

pub struct CompositeFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        CompositeFilter { filters }
    }
}

impl Filter for CompositeFilter {
    fn apply(&self, mut alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        for filter in &self.filters {
            alignments = filter.apply(alignments)?;
        }
        Ok(alignments)
    }
}

/// Regroups the segments of `original` following the alignment it is
/// applied to.
///
/// The applied list usually comes from a modified copy of `original`, with
/// the same number of segments on each side.
pub struct UnifyFilter {
    original: Vec<Alignment>,
}

impl UnifyFilter {
    pub fn new(original: Vec<Alignment>) -> Self {
        UnifyFilter { original }
    }
}

impl Filter for UnifyFilter {
    fn apply(&self, alignments: Vec<Alignment>) -> Result<Vec<Alignment>> {
        let [source, target] = join_segments(&self.original);
        UnifyAligner::new(alignments).align(&source, &target)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::AlignError,
        modify::{Lowercaser, SentenceSplitter},
    };

    struct OneToOne;

    impl AlignAlgorithm for OneToOne {
        fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>> {
            Ok(source
                .iter()
                .zip(target)
                .map(|(s, t)| Alignment::new(vec![s.clone()], vec![t.clone()], 1.0))
                .collect())
        }
    }

    #[test]
    fn align_filter_concatenates() {
        let filter = AlignFilter::new(Box::new(OneToOne));
        let input = vec![
            Alignment::from_segments(&["a", "b"], &["x", "y"]),
            Alignment::from_segments(&["c"], &["z"]),
        ];
        let output = filter.apply(input).unwrap();
        assert_eq!(output.len(), 3);
        assert_eq!(output[2], Alignment::new(vec!["c".into()], vec!["z".into()], 1.0));
    }

    #[test]
    fn modify_then_unify_restores_original() {
        let original = vec![Alignment::from_segments(&["First. Second."], &["Erste. Zweite."])];
        let split = vec![Alignment::from_segments(&["First.", "Second."], &["Erste.", "Zweite."])];
        let filter = CompositeFilter::new(vec![
            Box::new(ModifyFilter::new(Box::new(SentenceSplitter), Box::new(SentenceSplitter))),
            Box::new(ModifyFilter::new(Box::new(Lowercaser), Box::new(Lowercaser))),
            Box::new(AlignFilter::new(Box::new(OneToOne))),
            Box::new(UnifyFilter::new(split)),
        ]);
        let output = filter.apply(original).unwrap();
        assert_eq!(
            output,
            vec![
                Alignment::new(vec!["First.".into()], vec!["Erste.".into()], 1.0),
                Alignment::new(vec!["Second.".into()], vec!["Zweite.".into()], 1.0),
            ]
        );
    }

    #[test]
    fn unify_with_fewer_segments_fails() {
        let filter = UnifyFilter::new(vec![Alignment::from_segments(&["a"], &["x"])]);
        let error = filter
            .apply(vec![Alignment::from_segments(&["a", "b"], &["x"])])
            .unwrap_err();
        assert!(matches!(error, AlignError::AlignmentImpossible { .. }));
    }
}
