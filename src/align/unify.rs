use super::AlignAlgorithm;
use crate::{
    alignment::Alignment,
    error::{AlignError, Result},
};

/// Regroups segments so that they follow the segment counts of a reference
/// alignment list.
///
/// Used to carry an alignment computed on modified text back to the text it
/// was computed from. Scores are copied from the reference.
pub struct UnifyAligner {
    reference: Vec<Alignment>,
}

impl UnifyAligner {
    pub fn new(reference: Vec<Alignment>) -> Self {
        UnifyAligner { reference }
    }
}

impl AlignAlgorithm for UnifyAligner {
    fn align(&self, source: &[String], target: &[String]) -> Result<Vec<Alignment>> {
        let expected = self.reference.iter().fold([0, 0], |[s, t], alignment| {
            [s + alignment.source.len(), t + alignment.target.len()]
        });
        if expected != [source.len(), target.len()] {
            return Err(AlignError::impossible(format!(
                "reference covers {} x {} segments but {} x {} were given",
                expected[0],
                expected[1],
                source.len(),
                target.len()
            )));
        }

        let mut position = [0, 0];
        let mut result = Vec::with_capacity(self.reference.len());
        for alignment in &self.reference {
            let next = [position[0] + alignment.source.len(), position[1] + alignment.target.len()];
            result.push(Alignment::new(
                source[position[0]..next[0]].to_vec(),
                target[position[1]..next[1]].to_vec(),
                alignment.score,
            ));
            position = next;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn follows_reference_counts() {
        let reference = vec![
            Alignment::new(strings(&["A", "B"]), strings(&["a"]), 1.5),
            Alignment::new(vec![], strings(&["b"]), 2.0),
            Alignment::new(strings(&["C"]), strings(&["c"]), 0.5),
        ];
        let aligner = UnifyAligner::new(reference);
        let result = aligner
            .align(&strings(&["1", "2", "3"]), &strings(&["x", "y", "z"]))
            .unwrap();
        assert_eq!(
            result,
            vec![
                Alignment::new(strings(&["1", "2"]), strings(&["x"]), 1.5),
                Alignment::new(vec![], strings(&["y"]), 2.0),
                Alignment::new(strings(&["3"]), strings(&["z"]), 0.5),
            ]
        );
    }

    #[test]
    fn count_mismatch_is_impossible() {
        let aligner = UnifyAligner::new(vec![Alignment::from_segments(&["A"], &["a"])]);
        let error = aligner.align(&strings(&["1", "2"]), &strings(&["x"])).unwrap_err();
        assert!(matches!(error, AlignError::AlignmentImpossible { .. }));
    }
}
