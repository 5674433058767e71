use index_vec::IndexVec;

use super::Wid;

/// Unigram word probabilities.
#[derive(Clone, Debug)]
pub struct LanguageModel {
    probabilities: IndexVec<Wid, f64>,
    singleton_probability: f64,
}

impl LanguageModel {
    /// Falls back to the singleton probability for words never seen in training.
    pub fn word_probability(&self, wid: Wid) -> f64 {
        match self.probabilities.get(wid) {
            Some(&probability) if probability > 0.0 => probability,
            _ => self.singleton_probability,
        }
    }

    pub fn singleton_probability(&self) -> f64 {
        self.singleton_probability
    }
}

pub fn train_language_model(segments: &[Vec<Wid>]) -> LanguageModel {
    let mut counts: IndexVec<Wid, usize> = IndexVec::new();
    let mut total = 0;
    for &wid in segments.iter().flatten() {
        if counts.len() <= wid.index() {
            counts.resize(wid.index() + 1, 0);
        }
        counts[wid] += 1;
        total += 1;
    }
    if total == 0 {
        return LanguageModel {
            probabilities: IndexVec::new(),
            singleton_probability: 1.0,
        };
    }
    LanguageModel {
        probabilities: counts.into_iter().map(|count| count as f64 / total as f64).collect(),
        singleton_probability: 1.0 / total as f64,
    }
}
