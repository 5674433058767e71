/// Probability of each segment length observed in a corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LengthModel {
    probabilities: Vec<f64>,
    mean_length: f64,
    total_count: usize,
}

impl LengthModel {
    /// Zero for lengths never observed.
    pub fn length_probability(&self, length: usize) -> f64 {
        self.probabilities.get(length).copied().unwrap_or(0.0)
    }

    pub fn mean_length(&self) -> f64 {
        self.mean_length
    }

    /// Probability of a length observed once.
    pub fn singleton_probability(&self) -> f64 {
        if self.total_count == 0 {
            1.0
        } else {
            1.0 / self.total_count as f64
        }
    }
}

pub fn train_length_model(lengths: impl IntoIterator<Item = usize>) -> LengthModel {
    let mut counts: Vec<usize> = vec![];
    let mut total_count = 0;
    let mut total_length = 0;
    for length in lengths {
        if counts.len() <= length {
            counts.resize(length + 1, 0);
        }
        counts[length] += 1;
        total_count += 1;
        total_length += length;
    }
    if total_count == 0 {
        return LengthModel::default();
    }
    LengthModel {
        probabilities: counts
            .into_iter()
            .map(|count| count as f64 / total_count as f64)
            .collect(),
        mean_length: total_length as f64 / total_count as f64,
        total_count,
    }
}
