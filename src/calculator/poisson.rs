use super::{Calculator, LengthCounter};
use crate::{
    alignment::Alignment,
    error::{AlignError, Result},
    model::{train_length_model, LengthModel},
    score::{to_score, TScore},
};

/// Moore's length model: the target length of a translation is Poisson
/// distributed with mean proportional to the source length.
pub struct PoissonDistributionCalculator {
    counter: Box<dyn LengthCounter>,
    source_model: LengthModel,
    target_model: LengthModel,
    mean_ratio: f64,
}

impl PoissonDistributionCalculator {
    /// Trains the length models on the segments of `reference`.
    pub fn new(counter: Box<dyn LengthCounter>, reference: &[Alignment]) -> Result<Self> {
        let source_model = train_length_model(
            reference
                .iter()
                .flat_map(|alignment| &alignment.source)
                .map(|segment| counter.length(segment)),
        );
        let target_model = train_length_model(
            reference
                .iter()
                .flat_map(|alignment| &alignment.target)
                .map(|segment| counter.length(segment)),
        );
        for (name, model) in [("source mean length", &source_model), ("target mean length", &target_model)] {
            if !(model.mean_length() > 0.0) {
                return Err(AlignError::invalid_parameter(
                    name,
                    format!("{} is not positive", model.mean_length()),
                ));
            }
        }
        let mean_ratio = target_model.mean_length() / source_model.mean_length();
        Ok(PoissonDistributionCalculator {
            counter,
            source_model,
            target_model,
            mean_ratio,
        })
    }

    pub fn mean_ratio(&self) -> f64 {
        self.mean_ratio
    }
}

/// Length score, falling back to the rarest observed length for unseen lengths.
fn length_score(model: &LengthModel, length: usize) -> TScore {
    let probability = model.length_probability(length);
    if probability > 0.0 {
        to_score(probability)
    } else {
        to_score(model.singleton_probability())
    }
}

impl Calculator for PoissonDistributionCalculator {
    fn calculate_score(&self, source: &[String], target: &[String]) -> TScore {
        let source_length = self.counter.total_length(source);
        let target_length = self.counter.total_length(target);
        match (source_length, target_length) {
            (0, 0) => 0.0,
            (0, _) => length_score(&self.target_model, target_length),
            (_, 0) => length_score(&self.source_model, source_length),
            _ => {
                let mean = source_length as f64 * self.mean_ratio;
                length_score(&self.source_model, source_length) + poisson_terms(mean, target_length)
            }
        }
    }
}

/// `-ln P(x)` for a Poisson distribution with the given mean.
pub fn poisson_score(mean: f64, x: usize) -> Result<TScore> {
    if !(mean > 0.0) {
        return Err(AlignError::invalid_parameter("poisson mean", format!("{mean} is not positive")));
    }
    Ok(poisson_terms(mean, x))
}

fn poisson_terms(mean: f64, x: usize) -> TScore {
    mean - x as f64 * mean.ln() + ln_factorial(x)
}

pub fn ln_factorial(x: usize) -> f64 {
    (2..=x).map(|i| (i as f64).ln()).sum()
}
