use std::collections::{BTreeMap, HashMap};

use float_ord::FloatOrd;

use super::{Vocabulary, Wid};
use crate::{
    error::{AlignError, Result},
    progress::ProgressObserver,
};

pub const DEFAULT_TRAIN_ITERATIONS: usize = 4;

pub trait TranslationModel {
    /// Probability that `source` translates to `target`.
    fn probability(&self, source: Wid, target: Wid) -> f64;
}

/// Starting point of training: every translation equally likely.
pub struct UniformTranslationModel;

impl TranslationModel for UniformTranslationModel {
    fn probability(&self, _source: Wid, _target: Wid) -> f64 {
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslationEntry {
    pub target: Wid,
    pub probability: f64,
}

#[derive(Clone, Debug, Default)]
struct SourceTranslations {
    entries: Vec<TranslationEntry>,
    positions: HashMap<Wid, usize>,
}

impl SourceTranslations {
    fn new(entries: Vec<TranslationEntry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.target, position))
            .collect();
        SourceTranslations { entries, positions }
    }

    fn probability(&self, target: Wid) -> f64 {
        self.positions
            .get(&target)
            .map_or(0.0, |&position| self.entries[position].probability)
    }

    fn sort_by_probability(&mut self) {
        self.entries
            .sort_by_key(|entry| (std::cmp::Reverse(FloatOrd(entry.probability)), entry.target));
        *self = SourceTranslations::new(std::mem::take(&mut self.entries));
    }
}

/// Immutable snapshot of word translation probabilities.
#[derive(Clone, Debug, Default)]
pub struct SparseTranslationModel {
    sources: HashMap<Wid, SourceTranslations>,
}

impl SparseTranslationModel {
    /// Translations of `source`, most probable first once training finished.
    pub fn translations(&self, source: Wid) -> &[TranslationEntry] {
        self.sources.get(&source).map_or(&[], |translations| &translations.entries)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl TranslationModel for SparseTranslationModel {
    fn probability(&self, source: Wid, target: Wid) -> f64 {
        self.sources
            .get(&source)
            .map_or(0.0, |translations| translations.probability(target))
    }
}

/// Trains word translation probabilities with expectation maximization.
///
/// Every source segment is extended with the NULL word. A target word's
/// expected count goes to a source word only when its share reaches
/// `1 / (source length + 1)`; smaller shares go to NULL.
pub fn train_translation_model(
    corpus: &[(Vec<Wid>, Vec<Wid>)],
    iterations: usize,
    progress: &dyn ProgressObserver,
) -> Result<SparseTranslationModel> {
    if iterations < 1 {
        return Err(AlignError::invalid_parameter("iterations", "must be at least 1"));
    }
    const TASK: &str = "translation model training";
    progress.start(TASK, iterations);

    let mut model = em_iteration(&UniformTranslationModel, corpus);
    progress.advance(TASK, 1);
    for iteration in 1..iterations {
        model = em_iteration(&model, corpus);
        log::debug!(
            "EM iteration {} done, {} source words",
            iteration + 1,
            model.source_count()
        );
        progress.advance(TASK, iteration + 1);
    }
    for translations in model.sources.values_mut() {
        translations.sort_by_probability();
    }

    progress.finish(TASK);
    Ok(model)
}

fn em_iteration(old_model: &dyn TranslationModel, corpus: &[(Vec<Wid>, Vec<Wid>)]) -> SparseTranslationModel {
    let null = Vocabulary::null_wid();
    let mut counts: BTreeMap<Wid, BTreeMap<Wid, f64>> = BTreeMap::new();

    for (source, target) in corpus {
        let source_words: Vec<Wid> = source.iter().copied().chain(std::iter::once(null)).collect();
        let min_share = 1.0 / source_words.len() as f64;
        for &target_word in target {
            let probability_sum: f64 = source_words
                .iter()
                .map(|&source_word| old_model.probability(source_word, target_word))
                .sum();
            if probability_sum <= 0.0 {
                continue;
            }
            for &source_word in &source_words {
                let share = old_model.probability(source_word, target_word) / probability_sum;
                let credited = if share >= min_share { source_word } else { null };
                *counts.entry(credited).or_default().entry(target_word).or_default() += share;
            }
        }
    }

    let sources = counts
        .into_iter()
        .map(|(source_word, target_counts)| {
            let total: f64 = target_counts.values().sum();
            let entries = target_counts
                .into_iter()
                .map(|(target, count)| TranslationEntry {
                    target,
                    probability: if total > 0.0 { count / total } else { 0.0 },
                })
                .collect();
            (source_word, SourceTranslations::new(entries))
        })
        .collect();
    SparseTranslationModel { sources }
}
