use super::Calculator;
use crate::{
    alignment::Alignment,
    error::Result,
    model::{
        train_language_model, train_translation_model, LanguageModel, SparseTranslationModel, TranslationModel,
        Vocabulary, Wid,
    },
    modify::SplitAlgorithm,
    progress::ProgressObserver,
    score::{to_score, TScore},
};

pub const MINIMUM_TRANSLATION_PROBABILITY: f64 = 1e-38;

/// Everything the translation calculator scores with.
#[derive(Clone, Debug)]
pub struct TranslationModels {
    pub source_vocabulary: Vocabulary,
    pub target_vocabulary: Vocabulary,
    pub source_language_model: LanguageModel,
    pub target_language_model: LanguageModel,
    pub translation_model: SparseTranslationModel,
}

impl TranslationModels {
    /// Builds vocabularies from `reference` and trains all models on it.
    pub fn train(
        reference: &[Alignment],
        splitter: &dyn SplitAlgorithm,
        iterations: usize,
        progress: &dyn ProgressObserver,
    ) -> Result<Self> {
        let mut source_vocabulary = Vocabulary::new();
        let mut target_vocabulary = Vocabulary::new();
        let mut source_segments = vec![];
        let mut target_segments = vec![];
        let mut corpus = vec![];

        for alignment in reference {
            let source: Vec<Vec<Wid>> = alignment
                .source
                .iter()
                .map(|segment| source_vocabulary.put_all(&splitter.split(segment)))
                .collect();
            let target: Vec<Vec<Wid>> = alignment
                .target
                .iter()
                .map(|segment| target_vocabulary.put_all(&splitter.split(segment)))
                .collect();
            corpus.push((source.concat(), target.concat()));
            source_segments.extend(source);
            target_segments.extend(target);
        }
        log::debug!(
            "training translation models on {} alignments, vocabulary sizes {} and {}",
            corpus.len(),
            source_vocabulary.len(),
            target_vocabulary.len()
        );

        Ok(TranslationModels {
            source_language_model: train_language_model(&source_segments),
            target_language_model: train_language_model(&target_segments),
            translation_model: train_translation_model(&corpus, iterations, progress)?,
            source_vocabulary,
            target_vocabulary,
        })
    }
}

/// Scores segments by how well target words are explained as translations
/// of source words, on top of the source words' unigram probability.
pub struct TranslationCalculator {
    splitter: Box<dyn SplitAlgorithm>,
    models: TranslationModels,
}

impl TranslationCalculator {
    pub fn new(splitter: Box<dyn SplitAlgorithm>, models: TranslationModels) -> Self {
        TranslationCalculator { splitter, models }
    }

    pub fn train(
        splitter: Box<dyn SplitAlgorithm>,
        reference: &[Alignment],
        iterations: usize,
        progress: &dyn ProgressObserver,
    ) -> Result<Self> {
        let models = TranslationModels::train(reference, splitter.as_ref(), iterations, progress)?;
        Ok(Self::new(splitter, models))
    }

    pub fn models(&self) -> &TranslationModels {
        &self.models
    }

    /// Words missing from the vocabulary get the first id past it.
    fn tokenize(&self, vocabulary: &Vocabulary, segments: &[String]) -> Vec<Wid> {
        let unknown = Wid::new(vocabulary.len());
        segments
            .iter()
            .flat_map(|segment| self.splitter.split(segment))
            .map(|word| vocabulary.get(&word).unwrap_or(unknown))
            .collect()
    }

    fn translation_score(&self, source: &[Wid], target: &[Wid]) -> TScore {
        let null = Vocabulary::null_wid();
        let position_score = to_score(1.0 / (source.len() + 1) as f64);
        let mut score = 0.0;
        for &target_word in target {
            let probability: f64 = source
                .iter()
                .chain(std::iter::once(&null))
                .map(|&source_word| self.models.translation_model.probability(source_word, target_word))
                .sum();
            score += position_score + to_score(probability.max(MINIMUM_TRANSLATION_PROBABILITY));
        }
        score
    }
}

fn language_score(model: &LanguageModel, words: &[Wid]) -> TScore {
    words.iter().map(|&wid| to_score(model.word_probability(wid))).sum()
}

impl Calculator for TranslationCalculator {
    fn calculate_score(&self, source: &[String], target: &[String]) -> TScore {
        let source = self.tokenize(&self.models.source_vocabulary, source);
        let target = self.tokenize(&self.models.target_vocabulary, target);
        match (source.is_empty(), target.is_empty()) {
            (true, true) => 0.0,
            (true, false) => language_score(&self.models.target_language_model, &target),
            (false, true) => language_score(&self.models.source_language_model, &source),
            (false, false) => {
                language_score(&self.models.source_language_model, &source) + self.translation_score(&source, &target)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{modify::WordSplitter, progress::NoProgress};

    fn reference() -> Vec<Alignment> {
        vec![
            Alignment::from_segments(&["the house"], &["das haus"]),
            Alignment::from_segments(&["the book"], &["das buch"]),
            Alignment::from_segments(&["a book"], &["ein buch"]),
            Alignment::from_segments(&["the small house"], &["das kleine haus"]),
        ]
    }

    fn calculator() -> TranslationCalculator {
        TranslationCalculator::train(Box::new(WordSplitter), &reference(), 4, &NoProgress).unwrap()
    }

    fn segment(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn empty_lists_score_zero() {
        assert_eq!(calculator().calculate_score(&[], &[]), 0.0);
        assert_eq!(calculator().calculate_score(&segment(""), &segment("  ")), 0.0);
    }

    #[test]
    fn one_side_empty_uses_language_model() {
        let calculator = calculator();
        let models = calculator.models();
        let the = models.source_vocabulary.get("the").unwrap();
        let expected = to_score(models.source_language_model.word_probability(the));
        assert!((calculator.calculate_score(&segment("the"), &[]) - expected).abs() < 1e-12);
        let haus = models.target_vocabulary.get("haus").unwrap();
        let expected = to_score(models.target_language_model.word_probability(haus));
        assert!((calculator.calculate_score(&[], &segment("haus")) - expected).abs() < 1e-12);
    }

    #[test]
    fn translations_score_better_than_mismatches() {
        let calculator = calculator();
        let good = calculator.calculate_score(&segment("the house"), &segment("das haus"));
        let bad = calculator.calculate_score(&segment("the house"), &segment("ein buch"));
        assert!(good >= 0.0);
        assert!(good < bad);
    }

    #[test]
    fn unknown_words_are_finite() {
        let score = calculator().calculate_score(&segment("zebra"), &segment("zebra"));
        assert!(score.is_finite());
        assert!(score > 0.0);
    }
}
