//! Probability models trained from reference alignments.

mod language;
mod length;
mod translation;
mod vocabulary;

pub use language::{train_language_model, LanguageModel};
pub use length::{train_length_model, LengthModel};
pub use translation::{
    train_translation_model, SparseTranslationModel, TranslationEntry, TranslationModel, UniformTranslationModel,
    DEFAULT_TRAIN_ITERATIONS,
};
pub use vocabulary::{Vocabulary, Wid, NULL_WORD};
