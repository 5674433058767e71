//! Ready made alignment pipelines combining calculators, algorithms and filters.

use std::sync::Arc;

use clap::ValueEnum;
use serde::Deserialize;

use crate::{
    align::{AdaptiveBandAlgorithm, AlgorithmFactory, AlgorithmKind, BandOptions},
    alignment::{Alignment, CategoryMap},
    calculator::{
        Calculator, CompositeCalculator, NormalDistributionCalculator, PoissonDistributionCalculator, SplitCounter,
        TranslationCalculator,
    },
    error::Result,
    filter::{AlignFilter, CompositeFilter, Filter, FractionSelector, ModifyFilter, OneToOneSelector, UnifyFilter},
    model::DEFAULT_TRAIN_ITERATIONS,
    modify::{RareWordReplacer, WordSplitter},
    progress::ProgressObserver,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacroKind {
    /// Character length model of Gale and Church.
    GaleChurch,
    /// Word length model trained on the input.
    Poisson,
    /// Length pass, then a length and content pass with word translation
    /// models trained on the most confident pairs of the first.
    Translation,
    /// Translation with rare words replaced while aligning.
    Moore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySet {
    Best,
    Moore,
}

impl CategorySet {
    pub fn map(self) -> &'static CategoryMap {
        match self {
            CategorySet::Best => CategoryMap::best(),
            CategorySet::Moore => CategoryMap::moore(),
        }
    }
}

pub const DEFAULT_SELECT_FRACTION: f64 = 0.85;

#[derive(Clone, Debug)]
pub struct MacroOptions {
    pub algorithm: AlgorithmKind,
    /// Overrides the category set the macro would use by default.
    pub categories: Option<CategorySet>,
    pub band: BandOptions,
    pub iterations: usize,
    pub rare_word_threshold: usize,
    /// Share of the length pass kept to train the translation pass.
    pub select_fraction: f64,
}

impl Default for MacroOptions {
    fn default() -> Self {
        MacroOptions {
            algorithm: AlgorithmKind::Viterbi,
            categories: None,
            band: BandOptions::default(),
            iterations: DEFAULT_TRAIN_ITERATIONS,
            rare_word_threshold: RareWordReplacer::DEFAULT_THRESHOLD,
            select_fraction: DEFAULT_SELECT_FRACTION,
        }
    }
}

impl MacroOptions {
    fn categories(&self, default: CategorySet) -> CategoryMap {
        self.categories.unwrap_or(default).map().clone()
    }

    fn align_filter(&self, calculator: Arc<dyn Calculator>, categories: CategoryMap) -> Result<AlignFilter> {
        let factory = AlgorithmFactory::new(self.algorithm, calculator, categories);
        Ok(AlignFilter::new(Box::new(AdaptiveBandAlgorithm::new(factory, self.band)?)))
    }
}

/// Aligns the content of every input alignment with the chosen pipeline.
pub fn run_macro(
    kind: MacroKind,
    alignments: Vec<Alignment>,
    options: &MacroOptions,
    progress: &dyn ProgressObserver,
) -> Result<Vec<Alignment>> {
    log::info!("running {kind:?} on {} alignments", alignments.len());
    match kind {
        MacroKind::GaleChurch => gale_church(alignments, options),
        MacroKind::Poisson => poisson(alignments, options),
        MacroKind::Translation => translation(alignments, options, progress),
        MacroKind::Moore => moore(alignments, options, progress),
    }
}

fn length_calculator(reference: &[Alignment]) -> Result<Arc<dyn Calculator>> {
    Ok(Arc::new(PoissonDistributionCalculator::new(
        Box::new(SplitCounter::words()),
        reference,
    )?))
}

fn gale_church(alignments: Vec<Alignment>, options: &MacroOptions) -> Result<Vec<Alignment>> {
    let calculator = Arc::new(NormalDistributionCalculator::new());
    options
        .align_filter(calculator, options.categories(CategorySet::Best))?
        .apply(alignments)
}

fn poisson(alignments: Vec<Alignment>, options: &MacroOptions) -> Result<Vec<Alignment>> {
    let calculator = length_calculator(&alignments)?;
    options
        .align_filter(calculator, options.categories(CategorySet::Best))?
        .apply(alignments)
}

fn translation(
    alignments: Vec<Alignment>,
    options: &MacroOptions,
    progress: &dyn ProgressObserver,
) -> Result<Vec<Alignment>> {
    progress.start("translation", 3);
    let result = length_then_content(
        alignments,
        options.categories(CategorySet::Best),
        options,
        progress,
        "translation",
    )?;
    progress.finish("translation");
    Ok(result)
}

/// Aligns by length, trains translation models on the most confident 1-1
/// pairs of that pass and realigns by length and content.
///
/// Reports stages 1 to 3 of `task`.
fn length_then_content(
    alignments: Vec<Alignment>,
    categories: CategoryMap,
    options: &MacroOptions,
    progress: &dyn ProgressObserver,
    task: &str,
) -> Result<Vec<Alignment>> {
    log::info!("aligning by sentence length");
    let length = length_calculator(&alignments)?;
    let length_aligned = options
        .align_filter(length.clone(), categories.clone())?
        .apply(alignments.clone())?;
    progress.advance(task, 1);

    let seed = CompositeFilter::new(vec![
        Box::new(OneToOneSelector),
        Box::new(FractionSelector::new(options.select_fraction)?),
    ])
    .apply(length_aligned)?;
    log::info!("training translation models on {} selected pairs", seed.len());
    let translation = TranslationCalculator::train(Box::new(WordSplitter), &seed, options.iterations, progress)?;
    progress.advance(task, 2);

    log::info!("aligning by sentence length and content");
    let calculator = Arc::new(CompositeCalculator::new(vec![length, Arc::new(translation)]));
    let result = options.align_filter(calculator, categories)?.apply(alignments)?;
    progress.advance(task, 3);
    Ok(result)
}

fn moore(
    alignments: Vec<Alignment>,
    options: &MacroOptions,
    progress: &dyn ProgressObserver,
) -> Result<Vec<Alignment>> {
    progress.start("moore", 4);

    log::info!("replacing words seen fewer than {} times", options.rare_word_threshold);
    let replacer = RareWordReplacer::new(options.rare_word_threshold)?;
    let modified = ModifyFilter::new(Box::new(replacer.clone()), Box::new(replacer)).apply(alignments.clone())?;

    let aligned = length_then_content(modified, options.categories(CategorySet::Moore), options, progress, "moore")?;
    let result = UnifyFilter::new(alignments).apply(aligned)?;
    progress.advance("moore", 4);
    progress.finish("moore");
    Ok(result)
}
