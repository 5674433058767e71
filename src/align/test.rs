use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::{
    alignment::{join_segments, Category},
    calculator::NormalDistributionCalculator,
    error::AlignError,
};

fn strings(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| segment.to_string()).collect()
}

fn factory(kind: AlgorithmKind) -> AlgorithmFactory {
    AlgorithmFactory::new(
        kind,
        Arc::new(NormalDistributionCalculator::new()),
        CategoryMap::best().clone(),
    )
}

fn all_algorithms() -> Vec<(String, Box<dyn AlignAlgorithm>)> {
    let mut result: Vec<(String, Box<dyn AlignAlgorithm>)> = vec![];
    for kind in [AlgorithmKind::Viterbi, AlgorithmKind::ForwardBackward] {
        result.push((format!("{kind:?} full"), factory(kind).create(MatrixFactory::Full)));
        result.push((
            format!("{kind:?} band"),
            factory(kind).create(MatrixFactory::Band { radius: 3 }),
        ));
        result.push((
            format!("{kind:?} adaptive"),
            Box::new(AdaptiveBandAlgorithm::new(factory(kind), BandOptions::new(2, 1.5)).unwrap()),
        ));
    }
    result
}

fn random_text(rng: &mut ChaCha8Rng) -> String {
    let length = rng.gen_range(1..80);
    (0..length).map(|_| rng.gen_range('a'..='z')).collect()
}

/// Pairs of short and long sentences of roughly matching length.
fn interleaved(count: usize) -> (Vec<String>, Vec<String>) {
    let mut source = vec![];
    let mut target = vec![];
    for i in 0..count {
        if i % 2 == 0 {
            source.push(format!("Short {i}."));
            target.push(format!("Kurz {i}.."));
        } else {
            source.push(format!("This is a considerably longer sentence with number {i} in it, so it stands out."));
            target.push(format!("Das ist ein deutlich laengerer Satz mit der Nummer {i}, damit er auffaellt."));
        }
    }
    (source, target)
}

#[test]
fn empty_lists() {
    for (name, algorithm) in all_algorithms() {
        assert_eq!(algorithm.align(&[], &[]).unwrap(), vec![], "{name}");
    }
}

#[test]
fn single_segment_against_nothing() {
    let segment = strings(&["Segment 1"]);
    for (name, algorithm) in all_algorithms() {
        let result = algorithm.align(&segment, &[]).unwrap();
        assert_eq!(result.len(), 1, "{name}");
        assert_eq!(result[0].source, segment, "{name}");
        assert!(result[0].target.is_empty(), "{name}");

        let result = algorithm.align(&[], &segment).unwrap();
        assert_eq!(result.len(), 1, "{name}");
        assert_eq!(result[0].category(), Category::new(0, 1), "{name}");
        assert_eq!(result[0].target, segment, "{name}");
    }
}

#[test]
fn single_segment_with_minimal_categories() {
    let categories =
        CategoryMap::from_probabilities(&[(Category::new(1, 0), 0.5), (Category::new(1, 1), 0.5)]).unwrap();
    let algorithm = ViterbiAlgorithm::new(
        Arc::new(NormalDistributionCalculator::new()),
        categories,
        MatrixFactory::Full,
    );
    let result = algorithm.align(&strings(&["Segment 1"]), &[]).unwrap();
    assert_eq!(result, vec![Alignment::new(strings(&["Segment 1"]), vec![], result[0].score)]);
}

#[test]
fn missing_category_makes_alignment_impossible() {
    let categories = CategoryMap::from_probabilities(&[(Category::new(1, 1), 1.0)]).unwrap();
    let calculator: Arc<dyn Calculator> = Arc::new(NormalDistributionCalculator::new());
    for kind in [AlgorithmKind::Viterbi, AlgorithmKind::ForwardBackward] {
        let algorithm = AlgorithmFactory::new(kind, calculator.clone(), categories.clone()).create(MatrixFactory::Full);
        let error = algorithm.align(&strings(&["a", "b"]), &strings(&["c"])).unwrap_err();
        assert!(matches!(error, AlignError::AlignmentImpossible { .. }), "{kind:?}");
    }
}

#[test]
fn alignments_reconstruct_input() {
    let mut rng = ChaCha8Rng::seed_from_u64(47);
    let algorithms = all_algorithms();
    for _ in 0..30 {
        let source: Vec<String> = (0..rng.gen_range(0..12)).map(|_| random_text(&mut rng)).collect();
        let target: Vec<String> = (0..rng.gen_range(0..12)).map(|_| random_text(&mut rng)).collect();
        for (name, algorithm) in &algorithms {
            let result = match algorithm.align(&source, &target) {
                Ok(result) => result,
                // A fixed narrow band may not reach the corner of a skewed matrix.
                Err(error) if name.ends_with("band") && error.is_band_limited() => continue,
                Err(error) => panic!("{name}: {error}"),
            };
            assert_eq!(join_segments(&result), [source.clone(), target.clone()], "{name}");
            assert!(result.iter().all(|alignment| alignment.category() != Category::new(0, 0)));
        }
    }
}

#[test]
fn interleaved_sentences_align_one_to_one() {
    let (source, target) = interleaved(60);
    for kind in [AlgorithmKind::Viterbi, AlgorithmKind::ForwardBackward] {
        let algorithm = AdaptiveBandAlgorithm::new(factory(kind), BandOptions::default()).unwrap();
        let result = algorithm.align(&source, &target).unwrap();
        assert_eq!(result.len(), source.len(), "{kind:?}");
        for (i, alignment) in result.iter().enumerate() {
            assert_eq!(alignment.source, vec![source[i].clone()], "{kind:?}");
            assert_eq!(alignment.target, vec![target[i].clone()], "{kind:?}");
        }
    }
}

#[test]
fn adaptive_band_matches_full_matrix() {
    let (mut source, target) = interleaved(40);
    source.remove(7);
    source.insert(20, "An extra sentence that only appears on one side.".to_string());
    let categories = |alignments: &[Alignment]| alignments.iter().map(Alignment::category).collect::<Vec<_>>();
    for kind in [AlgorithmKind::Viterbi, AlgorithmKind::ForwardBackward] {
        let full = factory(kind).create(MatrixFactory::Full).align(&source, &target).unwrap();
        let adaptive = AdaptiveBandAlgorithm::new(factory(kind), BandOptions::new(4, 2.0))
            .unwrap()
            .align(&source, &target)
            .unwrap();
        if kind == AlgorithmKind::Viterbi {
            assert_eq!(full, adaptive);
        } else {
            // Posteriors differ slightly since the band leaves out some paths.
            assert_eq!(categories(&full), categories(&adaptive));
        }
    }
}

#[test]
fn adaptive_band_widens_for_skewed_input() {
    let source: Vec<String> = (0..5).map(|i| format!("Source sentence {i}.")).collect();
    let target: Vec<String> = (0..30).map(|i| format!("Target {i}.")).collect();
    let algorithm = AdaptiveBandAlgorithm::new(factory(AlgorithmKind::Viterbi), BandOptions::new(1, 1.5)).unwrap();
    let result = algorithm.align(&source, &target).unwrap();
    assert_eq!(join_segments(&result), [source, target]);
}

#[test]
fn capped_band_gives_up() {
    let source: Vec<String> = (0..40).map(|i| format!("Source sentence {i}.")).collect();
    let target = strings(&["Only one target."]);
    let options = BandOptions {
        max_radius: Some(2),
        ..BandOptions::new(1, 1.5)
    };
    let algorithm = AdaptiveBandAlgorithm::new(factory(AlgorithmKind::Viterbi), options).unwrap();
    assert!(algorithm.align(&source, &target).unwrap_err().is_band_limited());
}
