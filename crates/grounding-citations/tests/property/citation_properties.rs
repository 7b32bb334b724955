use grounding_citations::corpus::sliding_window;
use grounding_citations::search::top_k;
use grounding_citations::GroundingPolicy;
use grounding_core::config::{GranularityThresholds, PassCheck};
use grounding_core::models::{Claim, EmbeddedClaim, Granularity, GranularityCorpus, TranscriptCorpora};
use proptest::prelude::*;

const DIMS: usize = 4;

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, DIMS)
}

fn vectors(max: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(vector(), 0..max)
}

fn corpus(g: Granularity, vectors: Vec<Vec<f32>>) -> GranularityCorpus {
    let texts = (0..vectors.len()).map(|i| format!("{g} {i}")).collect();
    GranularityCorpus::from_texts(g, texts, vectors).unwrap()
}

fn corpora(s: Vec<Vec<f32>>, p: Vec<Vec<f32>>, c: Vec<Vec<f32>>) -> TranscriptCorpora {
    TranscriptCorpora::new(
        corpus(Granularity::Sentence, s),
        corpus(Granularity::Paragraph, p),
        corpus(Granularity::Chunk, c),
    )
    .unwrap()
}

fn thresholds() -> impl Strategy<Value = GranularityThresholds> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_map(|(s, p, c)| GranularityThresholds::new(s, p, c))
}

proptest! {
    #[test]
    fn chunk_count_and_content(
        sentences in prop::collection::vec("[a-z]{1,8}", 0..12),
        window in 1usize..6,
    ) {
        let chunks = sliding_window(&sentences, window).unwrap();
        prop_assert_eq!(chunks.len(), (sentences.len() + 1).saturating_sub(window));
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk, &sentences[i..i + window].join(" "));
        }
    }

    #[test]
    fn top_k_is_bounded_sorted_and_in_range(
        query in vector(),
        units in vectors(10),
        k in 1usize..8,
    ) {
        let c = corpus(Granularity::Sentence, units);
        let hits = top_k(&query, &c, k).unwrap();
        prop_assert_eq!(hits.len(), k.min(c.len()));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].unit.index < pair[1].unit.index);
            }
        }
        for hit in &hits {
            prop_assert!((-1.0..=1.0).contains(&hit.score));
        }
    }

    #[test]
    fn threshold_or_passes_iff_some_top1_meets_threshold(
        query in vector(),
        s in vectors(5), p in vectors(5), c in vectors(5),
        t in thresholds(),
    ) {
        let corpora = corpora(s, p, c);
        let claim = EmbeddedClaim::new(Claim::summary_sentence("claim"), query);
        let policy = GroundingPolicy::ThresholdOr { thresholds: t, pass_check: PassCheck::AnyOfTopK };
        let result = policy.decide(&claim, &corpora, 3).unwrap();
        let expected = result
            .diagnostics
            .iter()
            .any(|d| d.top1().is_some_and(|u| u.score >= d.threshold));
        prop_assert_eq!(result.passed, expected);
        if result.passed {
            let best = result.best_granularity.unwrap();
            let best_score = result.similarity_score;
            for d in &result.diagnostics {
                if let Some(top) = d.top1() {
                    prop_assert!(top.score <= best_score, "{} beats {}", d.granularity, best);
                    if top.score == best_score {
                        prop_assert!(best <= d.granularity, "tie went to {} over {}", best, d.granularity);
                    }
                }
            }
        }
    }

    #[test]
    fn lowering_thresholds_never_unpasses(
        query in vector(),
        s in vectors(5), p in vectors(5), c in vectors(5),
        t in thresholds(),
        delta in 0.0f32..0.5,
    ) {
        let corpora = corpora(s, p, c);
        let claim = EmbeddedClaim::new(Claim::summary_sentence("claim"), query);
        let strict = GroundingPolicy::ThresholdOr { thresholds: t, pass_check: PassCheck::AnyOfTopK };
        let lowered = GroundingPolicy::ThresholdOr {
            thresholds: GranularityThresholds::new(t.sentence - delta, t.paragraph - delta, t.chunk - delta),
            pass_check: PassCheck::AnyOfTopK,
        };
        if strict.decide(&claim, &corpora, 3).unwrap().passed {
            prop_assert!(lowered.decide(&claim, &corpora, 3).unwrap().passed);
        }
    }

    #[test]
    fn raising_one_threshold_never_passes_a_failing_claim(
        query in vector(),
        s in vectors(5), p in vectors(5), c in vectors(5),
        t in thresholds(),
        which in 0usize..3,
        raise in 0.0f32..1.0,
        top_one in any::<bool>(),
    ) {
        let corpora = corpora(s, p, c);
        let claim = EmbeddedClaim::new(Claim::summary_sentence("claim"), query);
        let pass_check = if top_one { PassCheck::TopOne } else { PassCheck::AnyOfTopK };
        let granularity = Granularity::PRIORITY[which];
        let mut raised = t;
        raised.set(granularity, t.get(granularity) + raise);

        let before = GroundingPolicy::ThresholdOr { thresholds: t, pass_check }
            .decide(&claim, &corpora, 3)
            .unwrap();
        let after = GroundingPolicy::ThresholdOr { thresholds: raised, pass_check }
            .decide(&claim, &corpora, 3)
            .unwrap();
        prop_assert!(before.passed || !after.passed);
        if before.passed && after.passed {
            // The cited granularity depends on scores only, not thresholds.
            prop_assert_eq!(before.best_granularity, after.best_granularity);
            prop_assert_eq!(before.citation_index, after.citation_index);
        }
    }

    #[test]
    fn margin_choice_has_the_largest_margin(
        query in vector(),
        s in vectors(5), p in vectors(5), c in vectors(5),
        t in thresholds(),
    ) {
        let corpora = corpora(s, p, c);
        let claim = EmbeddedClaim::new(Claim::answer("q", "claim"), query);
        let result = GroundingPolicy::Margin { thresholds: t }
            .decide(&claim, &corpora, 3)
            .unwrap();

        let margins: Vec<(Granularity, f32)> = result
            .diagnostics
            .iter()
            .filter_map(|d| d.top1().map(|u| (d.granularity, u.score - d.threshold)))
            .collect();
        let best_margin = margins.iter().map(|(_, m)| *m).fold(f32::NEG_INFINITY, f32::max);

        if result.passed {
            let chosen = result.best_granularity.unwrap();
            let chosen_margin = margins.iter().find(|(g, _)| *g == chosen).unwrap().1;
            prop_assert!(chosen_margin > 0.0);
            prop_assert_eq!(chosen_margin, best_margin);
        } else if margins.is_empty() {
            prop_assert_eq!(result.similarity_score, 0.0);
        } else {
            prop_assert!(best_margin <= 0.0);
            prop_assert_eq!(result.similarity_score, best_margin);
        }
    }

    #[test]
    fn top_one_matches_any_of_top_k(
        query in vector(),
        s in vectors(5), p in vectors(5), c in vectors(5),
        t in thresholds(),
    ) {
        let corpora = corpora(s, p, c);
        let claim = EmbeddedClaim::new(Claim::summary_sentence("claim"), query);
        let any = GroundingPolicy::ThresholdOr { thresholds: t, pass_check: PassCheck::AnyOfTopK }
            .decide(&claim, &corpora, 3)
            .unwrap();
        let top = GroundingPolicy::ThresholdOr { thresholds: t, pass_check: PassCheck::TopOne }
            .decide(&claim, &corpora, 3)
            .unwrap();
        prop_assert_eq!(any, top);
    }
}
