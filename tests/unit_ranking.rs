// Unit tests for aspect ranking.
//
// Builds a small in-memory model and aspect store and checks the ranking
// contract: predictions come from the entity's own aspects, unknown and
// lead-only entities fall back to "summary", vectorization keeps order,
// and predictions are repeatable.

use std::collections::HashMap;

use aspectrank::aspects::store::{normalize_entity, Aspect, AspectStore, EntityAspects};
use aspectrank::ranking::ranker::{AspectRanker, FallbackReason, Prediction, SUMMARY_LABEL};
use aspectrank::vectorize::preprocess::NlpPipeline;
use aspectrank::vectorize::sparse::cosine_similarity;
use aspectrank::vectorize::tfidf::TfidfModel;

const TERMS: &[(&str, f64)] = &[
    ("telescope", 2.0),
    ("galaxy", 2.2),
    ("orbit", 1.8),
    ("pasta", 2.5),
    ("tomato", 2.1),
    ("harvest", 1.9),
    ("vineyard", 2.4),
    ("astronomer", 2.3),
];

fn model() -> TfidfModel {
    let vocabulary: HashMap<String, usize> = TERMS
        .iter()
        .enumerate()
        .map(|(i, (t, _))| (t.to_string(), i))
        .collect();
    let idf = TERMS.iter().map(|(_, w)| *w).collect();
    TfidfModel::new(vocabulary, idf).unwrap()
}

fn aspect(label: &str, content: &str) -> Aspect {
    Aspect {
        label: label.to_string(),
        content: content.to_string(),
    }
}

fn ranker() -> AspectRanker {
    let mut store = AspectStore::default();
    store.insert(
        "Hubble_Space_Telescope",
        EntityAspects {
            aspects: vec![
                aspect("history", "The astronomer proposed the telescope decades earlier."),
                aspect("orbit", "Its orbit decays slowly; the orbit is low."),
                aspect("discoveries", "Images of a distant galaxy and galaxy clusters."),
            ],
            has_lead: true,
        },
    );
    store.insert(
        "Tuscany",
        EntityAspects {
            aspects: vec![
                aspect("cuisine", "Pasta with tomato sauce is everywhere."),
                aspect("wine", "Every vineyard celebrates the harvest."),
            ],
            has_lead: true,
        },
    );
    store.insert(
        "Empty_Page",
        EntityAspects {
            aspects: vec![],
            has_lead: true,
        },
    );

    AspectRanker::new(Box::new(model()), Box::new(NlpPipeline::new()), store)
}

// ============================================================
// predict — closest aspect
// ============================================================

#[test]
fn predicts_closest_aspect() {
    let r = ranker();
    assert_eq!(
        r.predict("The galaxy photos changed astronomy.", "Hubble_Space_Telescope"),
        "discoveries"
    );
    assert_eq!(r.predict("A tomato and pasta dinner.", "Tuscany"), "cuisine");
    assert_eq!(r.predict("The vineyard harvest begins.", "tuscany"), "wine");
}

#[test]
fn prediction_is_one_of_entity_aspects() {
    let r = ranker();
    let own: Vec<&str> = r
        .store()
        .aspects("Tuscany")
        .unwrap()
        .iter()
        .map(|a| a.label.as_str())
        .collect();
    for sentence in [
        "galaxy orbit telescope",
        "pasta",
        "nothing matches here",
        "harvest tomato",
    ] {
        let label = r.predict(sentence, "Tuscany");
        assert!(own.contains(&label.as_str()), "{label} is not a Tuscany aspect");
    }
}

#[test]
fn entity_lookup_is_normalized() {
    let r = ranker();
    let a = r.predict("orbit", "Hubble_Space_Telescope");
    let b = r.predict("orbit", "hubble space telescope");
    let c = r.predict("orbit", "HUBBLE_SPACE_TELESCOPE");
    assert_eq!(a, "orbit");
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(normalize_entity("HUBBLE_SPACE_TELESCOPE"), "hubble space telescope");
}

#[test]
fn rank_reports_similarity() {
    let r = ranker();
    match r.rank("Every vineyard celebrates the harvest.", "Tuscany") {
        Prediction::Aspect { label, similarity } => {
            assert_eq!(label, "wine");
            assert!((similarity - 1.0).abs() < 1e-9, "got {similarity}");
        }
        other => panic!("expected an aspect, got {other:?}"),
    }
}

// ============================================================
// predict — summary fallback
// ============================================================

#[test]
fn unknown_entity_predicts_summary() {
    let r = ranker();
    assert_eq!(r.predict("galaxy", "Andromeda"), SUMMARY_LABEL);
    assert_eq!(
        r.rank("galaxy", "Andromeda"),
        Prediction::Fallback(FallbackReason::UnknownEntity)
    );
}

#[test]
fn lead_only_entity_predicts_summary() {
    let r = ranker();
    assert_eq!(r.predict("galaxy", "Empty_Page"), SUMMARY_LABEL);
    assert_eq!(
        r.scores("galaxy", "empty page"),
        Err(FallbackReason::NoRankableAspects)
    );
}

// ============================================================
// vectorize and purity
// ============================================================

#[test]
fn vectorize_preserves_order() {
    let r = ranker();
    let rows = r.vectorize(&["pasta tomato", "galaxy orbit"]);
    let single_a = r.vectorize(&["pasta tomato"]).remove(0);
    let single_b = r.vectorize(&["galaxy orbit"]).remove(0);
    assert_eq!(rows.len(), 2);
    assert!((cosine_similarity(&rows[0], &single_a) - 1.0).abs() < 1e-12);
    assert!((cosine_similarity(&rows[1], &single_b) - 1.0).abs() < 1e-12);
    assert_eq!(cosine_similarity(&rows[0], &rows[1]), 0.0);
}

#[test]
fn predict_is_idempotent() {
    let r = ranker();
    let first = r.rank("telescope images of a galaxy", "Hubble_Space_Telescope");
    let second = r.rank("telescope images of a galaxy", "Hubble_Space_Telescope");
    assert_eq!(first, second);
}

#[test]
fn ties_go_to_first_candidate() {
    let r = ranker();
    // no vocabulary hit: every similarity is zero and the first aspect wins
    assert_eq!(r.predict("no known words", "Tuscany"), "cuisine");
}
