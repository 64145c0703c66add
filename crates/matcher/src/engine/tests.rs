use super::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use records::ValidationError;

use crate::metrics::{set_match_metrics, MatchMetrics};
use crate::types::MatchSpan;

fn record(description: &str) -> Record {
    Record::new(
        format!("task: {description}"),
        description,
        "do it",
        "things",
    )
}

fn kitchen_index() -> MatchIndex {
    MatchIndex::build(
        vec![
            record("Boil water for tea"),
            record("Boil water for pasta"),
            record("Clean the kitchen"),
        ],
        MatchConfig::default(),
    )
    .expect("index builds")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_record_list_is_validation_error() {
    let err = MatchIndex::build(Vec::new(), MatchConfig::default()).expect_err("empty");
    assert_eq!(err, MatchError::Validation(ValidationError::EmptyRecordSet));
}

#[test]
fn invalid_config_rejected_at_build() {
    let cfg = MatchConfig {
        threshold: 2.0,
        ..Default::default()
    };
    let err = MatchIndex::build(vec![record("Wash dishes")], cfg).expect_err("bad config");
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn fuzzy_query_prefers_first_of_equal_scores() {
    let index = kitchen_index();
    let hit = index.search("boil water tea").into_hit().expect("match");
    assert_eq!(hit.index, 0);
    assert_eq!(hit.record.description, "Boil water for tea");
    assert!(hit.score < 0.4);
    assert!(approx(hit.score, 3.0 / 14.0));
    assert_eq!(
        hit.matches,
        vec![
            MatchSpan { start: 0, end: 10 },
            MatchSpan { start: 12, end: 17 }
        ]
    );

    // Both "Boil water" records tie; order follows the record set.
    let top = index.search_top_k("boil water tea", 5);
    let order: Vec<usize> = top.iter().map(|h| h.index).collect();
    assert_eq!(order, vec![0, 1]);
    assert!(approx(top[1].score, top[0].score));
}

#[test]
fn unrelated_query_is_no_match() {
    let index = kitchen_index();
    assert_eq!(index.search("xyzxyz"), SearchResult::NoMatch);
    assert!(index.search_top_k("xyzxyz", 5).is_empty());
}

#[test]
fn blank_queries_are_no_match() {
    let index = kitchen_index();
    for query in ["", "   ", "\t\n"] {
        assert_eq!(index.search(query), SearchResult::NoMatch);
        assert!(index.search_top_k(query, 3).is_empty());
    }
}

#[test]
fn exact_description_scores_zero() {
    let index = kitchen_index();
    let top = index.search_top_k("Boil water for tea", 5);
    assert_eq!(top[0].index, 0);
    assert_eq!(top[0].score, 0.0);
    assert_eq!(top[0].matches, vec![MatchSpan { start: 0, end: 17 }]);
    assert_eq!(top[1].index, 1);
    assert!(approx(top[1].score, 2.0 / 18.0));
}

#[test]
fn exact_match_ignores_case_and_surrounding_whitespace() {
    let index = kitchen_index();
    let hit = index
        .search("  BOIL WATER FOR PASTA ")
        .into_hit()
        .expect("match");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.score, 0.0);
}

#[test]
fn duplicates_resolve_to_lowest_index() {
    let index = MatchIndex::build(
        vec![record("Wash dishes"), record("Wash dishes")],
        MatchConfig::default(),
    )
    .expect("index builds");

    let hit = index.search("wash dishes").into_hit().expect("match");
    assert_eq!(hit.index, 0);
    assert_eq!(hit.score, 0.0);

    let top = index.search_top_k("wash dishes", 5);
    assert_eq!(top.len(), 2);
    assert_eq!(top[1].index, 1);
    assert_eq!(top[1].score, 0.0);
}

#[test]
fn location_penalty_orders_candidates() {
    let index = kitchen_index();

    let kitchen = index.search("kitchen").into_hit().expect("match");
    assert_eq!(kitchen.index, 2);
    assert!(approx(kitchen.score, 0.1));

    let tea = index.search_top_k("tea", 5);
    let order: Vec<usize> = tea.iter().map(|h| h.index).collect();
    assert_eq!(order, vec![0, 2]);
    assert!(approx(tea[0].score, 0.15));
}

#[test]
fn typos_still_match() {
    let index = kitchen_index();
    let hit = index.search("cleen the kitchn").into_hit().expect("match");
    assert_eq!(hit.index, 2);
    assert!(approx(hit.score, 0.125));
}

#[test]
fn prefix_query_gets_floor_score() {
    let index = kitchen_index();
    let top = index.search_top_k("boil", 5);
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|h| h.score == 0.001));
}

#[test]
fn words_far_apart_do_not_match() {
    let index = kitchen_index();
    assert_eq!(index.search("water pasta"), SearchResult::NoMatch);
}

#[test]
fn repeated_searches_are_identical() {
    let index = kitchen_index();
    let first = index.search_top_k("boil water", 5);
    for _ in 0..10 {
        assert_eq!(index.search_top_k("boil water", 5), first);
    }

    let rebuilt = kitchen_index();
    assert_eq!(rebuilt.search_top_k("boil water", 5), first);
}

#[test]
fn top_k_head_equals_search() {
    let index = kitchen_index();
    for query in ["boil water tea", "tea", "kitchen", "pasta", "xyzxyz"] {
        let best = index.search(query);
        let top = index.search_top_k(query, 3);
        assert_eq!(best.hit(), top.first(), "query {query:?}");
    }
}

#[test]
fn top_k_respects_limit_and_orders_scores() {
    let index = kitchen_index();
    let all = index.search_top_k("tea", 10);
    assert_eq!(all.len(), 2);
    assert!(all.windows(2).all(|w| w[0].score <= w[1].score));

    let one = index.search_top_k("tea", 1);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0], all[0]);

    assert!(index.search_top_k("tea", 0).is_empty());
}

#[test]
fn default_limit_applies() {
    let descriptions: Vec<Record> = (0..8).map(|i| record(&format!("Wash dishes {i}"))).collect();
    let index = MatchIndex::build(
        descriptions,
        MatchConfig {
            default_limit: 3,
            ..Default::default()
        },
    )
    .expect("index builds");
    let hits = index.search_default("wash dishes");
    assert_eq!(hits.len(), 3);
    assert_eq!(
        hits.iter().map(|h| h.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn scores_stay_in_unit_range() {
    let index = kitchen_index();
    for query in ["b", "bo", "water", "for", "the", "kitchen sink", "boil water for tea please"] {
        for hit in index.search_top_k(query, 5) {
            assert!((0.0..=1.0).contains(&hit.score), "{query:?}: {}", hit.score);
        }
    }
}

#[test]
fn long_query_matches_by_chunks() {
    let long = "Preheat the oven and then carefully line the baking tray with parchment";
    let index = MatchIndex::build(
        vec![record("Clean the kitchen"), record(long)],
        MatchConfig::default(),
    )
    .expect("index builds");

    let exact = index.search(long).into_hit().expect("exact match");
    assert_eq!(exact.index, 1);
    assert_eq!(exact.score, 0.0);

    let prefix = &long[..40];
    let hit = index.search(prefix).into_hit().expect("chunked match");
    assert_eq!(hit.index, 1);
    assert!(hit.score <= index.config().threshold);
}

#[test]
fn long_query_with_unmatched_tail_is_rejected() {
    let description = "Carefully measure the flour and sugar before mixing the batter";
    let index = MatchIndex::build(vec![record(description)], MatchConfig::default())
        .expect("index builds");

    // The first chunk matches exactly, the second is noise: the chunk mean
    // (about 0.5) is over the threshold.
    let query = format!("{}{}", &description[..32], "zqxj".repeat(7));
    assert_eq!(index.search(&query), SearchResult::NoMatch);
    assert!(index.search_top_k(&query, 5).is_empty());

    // Both chunks matching keeps the record.
    let hit = index.search(&description[..48]).into_hit().expect("match");
    assert!(approx(hit.score, 0.001));
}

#[test]
fn accepted_scores_never_exceed_threshold() {
    let index = kitchen_index();
    let threshold = index.config().threshold;
    let queries = [
        "boil water tea",
        "boil water for tea please",
        "Boil water for tea, then clean the whole kitchen",
        "clean the kitchen and boil water for the pasta",
        "water boil",
    ];
    for query in queries {
        for hit in index.search_top_k(query, 5) {
            assert!(hit.score <= threshold, "{query:?}: {}", hit.score);
        }
    }
}

#[test]
fn reordered_words_match_within_window() {
    let index = kitchen_index();

    let swapped = index.search_top_k("water boil", 5);
    assert_eq!(swapped.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0, 1]);
    assert!(approx(swapped[0].score, 0.35));

    let hit = index.search("boil tea water").into_hit().expect("match");
    assert_eq!(hit.index, 0);
    assert!(approx(hit.score, 2.0 / 7.0));

    // Moving the leading word to the end pushes it past the window.
    assert_eq!(index.search("kitchen clean"), SearchResult::NoMatch);
}

#[test]
fn extreme_location_does_not_overflow() {
    let long = "Preheat the oven and then carefully line the baking tray with parchment";
    let cfg = MatchConfig {
        location: usize::MAX - 1,
        ..Default::default()
    };
    let index = MatchIndex::build(vec![record(long)], cfg).expect("index builds");

    for hit in index.search_top_k(&long[..40], 5) {
        assert!(hit.score <= index.config().threshold);
    }
    assert_eq!(index.search(long).into_hit().map(|h| h.score), Some(0.0));
}

#[test]
fn highlights_can_be_disabled() {
    let index = MatchIndex::build(
        vec![record("Clean the kitchen")],
        MatchConfig {
            include_matches: false,
            ..Default::default()
        },
    )
    .expect("index builds");
    let hit = index.search("kitchen").into_hit().expect("match");
    assert!(hit.matches.is_empty());
}

#[test]
fn stricter_threshold_drops_weaker_candidates() {
    let index = MatchIndex::build(
        vec![
            record("Boil water for tea"),
            record("Boil water for pasta"),
            record("Clean the kitchen"),
        ],
        MatchConfig {
            threshold: 0.2,
            ..Default::default()
        },
    )
    .expect("index builds");
    let tea = index.search_top_k("tea", 5);
    assert_eq!(tea.len(), 1);
    assert_eq!(tea[0].index, 0);
}

struct RecordingMetrics {
    events: Mutex<Vec<(usize, usize, bool)>>,
}

impl MatchMetrics for RecordingMetrics {
    fn record_search(&self, query_chars: usize, _latency: Duration, candidates: usize, matched: bool) {
        self.events
            .lock()
            .unwrap()
            .push((query_chars, candidates, matched));
    }
}

#[test]
fn metrics_observe_searches() {
    let recorder = Arc::new(RecordingMetrics {
        events: Mutex::new(Vec::new()),
    });
    set_match_metrics(Some(recorder.clone()));

    let index = kitchen_index();
    // Distinctive lengths so concurrent tests can't be confused with ours.
    let _ = index.search("boil water tea   ");
    let _ = index.search("qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq");
    set_match_metrics(None);

    let events = recorder.events.lock().unwrap();
    assert!(events.contains(&(14, 2, true)));
    assert!(events.contains(&(72, 0, false)));
}

#[test]
fn index_recorder_sees_only_its_own_searches() {
    let mine = Arc::new(RecordingMetrics {
        events: Mutex::new(Vec::new()),
    });
    let other = Arc::new(RecordingMetrics {
        events: Mutex::new(Vec::new()),
    });
    let index = kitchen_index().with_metrics(mine.clone());
    let other_index = kitchen_index().with_metrics(other.clone());

    let _ = index.search("cleen the kitchn");
    let _ = index.search_top_k("xyzxyz", 3);
    let _ = other_index.search("boil");

    assert_eq!(
        *mine.events.lock().unwrap(),
        vec![(16, 1, true), (6, 0, false)]
    );
    assert_eq!(*other.events.lock().unwrap(), vec![(4, 2, true)]);
}
