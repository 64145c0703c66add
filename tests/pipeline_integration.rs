use std::fs;

use taskmatch::{
    build_index_from_csv, build_index_from_str, reload_session, MatchSpan, RecordsConfig, Session,
    TaskMatchConfig,
};
use tempfile::tempdir;

const KITCHEN_SHEET: &str = "\
Task,Description,Actions,Objects
Tea,Boil water for tea,boil;pour,kettle;cup
Pasta,Boil water for pasta,boil;drain,pot;colander
Tidy,Clean the kitchen,wipe;sweep,cloth;broom
";

#[test]
fn sheet_on_disk_resolves_best_match() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.csv");
    fs::write(&path, KITCHEN_SHEET).expect("write sheet");

    let index = build_index_from_csv(&path, &TaskMatchConfig::default()).expect("index");
    assert_eq!(index.len(), 3);

    let hit = index.search("boil water tea").into_hit().expect("match");
    assert_eq!(hit.index, 0);
    assert_eq!(hit.record.task, "Tea");
    assert_eq!(hit.record.actions, "boil;pour");
    assert!((hit.score - 3.0 / 14.0).abs() < 1e-9);
    assert_eq!(
        hit.matches,
        vec![MatchSpan { start: 0, end: 10 }, MatchSpan { start: 12, end: 17 }]
    );
}

#[test]
fn typos_still_find_the_task() {
    let index = build_index_from_str(KITCHEN_SHEET, &TaskMatchConfig::default()).expect("index");

    let hit = index.search("cleen the kitchn").into_hit().expect("match");
    assert_eq!(hit.record.task, "Tidy");
    assert!((hit.score - 0.125).abs() < 1e-9);
}

#[test]
fn top_k_orders_by_score_then_sheet_order() {
    let index = build_index_from_str(KITCHEN_SHEET, &TaskMatchConfig::default()).expect("index");

    let hits = index.search_top_k("tea", 5);
    let order: Vec<_> = hits.iter().map(|h| h.index).collect();
    assert_eq!(order, vec![0, 2]);
    assert!((hits[0].score - 0.15).abs() < 1e-9);
    assert!((hits[1].score - 0.34333).abs() < 1e-4);

    // Tied scores keep sheet order.
    let tied = index.search_top_k("boil", 5);
    assert_eq!(tied.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(tied[0].score, tied[1].score);

    assert_eq!(index.search_top_k("boil", 1).len(), 1);
    assert!(index.search_top_k("boil", 0).is_empty());
}

#[test]
fn misses_report_no_match() {
    let index = build_index_from_str(KITCHEN_SHEET, &TaskMatchConfig::default()).expect("index");

    for query in ["kitchen sink", "water pasta", "xyzxyz", "b", "", "   "] {
        assert!(!index.search(query).is_match(), "query {query:?}");
        assert!(index.search_top_k(query, 5).is_empty(), "query {query:?}");
    }
}

#[test]
fn yaml_config_tunes_the_matcher() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("taskmatch.yaml");
    fs::write(
        &config_path,
        "version: \"1.0\"\nname: strict kitchen\nmatcher:\n  threshold: 0.2\n  default_limit: 2\n",
    )
    .expect("write config");
    let sheet_path = dir.path().join("tasks.csv");
    fs::write(&sheet_path, KITCHEN_SHEET).expect("write sheet");

    let cfg = TaskMatchConfig::from_file(&config_path).expect("config");
    assert_eq!(cfg.name.as_deref(), Some("strict kitchen"));

    let index = build_index_from_csv(&sheet_path, &cfg).expect("index");
    let hits = index.search_top_k("tea", 5);
    assert_eq!(hits.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0]);
    assert_eq!(index.search_default("boil").len(), 2);
}

#[test]
fn semicolon_sheets_load_with_configured_delimiter() {
    let cfg = TaskMatchConfig::from_yaml("records:\n  delimiter: 59\n").expect("config");
    let sheet = "Task;Description;Actions;Objects\nTidy;Clean the kitchen;wipe;cloth\n";

    let index = build_index_from_str(sheet, &cfg).expect("index");
    let hit = index.search("kitchen").into_hit().expect("match");
    assert_eq!(hit.record.objects, "cloth");
}

#[test]
fn session_reload_swaps_the_sheet() {
    let session = Session::default();
    let records_cfg = RecordsConfig::default();

    reload_session(&session, KITCHEN_SHEET, &records_cfg).expect("first load");
    let hit = session.search("kitchen").expect("loaded").into_hit().expect("match");
    assert_eq!(hit.record.task, "Tidy");

    let garden = "Task,Description,Actions,Objects\nPlants,Water the house plants,water,can\n";
    let index = reload_session(&session, garden, &records_cfg).expect("second load");
    assert_eq!(index.len(), 1);
    assert_eq!(session.generation(), 2);

    assert!(!session.search("kitchen").expect("loaded").is_match());
    let hit = session.search("house plants").expect("loaded").into_hit().expect("match");
    assert_eq!(hit.record.task, "Plants");
}
