//! Common utilities for taskmatch benchmarks.

#![allow(dead_code)]

use taskmatch::Record;

const VERBS: &[&str] = &[
    "boil", "clean", "wash", "dry", "fold", "sweep", "mop", "chop", "stir", "bake", "water",
    "repot", "sort", "pack", "iron",
];

const OBJECTS: &[&str] = &[
    "water for tea",
    "the kitchen",
    "dishes",
    "laundry",
    "the floor",
    "vegetables",
    "bread dough",
    "house plants",
    "the garage shelves",
    "winter clothes",
    "the bathroom mirror",
    "pasta sauce",
];

/// Deterministic sheet of `count` task records.
pub fn sample_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let verb = VERBS[i % VERBS.len()];
            let object = OBJECTS[(i / VERBS.len()) % OBJECTS.len()];
            Record::new(
                format!("task-{i}"),
                format!("{verb} {object} #{i}"),
                verb,
                object,
            )
        })
        .collect()
}

/// Queries ranging from exact prefixes to typo-laden phrases.
pub const QUERIES: &[&str] = &[
    "boil water tea",
    "clean kitchen",
    "wsah dishes",
    "fold the laundry",
    "repot house plants carefully before spring arrives",
    "xyzxyz",
];
