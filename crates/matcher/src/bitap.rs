//! Windowed Bitap scoring.
//!
//! A query is compiled once into one or more [`PatternChunk`]s (at most
//! [`MAX_PATTERN_BITS`] characters each, one bit per pattern position), then
//! each chunk is run against a normalized description. For every error level
//! `k` the scan keeps a bit array whose set bits mean "the pattern prefix of
//! this length matches here with at most `k` insertions, deletions or
//! substitutions"; a set high bit is a full match.
//!
//! Score of a match with `e` errors starting at `loc`:
//!
//! ```text
//! e / pattern_len + |expected_location - loc| / distance
//! ```
//!
//! so `distance` is the window that bounds how far from `location` a match may
//! begin before it can no longer clear the threshold.
use fxhash::FxHashMap;

use crate::types::{MatchConfig, MatchSpan};

/// Width of the bit-parallel state; longer queries are split into chunks.
pub const MAX_PATTERN_BITS: usize = 32;

/// Floor for any non-exact accepted match so only whole-field equality scores 0.
const MIN_PARTIAL_SCORE: f64 = 0.001;

/// Outcome of scoring one description against a compiled query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldMatch {
    pub is_match: bool,
    pub score: f64,
    pub spans: Vec<MatchSpan>,
}

#[derive(Debug, Clone)]
pub(crate) struct PatternChunk {
    chars: Vec<char>,
    alphabet: FxHashMap<char, u32>,
    start_index: usize,
}

impl PatternChunk {
    fn new(chars: &[char], start_index: usize) -> Self {
        let len = chars.len();
        let mut alphabet = FxHashMap::default();
        for (i, c) in chars.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0u32) |= 1 << (len - i - 1);
        }
        Self {
            chars: chars.to_vec(),
            alphabet,
            start_index,
        }
    }

    fn char_mask(&self, c: char) -> u32 {
        self.alphabet.get(&c).copied().unwrap_or(0)
    }
}

/// A query normalized and split into bit-parallel chunks.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    chars: Vec<char>,
    chunks: Vec<PatternChunk>,
}

impl CompiledPattern {
    /// `query` must be non-empty after trimming; the resolver guarantees it.
    pub fn compile(query: &str, cfg: &MatchConfig) -> Self {
        let chars = normalize(query, cfg);
        let len = chars.len();
        let mut chunks = Vec::new();

        if len > MAX_PATTERN_BITS {
            let remainder = len % MAX_PATTERN_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(PatternChunk::new(&chars[i..i + MAX_PATTERN_BITS], i));
                i += MAX_PATTERN_BITS;
            }
            // The tail chunk overlaps its neighbour so it is always full width.
            if remainder > 0 {
                let start = len - MAX_PATTERN_BITS;
                chunks.push(PatternChunk::new(&chars[start..], start));
            }
        } else {
            chunks.push(PatternChunk::new(&chars, 0));
        }

        Self { chars, chunks }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Score a normalized description.
    pub fn score(&self, text: &[char], cfg: &MatchConfig) -> FieldMatch {
        if self.chars.as_slice() == text {
            return FieldMatch {
                is_match: true,
                score: 0.0,
                spans: vec![MatchSpan {
                    start: 0,
                    end: text.len().saturating_sub(1),
                }],
            };
        }

        let mut total = 0.0;
        let mut any_match = false;
        let mut spans = Vec::new();
        for chunk in &self.chunks {
            let location = cfg.location.saturating_add(chunk.start_index);
            let found = search_chunk(text, chunk, location, cfg);
            any_match |= found.is_match;
            total += found.score;
            if cfg.include_matches {
                spans.extend(found.spans);
            }
        }

        FieldMatch {
            is_match: any_match,
            score: if any_match {
                total / self.chunks.len() as f64
            } else {
                1.0
            },
            spans,
        }
    }
}

/// Lowercases (unless case-sensitive) and splits into characters.
pub(crate) fn normalize(text: &str, cfg: &MatchConfig) -> Vec<char> {
    if cfg.is_case_sensitive {
        text.chars().collect()
    } else {
        text.to_lowercase().chars().collect()
    }
}

fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    cfg: &MatchConfig,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    if cfg.ignore_location {
        return accuracy;
    }
    let proximity = current_location.abs_diff(expected_location);
    if cfg.distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }
    accuracy + proximity as f64 / cfg.distance as f64
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if from > text.len() || pattern.len() > text.len() - from {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|offset| offset + from)
}

fn search_chunk(text: &[char], chunk: &PatternChunk, location: usize, cfg: &MatchConfig) -> FieldMatch {
    let pattern = &chunk.chars;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let expected_location = location.min(text_len);
    let compute_matches = cfg.min_match_char_length > 1 || cfg.include_matches;

    let mut current_threshold = cfg.threshold;
    let mut match_mask = vec![false; if compute_matches { text_len } else { 0 }];

    // Exact occurrences tighten the threshold before the error-level scan.
    let mut from = expected_location;
    while let Some(index) = find_from(text, pattern, from) {
        let score = compute_score(pattern_len, 0, index, expected_location, cfg);
        current_threshold = current_threshold.min(score);
        from = index + pattern_len;
        if compute_matches {
            match_mask[index..index + pattern_len].fill(true);
        }
    }

    let mut best: Option<(usize, f64)> = None;
    let mut last_bits: Vec<u32> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let full_match = 1u32 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window around the expected location still able to clear the
        // threshold at this error level.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(
                pattern_len,
                errors,
                expected_location + bin_mid,
                expected_location,
                cfg,
            );
            if score <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected_location + 1).saturating_sub(bin_mid).max(1);
        let finish = if cfg.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        let mut bits = vec![0u32; finish + 2];
        bits[finish + 1] = (1u32 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = text
                .get(current_location)
                .map(|c| chunk.char_mask(*c))
                .unwrap_or(0);
            if compute_matches && current_location < text_len {
                match_mask[current_location] = char_match != 0;
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev = |k: usize| last_bits.get(k).copied().unwrap_or(0);
                bits[j] |= ((prev(j + 1) | prev(j)) << 1) | 1 | prev(j + 1);
            }

            if bits[j] & full_match != 0 {
                let score =
                    compute_score(pattern_len, errors, current_location, expected_location, cfg);
                if score <= current_threshold {
                    current_threshold = score;
                    best = Some((current_location, score));
                    if current_location <= expected_location {
                        break;
                    }
                    // Past the expected location; don't scan further than the
                    // mirror image of this match.
                    start = (2 * expected_location).saturating_sub(current_location).max(1);
                }
            }
            j -= 1;
        }

        let next_level = compute_score(
            pattern_len,
            errors + 1,
            expected_location,
            expected_location,
            cfg,
        );
        if next_level > current_threshold {
            break;
        }
        last_bits = bits;
    }

    let mut result = match best {
        Some((_, score)) => FieldMatch {
            is_match: true,
            score: score.max(MIN_PARTIAL_SCORE),
            spans: Vec::new(),
        },
        None => FieldMatch {
            is_match: false,
            score: 1.0,
            spans: Vec::new(),
        },
    };

    if compute_matches {
        let spans = mask_to_spans(&match_mask, cfg.min_match_char_length);
        if spans.is_empty() {
            result.is_match = false;
        } else if cfg.include_matches {
            result.spans = spans;
        }
    }
    result
}

/// Runs of matched characters at least `min_len` long.
fn mask_to_spans(mask: &[bool], min_len: usize) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                if i - start >= min_len {
                    spans.push(MatchSpan { start, end: i - 1 });
                }
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        if mask.len() - start >= min_len {
            spans.push(MatchSpan {
                start,
                end: mask.len() - 1,
            });
        }
    }
    spans
}
