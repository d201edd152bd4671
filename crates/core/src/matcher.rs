//! Fuzzy title matching for listing resolution.
//!
//! Scores candidate titles against a target with a matching-blocks ratio and
//! picks the best one above a configurable threshold. No network, no state -
//! a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the title matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum similarity ratio (0.0-1.0) for a candidate to be eligible.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// What to do when no candidate clears the threshold.
    #[serde(default)]
    pub fallback: MatchFallback,
}

fn default_threshold() -> f64 {
    0.6
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            fallback: MatchFallback::default(),
        }
    }
}

/// Policy for when no candidate scores at or above the threshold.
///
/// Which behavior is wanted depends on the catalog: strict matching avoids
/// pricing the wrong listing, the permissive variant always produces some
/// listing as long as the category filter left anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFallback {
    /// A below-threshold best candidate is no match.
    #[default]
    None,
    /// Fall back to the first candidate in input order.
    First,
}

/// Best-match selection over candidate titles.
///
/// Titles are normalized (case-insensitive, whitespace-collapsed) before
/// scoring. The highest-scoring candidate at or above the threshold wins;
/// ties break to the earliest candidate in input order.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    threshold: f64,
}

impl TitleMatcher {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }

    /// Index of the best candidate, or `None` when nothing clears the
    /// threshold. Deterministic for a given target and candidate order.
    pub fn best_match(&self, target: &str, candidates: &[&str]) -> Option<usize> {
        let target = normalize(target);
        let mut best: Option<(usize, f64)> = None;

        for (idx, candidate) in candidates.iter().enumerate() {
            let score = similarity(&target, &normalize(candidate));
            if score < self.threshold {
                continue;
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }

        best.map(|(idx, _)| idx)
    }
}

/// Lowercase and collapse whitespace runs to single spaces.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity ratio of two strings: `2*M / (len(a) + len(b))`, where `M` is
/// the total length of the longest matching blocks found by recursively
/// splitting around the longest common substring. 1.0 for identical inputs
/// (including two empty strings), 0.0 when nothing matches.
///
/// Inputs are compared as-is; callers wanting case/whitespace insensitivity
/// normalize first.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let matched = matched_chars(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut regions = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            regions.push((alo, i, blo, j));
            regions.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`, returned
/// as `(start_a, start_b, length)`. Among equally long blocks the earliest
/// in `a` wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // Length of the match ending at (i, j), keyed by j for the previous i.
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut new_runs: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let len = if j == blo {
                1
            } else {
                run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
            };
            new_runs.insert(j, len);
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        run_lengths = new_runs;
    }

    best
}
