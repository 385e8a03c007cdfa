//! Ranking and author deduplication. Total functions, no error paths.

use std::cmp::Reverse;
use std::collections::HashSet;

use bylinescout_common::Candidate;

/// Interpret a raw popularity signal as an integer by taking its
/// leading digit prefix; anything else counts as 0.
///
/// Known limitation, preserved deliberately: magnitude suffixes are
/// not expanded, so "1.2K" ranks as 1. Surfaces that abbreviate large
/// counts will rank those articles low.
pub fn parse_claps(raw: Option<&str>) -> u64 {
    let digits: String = raw
        .unwrap_or("")
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Sort descending by parsed claps and keep the first `top_k`.
///
/// The sort is stable: candidates with equal parsed claps retain their
/// relative extraction order, which is the only tie-break guarantee.
pub fn rank(mut candidates: Vec<Candidate>, top_k: usize) -> Vec<Candidate> {
    candidates.retain(Candidate::is_usable);
    candidates.sort_by_key(|c| Reverse(parse_claps(c.claps.as_deref())));
    candidates.truncate(top_k);
    candidates
}

/// Distinct authorship identities over the ranked slice, in first-
/// occurrence order, capped at `top_m`. Articles for a capped identity
/// are still gathered from the whole ranked slice later.
pub fn distinct_authors(ranked: &[Candidate], top_m: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut authors = Vec::new();
    for c in ranked {
        let author = c.author_or_unknown();
        if seen.insert(author.to_string()) {
            authors.push(author.to_string());
            if authors.len() == top_m {
                break;
            }
        }
    }
    authors
}

/// All ranked candidates belonging to `author`, in ranked order.
pub fn articles_for<'a>(ranked: &'a [Candidate], author: &str) -> Vec<&'a Candidate> {
    ranked
        .iter()
        .filter(|c| c.author_or_unknown() == author)
        .collect()
}
