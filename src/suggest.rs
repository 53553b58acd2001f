//! "Did you mean" suggestions for mistyped labels and keys.

/// Minimum normalized similarity for a candidate to be suggested.
const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Find the candidate closest to `input`, if any is close enough.
pub(crate) fn closest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (*candidate, strsim::jaro_winkler(input, candidate)))
        .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}
