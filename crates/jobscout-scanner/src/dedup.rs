use jobscout_core::Posting;
use std::collections::HashSet;

/// Drop postings whose `url` was already seen, keeping the first occurrence.
pub fn dedup_by_url(postings: Vec<Posting>) -> Vec<Posting> {
    let mut seen = HashSet::with_capacity(postings.len());
    postings
        .into_iter()
        .filter(|posting| seen.insert(posting.url.clone()))
        .collect()
}
