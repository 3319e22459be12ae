use std::collections::HashMap;

use crate::submission::{Classification, Submission, SubmissionMap};

mod consensus;
mod stars;
mod temporal;

pub use consensus::{consensus, SubmissionCounts};
pub use stars::gold_stars;
pub use temporal::acmg_filter;

pub const PRACTICE_GUIDELINE: &str = "practice guideline";
pub const EXPERT_PANEL: &str = "reviewed by expert panel";

/// Review statuses that override counting and date filtering
pub const STRONG_REVIEWS: [&str; 2] = [PRACTICE_GUIDELINE, EXPERT_PANEL];

/// Review statuses that earn no star
pub const NO_STAR_RATINGS: [&str; 1] = ["no assertion criteria provided"];

pub fn is_strong_review(status: &str) -> bool {
    STRONG_REVIEWS.contains(&status)
}

/// Outcome for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arbitration {
    pub classification: Classification,
    pub stars: u8,
}

/// Date filter, then consensus and star rating on the surviving submissions
pub fn arbitrate(subs: &[Submission]) -> Arbitration {
    let filtered = acmg_filter(subs);
    Arbitration {
        classification: consensus(filtered.iter().copied()),
        stars: gold_stars(filtered.iter().copied()),
    }
}

/// Arbitrate every variant with submissions
pub fn arbitrate_all(subs: &SubmissionMap) -> HashMap<u64, Arbitration> {
    let res: HashMap<_, _> = subs
        .iter()
        .map(|(id, v)| (*id, arbitrate(v)))
        .collect();
    if log_enabled!(log::Level::Debug) {
        let mut cts: HashMap<Classification, usize> = HashMap::new();
        for a in res.values() {
            *cts.entry(a.classification).or_default() += 1
        }
        for c in [
            Classification::Pathogenic,
            Classification::Benign,
            Classification::Conflicting,
            Classification::Uncertain,
            Classification::Unknown,
        ] {
            debug!("  {}: {}", c, cts.get(&c).copied().unwrap_or(0));
        }
    }
    res
}
