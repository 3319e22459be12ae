use super::is_strong_review;
use crate::submission::{Classification, Submission};

/// The larger of pathogenic/benign must reach this fraction of all submissions
pub const MAJORITY_RATIO: f64 = 0.6;

/// ...and the smaller must not exceed this fraction
pub const MINORITY_RATIO: f64 = 0.2;

/// Classification tallies for one variant. `total` counts every
/// submission seen, whatever its classification
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionCounts {
    pub pathogenic: usize,
    pub benign: usize,
    pub uncertain: usize,
    pub unknown: usize,
    pub total: usize,
}

impl SubmissionCounts {
    pub fn add(&mut self, cls: Classification) {
        self.total += 1;
        match cls {
            Classification::Pathogenic => self.pathogenic += 1,
            Classification::Benign => self.benign += 1,
            Classification::Uncertain => self.uncertain += 1,
            Classification::Unknown => self.unknown += 1,
            Classification::Conflicting => {}
        }
    }

    fn frac(&self, r: f64) -> f64 {
        self.total as f64 * r
    }

    /// Decide from the tallies alone
    pub fn decide(&self) -> Classification {
        if self.pathogenic > 0 && self.benign > 0 {
            let hi = self.pathogenic.max(self.benign) as f64;
            let lo = self.pathogenic.min(self.benign) as f64;
            if hi >= self.frac(MAJORITY_RATIO) && lo <= self.frac(MINORITY_RATIO) {
                if self.benign > self.pathogenic {
                    Classification::Benign
                } else {
                    Classification::Pathogenic
                }
            } else {
                Classification::Conflicting
            }
        } else if self.unknown as f64 > self.frac(MAJORITY_RATIO) {
            Classification::Unknown
        } else if self.uncertain as f64 > self.frac(MAJORITY_RATIO) {
            Classification::Uncertain
        } else if self.pathogenic > 0 {
            Classification::Pathogenic
        } else if self.benign > 0 {
            Classification::Benign
        } else {
            Classification::Uncertain
        }
    }
}

/// Overall classification from a list of submissions
///
/// The first practice guideline or expert panel submission, in input
/// order, decides outright. Otherwise the classifications are counted:
/// pathogenic and benign together give a call only when one holds at least
/// 60% and the other at most 20% of submissions, else Conflicting. Without
/// both, more than 60% unknown or uncertain gives that call, then any
/// pathogenic, then any benign. Anything left, including an empty list,
/// is Uncertain
pub fn consensus<'a, I>(subs: I) -> Classification
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut counts = SubmissionCounts::default();
    for sub in subs {
        if is_strong_review(sub.review_status()) {
            return sub.classification();
        }
        counts.add(sub.classification());
    }
    trace!("{:?}", counts);
    counts.decide()
}
