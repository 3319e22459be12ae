use chrono::NaiveDate;

use super::is_strong_review;
use crate::submission::Submission;

/// ACMG guidelines were published Nov 2015; assume they shaped
/// classifications from 2016 onwards
pub fn acmg_threshold() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Keep only submissions evaluated on or after the ACMG threshold, plus any
/// expert panel or practice guideline submission regardless of date. If
/// nothing passes, all submissions are kept
pub fn acmg_filter(subs: &[Submission]) -> Vec<&Submission> {
    let threshold = acmg_threshold();
    let recent: Vec<_> = subs
        .iter()
        .filter(|s| s.date() >= threshold || is_strong_review(s.review_status()))
        .collect();
    if recent.is_empty() {
        subs.iter().collect()
    } else {
        recent
    }
}
