use super::{EXPERT_PANEL, NO_STAR_RATINGS, PRACTICE_GUIDELINE};
use crate::submission::Submission;

/// Gold star rating, a reduced form of ClinVar's review status stars
///
/// Uncertain and unknown submissions are ignored. Of the rest, the best
/// review status counts: practice guideline 4, expert panel 3, anything
/// with assertion criteria 1, otherwise 0
pub fn gold_stars<'a, I>(subs: I) -> u8
where
    I: IntoIterator<Item = &'a Submission>,
{
    subs.into_iter()
        .filter(|s| s.classification().is_informative())
        .map(|s| match s.review_status() {
            PRACTICE_GUIDELINE => 4,
            EXPERT_PANEL => 3,
            r if NO_STAR_RATINGS.contains(&r) => 0,
            _ => 1,
        })
        .max()
        .unwrap_or(0)
}
