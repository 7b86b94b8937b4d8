use crate::models::score::{Category, CriteriaFlags, Weights};

pub const HIGHLY_ELIGIBLE_MIN: u32 = 60;
pub const ELIGIBLE_MIN: u32 = 30;

/// Sums the weights of the satisfied criteria and buckets the total.
pub fn classify(flags: &CriteriaFlags, weights: &Weights) -> (u32, Category) {
    let score = [
        (flags.location, weights.location),
        (flags.education, weights.education),
        (flags.major, weights.major),
        (flags.company, weights.company),
        (flags.experience, weights.experience),
    ]
    .into_iter()
    .filter(|(hit, _)| *hit)
    .map(|(_, points)| points)
    .sum();

    (score, category_for(score))
}

pub fn category_for(score: u32) -> Category {
    if score >= HIGHLY_ELIGIBLE_MIN {
        Category::HighlyEligible
    } else if score >= ELIGIBLE_MIN {
        Category::Eligible
    } else {
        Category::Rejected
    }
}
