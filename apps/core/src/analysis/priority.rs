//! Priority tier classification.
//!
//! One-shot decision tree over the scored opportunity. Conditions overlap,
//! so evaluation order matters: first match wins and no tier ever changes
//! after assignment.

use crate::models::{KeywordGapOpportunity, PriorityTier};

/// Assign the priority tier and its reasoning to a scored opportunity.
pub fn assign_priority(opp: &mut KeywordGapOpportunity) {
    let score = opp.opportunity_score;
    let relevance = opp.relevance_score;
    let difficulty = opp.difficulty_score;

    let (tier, reasoning) = if relevance >= 70.0 && difficulty >= 80.0 && score >= 70.0 {
        (
            PriorityTier::QuickWin,
            "High relevance, easy to rank, good opportunity",
        )
    } else if score >= 75.0 && relevance >= 60.0 {
        (
            PriorityTier::HighPriority,
            "High overall value and relevance",
        )
    } else if difficulty < 50.0 && relevance >= 70.0 {
        (
            PriorityTier::LongTerm,
            "High value but requires significant effort",
        )
    } else {
        (PriorityTier::Medium, "Moderate opportunity")
    };

    opp.priority_tier = tier;
    opp.priority_reasoning = reasoning.to_string();
}
