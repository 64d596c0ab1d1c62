//! Corpus comparator: finds queries competitors rank content for that the
//! own site never mentions, and turns each into an unscored opportunity.

use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{
    BusinessContext, GapType, KeywordGapOpportunity, PriorityTier, SearchQuery,
};

/// How many carrying competitors to surface per opportunity.
const TOP_COMPETITORS: usize = 3;

/// Identify coverage gaps.
///
/// Every distinct competitor `query_text` (case-folded) absent from the own
/// set becomes one opportunity. The canonical `SearchQuery` is the
/// competitor instance with the highest frequency; on ties the first
/// instance encountered wins, and competitor iteration follows the map's
/// URL order, so the pick is deterministic. Queries containing an excluded
/// keyword from the business context never become gaps.
///
/// Visibility: `competitor_visibility` is the share of competitors carrying
/// the query over all competitors in the map, including competitors whose
/// extraction came back empty (e.g. failed fetches). `own_visibility` is
/// 0.0 by construction.
///
/// Output order is unspecified; callers sort by opportunity score after
/// scoring.
pub fn find_gaps(
    own_queries: &[SearchQuery],
    competitor_queries: &BTreeMap<String, Vec<SearchQuery>>,
    context: Option<&BusinessContext>,
) -> Vec<KeywordGapOpportunity> {
    let own_set: HashSet<String> = own_queries
        .iter()
        .map(|q| q.query_text.to_lowercase())
        .collect();

    let excluded: Vec<String> = context
        .map(|c| {
            c.excluded_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default();

    // Every observation of each competitor query text, in map order.
    let mut order: Vec<String> = Vec::new();
    let mut observations: HashMap<String, Vec<(&str, &SearchQuery)>> = HashMap::new();
    for (url, queries) in competitor_queries {
        for query in queries {
            let key = query.query_text.to_lowercase();
            let entry = observations.entry(key.clone()).or_default();
            if entry.is_empty() {
                order.push(key);
            }
            entry.push((url.as_str(), query));
        }
    }

    let total_competitors = competitor_queries.len();
    let mut gaps = Vec::new();

    for key in order {
        if own_set.contains(&key) {
            continue;
        }
        if excluded.iter().any(|ex| key.contains(ex)) {
            continue;
        }

        let instances = &observations[&key];

        // Highest frequency wins; first encountered wins ties.
        let mut best = instances[0].1;
        for &(_, candidate) in instances.iter().skip(1) {
            if candidate.frequency > best.frequency {
                best = candidate;
            }
        }

        let mut carriers: Vec<String> = Vec::new();
        for &(url, _) in instances {
            if !carriers.iter().any(|c| c.as_str() == url) {
                carriers.push(url.to_string());
            }
        }

        let competitor_visibility = if total_competitors > 0 {
            carriers.len() as f32 / total_competitors as f32
        } else {
            0.0
        };

        let mut query = best.clone();
        query.found_on_competitors = carriers.clone();

        gaps.push(KeywordGapOpportunity {
            query,
            gap_type: GapType::Missing,
            own_visibility: 0.0,
            competitor_visibility,
            visibility_gap: competitor_visibility,
            volume_score: 0.0,
            relevance_score: 0.0,
            difficulty_score: 0.0,
            intent_match_score: 0.0,
            competition_score: 0.0,
            opportunity_score: 0.0,
            priority_tier: PriorityTier::Medium,
            priority_reasoning: String::new(),
            effort_estimate_hours: 0.0,
            estimated_monthly_traffic: 0,
            recommended_actions: Vec::new(),
            top_competitor_urls: carriers.into_iter().take(TOP_COMPETITORS).collect(),
            analyzed_at: Utc::now(),
        });
    }

    gaps
}
