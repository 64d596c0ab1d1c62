//! Five-factor opportunity scoring.
//!
//! Each gap gets component scores for volume, business relevance, ranking
//! difficulty, intent fit and competitor coverage, combined into one
//! weighted composite. Absent business context degrades to neutral
//! defaults; this stage never fails.

use crate::models::{
    BusinessContext, GapType, KeywordGapOpportunity, KeywordSource, SearchIntent,
};

// Fixed component weights of the composite score.
const VOLUME_WEIGHT: f32 = 0.25;
const RELEVANCE_WEIGHT: f32 = 0.30;
const DIFFICULTY_WEIGHT: f32 = 0.20;
const INTENT_WEIGHT: f32 = 0.15;
const COMPETITION_WEIGHT: f32 = 0.10;

/// Neutral prior when no business context is available.
const DEFAULT_RELEVANCE: f32 = 50.0;

/// Estimated monthly visits per observed mention.
const TRAFFIC_PER_MENTION: u64 = 50;

/// Scores gap opportunities against an optional business context.
pub struct OpportunityScorer;

impl Default for OpportunityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl OpportunityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Fill the five component scores, the composite, and the derived
    /// traffic/effort/action fields of one opportunity.
    pub fn score(&self, opp: &mut KeywordGapOpportunity, context: Option<&BusinessContext>) {
        // Volume: raw repetition and cross-competitor consensus, each capped
        // so one extreme value cannot dominate.
        let frequency_score = (opp.query.frequency as f32 / 10.0).min(1.0);
        let presence_score = (opp.query.found_on_competitors.len() as f32 / 5.0).min(1.0);
        opp.volume_score = (frequency_score + presence_score) / 2.0 * 100.0;

        opp.relevance_score = match context {
            Some(ctx) => relevance_score(&opp.query.query_text, ctx),
            None => DEFAULT_RELEVANCE,
        };

        opp.difficulty_score = opp.query.difficulty.inverse_score();
        opp.intent_match_score = intent_match_score(opp.query.search_intent);
        opp.competition_score = (opp.visibility_gap * 100.0).clamp(0.0, 100.0);

        opp.opportunity_score = opp.volume_score * VOLUME_WEIGHT
            + opp.relevance_score * RELEVANCE_WEIGHT
            + opp.difficulty_score * DIFFICULTY_WEIGHT
            + opp.intent_match_score * INTENT_WEIGHT
            + opp.competition_score * COMPETITION_WEIGHT;

        opp.estimated_monthly_traffic = opp.query.frequency as u64
            * opp.query.found_on_competitors.len() as u64
            * TRAFFIC_PER_MENTION;
        opp.effort_estimate_hours = opp.query.difficulty.effort_hours();
        opp.recommended_actions = recommended_actions(opp);
    }
}

/// Business relevance of a query text, 0-100. Fixed point awards per match
/// category, first match only for services/products/locations.
fn relevance_score(query_text: &str, context: &BusinessContext) -> f32 {
    let text = query_text.to_lowercase();
    let mut score: f32 = 0.0;

    if context
        .services
        .iter()
        .any(|s| !s.is_empty() && text.contains(&s.to_lowercase()))
    {
        score += 30.0;
    }

    if context
        .products
        .iter()
        .any(|p| !p.is_empty() && text.contains(&p.to_lowercase()))
    {
        score += 25.0;
    }

    let niche_matches = context
        .niche
        .to_lowercase()
        .split_whitespace()
        .filter(|word| text.contains(*word))
        .count() as f32;
    score += (niche_matches * 10.0).min(30.0);

    if context
        .target_locations
        .iter()
        .any(|l| !l.is_empty() && text.contains(&l.to_lowercase()))
    {
        score += 15.0;
    }

    score.min(100.0)
}

/// Fit of a search intent with a service-oriented business funnel.
fn intent_match_score(intent: SearchIntent) -> f32 {
    match intent {
        SearchIntent::Transactional | SearchIntent::Local => 90.0,
        SearchIntent::Comparison => 80.0,
        SearchIntent::Informational => 70.0,
        SearchIntent::Navigational => 60.0,
    }
}

/// Actionable next steps for one opportunity.
fn recommended_actions(opp: &KeywordGapOpportunity) -> Vec<String> {
    let mut actions = Vec::new();
    let query = &opp.query;

    if opp.gap_type == GapType::Missing {
        actions.push(format!(
            "Create {} page targeting '{}'",
            query.recommended_content_type.label(),
            query.query_text
        ));
    }

    if !query.serp_features.is_empty() {
        let features: Vec<&str> = query
            .serp_features
            .iter()
            .take(2)
            .map(|f| f.label())
            .collect();
        actions.push(format!(
            "Implement {} for better visibility",
            features.join(", ")
        ));
    }

    match query.search_intent {
        SearchIntent::Local => {
            actions.push("Add local SEO elements (NAP, maps, reviews)".to_string())
        }
        SearchIntent::Transactional => {
            actions.push("Add clear CTAs and conversion elements".to_string())
        }
        _ => {}
    }

    if matches!(query.source, KeywordSource::Title | KeywordSource::H1) {
        actions.push("Use keyword in page title and H1".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, KeywordDifficulty, PriorityTier, SearchQuery};
    use chrono::Utc;

    fn query(text: &str, frequency: u32, competitors: usize) -> SearchQuery {
        SearchQuery {
            query_text: text.to_string(),
            source: KeywordSource::Title,
            frequency,
            ngram_size: text.split_whitespace().count(),
            is_long_tail: text.split_whitespace().count() >= 3,
            search_intent: SearchIntent::Transactional,
            intent_confidence: 0.8,
            difficulty: KeywordDifficulty::Easy,
            tf_score: 0.0,
            idf_score: 0.0,
            tfidf_score: 0.0,
            serp_features: Vec::new(),
            recommended_content_type: ContentKind::Service,
            context_snippet: String::new(),
            found_on_competitors: (0..competitors)
                .map(|i| format!("https://c{}.example.com/", i))
                .collect(),
            discovered_at: Utc::now(),
        }
    }

    fn opportunity(q: SearchQuery, visibility: f32) -> KeywordGapOpportunity {
        KeywordGapOpportunity {
            query: q,
            gap_type: GapType::Missing,
            own_visibility: 0.0,
            competitor_visibility: visibility,
            visibility_gap: visibility,
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
            top_competitor_urls: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_volume_score_caps_each_half() {
        let scorer = OpportunityScorer::new();

        let mut opp = opportunity(query("laser", 20, 10), 1.0);
        scorer.score(&mut opp, None);
        // Both halves capped at 1.0.
        assert!((opp.volume_score - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_documented_volume_scenario() {
        // frequency 4, one competitor: avg(0.4, 0.2) * 100 = 30.0
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser hair removal price", 4, 1), 1.0);
        scorer.score(&mut opp, None);
        assert!((opp.volume_score - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_neutral_relevance_without_context() {
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser", 2, 1), 1.0);
        scorer.score(&mut opp, None);
        assert!((opp.relevance_score - DEFAULT_RELEVANCE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_service_match_awards_base_relevance() {
        let context = BusinessContext {
            services: vec!["laser hair removal".to_string()],
            ..Default::default()
        };
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser hair removal price", 4, 1), 1.0);
        scorer.score(&mut opp, Some(&context));
        assert!(opp.relevance_score >= 30.0);
    }

    #[test]
    fn test_relevance_stacks_and_clamps() {
        let context = BusinessContext {
            niche: "laser hair removal".to_string(),
            services: vec!["laser hair removal".to_string()],
            products: vec!["laser".to_string()],
            target_locations: vec!["tehran".to_string()],
            ..Default::default()
        };
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser hair removal price tehran", 4, 1), 1.0);
        scorer.score(&mut opp, Some(&context));
        // 30 (service) + 25 (product) + 30 (niche cap) + 15 (location) = 100
        assert!((opp.relevance_score - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_composite_within_bounds() {
        let scorer = OpportunityScorer::new();
        for (freq, carriers, vis) in [(1, 1, 0.2), (4, 1, 1.0), (50, 9, 1.0)] {
            let mut opp = opportunity(query("laser", freq, carriers), vis);
            scorer.score(&mut opp, None);
            for s in [
                opp.volume_score,
                opp.relevance_score,
                opp.difficulty_score,
                opp.intent_match_score,
                opp.competition_score,
                opp.opportunity_score,
            ] {
                assert!((0.0..=100.0).contains(&s), "score {} out of bounds", s);
            }
        }
    }

    #[test]
    fn test_traffic_estimate() {
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser", 4, 2), 1.0);
        scorer.score(&mut opp, None);
        assert_eq!(opp.estimated_monthly_traffic, 4 * 2 * TRAFFIC_PER_MENTION);
    }

    #[test]
    fn test_intent_match_lookup() {
        assert_eq!(intent_match_score(SearchIntent::Transactional), 90.0);
        assert_eq!(intent_match_score(SearchIntent::Local), 90.0);
        assert_eq!(intent_match_score(SearchIntent::Comparison), 80.0);
        assert_eq!(intent_match_score(SearchIntent::Informational), 70.0);
        assert_eq!(intent_match_score(SearchIntent::Navigational), 60.0);
    }

    #[test]
    fn test_actions_for_missing_transactional_title_query() {
        let scorer = OpportunityScorer::new();
        let mut opp = opportunity(query("laser price", 4, 1), 1.0);
        scorer.score(&mut opp, None);
        assert!(opp.recommended_actions.iter().any(|a| a.contains("Create")));
        assert!(opp
            .recommended_actions
            .iter()
            .any(|a| a.contains("CTAs")));
        assert!(opp
            .recommended_actions
            .iter()
            .any(|a| a.contains("title and H1")));
    }
}
