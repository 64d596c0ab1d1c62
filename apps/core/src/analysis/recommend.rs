//! Strategic recommendations and the content calendar.
//!
//! Groups scored opportunities by priority tier and intent, emits the
//! strategy blocks the report surfaces, and schedules the top opportunities
//! three per week.

use crate::models::{
    CalendarEntry, KeywordGapOpportunity, PriorityTier, SearchIntent, StrategicRecommendation,
};

/// Keywords listed per strategy block.
const KEYWORDS_PER_BLOCK: usize = 10;
/// Calendar length: top 20 opportunities, three per week.
const CALENDAR_SIZE: usize = 20;
const ITEMS_PER_WEEK: usize = 3;

/// Opportunities grouped by tier and by intent. Entries are clones of the
/// scored opportunities; grouping never mutates them.
#[derive(Debug, Clone, Default)]
pub struct CategorizedOpportunities {
    pub quick_wins: Vec<KeywordGapOpportunity>,
    pub high_priority: Vec<KeywordGapOpportunity>,
    pub medium: Vec<KeywordGapOpportunity>,
    pub long_term: Vec<KeywordGapOpportunity>,
    pub informational: Vec<KeywordGapOpportunity>,
    pub transactional: Vec<KeywordGapOpportunity>,
    pub local: Vec<KeywordGapOpportunity>,
    pub comparison: Vec<KeywordGapOpportunity>,
    pub navigational: Vec<KeywordGapOpportunity>,
}

/// Bucket opportunities by priority tier and search intent.
pub fn categorize(opportunities: &[KeywordGapOpportunity]) -> CategorizedOpportunities {
    let mut out = CategorizedOpportunities::default();

    for opp in opportunities {
        match opp.priority_tier {
            PriorityTier::QuickWin => out.quick_wins.push(opp.clone()),
            PriorityTier::HighPriority => out.high_priority.push(opp.clone()),
            PriorityTier::Medium => out.medium.push(opp.clone()),
            PriorityTier::LongTerm => out.long_term.push(opp.clone()),
        }
        match opp.query.search_intent {
            SearchIntent::Informational => out.informational.push(opp.clone()),
            SearchIntent::Transactional => out.transactional.push(opp.clone()),
            SearchIntent::Local => out.local.push(opp.clone()),
            SearchIntent::Comparison => out.comparison.push(opp.clone()),
            SearchIntent::Navigational => out.navigational.push(opp.clone()),
        }
    }

    out
}

fn keyword_list(opportunities: &[KeywordGapOpportunity]) -> Vec<String> {
    opportunities
        .iter()
        .take(KEYWORDS_PER_BLOCK)
        .map(|opp| opp.query.query_text.clone())
        .collect()
}

/// Up to three strategy blocks, each conditioned on its group being
/// non-empty: quick wins first, then top-of-funnel informational coverage,
/// then transactional capture.
pub fn strategic_recommendations(
    categorized: &CategorizedOpportunities,
) -> Vec<StrategicRecommendation> {
    let mut recommendations = Vec::new();

    if !categorized.quick_wins.is_empty() {
        recommendations.push(StrategicRecommendation {
            title: "Focus on Quick Wins First".to_string(),
            priority: "high".to_string(),
            description: format!(
                "You have {} quick win opportunities with high relevance and low difficulty.",
                categorized.quick_wins.len()
            ),
            action: "Start creating content for these keywords within the next 2-4 weeks"
                .to_string(),
            keywords: keyword_list(&categorized.quick_wins),
        });
    }

    if !categorized.informational.is_empty() {
        recommendations.push(StrategicRecommendation {
            title: "Build Top-of-Funnel Content".to_string(),
            priority: "medium".to_string(),
            description: format!(
                "Found {} informational keywords for awareness stage.",
                categorized.informational.len()
            ),
            action: "Create comprehensive guides and how-to content".to_string(),
            keywords: keyword_list(&categorized.informational),
        });
    }

    if !categorized.transactional.is_empty() {
        recommendations.push(StrategicRecommendation {
            title: "Capture Transactional Intent".to_string(),
            priority: "high".to_string(),
            description: format!(
                "{} transactional keywords found - direct revenue potential.",
                categorized.transactional.len()
            ),
            action: "Create service/product pages with strong CTAs".to_string(),
            keywords: keyword_list(&categorized.transactional),
        });
    }

    recommendations
}

/// Content calendar over the top opportunities. Input must already be
/// sorted by opportunity score descending; entries land three per week with
/// no capacity-based scheduling.
pub fn content_calendar(opportunities: &[KeywordGapOpportunity]) -> Vec<CalendarEntry> {
    opportunities
        .iter()
        .take(CALENDAR_SIZE)
        .enumerate()
        .map(|(index, opp)| CalendarEntry {
            week: (index / ITEMS_PER_WEEK) as u32 + 1,
            keyword: opp.query.query_text.clone(),
            content_type: opp.query.recommended_content_type,
            priority: opp.priority_tier,
            effort_hours: opp.effort_estimate_hours,
            estimated_traffic: opp.estimated_monthly_traffic,
            actions: opp.recommended_actions.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContentKind, GapType, KeywordDifficulty, KeywordSource, SearchQuery,
    };
    use chrono::Utc;

    fn opportunity(text: &str, tier: PriorityTier, intent: SearchIntent, score: f32) -> KeywordGapOpportunity {
        KeywordGapOpportunity {
            query: SearchQuery {
                query_text: text.to_string(),
                source: KeywordSource::Title,
                frequency: 1,
                ngram_size: 1,
                is_long_tail: false,
                search_intent: intent,
                intent_confidence: 0.5,
                difficulty: KeywordDifficulty::Easy,
                tf_score: 0.0,
                idf_score: 0.0,
                tfidf_score: 0.0,
                serp_features: Vec::new(),
                recommended_content_type: ContentKind::Article,
                context_snippet: String::new(),
                found_on_competitors: vec!["https://a.example.com/".to_string()],
                discovered_at: Utc::now(),
            },
            gap_type: GapType::Missing,
            own_visibility: 0.0,
            competitor_visibility: 1.0,
            visibility_gap: 1.0,
            volume_score: 0.0,
            relevance_score: 0.0,
            difficulty_score: 0.0,
            intent_match_score: 0.0,
            competition_score: 0.0,
            opportunity_score: score,
            priority_tier: tier,
            priority_reasoning: String::new(),
            effort_estimate_hours: 2.0,
            estimated_monthly_traffic: 50,
            recommended_actions: vec!["Create article".to_string()],
            top_competitor_urls: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_categorize_covers_both_axes() {
        let opps = vec![
            opportunity("a", PriorityTier::QuickWin, SearchIntent::Transactional, 90.0),
            opportunity("b", PriorityTier::Medium, SearchIntent::Informational, 50.0),
            opportunity("c", PriorityTier::LongTerm, SearchIntent::Local, 60.0),
        ];
        let cat = categorize(&opps);

        assert_eq!(cat.quick_wins.len(), 1);
        assert_eq!(cat.medium.len(), 1);
        assert_eq!(cat.long_term.len(), 1);
        assert_eq!(cat.high_priority.len(), 0);
        assert_eq!(cat.transactional.len(), 1);
        assert_eq!(cat.informational.len(), 1);
        assert_eq!(cat.local.len(), 1);
    }

    #[test]
    fn test_blocks_require_non_empty_groups() {
        let cat = categorize(&[]);
        assert!(strategic_recommendations(&cat).is_empty());

        let opps = vec![opportunity(
            "laser price",
            PriorityTier::QuickWin,
            SearchIntent::Transactional,
            90.0,
        )];
        let recs = strategic_recommendations(&categorize(&opps));
        // Quick-wins block plus transactional block, no informational block.
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Focus on Quick Wins First");
        assert_eq!(recs[1].title, "Capture Transactional Intent");
    }

    #[test]
    fn test_block_keywords_capped_at_ten() {
        let opps: Vec<_> = (0..15)
            .map(|i| {
                opportunity(
                    &format!("keyword {}", i),
                    PriorityTier::QuickWin,
                    SearchIntent::Informational,
                    80.0,
                )
            })
            .collect();
        let recs = strategic_recommendations(&categorize(&opps));
        assert!(recs.iter().all(|r| r.keywords.len() <= 10));
    }

    #[test]
    fn test_calendar_weeks_three_per_week() {
        let opps: Vec<_> = (0..25)
            .map(|i| {
                opportunity(
                    &format!("keyword {}", i),
                    PriorityTier::Medium,
                    SearchIntent::Informational,
                    100.0 - i as f32,
                )
            })
            .collect();
        let calendar = content_calendar(&opps);

        assert_eq!(calendar.len(), 20);
        assert_eq!(calendar[0].week, 1);
        assert_eq!(calendar[2].week, 1);
        assert_eq!(calendar[3].week, 2);
        assert_eq!(calendar[19].week, 7);
    }

    #[test]
    fn test_calendar_carries_opportunity_fields() {
        let opps = vec![opportunity(
            "laser",
            PriorityTier::QuickWin,
            SearchIntent::Transactional,
            90.0,
        )];
        let calendar = content_calendar(&opps);
        assert_eq!(calendar[0].keyword, "laser");
        assert_eq!(calendar[0].estimated_traffic, 50);
        assert_eq!(calendar[0].actions, vec!["Create article".to_string()]);
    }
}
