//! Data model for the keyword gap analysis engine.
//!
//! Every record here is a plain serde value. The analysis stages build them
//! once and consume them read-only afterwards; nothing in this module holds
//! behavior beyond small lookup tables tied to an enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search intent categories assigned to every demand unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchIntent {
    Informational,
    Transactional,
    Local,
    Comparison,
    Navigational,
}

/// Provenance of an extracted query within the page surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    Title,
    Meta,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Content,
    Url,
    AltText,
    AnchorText,
}

impl KeywordSource {
    /// Source prior used as a multiplier by the weighted tf-idf statistic.
    /// Structural placements (title, top headings) outrank body text.
    pub fn weight(&self) -> f32 {
        match self {
            KeywordSource::Title => 3.0,
            KeywordSource::H1 => 2.5,
            KeywordSource::Meta | KeywordSource::H2 => 2.0,
            KeywordSource::H3 => 1.8,
            KeywordSource::H4 | KeywordSource::Url => 1.5,
            KeywordSource::H5 => 1.3,
            KeywordSource::H6 => 1.2,
            KeywordSource::Content | KeywordSource::AltText | KeywordSource::AnchorText => 1.0,
        }
    }

    /// Heading source for a given level (1-6).
    pub fn heading(level: u8) -> KeywordSource {
        match level {
            1 => KeywordSource::H1,
            2 => KeywordSource::H2,
            3 => KeywordSource::H3,
            4 => KeywordSource::H4,
            5 => KeywordSource::H5,
            _ => KeywordSource::H6,
        }
    }
}

/// Coarse ranking-difficulty estimate for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordDifficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl KeywordDifficulty {
    /// Inverse difficulty score used by the opportunity scorer
    /// (easier to rank = higher score).
    pub fn inverse_score(&self) -> f32 {
        match self {
            KeywordDifficulty::Easy => 100.0,
            KeywordDifficulty::Medium => 70.0,
            KeywordDifficulty::Hard => 40.0,
            KeywordDifficulty::VeryHard => 20.0,
        }
    }

    /// Rough content-production effort for one query, in hours.
    pub fn effort_hours(&self) -> f32 {
        match self {
            KeywordDifficulty::Easy => 2.0,
            KeywordDifficulty::Medium => 5.0,
            KeywordDifficulty::Hard => 10.0,
            KeywordDifficulty::VeryHard => 20.0,
        }
    }

    /// Numeric grade (1-4) used for the report's average-difficulty metric.
    pub fn grade(&self) -> f32 {
        match self {
            KeywordDifficulty::Easy => 1.0,
            KeywordDifficulty::Medium => 2.0,
            KeywordDifficulty::Hard => 3.0,
            KeywordDifficulty::VeryHard => 4.0,
        }
    }
}

/// Kind of page recommended to target a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    Service,
    Local,
    Faq,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Service => "service",
            ContentKind::Local => "local",
            ContentKind::Faq => "faq",
        }
    }
}

/// SERP feature a query could plausibly surface in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerpFeature {
    Faq,
    PeopleAlsoAsk,
    Howto,
    Video,
    LocalPack,
}

impl SerpFeature {
    pub fn label(&self) -> &'static str {
        match self {
            SerpFeature::Faq => "faq",
            SerpFeature::PeopleAlsoAsk => "people_also_ask",
            SerpFeature::Howto => "howto",
            SerpFeature::Video => "video",
            SerpFeature::LocalPack => "local_pack",
        }
    }
}

/// Kind of coverage gap. Only `Missing` is produced by the current rules;
/// the other two are reserved for weak/underoptimized presence detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    Missing,
    WeakPresence,
    Underoptimized,
}

/// Priority bucket for a scored opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    QuickWin,
    HighPriority,
    Medium,
    LongTerm,
}

/// A demand unit: one candidate search query extracted from a page, carrying
/// provenance, frequency and scoring metadata rather than just the string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Normalized lowercase phrase of 1-5 tokens; identity key within one corpus.
    pub query_text: String,
    /// Where on the page the phrase was first extracted from.
    pub source: KeywordSource,
    /// Occurrence count, accumulated when the same text recurs on the page.
    pub frequency: u32,
    /// Number of tokens in the phrase.
    pub ngram_size: usize,
    /// Three or more tokens.
    pub is_long_tail: bool,
    /// Assigned once during extraction, immutable afterwards.
    pub search_intent: SearchIntent,
    /// Confidence of the intent assignment, 0.0 - 1.0.
    pub intent_confidence: f32,
    pub difficulty: KeywordDifficulty,
    pub tf_score: f32,
    pub idf_score: f32,
    pub tfidf_score: f32,
    /// SERP features the query could surface in.
    pub serp_features: Vec<SerpFeature>,
    pub recommended_content_type: ContentKind,
    /// Up to ~200 chars of text surrounding the first occurrence.
    pub context_snippet: String,
    /// Competitor URLs where this exact text was observed. Empty for queries
    /// extracted from the own site.
    pub found_on_competitors: Vec<String>,
    pub discovered_at: DateTime<Utc>,
}

/// Business information supplied by the caller, read-only input to relevance
/// scoring. Absent fields degrade scoring to neutral defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessContext {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub target_locations: Vec<String>,
    #[serde(default)]
    pub brand_keywords: Vec<String>,
    /// Query texts containing any of these terms never become gaps.
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
}

/// One scored coverage gap: a query found on competitors and absent from the
/// own corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordGapOpportunity {
    pub query: SearchQuery,
    pub gap_type: GapType,
    /// 0.0 by construction: the query is absent from the own set.
    pub own_visibility: f32,
    /// Share of competitors carrying the query, 0.0 - 1.0.
    pub competitor_visibility: f32,
    pub visibility_gap: f32,
    pub volume_score: f32,
    pub relevance_score: f32,
    pub difficulty_score: f32,
    pub intent_match_score: f32,
    pub competition_score: f32,
    /// Weighted composite of the five component scores, 0 - 100.
    pub opportunity_score: f32,
    pub priority_tier: PriorityTier,
    pub priority_reasoning: String,
    pub effort_estimate_hours: f32,
    pub estimated_monthly_traffic: u64,
    pub recommended_actions: Vec<String>,
    /// First three competitor URLs carrying the query.
    pub top_competitor_urls: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// One strategic recommendation block in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicRecommendation {
    pub title: String,
    pub priority: String,
    pub description: String,
    pub action: String,
    pub keywords: Vec<String>,
}

/// One content-calendar slot: three items per week, top opportunities first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub week: u32,
    pub keyword: String,
    pub content_type: ContentKind,
    pub priority: PriorityTier,
    pub effort_hours: f32,
    pub estimated_traffic: u64,
    pub actions: Vec<String>,
}

/// Complete result of one gap analysis, serializable as a JSON tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysisReport {
    pub own_website_url: String,
    pub competitor_urls: Vec<String>,
    pub business_context: Option<BusinessContext>,

    pub own_queries: Vec<SearchQuery>,
    pub competitor_queries: BTreeMap<String, Vec<SearchQuery>>,

    /// All gaps, sorted by opportunity score descending.
    pub gap_opportunities: Vec<KeywordGapOpportunity>,

    pub quick_wins: Vec<KeywordGapOpportunity>,
    pub high_priority: Vec<KeywordGapOpportunity>,
    pub medium_priority: Vec<KeywordGapOpportunity>,
    pub long_term: Vec<KeywordGapOpportunity>,

    pub informational_gaps: Vec<KeywordGapOpportunity>,
    pub transactional_gaps: Vec<KeywordGapOpportunity>,
    pub local_gaps: Vec<KeywordGapOpportunity>,
    pub comparison_gaps: Vec<KeywordGapOpportunity>,
    pub navigational_gaps: Vec<KeywordGapOpportunity>,

    pub strategic_recommendations: Vec<StrategicRecommendation>,
    pub content_calendar_suggestions: Vec<CalendarEntry>,

    pub total_gaps_found: usize,
    /// Sum of estimated monthly traffic across all gaps.
    pub total_opportunity_value: f64,
    /// Mean difficulty grade (1 = easy, 4 = very hard).
    pub avg_difficulty: f32,
    pub avg_relevance: f32,
    pub processing_time_seconds: f64,

    pub analyzed_at: DateTime<Utc>,
    pub analysis_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_maps_are_consistent() {
        // Easier difficulty always means a higher inverse score and less effort.
        let ordered = [
            KeywordDifficulty::Easy,
            KeywordDifficulty::Medium,
            KeywordDifficulty::Hard,
            KeywordDifficulty::VeryHard,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].inverse_score() > pair[1].inverse_score());
            assert!(pair[0].effort_hours() < pair[1].effort_hours());
            assert!(pair[0].grade() < pair[1].grade());
        }
    }

    #[test]
    fn heading_sources_cover_all_levels() {
        assert_eq!(KeywordSource::heading(1), KeywordSource::H1);
        assert_eq!(KeywordSource::heading(6), KeywordSource::H6);
        // Out-of-range levels clamp to the weakest heading.
        assert_eq!(KeywordSource::heading(9), KeywordSource::H6);
    }

    #[test]
    fn source_weights_favor_structure() {
        assert!(KeywordSource::Title.weight() > KeywordSource::Content.weight());
        assert!(KeywordSource::H1.weight() > KeywordSource::H6.weight());
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&PriorityTier::QuickWin).unwrap();
        assert_eq!(json, "\"quick_win\"");
        let json = serde_json::to_string(&KeywordSource::AltText).unwrap();
        assert_eq!(json, "\"alt_text\"");
        let json = serde_json::to_string(&SearchIntent::Informational).unwrap();
        assert_eq!(json, "\"informational\"");
    }

    #[test]
    fn business_context_accepts_partial_json() {
        let ctx: BusinessContext =
            serde_json::from_str(r#"{"niche": "laser hair removal"}"#).unwrap();
        assert_eq!(ctx.niche, "laser hair removal");
        assert!(ctx.services.is_empty());
        assert!(ctx.excluded_keywords.is_empty());
    }
}
