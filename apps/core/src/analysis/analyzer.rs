//! Gap analyzer - main orchestrator for the analysis module.
//!
//! Coordinates demand-unit extraction, gap identification, opportunity
//! scoring, priority classification and recommendation generation. The
//! `analyze` pipeline is pure and synchronous; only `run` touches the
//! network, through the `PageFetcher` seam.

use chrono::Utc;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::fetcher::PageFetcher;
use crate::models::{BusinessContext, GapAnalysisReport, KeywordGapOpportunity, SearchQuery};
use crate::page::PageSurface;

use super::comparator::find_gaps;
use super::extractor::QueryExtractor;
use super::priority::assign_priority;
use super::recommend::{categorize, content_calendar, strategic_recommendations};
use super::scoring::OpportunityScorer;

const ANALYSIS_VERSION: &str = "2.0";

/// Politeness delay between page fetches. A property of this orchestrator,
/// not of the analysis stages.
const FETCH_DELAY: Duration = Duration::from_secs(1);

/// Main analyzer that orchestrates all analysis components.
pub struct GapAnalyzer {
    extractor: QueryExtractor,
    scorer: OpportunityScorer,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GapAnalyzer {
    pub fn new() -> Self {
        Self {
            extractor: QueryExtractor::new(),
            scorer: OpportunityScorer::new(),
        }
    }

    /// Run the full analysis over already-fetched page surfaces.
    pub fn analyze(
        &self,
        own_page: &PageSurface,
        competitor_pages: &[PageSurface],
        context: Option<&BusinessContext>,
    ) -> GapAnalysisReport {
        let start = Instant::now();

        let own_queries = self.extractor.extract_queries(own_page);
        info!(
            url = %own_page.url,
            count = own_queries.len(),
            "extracted own demand units"
        );

        let mut competitor_queries: BTreeMap<String, Vec<SearchQuery>> = BTreeMap::new();
        for page in competitor_pages {
            let queries = self.extractor.extract_queries(page);
            info!(url = %page.url, count = queries.len(), "extracted competitor demand units");
            competitor_queries.insert(page.url.clone(), queries);
        }

        let mut gaps = find_gaps(&own_queries, &competitor_queries, context);
        for opp in &mut gaps {
            self.scorer.score(opp, context);
            assign_priority(opp);
        }
        gaps.sort_by(|a, b| {
            b.opportunity_score
                .partial_cmp(&a.opportunity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        info!(count = gaps.len(), "identified keyword gaps");

        let categorized = categorize(&gaps);
        let recommendations = strategic_recommendations(&categorized);
        let calendar = content_calendar(&gaps);

        let (total_value, avg_difficulty, avg_relevance) = summary_metrics(&gaps);

        GapAnalysisReport {
            own_website_url: own_page.url.clone(),
            competitor_urls: competitor_pages.iter().map(|p| p.url.clone()).collect(),
            business_context: context.cloned(),
            own_queries,
            competitor_queries,
            total_gaps_found: gaps.len(),
            gap_opportunities: gaps,
            quick_wins: categorized.quick_wins,
            high_priority: categorized.high_priority,
            medium_priority: categorized.medium,
            long_term: categorized.long_term,
            informational_gaps: categorized.informational,
            transactional_gaps: categorized.transactional,
            local_gaps: categorized.local,
            comparison_gaps: categorized.comparison,
            navigational_gaps: categorized.navigational,
            strategic_recommendations: recommendations,
            content_calendar_suggestions: calendar,
            total_opportunity_value: total_value,
            avg_difficulty,
            avg_relevance,
            processing_time_seconds: start.elapsed().as_secs_f64(),
            analyzed_at: Utc::now(),
            analysis_version: ANALYSIS_VERSION.to_string(),
        }
    }

    /// Fetch every page serially with a politeness delay, then analyze.
    ///
    /// A failed fetch degrades to an empty page surface: the URL contributes
    /// zero demand units but still counts in the visibility denominators.
    pub async fn run(
        &self,
        fetcher: &dyn PageFetcher,
        own_url: &str,
        competitor_urls: &[String],
        context: Option<&BusinessContext>,
    ) -> GapAnalysisReport {
        let own_page = fetch_surface(fetcher, own_url).await;

        let mut competitor_pages = Vec::with_capacity(competitor_urls.len());
        for url in competitor_urls {
            tokio::time::sleep(FETCH_DELAY).await;
            competitor_pages.push(fetch_surface(fetcher, url).await);
        }

        self.analyze(&own_page, &competitor_pages, context)
    }
}

async fn fetch_surface(fetcher: &dyn PageFetcher, url: &str) -> PageSurface {
    match fetcher.fetch(url).await {
        Ok(page) => PageSurface::from_html(&page.url, &page.html),
        Err(e) => {
            warn!(url = %url, error = %e, "page fetch failed, continuing with empty surface");
            PageSurface::empty(url)
        }
    }
}

fn summary_metrics(gaps: &[KeywordGapOpportunity]) -> (f64, f32, f32) {
    let total_value: f64 = gaps
        .iter()
        .map(|g| g.estimated_monthly_traffic as f64)
        .sum();
    let count = gaps.len().max(1) as f32;
    let avg_difficulty = gaps.iter().map(|g| g.query.difficulty.grade()).sum::<f32>() / count;
    let avg_relevance = gaps.iter().map(|g| g.relevance_score).sum::<f32>() / count;
    (total_value, avg_difficulty, avg_relevance)
}
