//! # Gapscout Core
//!
//! Keyword gap analysis engine: extracts candidate search queries ("demand
//! units") from a page's textual surface, compares them against a competitor
//! corpus, and ranks the coverage gaps by a weighted business-opportunity
//! score.
//!
//! The analysis pipeline is pure and synchronous; network I/O lives behind
//! the [`fetcher::PageFetcher`] seam and is only exercised by the binary and
//! by [`analysis::GapAnalyzer::run`].

pub mod analysis;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod page;

#[cfg(test)]
mod tests;

pub use analysis::GapAnalyzer;
pub use error::AppError;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use models::{
    BusinessContext, GapAnalysisReport, KeywordGapOpportunity, PriorityTier, SearchIntent,
    SearchQuery,
};
pub use page::PageSurface;
