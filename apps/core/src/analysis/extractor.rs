//! Demand-unit builder.
//!
//! Runs the per-source n-gram extraction wrappers over a page surface,
//! classifies each phrase's intent, merges duplicate phrases, and finishes
//! every record with tf-idf, difficulty, SERP feature hints and a
//! recommended content type.

use chrono::Utc;
use std::collections::HashMap;
use url::Url;

use crate::models::{
    ContentKind, KeywordDifficulty, KeywordSource, SearchIntent, SearchQuery, SerpFeature,
};
use crate::page::PageSurface;

use super::intent::IntentClassifier;
use super::ngrams::{extract_ngrams, Ngram};
use super::tokens::{is_valid_word, tokenize};

const TITLE_MAX_N: usize = 5;
const META_MAX_N: usize = 4;
const HEADING_MAX_N: usize = 5;
const CONTENT_MAX_N: usize = 4;
/// Body phrases must recur to survive; this is what separates medium and
/// long-tail candidates from single-occurrence noise.
const CONTENT_MIN_FREQUENCY: u32 = 2;
const URL_MAX_N: usize = 3;
const ALT_MAX_N: usize = 3;
const ANCHOR_MAX_N: usize = 3;
/// Anchors longer than this are sentences, not link labels.
const MAX_ANCHOR_CHARS: usize = 100;
const SNIPPET_RADIUS: usize = 100;
const SNIPPET_MAX_CHARS: usize = 200;

/// Builds demand units from a page surface.
pub struct QueryExtractor {
    intent: IntentClassifier,
}

impl Default for QueryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExtractor {
    pub fn new() -> Self {
        Self {
            intent: IntentClassifier::new(),
        }
    }

    /// Extract all demand units from one page. The output contains no
    /// duplicate `query_text`: recurrences across sources are merged by
    /// summing frequencies, keeping the first-seen source and context.
    pub fn extract_queries(&self, page: &PageSurface) -> Vec<SearchQuery> {
        let mut raw = Vec::new();
        raw.extend(self.from_title(page));
        raw.extend(self.from_meta(page));
        raw.extend(self.from_headings(page));
        raw.extend(self.from_content(page));
        raw.extend(self.from_url(page));
        raw.extend(self.from_alt_texts(page));
        raw.extend(self.from_anchors(page));

        let mut queries = merge_queries(raw);

        let total_tokens = tokenize(&page.body_text)
            .iter()
            .filter(|w| is_valid_word(w))
            .count();
        for query in &mut queries {
            finish_metrics(query, total_tokens);
        }

        queries
    }

    fn from_title(&self, page: &PageSurface) -> Vec<SearchQuery> {
        if page.title.is_empty() {
            return Vec::new();
        }
        let snippet = truncate_chars(&page.title, SNIPPET_MAX_CHARS);
        extract_ngrams(&page.title, TITLE_MAX_N, 1)
            .into_iter()
            .map(|n| self.build_query(n.phrase, n.size, 1, KeywordSource::Title, &snippet, page))
            .collect()
    }

    fn from_meta(&self, page: &PageSurface) -> Vec<SearchQuery> {
        if page.meta_description.is_empty() {
            return Vec::new();
        }
        let snippet = truncate_chars(&page.meta_description, SNIPPET_MAX_CHARS);
        extract_ngrams(&page.meta_description, META_MAX_N, 1)
            .into_iter()
            .map(|n| self.build_query(n.phrase, n.size, 1, KeywordSource::Meta, &snippet, page))
            .collect()
    }

    fn from_headings(&self, page: &PageSurface) -> Vec<SearchQuery> {
        let mut queries = Vec::new();
        for heading in &page.headings {
            let source = KeywordSource::heading(heading.level);
            let snippet = truncate_chars(&heading.text, SNIPPET_MAX_CHARS);
            for n in extract_ngrams(&heading.text, HEADING_MAX_N, 1) {
                queries.push(self.build_query(n.phrase, n.size, 1, source, &snippet, page));
            }
        }
        queries
    }

    fn from_content(&self, page: &PageSurface) -> Vec<SearchQuery> {
        extract_ngrams(&page.body_text, CONTENT_MAX_N, CONTENT_MIN_FREQUENCY)
            .into_iter()
            .map(|n: Ngram| {
                let snippet = find_context(&n.phrase, &page.body_text, SNIPPET_RADIUS);
                self.build_query(
                    n.phrase,
                    n.size,
                    n.frequency,
                    KeywordSource::Content,
                    &snippet,
                    page,
                )
            })
            .collect()
    }

    fn from_url(&self, page: &PageSurface) -> Vec<SearchQuery> {
        let Ok(parsed) = Url::parse(&page.url) else {
            return Vec::new();
        };
        let Some(segments) = parsed.path_segments() else {
            return Vec::new();
        };

        let mut queries = Vec::new();
        for segment in segments.filter(|s| !s.is_empty()) {
            let cleaned: String = segment
                .chars()
                .map(|c| if c == '-' || c == '_' { ' ' } else { c })
                .collect();
            for n in extract_ngrams(&cleaned, URL_MAX_N, 1) {
                queries.push(self.build_query(n.phrase, n.size, 1, KeywordSource::Url, segment, page));
            }
        }
        queries
    }

    fn from_alt_texts(&self, page: &PageSurface) -> Vec<SearchQuery> {
        let mut queries = Vec::new();
        for alt in &page.alt_texts {
            for n in extract_ngrams(alt, ALT_MAX_N, 1) {
                queries.push(self.build_query(n.phrase, n.size, 1, KeywordSource::AltText, alt, page));
            }
        }
        queries
    }

    fn from_anchors(&self, page: &PageSurface) -> Vec<SearchQuery> {
        let mut queries = Vec::new();
        for anchor in &page.anchor_texts {
            if anchor.chars().count() >= MAX_ANCHOR_CHARS {
                continue;
            }
            for n in extract_ngrams(anchor, ANCHOR_MAX_N, 1) {
                queries.push(self.build_query(
                    n.phrase,
                    n.size,
                    1,
                    KeywordSource::AnchorText,
                    anchor,
                    page,
                ));
            }
        }
        queries
    }

    /// Wrap one extracted phrase in a demand unit. Intent is classified from
    /// the phrase itself plus the page URL and the surrounding snippet, so
    /// phrase-level signals dominate page-level ones.
    fn build_query(
        &self,
        phrase: String,
        size: usize,
        frequency: u32,
        source: KeywordSource,
        context: &str,
        page: &PageSurface,
    ) -> SearchQuery {
        let intent = self.intent.classify(&phrase, &page.url, context, &[]);
        let serp_features = suggest_serp_features(&phrase, intent.intent);
        let recommended_content_type = suggest_content_kind(&phrase, intent.intent);

        SearchQuery {
            query_text: phrase,
            source,
            frequency,
            ngram_size: size,
            is_long_tail: size >= 3,
            search_intent: intent.intent,
            intent_confidence: intent.confidence,
            difficulty: KeywordDifficulty::Medium,
            tf_score: 0.0,
            idf_score: 0.0,
            tfidf_score: 0.0,
            serp_features,
            recommended_content_type,
            context_snippet: truncate_chars(context, SNIPPET_MAX_CHARS),
            found_on_competitors: Vec::new(),
            discovered_at: Utc::now(),
        }
    }
}

/// Merge duplicate phrases: frequencies are summed, the first-seen record
/// keeps its source attribution and context (earliest wins, not
/// highest-weight wins).
fn merge_queries(raw: Vec<SearchQuery>) -> Vec<SearchQuery> {
    let mut merged: Vec<SearchQuery> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for query in raw {
        match index.get(&query.query_text) {
            Some(&i) => merged[i].frequency += query.frequency,
            None => {
                index.insert(query.query_text.clone(), merged.len());
                merged.push(query);
            }
        }
    }
    merged
}

/// Fill tf-idf and difficulty after merging, when final frequencies are known.
fn finish_metrics(query: &mut SearchQuery, total_tokens: usize) {
    query.tf_score = if total_tokens > 0 {
        query.frequency as f32 / total_tokens as f32
    } else {
        0.0
    };
    // Single-corpus idf approximation: rarity against a nominal 1000-term corpus.
    query.idf_score = (1000.0 / (query.frequency as f32 + 1.0)).ln();
    query.tfidf_score = query.tf_score * query.idf_score * query.source.weight();
    query.difficulty = assess_difficulty(query);
}

/// Difficulty heuristic: structural placements and URL/alt mentions are easy
/// targets; body phrases need repetition to be easy; long phrases trend easy.
fn assess_difficulty(query: &SearchQuery) -> KeywordDifficulty {
    let by_source = match query.source {
        KeywordSource::Title | KeywordSource::H1 => KeywordDifficulty::Easy,
        KeywordSource::Url | KeywordSource::AltText => KeywordDifficulty::Easy,
        KeywordSource::Content => {
            if query.frequency > 5 {
                KeywordDifficulty::Easy
            } else if query.frequency > 2 {
                KeywordDifficulty::Medium
            } else {
                KeywordDifficulty::Hard
            }
        }
        _ => KeywordDifficulty::Medium,
    };

    if query.query_text.chars().count() > 10 {
        KeywordDifficulty::Easy
    } else {
        by_source
    }
}

fn suggest_serp_features(phrase: &str, intent: SearchIntent) -> Vec<SerpFeature> {
    let mut features = Vec::new();

    if contains_any(phrase, &["چگونه", "چطور", "how", "چرا", "why", "چیست", "what"]) {
        features.push(SerpFeature::Faq);
        features.push(SerpFeature::PeopleAlsoAsk);
    }
    if contains_any(phrase, &["آموزش", "راهنما", "tutorial", "guide", "how to"]) {
        features.push(SerpFeature::Howto);
    }
    if contains_any(phrase, &["ویدیو", "فیلم", "video", "watch"]) {
        features.push(SerpFeature::Video);
    }
    if intent == SearchIntent::Local {
        features.push(SerpFeature::LocalPack);
    }

    features
}

fn suggest_content_kind(phrase: &str, intent: SearchIntent) -> ContentKind {
    match intent {
        SearchIntent::Transactional => ContentKind::Service,
        SearchIntent::Local => ContentKind::Local,
        SearchIntent::Comparison => ContentKind::Article,
        _ if contains_any(phrase, &["how", "چگونه"]) => ContentKind::Faq,
        _ => ContentKind::Article,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Up to `radius` chars of surrounding text on each side of the phrase's
/// first (case-insensitive) occurrence.
fn find_context(phrase: &str, text: &str, radius: usize) -> String {
    let lower = text.to_lowercase();
    let needle = phrase.to_lowercase();
    let Some(byte_idx) = lower.find(&needle) else {
        return String::new();
    };

    let chars: Vec<char> = lower.chars().collect();
    let char_idx = lower[..byte_idx].chars().count();
    let start = char_idx.saturating_sub(radius);
    let end = (char_idx + needle.chars().count() + radius).min(chars.len());

    chars[start..end].iter().collect::<String>().trim().to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
