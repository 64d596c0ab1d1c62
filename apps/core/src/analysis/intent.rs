//! Rule-based search intent classification.
//!
//! Weighted signal matching over keywords, URL patterns and title patterns
//! for five intent categories, Persian and English. No ML model, just
//! keyword/regex scoring with a confidence estimate.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::SearchIntent;

/// Result of intent classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: SearchIntent,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

/// Signal table for one intent category.
struct IntentSignal {
    intent: SearchIntent,
    keywords: &'static [&'static str],
    url_patterns: Vec<Regex>,
    title_patterns: &'static [&'static str],
    weight: f32,
}

const INFORMATIONAL_KEYWORDS: &[&str] = &[
    "چیست", "چگونه", "راهنما", "آموزش", "نحوه", "معرفی", "what", "how", "guide",
    "tutorial", "learn", "معنی", "تعریف", "definition", "مزایا", "معایب", "advantages",
];

const TRANSACTIONAL_KEYWORDS: &[&str] = &[
    "خرید", "قیمت", "هزینه", "buy", "price", "cost", "booking", "رزرو", "نوبت",
    "پکیج", "تخفیف", "discount", "offer", "پیشنهاد", "سفارش", "order", "پرداخت",
];

const LOCAL_KEYWORDS: &[&str] = &[
    "نزدیک", "محله", "منطقه", "تهران", "شهر", "آدرس", "near", "location", "address",
    "شمال", "جنوب", "شرق", "غرب", "north", "south", "east", "west",
];

const COMPARISON_KEYWORDS: &[&str] = &[
    "مقایسه", "بهترین", "برتر", "compare", "best", "vs", "versus", "یا", "or",
    "تفاوت", "difference", "انتخاب", "choose", "بهتر", "better",
];

const NAVIGATIONAL_KEYWORDS: &[&str] = &[
    "سایت", "website", "صفحه اصلی", "home", "login", "ورود", "dashboard",
];

/// Service/medical terms that signal a booking-style page regardless of the
/// generic transactional keyword list.
const DOMAIN_TRANSACTIONAL: &[&str] = &[
    "جراحی", "عمل", "درمان", "لیزر", "surgery", "treatment", "procedure",
];

/// Intent classifier with per-category signal tables.
pub struct IntentClassifier {
    signals: Vec<IntentSignal>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("invalid intent URL pattern"))
        .collect()
}

impl IntentClassifier {
    pub fn new() -> Self {
        let signals = vec![
            IntentSignal {
                intent: SearchIntent::Informational,
                keywords: INFORMATIONAL_KEYWORDS,
                url_patterns: compile(&[r"/blog/", r"/guide/", r"/learn/", r"/راهنما/", r"/آموزش/"]),
                title_patterns: &["چیست", "چگونه", "راهنمای", "آموزش", "معرفی"],
                weight: 1.0,
            },
            IntentSignal {
                intent: SearchIntent::Transactional,
                keywords: TRANSACTIONAL_KEYWORDS,
                url_patterns: compile(&[
                    r"/buy/", r"/price/", r"/booking/", r"/خرید/", r"/قیمت/", r"/نوبت/",
                ]),
                title_patterns: &["خرید", "قیمت", "هزینه", "رزرو", "نوبت"],
                weight: 1.2,
            },
            IntentSignal {
                intent: SearchIntent::Local,
                keywords: LOCAL_KEYWORDS,
                url_patterns: compile(&[r"/location/", r"/\w+-tehran/", r"/محله/", r"/منطقه/"]),
                title_patterns: &["تهران", "شمال", "جنوب", "شرق", "غرب", "منطقه", "محله"],
                weight: 1.3,
            },
            IntentSignal {
                intent: SearchIntent::Comparison,
                keywords: COMPARISON_KEYWORDS,
                url_patterns: compile(&[r"/compare/", r"/vs/", r"/مقایسه/", r"/best/"]),
                title_patterns: &["مقایسه", "بهترین", "یا", "vs", "تفاوت"],
                weight: 1.1,
            },
            IntentSignal {
                intent: SearchIntent::Navigational,
                keywords: NAVIGATIONAL_KEYWORDS,
                url_patterns: compile(&[r"^/$", r"/home/?$", r"/index"]),
                title_patterns: &["صفحه اصلی", "home", "خانه"],
                weight: 0.9,
            },
        ];

        Self { signals }
    }

    /// Classify search intent from page signals.
    ///
    /// URL and title signals are weighted more heavily than generic keyword
    /// occurrence: a pattern in the URL path or the title is a structural
    /// intent marker, a keyword somewhere in the text is not.
    pub fn classify(
        &self,
        title: &str,
        url: &str,
        content: &str,
        headings: &[String],
    ) -> IntentResult {
        let snippet: String = content.chars().take(1000).collect();
        let haystack = format!("{} {} {} {}", title, url, snippet, headings.join(" "))
            .to_lowercase();
        let title_lower = title.to_lowercase();

        let mut scores: Vec<(SearchIntent, f32)> = Vec::with_capacity(self.signals.len());
        for signal in &self.signals {
            let keyword_hits = signal
                .keywords
                .iter()
                .filter(|kw| haystack.contains(*kw))
                .count() as f32;
            let url_hits = signal
                .url_patterns
                .iter()
                .filter(|p| p.is_match(url))
                .count() as f32;
            let title_hits = signal
                .title_patterns
                .iter()
                .filter(|p| title_lower.contains(*p))
                .count() as f32;

            let score = keyword_hits * signal.weight
                + url_hits * 2.0 * signal.weight
                + title_hits * 1.5 * signal.weight;
            scores.push((signal.intent, score));
        }

        // Service-style pages convert like transactional ones.
        if DOMAIN_TRANSACTIONAL.iter().any(|kw| haystack.contains(kw)) {
            bump(&mut scores, SearchIntent::Transactional, 2.0);
        }

        // Local queries in a service domain are usually also transactional;
        // when both fire, local wins the tie.
        if score_of(&scores, SearchIntent::Local) > 0.0
            && score_of(&scores, SearchIntent::Transactional) > 0.0
        {
            bump(&mut scores, SearchIntent::Local, 1.5);
        }

        let total: f32 = scores.iter().map(|(_, s)| s).sum();
        if total <= 0.0 {
            return IntentResult {
                intent: SearchIntent::Informational,
                confidence: 0.5,
            };
        }

        // First-listed category wins ties, like the table order implies.
        let (intent, raw) = scores
            .iter()
            .copied()
            .fold(None, |best: Option<(SearchIntent, f32)>, cand| match best {
                Some((_, s)) if cand.1 > s => Some(cand),
                None => Some(cand),
                _ => best,
            })
            .unwrap_or((SearchIntent::Informational, 0.0));

        let mut confidence = (raw / total).clamp(0.0, 1.0);
        if raw > 3.0 {
            confidence = (confidence + 0.2).min(1.0);
        }

        IntentResult { intent, confidence }
    }
}

fn score_of(scores: &[(SearchIntent, f32)], intent: SearchIntent) -> f32 {
    scores
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, s)| *s)
        .unwrap_or(0.0)
}

fn bump(scores: &mut [(SearchIntent, f32)], intent: SearchIntent, amount: f32) {
    if let Some(entry) = scores.iter_mut().find(|(i, _)| *i == intent) {
        entry.1 += amount;
    }
}
