//! Page surface reader: raw HTML to the textual surface the extractor
//! works on (title, meta description, headings, body text, alt text,
//! anchor text).
//!
//! Fetching the HTML is someone else's job; this module only reads what it
//! is handed and never fails: missing elements yield empty fields.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Chrome and navigation elements whose text is not page content.
const EXCLUDED_TAGS: &[&str] = &[
    "nav", "footer", "header", "aside", "script", "style", "noscript",
];

/// One heading with its level (1-6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// The textual surface of one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSurface {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<Heading>,
    pub body_text: String,
    pub alt_texts: Vec<String>,
    pub anchor_texts: Vec<String>,
}

impl PageSurface {
    /// An empty surface for a URL that could not be fetched. Contributes
    /// zero demand units downstream.
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    /// Read the textual surface out of raw HTML.
    pub fn from_html(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);

        let title_selector = Selector::parse("title").expect("invalid selector: title");
        let meta_selector =
            Selector::parse(r#"meta[name="description"]"#).expect("invalid selector: meta");
        let img_selector = Selector::parse("img").expect("invalid selector: img");
        let anchor_selector = Selector::parse("a[href]").expect("invalid selector: a");

        let title = document
            .select(&title_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let meta_description = document
            .select(&meta_selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut headings = Vec::new();
        for level in 1..=6u8 {
            let selector = Selector::parse(&format!("h{}", level))
                .expect("invalid selector: heading");
            for el in document.select(&selector) {
                let text = element_text(el);
                if !text.is_empty() {
                    headings.push(Heading { level, text });
                }
            }
        }

        let alt_texts = document
            .select(&img_selector)
            .filter_map(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty())
            .collect();

        let anchor_texts = document
            .select(&anchor_selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();

        let body_text = extract_body_text(&document);

        Self {
            url: url.to_string(),
            title,
            meta_description,
            headings,
            body_text,
            alt_texts,
            anchor_texts,
        }
    }

    /// Headings as plain strings, for callers that only need the text.
    pub fn heading_texts(&self) -> Vec<String> {
        self.headings.iter().map(|h| h.text.clone()).collect()
    }
}

/// Main content text: prefer `<main>`, then `<article>`, then the whole
/// body, skipping navigation/footer/script subtrees along the way.
fn extract_body_text(document: &Html) -> String {
    let main_selector = Selector::parse("main").expect("invalid selector: main");
    let article_selector = Selector::parse("article").expect("invalid selector: article");
    let body_selector = Selector::parse("body").expect("invalid selector: body");

    let root = document
        .select(&main_selector)
        .next()
        .or_else(|| document.select(&article_selector).next())
        .or_else(|| document.select(&body_selector).next());

    let mut out = String::new();
    if let Some(root) = root {
        collect_text(root, &mut out);
    }
    // Collapse runs of whitespace left by the markup.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !EXCLUDED_TAGS.contains(&child_el.value().name()) {
                collect_text(child_el, out);
            }
        }
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
