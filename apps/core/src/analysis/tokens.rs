//! Tokenizer and bilingual stop-word filter.
//!
//! Cleans raw page text into lowercase tokens and rejects function words for
//! Persian and English. All downstream phrase extraction runs on the output
//! of this module.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Zero-width non-joiner, the in-word joiner of Perso-Arabic script.
/// Kept inside tokens so conjugated verb forms survive as single words.
const ZWNJ: char = '\u{200C}';

/// Persian stop words: function words, conjugated auxiliaries, time/place
/// words, and generic nouns/adjectives too unspecific to be search demand.
const STOPWORDS_FA: &[&str] = &[
    // Articles, pronouns, particles
    "و", "در", "از", "به", "که", "این", "آن", "با", "برای", "تا", "را", "است", "بود", "باشد",
    "می", "خواهد", "کرد", "کرده", "هم", "نیز", "همچنین", "اما", "ولی", "اگر", "چون", "زیرا",
    "چرا", "کجا", "کی", "چگونه", "چه", "کدام", "کسی", "چیزی", "همه", "تمام", "کلی", "بعضی",
    "برخی", "هر", "هیچ", "نه", "نمی", "های", "ها", "ان", "ات", "ین", "ون",
    // Conjugated verb forms
    "می‌کند", "می‌شود", "می‌تواند", "می‌توان", "می‌خواهد", "نمی‌شود", "نمی‌تواند",
    "نمی‌خواهد", "نمی‌کند", "نمی‌باشد", "هست", "هستند", "بودند", "باشند", "خواهند",
    "کردند", "کرده‌اند", "می‌کنند", "می‌شوند", "می‌توانند", "می‌خواهند",
    // Time and place
    "امروز", "دیروز", "فردا", "حالا", "الان", "هفته", "ماه", "سال", "روز", "شب",
    "صبح", "ظهر", "عصر", "داخل", "خارج", "بالا", "پایین", "چپ", "راست", "وسط",
    "کنار", "جلوی", "پشت", "زیر", "روی", "بین", "میان", "دور", "نزدیک", "قبل", "بعد",
    // Generic nouns
    "چیز", "کار", "مورد", "نوع", "گونه", "مدل", "سبک", "روش", "طریقه", "شیوه", "نحوه",
    "چگونگی", "کیفیت", "مقدار", "تعداد", "اندازه", "حجم", "وزن",
    // Generic adjectives
    "خوب", "بد", "زیبا", "بزرگ", "کوچک", "بلند", "کوتاه", "جدید", "قدیمی", "تازه",
    "سریع", "آهسته", "آسان", "سخت", "مشکل", "راحت",
];

/// English stop words.
const STOPWORDS_EN: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "would", "you",
    "your", "we", "they", "them", "their", "this", "these", "those", "have", "had", "do",
    "does", "did", "can", "could", "should", "may", "might", "must", "shall", "or", "but",
];

/// Two-letter words that carry real search demand (body parts, materials)
/// and are exempt from the minimum-length rule.
const MEANINGFUL_TWO_LETTER: &[&str] = &["مو", "پا", "سر", "آب", "مس", "نخ"];

static STOP_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    STOPWORDS_FA
        .iter()
        .chain(STOPWORDS_EN.iter())
        .copied()
        .collect()
});

static TWO_LETTER_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MEANINGFUL_TWO_LETTER.iter().copied().collect());

/// True when the token is in the bilingual stop set.
pub fn is_stopword(token: &str) -> bool {
    STOP_SET.contains(token)
}

/// Split raw text into lowercase tokens. Every character that is not a
/// Unicode letter/digit or the ZWNJ joiner becomes a separator; empty input
/// yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != ZWNJ)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Token-quality gate applied before any phrase is built.
///
/// Rejects tokens shorter than 2 chars, 2-letter tokens outside the
/// meaningful allow-list, tokens containing anything non-alphabetic
/// (digits, mixed symbols), and stop words.
pub fn is_valid_word(token: &str) -> bool {
    let len = token.chars().count();
    if len < 2 {
        return false;
    }
    if len == 2 && !TWO_LETTER_SET.contains(token) {
        return false;
    }
    if !token.chars().all(|c| c.is_alphabetic() || c == ZWNJ) {
        return false;
    }
    !is_stopword(token)
}
