//! Keyword tables for the heuristic detectors
//!
//! Every word and phrase list used by the analytics lives here as data so it
//! can be overridden from the `[lexicon]` config section. Omitted tables fall
//! back to the built-in lists.
//!
//! ```toml
//! [lexicon]
//! compliments = ["beautiful", "brave"]
//!
//! [lexicon.love_words]
//! nickname = ["pookie", "bubba"]
//! ```

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================
// Categories
// ============================================

/// Category a love word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveWordCategory {
    /// English romantic terms
    English,
    /// Affectionate nicknames
    Nickname,
    /// Hindi/Urdu romantic terms
    Hindi,
    /// Abstract romance terms
    Romance,
    /// Affection verbs
    Action,
}

impl LoveWordCategory {
    pub const ALL: [LoveWordCategory; 5] = [
        LoveWordCategory::English,
        LoveWordCategory::Nickname,
        LoveWordCategory::Hindi,
        LoveWordCategory::Romance,
        LoveWordCategory::Action,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoveWordCategory::English => "English",
            LoveWordCategory::Nickname => "Nickname",
            LoveWordCategory::Hindi => "Hindi",
            LoveWordCategory::Romance => "Romance",
            LoveWordCategory::Action => "Action",
        }
    }
}

/// The five memory-moment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    RememberWhen,
    MissYou,
    ThankYou,
    InsideJokes,
    FuturePlans,
}

impl MemoryKind {
    pub const ALL: [MemoryKind; 5] = [
        MemoryKind::RememberWhen,
        MemoryKind::MissYou,
        MemoryKind::ThankYou,
        MemoryKind::InsideJokes,
        MemoryKind::FuturePlans,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MemoryKind::RememberWhen => "Remember when",
            MemoryKind::MissYou => "Miss you",
            MemoryKind::ThankYou => "Thank you",
            MemoryKind::InsideJokes => "Inside jokes",
            MemoryKind::FuturePlans => "Future plans",
        }
    }
}

// ============================================
// Tables
// ============================================

/// Love words grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoveWords {
    pub english: Vec<String>,
    pub nickname: Vec<String>,
    pub hindi: Vec<String>,
    pub romance: Vec<String>,
    pub action: Vec<String>,
}

impl LoveWords {
    pub fn category(&self, category: LoveWordCategory) -> &[String] {
        match category {
            LoveWordCategory::English => &self.english,
            LoveWordCategory::Nickname => &self.nickname,
            LoveWordCategory::Hindi => &self.hindi,
            LoveWordCategory::Romance => &self.romance,
            LoveWordCategory::Action => &self.action,
        }
    }

    /// All keywords in category order, duplicates removed (first wins).
    pub fn unique_words(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        LoveWordCategory::ALL
            .iter()
            .flat_map(|c| self.category(*c))
            .map(String::as_str)
            .filter(|w| seen.insert(*w))
            .collect()
    }

    /// First category listing `word`.
    pub fn category_of(&self, word: &str) -> Option<LoveWordCategory> {
        LoveWordCategory::ALL
            .into_iter()
            .find(|c| self.category(*c).iter().any(|w| w == word))
    }
}

impl Default for LoveWords {
    fn default() -> Self {
        Self {
            english: words(&[
                "love", "miss", "heart", "kiss", "hug", "cute", "beautiful", "handsome",
                "amazing", "wonderful", "sweet", "dear", "darling", "baby", "honey", "babe",
                "sweetheart", "gorgeous", "stunning", "lovely", "precious", "angel", "princess",
                "prince", "queen", "king", "sunshine", "moonlight", "star", "treasure",
            ]),
            nickname: words(&[
                "chiku", "chikku", "chikoo", "choco", "chocolate", "cookie", "cupcake", "muffin",
                "candy", "sugar", "sweetie", "cutie", "buddy", "bunny", "bear", "teddy", "tiger",
                "lion", "panda", "motu",
            ]),
            hindi: words(&[
                "jaan", "jaanu", "jaanam", "pyaar", "pyaara", "pyaari", "mohabbat", "ishq", "dil",
                "dildar", "mehboob", "sanam", "shona", "sona", "meri", "tera", "tumhara", "hamara",
                "priya", "priye", "rajkumar", "rajkumari", "rani", "raja", "bachcha", "bacche",
                "beta", "betu", "gudiya", "guddu", "chintu", "pintu", "mintu", "bunty", "montu",
                "pappu", "bablu", "champ", "hero", "heroine",
            ]),
            romance: words(&[
                "forever", "always", "together", "soulmate", "destiny", "meant", "special",
                "magical", "perfect", "dream", "fantasy", "wish", "hope", "promise", "commitment",
                "devoted", "faithful", "loyal",
            ]),
            action: words(&[
                "adore", "cherish", "worship", "treasure", "value", "appreciate", "admire",
                "respect", "honor",
            ]),
        }
    }
}

/// Phrase lists for the five memory-moment kinds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryPhrases {
    pub remember_when: Vec<String>,
    pub miss_you: Vec<String>,
    pub thank_you: Vec<String>,
    pub inside_jokes: Vec<String>,
    pub future_plans: Vec<String>,
}

impl MemoryPhrases {
    pub fn kind(&self, kind: MemoryKind) -> &[String] {
        match kind {
            MemoryKind::RememberWhen => &self.remember_when,
            MemoryKind::MissYou => &self.miss_you,
            MemoryKind::ThankYou => &self.thank_you,
            MemoryKind::InsideJokes => &self.inside_jokes,
            MemoryKind::FuturePlans => &self.future_plans,
        }
    }
}

impl Default for MemoryPhrases {
    fn default() -> Self {
        Self {
            remember_when: words(&["remember when", "do you remember", "that time when"]),
            miss_you: words(&["miss you", "missing you", "i miss"]),
            thank_you: words(&["thank you", "thanks", "grateful", "appreciate"]),
            inside_jokes: words(&["haha", "lol", "lmao", "rofl", "our joke"]),
            future_plans: words(&["when we", "lets", "we should", "planning", "cant wait"]),
        }
    }
}

/// All keyword tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub love_words: LoveWords,
    pub compliments: Vec<String>,
    pub morning_greetings: Vec<String>,
    pub night_greetings: Vec<String>,
    pub support_phrases: Vec<String>,
    pub encouragement_phrases: Vec<String>,
    pub happy_emojis: Vec<String>,
    pub laugh_markers: Vec<String>,
    pub heart_emojis: Vec<String>,
    pub anniversary_words: Vec<String>,
    pub birthday_words: Vec<String>,
    pub memory_moments: MemoryPhrases,
    /// Words left out of "top words" listings
    pub common_words: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            love_words: LoveWords::default(),
            compliments: words(&[
                "beautiful", "gorgeous", "handsome", "cute", "sweet", "amazing", "wonderful",
                "perfect", "best", "awesome", "smart", "funny", "kind", "lovely", "adorable",
                "stunning", "incredible", "fantastic", "brilliant",
            ]),
            morning_greetings: words(&[
                "good morning", "gm", "morning", "rise and shine", "wake up",
            ]),
            night_greetings: words(&[
                "good night", "gn", "sweet dreams", "sleep well", "sleep tight",
            ]),
            support_phrases: words(&[
                "proud of you", "believe in you", "you can do", "support", "here for you",
                "got this", "you are strong", "dont worry", "everything will be", "i am here",
            ]),
            encouragement_phrases: words(&[
                "you got this", "believe", "proud", "amazing job", "well done",
            ]),
            happy_emojis: words(&[
                "😊", "😄", "😁", "🤗", "😍", "🥰", "😘", "💕", "💖", "💗", "🎉", "🥳", "😂", "🤣",
            ]),
            laugh_markers: words(&["😂", "🤣", "haha", "lol", "lmao"]),
            heart_emojis: words(&[
                "❤️", "💕", "💖", "💗", "💘", "💙", "💚", "💛", "💜", "🧡", "🖤", "🤍", "🤎", "💔",
                "❣️", "💟", "♥️",
            ]),
            anniversary_words: words(&["anniversary"]),
            birthday_words: words(&["birthday", "bday"]),
            memory_moments: MemoryPhrases::default(),
            common_words: words(&[
                "and", "the", "you", "are", "for", "not", "but", "have", "will", "can", "this",
                "that", "with", "from", "they", "was", "were", "been", "said", "each", "which",
                "she", "all", "any", "could", "our", "out", "day", "get", "has", "him", "his",
                "how", "its", "may", "new", "now", "old", "see", "two", "way", "who", "boy", "did",
                "don", "had", "let", "put", "say", "too", "use",
            ]),
        }
    }
}

impl Lexicon {
    /// Lowercase every text table so matching against lowercased content
    /// is a plain substring test.
    pub fn normalized(mut self) -> Self {
        let lists: [&mut Vec<String>; 21] = [
            &mut self.love_words.english,
            &mut self.love_words.nickname,
            &mut self.love_words.hindi,
            &mut self.love_words.romance,
            &mut self.love_words.action,
            &mut self.compliments,
            &mut self.morning_greetings,
            &mut self.night_greetings,
            &mut self.support_phrases,
            &mut self.encouragement_phrases,
            &mut self.happy_emojis,
            &mut self.laugh_markers,
            &mut self.heart_emojis,
            &mut self.anniversary_words,
            &mut self.birthday_words,
            &mut self.memory_moments.remember_when,
            &mut self.memory_moments.miss_you,
            &mut self.memory_moments.thank_you,
            &mut self.memory_moments.inside_jokes,
            &mut self.memory_moments.future_plans,
            &mut self.common_words,
        ];
        for list in lists {
            for word in list.iter_mut() {
                *word = word.to_lowercase();
            }
            list.retain(|w| !w.is_empty());
        }
        self
    }

    /// Compile the love-word table into a matcher.
    pub fn love_word_matcher(&self) -> Result<LoveWordMatcher> {
        LoveWordMatcher::new(&self.love_words.unique_words())
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// True if `text` contains any of `phrases`.
pub fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

// ============================================
// Love word matching
// ============================================

struct LoveWordPattern {
    word: String,
    exact: Regex,
    partial: Option<Regex>,
}

/// Two-tier love-word matcher.
///
/// A keyword hits a message when it appears as a whole word; failing that,
/// keywords longer than three characters also hit when embedded in a longer
/// word (`chikuuu`, `lovebird`). Each keyword hits a message at most once.
pub struct LoveWordMatcher {
    patterns: Vec<LoveWordPattern>,
}

impl LoveWordMatcher {
    pub fn new(words: &[&str]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(words.len());
        for word in words {
            let escaped = regex::escape(word);
            let exact = Regex::new(&format!(r"(?i)\b{}\b", escaped))?;
            let partial = if word.chars().count() > 3 {
                Some(Regex::new(&format!(r"(?i)\b\w*{}\w*\b", escaped))?)
            } else {
                None
            };
            patterns.push(LoveWordPattern {
                word: word.to_string(),
                exact,
                partial,
            });
        }
        Ok(Self { patterns })
    }

    /// Keywords hitting `text` (expected lowercased), in table order.
    pub fn hits<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .filter(move |p| {
                p.exact.is_match(text) || p.partial.as_ref().is_some_and(|r| r.is_match(text))
            })
            .map(|p| p.word.as_str())
    }

    /// Number of keywords occurring anywhere in `text` as plain substrings.
    pub fn substring_count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .filter(|p| text.contains(p.word.as_str()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(words: &[&str]) -> LoveWordMatcher {
        LoveWordMatcher::new(words).unwrap()
    }

    #[test]
    fn test_default_tables_sizes() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.love_words.english.len(), 30);
        assert_eq!(lexicon.love_words.hindi.len(), 40);
        assert_eq!(lexicon.heart_emojis.len(), 17);
        for kind in MemoryKind::ALL {
            assert!(!lexicon.memory_moments.kind(kind).is_empty());
        }
    }

    #[test]
    fn test_unique_words_dedupes_across_categories() {
        let table = LoveWords::default();
        let words = table.unique_words();
        assert_eq!(words.iter().filter(|w| **w == "treasure").count(), 1);
        assert_eq!(words.len(), 116);
    }

    #[test]
    fn test_category_of() {
        let love = LoveWords::default();
        assert_eq!(love.category_of("jaan"), Some(LoveWordCategory::Hindi));
        assert_eq!(love.category_of("treasure"), Some(LoveWordCategory::English));
        assert_eq!(love.category_of("motu"), Some(LoveWordCategory::Nickname));
        assert_eq!(love.category_of("banana"), None);
    }

    #[test]
    fn test_exact_hit() {
        let m = matcher(&["love", "dil"]);
        let hits: Vec<_> = m.hits("i love you").collect();
        assert_eq!(hits, vec!["love"]);
    }

    #[test]
    fn test_partial_hit_for_long_keywords_only() {
        let m = matcher(&["chiku", "dil"]);
        // three-letter keywords never match inside a longer word
        let hits: Vec<_> = m.hits("my chikuuu and dildar").collect();
        assert_eq!(hits, vec!["chiku"]);
    }

    #[test]
    fn test_keyword_counts_once_per_message() {
        let m = matcher(&["love"]);
        assert_eq!(m.hits("love love lovely").count(), 1);
    }

    #[test]
    fn test_substring_count() {
        let m = matcher(&["love", "miss", "kiss"]);
        assert_eq!(m.substring_count("i miss your kisses"), 2);
    }

    #[test]
    fn test_keywords_are_escaped() {
        let m = matcher(&["c++"]);
        assert_eq!(m.hits("c++ forever").count(), 0);
        assert_eq!(m.substring_count("i like c++"), 1);
    }

    #[test]
    fn test_partial_config_override_keeps_other_defaults() {
        let toml = r#"
compliments = ["Brave"]

[love_words]
nickname = ["Pookie"]
"#;
        let lexicon: Lexicon = toml::from_str::<Lexicon>(toml).unwrap().normalized();
        assert_eq!(lexicon.compliments, vec!["brave"]);
        assert_eq!(lexicon.love_words.nickname, vec!["pookie"]);
        assert_eq!(lexicon.love_words.english.len(), 30);
        assert_eq!(lexicon.night_greetings, Lexicon::default().night_greetings);
    }

    #[test]
    fn test_contains_any() {
        let phrases = words(&["good night", "gn"]);
        assert!(contains_any("good night love", &phrases));
        assert!(!contains_any("hello", &phrases));
    }
}
