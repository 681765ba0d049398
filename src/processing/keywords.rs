//! Frequency-ranked keyword extraction

use crate::processing::tokenizer::tokenize;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const DEFAULT_TOP_N: usize = 30;
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Function words plus generic business and time vocabulary that carry no
/// signal about what a role actually asks for.
const STOP_WORDS: &[&str] = &[
    "the", "and", "with", "for", "you", "are", "this", "that", "have", "will", "your", "our",
    "from", "work", "company", "team", "their", "they", "would", "should", "which", "when",
    "what", "where", "how", "about", "been", "also", "such", "than", "them", "those", "then",
    "just", "like", "other", "more", "some", "only", "into", "over", "most", "make", "many",
    "even", "after", "before", "while", "because", "being", "under", "through", "during",
    "without", "could", "might", "must", "shall", "both", "each", "either", "neither",
    "whether", "these", "there", "here", "every", "any", "all", "none", "same", "different",
    "own", "so", "too", "very", "much", "may", "can", "cannot", "able", "need", "want", "use",
    "used", "using", "including", "within", "between", "among", "upon", "based", "according",
    "etc", "eg", "ie", "via", "well", "still", "yet", "already", "never", "always", "often",
    "sometimes", "usually", "generally", "specifically", "particularly", "especially",
    "mainly", "primarily", "essentially", "basically", "actually", "literally", "virtually",
    "nearly", "almost", "quite", "rather", "somewhat", "enough", "sufficient", "insufficient",
    "adequate", "inadequate", "appropriate", "inappropriate", "relevant", "irrelevant",
    "important", "unimportant", "necessary", "unnecessary", "required", "optional",
    "available", "unavailable", "current", "previous", "former", "latter", "initial", "final",
    "next", "last", "recent", "past", "present", "future", "new", "old", "young", "modern",
    "ancient", "early", "late", "annual", "monthly", "weekly", "daily", "hourly", "yearly",
    "quarterly", "biannual", "biennial", "centennial",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Extract up to `top_n` keywords from `text`, most frequent first.
///
/// Tokens shorter than `min_word_length` characters, pure numbers and stop
/// words are discarded. Equal counts keep the order in which the words first
/// appeared. When the pool of distinct candidates is larger than
/// `top_n * 1.5`, words seen only once are dropped before ranking so that a
/// long posting is represented by its repeated terms; smaller pools keep
/// their singletons.
pub fn extract_keywords(text: &str, top_n: usize, min_word_length: usize) -> Vec<String> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        if token.chars().count() < min_word_length
            || token.chars().all(|c| c.is_numeric())
            || is_stop_word(&token)
        {
            continue;
        }

        match index.get(&token) {
            Some(&position) => ranked[position].1 += 1,
            None => {
                index.insert(token.clone(), ranked.len());
                ranked.push((token, 1));
            }
        }
    }

    let distinct = ranked.len();
    if distinct as f64 > top_n as f64 * 1.5 {
        ranked.retain(|(_, count)| *count > 1);
        debug!(
            "Dropped {} single-occurrence keywords from a pool of {}",
            distinct - ranked.len(),
            distinct
        );
    }

    // Stable sort keeps first-occurrence order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(word, _)| word)
        .collect()
}
