//! WordNet-style noun lemmatizer.
//!
//! Words are first looked up in a table of exceptions; otherwise a reduced set
//! of the WordNet noun suffix rules is applied, most specific suffix first.
//! With no dictionary to reject bad candidates, the `-ses`, `-zes` and `-oes`
//! rules are left out and the common plurals needing them are listed as
//! exceptions instead. Words that already look singular (`-ss`, `-us`, `-is`,
//! very short words) are returned unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Lemmatizer;

/// Irregular noun forms and their lemmas.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("aches", "ache"),
    ("analyses", "analysis"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("calories", "calorie"),
    ("calves", "calf"),
    ("campuses", "campus"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("diagnoses", "diagnosis"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("gases", "gas"),
    ("geese", "goose"),
    ("halves", "half"),
    ("headaches", "headache"),
    ("heroes", "hero"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("media", "medium"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("niches", "niche"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("potatoes", "potato"),
    ("quizzes", "quiz"),
    ("selfies", "selfie"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("tomatoes", "tomato"),
    ("viruses", "virus"),
    ("waltzes", "waltz"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
    ("zombies", "zombie"),
];

/// Words ending in `s` that are already in base form.
const UNINFLECTED: &[&str] = &[
    "always", "christmas", "lens", "means", "news", "perhaps", "series", "species", "thanks",
    "whereas",
];

/// Noun suffix rules as `(suffix, replacement)`, checked in order.
const NOUN_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

static EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NOUN_EXCEPTIONS.iter().copied().collect());

/// Lemmatizer reducing English nouns to their singular base form.
#[derive(Clone, Debug, Default)]
pub struct WordNetLemmatizer;

impl WordNetLemmatizer {
    /// Create a new WordNet noun lemmatizer.
    pub fn new() -> Self {
        WordNetLemmatizer
    }

    fn looks_singular(word: &str) -> bool {
        word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
            || UNINFLECTED.contains(&word)
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.get(word) {
            return (*lemma).to_string();
        }

        if word.len() <= 3 || Self::looks_singular(word) {
            return word.to_string();
        }

        for (suffix, replacement) in NOUN_RULES {
            // The stem left after stripping must keep at least two characters.
            if word.len() >= suffix.len() + 2 && word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                return format!("{stem}{replacement}");
            }
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "wordnet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("tweets"), "tweet");
        assert_eq!(lemmatizer.lemmatize("lockdowns"), "lockdown");
        assert_eq!(lemmatizer.lemmatize("churches"), "church");
        assert_eq!(lemmatizer.lemmatize("wishes"), "wish");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("losses"), "loss");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");
        assert_eq!(lemmatizer.lemmatize("policemen"), "policeman");
        assert_eq!(lemmatizer.lemmatize("sizes"), "size");
        assert_eq!(lemmatizer.lemmatize("lies"), "lie");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("lives"), "life");
        assert_eq!(lemmatizer.lemmatize("crises"), "crisis");
        assert_eq!(lemmatizer.lemmatize("movies"), "movie");
        assert_eq!(lemmatizer.lemmatize("buses"), "bus");
        assert_eq!(lemmatizer.lemmatize("gases"), "gas");
        assert_eq!(lemmatizer.lemmatize("waltzes"), "waltz");
        assert_eq!(lemmatizer.lemmatize("heroes"), "hero");
    }

    #[test]
    fn test_base_forms_unchanged() {
        let lemmatizer = WordNetLemmatizer::new();

        for word in [
            "feeling", "sad", "lockdown", "situation", "crisis", "virus", "stress", "news", "gas",
        ] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_lemmatizer_name() {
        assert_eq!(WordNetLemmatizer::new().name(), "wordnet");
    }
}
