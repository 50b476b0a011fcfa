//! Rule-based English noun lemmatization
//!
//! Maps a token to its dictionary base form using an irregular-form table
//! and ordered suffix-detachment rules. Stateless per call: the same input
//! always yields the same lemma, and rule outputs are themselves stable
//! under re-lemmatization.

use rustc_hash::FxHashMap;

/// Plural forms the suffix rules get wrong.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("businessmen", "businessman"),
    ("calves", "calf"),
    ("campuses", "campus"),
    ("chairmen", "chairman"),
    ("children", "child"),
    ("congressmen", "congressman"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("echoes", "echo"),
    ("elves", "elf"),
    ("feet", "foot"),
    ("fishermen", "fisherman"),
    ("freshmen", "freshman"),
    ("gases", "gas"),
    ("geese", "goose"),
    ("gentlemen", "gentleman"),
    ("halves", "half"),
    ("heroes", "hero"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lenses", "lens"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("policemen", "policeman"),
    ("potatoes", "potato"),
    ("scarves", "scarf"),
    ("selves", "self"),
    ("series", "series"),
    ("shelves", "shelf"),
    ("species", "species"),
    ("spokesmen", "spokesman"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("tomatoes", "tomato"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Suffix-detachment rules, tried in order; first match wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "ze"),
    ("ies", "y"),
];

/// English noun lemmatizer
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: FxHashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer {
    pub fn english() -> Self {
        Self {
            exceptions: IRREGULAR_NOUNS.iter().copied().collect(),
        }
    }

    /// Reduce a token to its base form. Unknown shapes pass through
    /// unchanged; the rules expect lowercase input.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.exceptions.get(word) {
            return (*base).to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                // the ies rule mangles short words like "ties"; let the
                // plain -s rule below handle them instead
                if *suffix == "ies" && word.chars().count() <= 4 {
                    continue;
                }
                if !stem.is_empty() {
                    return format!("{stem}{replacement}");
                }
            }
        }

        // plain plural -s, skipping -ss/-us/-is endings and stems too short
        // to be a word
        if let Some(stem) = word.strip_suffix('s') {
            let keeps_ending = word.ends_with("ss") || word.ends_with("us") || word.ends_with("is");
            if !keeps_ending && stem.chars().count() >= 3 {
                return stem.to_string();
            }
        }

        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = Lemmatizer::english();
        assert_eq!(lemmatizer.lemmatize("cars"), "car");
        assert_eq!(lemmatizer.lemmatize("houses"), "house");
        assert_eq!(lemmatizer.lemmatize("articles"), "article");
        assert_eq!(lemmatizer.lemmatize("summaries"), "summary");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("churches"), "church");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
        assert_eq!(lemmatizer.lemmatize("brushes"), "brush");
        assert_eq!(lemmatizer.lemmatize("sizes"), "size");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = Lemmatizer::english();
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("feet"), "foot");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("wolves"), "wolf");
        assert_eq!(lemmatizer.lemmatize("analyses"), "analysis");
        assert_eq!(lemmatizer.lemmatize("buses"), "bus");
    }

    #[test]
    fn test_singulars_unchanged() {
        let lemmatizer = Lemmatizer::english();
        assert_eq!(lemmatizer.lemmatize("house"), "house");
        assert_eq!(lemmatizer.lemmatize("glass"), "glass");
        assert_eq!(lemmatizer.lemmatize("virus"), "virus");
        assert_eq!(lemmatizer.lemmatize("basis"), "basis");
        assert_eq!(lemmatizer.lemmatize("world"), "world");
    }

    #[test]
    fn test_short_words_pass_through() {
        let lemmatizer = Lemmatizer::english();
        // stems shorter than three chars are left alone
        assert_eq!(lemmatizer.lemmatize("gas"), "gas");
        assert_eq!(lemmatizer.lemmatize("is"), "is");
        assert_eq!(lemmatizer.lemmatize("as"), "as");
    }

    #[test]
    fn test_stable_under_reapplication() {
        let lemmatizer = Lemmatizer::english();
        for word in [
            "cars", "houses", "cities", "boxes", "classes", "children", "women", "wolves",
            "summaries", "sizes", "viruses",
        ] {
            let once = lemmatizer.lemmatize(word);
            let twice = lemmatizer.lemmatize(&once);
            assert_eq!(once, twice, "lemma of {word:?} not stable");
        }
    }
}
