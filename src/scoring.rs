//! Scores how well a transaction detail matches a list of keywords.
//!
//! A keyword found verbatim in the detail is an exact match and is worth far
//! more than any word-level similarity. Word-level matching ignores words of
//! two characters or fewer ("de", "la", "en") and only lets long words count
//! as significant, otherwise unrelated categories would all pick up points from
//! filler words.

use crate::normalize::{normalize, words};

/// Points for a keyword found verbatim in the detail.
const EXACT_MATCH_POINTS: f64 = 20.0;
/// Points for a keyword whose words all matched, at least one of them long.
const SIGNIFICANT_WORD_MATCH_POINTS: f64 = 8.0;
/// Points for a keyword whose words all matched, none of them long.
const WORD_MATCH_POINTS: f64 = 4.0;
/// Points for a keyword where only some words matched, at least one of them long.
const PARTIAL_MATCH_POINTS: f64 = 1.0;
/// Applied to the whole score when at least one keyword matched exactly.
const EXACT_MATCH_MULTIPLIER: f64 = 1.5;

/// Keyword words this short are never compared.
const MAX_IGNORED_WORD_LENGTH: usize = 2;
/// Both words must be at least this long to match on a shared prefix.
const MIN_PREFIX_MATCH_LENGTH: usize = 4;
/// A matched keyword word longer than this counts as a significant match.
const MAX_INSIGNIFICANT_WORD_LENGTH: usize = 4;
/// The shorter word must cover more than this share of the longer one.
const MIN_PREFIX_LENGTH_RATIO: f64 = 0.7;

/// The outcome of scoring a piece of text against a keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordScore {
    /// The total score, already multiplied and floored.
    pub score: u32,
    /// Whether any keyword was found verbatim in the text.
    pub has_exact_match: bool,
    /// Keywords that matched exactly or had all of their words matched, in list order.
    pub matched_keywords: Vec<String>,
}

/// Score `text` against `keywords`.
///
/// Keywords are processed in the given order and duplicates are scored again.
///
/// ```
/// use categorizador::score_keywords;
///
/// let result = score_keywords("Almuerzo en McDonalds", &["mcdonalds"]);
///
/// assert!(result.has_exact_match);
/// assert_eq!(result.score, 30);
/// ```
pub fn score_keywords<K: AsRef<str>>(text: &str, keywords: &[K]) -> KeywordScore {
    let normalized_text = normalize(text);
    let text_words = words(&normalized_text);

    score_normalized(&normalized_text, &text_words, keywords)
}

/// Score `text` against `keywords`, returning only the integer score.
pub fn score<K: AsRef<str>>(text: &str, keywords: &[K]) -> u32 {
    score_keywords(text, keywords).score
}

/// Score text that has already been normalized and split into words.
///
/// The categorizer scores the same detail against every category, so it
/// normalizes once and calls this directly.
pub(crate) fn score_normalized<K: AsRef<str>>(
    normalized_text: &str,
    text_words: &[&str],
    keywords: &[K],
) -> KeywordScore {
    let mut total = 0.0;
    let mut has_exact_match = false;
    let mut matched_keywords = Vec::new();

    for keyword in keywords {
        let normalized_keyword = normalize(keyword.as_ref());

        // An empty keyword is a substring of everything.
        if normalized_keyword.is_empty() {
            continue;
        }

        if normalized_text.contains(&normalized_keyword) {
            total += EXACT_MATCH_POINTS;
            has_exact_match = true;
            matched_keywords.push(keyword.as_ref().to_owned());
            continue;
        }

        let keyword_words = words(&normalized_keyword);
        let mut word_matches = 0;
        let mut significant_matches = 0;

        for keyword_word in keyword_words
            .iter()
            .filter(|word| word.len() > MAX_IGNORED_WORD_LENGTH)
        {
            if text_words
                .iter()
                .any(|text_word| words_match(text_word, keyword_word))
            {
                word_matches += 1;

                if keyword_word.len() > MAX_INSIGNIFICANT_WORD_LENGTH {
                    significant_matches += 1;
                }
            }
        }

        if word_matches > 0 && word_matches == keyword_words.len() {
            total += if significant_matches > 0 {
                SIGNIFICANT_WORD_MATCH_POINTS
            } else {
                WORD_MATCH_POINTS
            };
            matched_keywords.push(keyword.as_ref().to_owned());
        } else if significant_matches > 0 {
            total += PARTIAL_MATCH_POINTS;
        }
    }

    if has_exact_match {
        total *= EXACT_MATCH_MULTIPLIER;
    }

    KeywordScore {
        score: total.floor() as u32,
        has_exact_match,
        matched_keywords,
    }
}

/// Whether a word from the text and a word from a keyword are the same word.
///
/// Long enough words also match when one is a prefix of the other and they are
/// close in length, so "cuenta" matches "cuentas" but "metro" does not match
/// "metropolitano".
fn words_match(text_word: &str, keyword_word: &str) -> bool {
    if text_word == keyword_word {
        return true;
    }

    let text_length = text_word.len();
    let keyword_length = keyword_word.len();

    if text_length < MIN_PREFIX_MATCH_LENGTH || keyword_length < MIN_PREFIX_MATCH_LENGTH {
        return false;
    }

    if !text_word.starts_with(keyword_word) && !keyword_word.starts_with(text_word) {
        return false;
    }

    let ratio = text_length.min(keyword_length) as f64 / text_length.max(keyword_length) as f64;

    ratio > MIN_PREFIX_LENGTH_RATIO
}

#[cfg(test)]
mod tests {
    use super::{KeywordScore, score, score_keywords, words_match};

    #[test]
    fn exact_match_scores_twenty_times_one_and_a_half() {
        let result = score_keywords("Almuerzo en McDonalds", &["mcdonalds"]);

        assert_eq!(
            result,
            KeywordScore {
                score: 30,
                has_exact_match: true,
                matched_keywords: vec!["mcdonalds".to_owned()],
            }
        );
    }

    #[test]
    fn exact_matches_accumulate_before_the_multiplier() {
        assert_eq!(score("Almuerzo en McDonalds", &["almuerzo", "mcdonalds"]), 60);
    }

    #[test]
    fn exact_match_ignores_case_and_accents() {
        let result = score_keywords("PAGO FARMACIA CRUZ VERDE", &["Farmacía"]);

        assert!(result.has_exact_match);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn multi_word_keyword_can_match_exactly() {
        let result = score_keywords("Cuenta de luz enero", &["cuenta de luz"]);

        assert!(result.has_exact_match);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn all_words_matching_with_a_long_word_scores_eight() {
        let result = score_keywords("pago cuenta electrica", &["cuentas electricas"]);

        assert_eq!(
            result,
            KeywordScore {
                score: 8,
                has_exact_match: false,
                matched_keywords: vec!["cuentas electricas".to_owned()],
            }
        );
    }

    #[test]
    fn all_words_matching_with_only_short_words_scores_four() {
        let result = score_keywords("uber taxi", &["taxi uber"]);

        assert_eq!(result.score, 4);
        assert!(!result.has_exact_match);
        assert_eq!(result.matched_keywords, vec!["taxi uber".to_owned()]);
    }

    #[test]
    fn partial_match_on_a_long_word_scores_one() {
        let result = score_keywords("pago de arriendo", &["arriendo de cancha"]);

        assert_eq!(result.score, 1);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn partial_match_on_short_words_scores_nothing() {
        assert_eq!(score("uber al aeropuerto", &["uber eats"]), 0);
    }

    #[test]
    fn filler_words_never_match() {
        assert_eq!(score("la casa de mi mama", &["de la"]), 0);
    }

    #[test]
    fn keyword_with_a_filler_word_never_fully_matches() {
        // "de" is skipped, so only two of the three words can ever match.
        assert_eq!(score("pago luz cuenta", &["cuenta de luz"]), 1);
    }

    #[test]
    fn multiplier_applies_to_partial_points_too() {
        // 20 for "uber" plus 1 for the partial "cuenta de luz", times 1.5, floored.
        assert_eq!(score("uber al aeropuerto cuentas", &["uber", "cuenta de luz"]), 31);
    }

    #[test]
    fn duplicate_keywords_are_scored_twice() {
        assert_eq!(score("uber centro", &["uber", "uber"]), 60);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score_keywords("", &["uber"]), KeywordScore::default());
    }

    #[test]
    fn empty_keywords_are_skipped() {
        assert_eq!(score("uber centro", &["", "!!!"]), 0);
    }

    #[test]
    fn exact_match_always_outscores_word_matches() {
        let keyword = ["cuentas electricas"];

        let exact = score("pago cuentas electricas", &keyword);
        let loose = score("pago cuenta electrica", &keyword);

        assert!(exact >= 20, "exact match scored {exact}");
        assert!(loose <= 8, "word match scored {loose}");
    }

    #[test]
    fn words_match_on_close_prefixes() {
        assert!(words_match("cuenta", "cuentas"));
        assert!(words_match("cuentas", "cuenta"));
        assert!(words_match("taxi", "taxi"));
    }

    #[test]
    fn words_do_not_match_on_distant_prefixes() {
        assert!(!words_match("metro", "metropolitano"));
        assert!(!words_match("bus", "buses"));
        assert!(!words_match("tour", "tourism"));
        assert!(!words_match("casa", "cosa"));
    }
}
