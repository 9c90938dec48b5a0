//! Suggests a category for a new transaction from its free text detail.
//!
//! The user's own history is consulted first. If it is not conclusive, the
//! detail is scored against every category in the built-in dictionary and the
//! best match wins, with a nudge towards categories the user already has.
//!
//! Nothing here writes anything. The caller decides whether to apply the
//! suggestion, usually after saving the transaction with a placeholder.

use serde::{Deserialize, Serialize};

use crate::{
    category_kinds::kind_of,
    dictionary::KEYWORD_DICTIONARY,
    history::{HistoricalMatch, TransactionHistory, find_historical_patterns},
    normalize::{normalize, words},
    scoring::score_normalized,
    transaction_kind::TransactionKind,
    user::UserId,
};

/// Suggestions with less confidence than this should be flagged to the user.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 60;

/// This many similar past transactions make history override the dictionary.
const STRONG_HISTORY_COUNT: u32 = 2;
const STRONG_HISTORY_BASE_CONFIDENCE: u32 = 60;
const STRONG_HISTORY_CONFIDENCE_PER_MATCH: u32 = 10;
const MAX_HISTORY_CONFIDENCE: u32 = 90;
const WEAK_HISTORY_CONFIDENCE: u8 = 30;

/// Added to an exactly matching category the user already has.
const EXISTING_CATEGORY_BOOST: u32 = 15;
const CONFIDENCE_PER_POINT: u32 = 5;
const MAX_DICTIONARY_CONFIDENCE: u32 = 95;

const NO_DETAIL_REASON: &str = "no detail to categorize";
const NO_MATCH_REASON: &str = "could not auto-categorize";

/// A suggested category for a transaction.
///
/// `confidence` is zero exactly when `category` is `None`, and `reasons` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationResult {
    /// The suggested category name.
    pub category: Option<String>,
    /// The kind registered for `category`, if it has one.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// How sure the suggestion is, from 0 to 100.
    pub confidence: u8,
    /// Human readable explanations of how the suggestion was reached.
    pub reasons: Vec<String>,
}

impl CategorizationResult {
    fn suggest(category: String, confidence: u8, reasons: Vec<String>) -> Self {
        Self {
            kind: kind_of(&category),
            category: Some(category),
            confidence,
            reasons,
        }
    }

    fn none(reason: &str) -> Self {
        Self {
            category: None,
            kind: None,
            confidence: 0,
            reasons: vec![reason.to_owned()],
        }
    }

    /// Whether the suggestion should be shown as low confidence, or not at all.
    pub fn is_low_confidence(&self) -> bool {
        self.confidence < LOW_CONFIDENCE_THRESHOLD
    }
}

/// A dictionary category that scored above zero for a detail.
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    name: &'static str,
    score: u32,
    has_exact_match: bool,
    matched_keywords: Vec<String>,
}

/// Suggest a category for a transaction described by `detail`.
///
/// `existing_categories` are the names of the categories the user already
/// has. When given, an exactly matching dictionary category with the same name
/// gets a boost over categories the user has never used.
///
/// This always returns a result. A blank detail returns immediately without
/// looking at the user's history, and a history that cannot be fetched is
/// treated as empty.
pub async fn categorize_transaction<H: TransactionHistory>(
    detail: &str,
    user_id: &UserId,
    existing_categories: Option<&[String]>,
    history: &H,
) -> CategorizationResult {
    if detail.trim().is_empty() {
        return CategorizationResult::none(NO_DETAIL_REASON);
    }

    let historical_match = find_historical_patterns(detail, user_id, history).await;

    if let HistoricalMatch {
        category: Some(category),
        count,
    } = &historical_match
    {
        if *count >= STRONG_HISTORY_COUNT {
            let confidence = MAX_HISTORY_CONFIDENCE
                .min(STRONG_HISTORY_BASE_CONFIDENCE + count * STRONG_HISTORY_CONFIDENCE_PER_MATCH);

            tracing::debug!("categorized {detail:?} as {category} from {count} past transactions");

            return CategorizationResult::suggest(
                category.clone(),
                confidence as u8,
                vec![format!(
                    "{count} similar past transactions were categorized as {category}"
                )],
            );
        }
    }

    let candidates = rank_candidates(detail);
    let selected = select_candidate(&candidates, existing_categories.unwrap_or_default());

    if let Some((candidate, score, boosted)) = selected {
        let confidence = MAX_DICTIONARY_CONFIDENCE.min(score * CONFIDENCE_PER_POINT);

        let mut reasons = vec![if candidate.matched_keywords.is_empty() {
            format!("partially matched {} keywords", candidate.name)
        } else {
            format!(
                "matched {} keywords: {}",
                candidate.name,
                candidate.matched_keywords.join(", ")
            )
        }];

        if boosted {
            reasons.push(format!("{} is one of your categories", candidate.name));
        }

        match &historical_match.category {
            Some(historical_category) if historical_category != candidate.name => {
                reasons.push(format!(
                    "you might also consider {historical_category}, used for a similar past transaction"
                ));
            }
            _ => {}
        }

        tracing::debug!(
            "categorized {detail:?} as {} with score {score} (boosted: {boosted})",
            candidate.name
        );

        return CategorizationResult::suggest(
            candidate.name.to_owned(),
            confidence as u8,
            reasons,
        );
    }

    if let Some(category) = historical_match.category {
        tracing::debug!("categorized {detail:?} as {category} from a single past transaction");

        return CategorizationResult::suggest(
            category.clone(),
            WEAK_HISTORY_CONFIDENCE,
            vec![format!(
                "weak suggestion: one similar past transaction was categorized as {category}"
            )],
        );
    }

    tracing::debug!("could not categorize {detail:?}");

    CategorizationResult::none(NO_MATCH_REASON)
}

/// Score `detail` against every dictionary category and rank the matches.
///
/// If any category matched a keyword exactly, only exactly matching categories
/// are returned. Candidates are sorted by descending score, with ties kept in
/// dictionary order.
fn rank_candidates(detail: &str) -> Vec<Candidate> {
    let normalized_detail = normalize(detail);
    let detail_words = words(&normalized_detail);

    let mut candidates: Vec<Candidate> = KEYWORD_DICTIONARY
        .iter()
        .filter_map(|&(name, keywords)| {
            let result = score_normalized(&normalized_detail, &detail_words, keywords);

            (result.score > 0).then(|| Candidate {
                name,
                score: result.score,
                has_exact_match: result.has_exact_match,
                matched_keywords: result.matched_keywords,
            })
        })
        .collect();

    if candidates.iter().any(|candidate| candidate.has_exact_match) {
        candidates.retain(|candidate| candidate.has_exact_match);
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    candidates
}

/// Pick the winning candidate, returning it with its final score and whether
/// it won because of the existing category boost.
///
/// Only candidates with an exact match can be boosted, and a boosted candidate
/// only wins if its boosted score beats the best score so far.
fn select_candidate<'a>(
    candidates: &'a [Candidate],
    existing_categories: &[String],
) -> Option<(&'a Candidate, u32, bool)> {
    let top = candidates.first()?;
    let mut selected = (top, top.score, false);

    for candidate in candidates {
        if !candidate.has_exact_match || !is_existing_category(candidate.name, existing_categories)
        {
            continue;
        }

        let boosted_score = candidate.score + EXISTING_CATEGORY_BOOST;

        if boosted_score > selected.1 {
            selected = (candidate, boosted_score, true);
        }
    }

    Some(selected)
}

fn is_existing_category(name: &str, existing_categories: &[String]) -> bool {
    let normalized_name = normalize(name);

    existing_categories.iter().any(|existing| {
        existing.to_lowercase() == name.to_lowercase() || normalize(existing) == normalized_name
    })
}
