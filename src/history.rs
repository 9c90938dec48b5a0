//! Finds the category a user has already used for transactions like this one.
//!
//! People describe recurring spending the same way every time ("almuerzo
//! oficina", "bencina camioneta"), so a user's own history is a better guide
//! than the built-in dictionary once it exists.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    normalize::{normalize, words},
    transaction::get_categorized_details,
    user::UserId,
};

/// Words this short are not considered when comparing details.
const MAX_IGNORED_WORD_LENGTH: usize = 2;
/// A past transaction sharing at least this many words is similar.
const MIN_SHARED_WORDS: usize = 2;
/// A past transaction sharing more than this share of the words is similar.
const MIN_SHARED_WORD_RATIO: f64 = 0.6;

/// The detail and category of one of a user's past transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalTransaction {
    /// The free text the user typed for the transaction.
    pub detail: String,
    /// The category the transaction was filed under.
    pub category_name: String,
}

/// Where the categorizer gets a user's past transactions from.
pub trait TransactionHistory {
    /// Fetch every past transaction of `user_id` that has both a detail and a
    /// category, in the order they were recorded.
    fn categorized_details(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<HistoricalTransaction>, Error>> + Send;
}

/// Reads a user's history from the app's SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionHistory {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionHistory {
    /// Create a history backed by `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionHistory for SQLiteTransactionHistory {
    async fn categorized_details(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HistoricalTransaction>, Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        get_categorized_details(user_id, &connection)
    }
}

/// The category most often used for transactions similar to a detail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoricalMatch {
    /// The most common category among similar past transactions, if any were similar.
    pub category: Option<String>,
    /// How many similar past transactions used `category`.
    pub count: u32,
}

/// Find the category the user most often used for transactions similar to `detail`.
///
/// A past transaction is similar when at least two words of `detail` longer than
/// two characters appear in its detail, or when those words make up more than
/// 60% of the words in `detail`. Ties go to the category seen first.
///
/// Failing to fetch the history is logged and treated as having no history,
/// so this never returns an error.
pub async fn find_historical_patterns<H: TransactionHistory>(
    detail: &str,
    user_id: &UserId,
    history: &H,
) -> HistoricalMatch {
    let normalized_detail = normalize(detail);
    let detail_words = words(&normalized_detail);
    let significant_words: Vec<&str> = detail_words
        .iter()
        .copied()
        .filter(|word| word.len() > MAX_IGNORED_WORD_LENGTH)
        .collect();

    if significant_words.is_empty() {
        return HistoricalMatch::default();
    }

    let past_transactions = match history.categorized_details(user_id).await {
        Ok(past_transactions) => past_transactions,
        Err(error) => {
            tracing::warn!("could not fetch transaction history for user {user_id}: {error}");
            return HistoricalMatch::default();
        }
    };

    // A Vec rather than a map so the first category to reach the maximum wins.
    let mut tallies: Vec<(String, u32)> = Vec::new();

    for past_transaction in past_transactions {
        let past_detail = normalize(&past_transaction.detail);
        let similarity = significant_words
            .iter()
            .filter(|word| past_detail.contains(*word))
            .count();

        let is_similar = similarity >= MIN_SHARED_WORDS
            || similarity as f64 / detail_words.len() as f64 > MIN_SHARED_WORD_RATIO;

        if !is_similar {
            continue;
        }

        match tallies
            .iter_mut()
            .find(|(category, _)| *category == past_transaction.category_name)
        {
            Some((_, count)) => *count += 1,
            None => tallies.push((past_transaction.category_name, 1)),
        }
    }

    let mut best = HistoricalMatch::default();

    for (category, count) in tallies {
        if count > best.count {
            best = HistoricalMatch {
                category: Some(category),
                count,
            };
        }
    }

    tracing::debug!(
        "historical match for {detail:?}: {:?} ({} similar)",
        best.category,
        best.count
    );

    best
}
