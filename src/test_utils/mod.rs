#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    Error,
    history::{HistoricalTransaction, TransactionHistory},
    user::UserId,
};

/// An in-memory transaction history that records how often it was asked.
#[derive(Debug, Default)]
pub(crate) struct StubHistory {
    transactions: Vec<HistoricalTransaction>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubHistory {
    /// A history holding `(detail, category_name)` pairs, oldest first.
    pub(crate) fn new(transactions: &[(&str, &str)]) -> Self {
        Self {
            transactions: transactions
                .iter()
                .map(|(detail, category_name)| HistoricalTransaction {
                    detail: (*detail).to_owned(),
                    category_name: (*category_name).to_owned(),
                })
                .collect(),
            ..Default::default()
        }
    }

    /// A history with no transactions.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// A history whose every fetch fails.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// How many times the history has been fetched.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransactionHistory for StubHistory {
    async fn categorized_details(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<HistoricalTransaction>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            Err(Error::DatabaseLockError)
        } else {
            Ok(self.transactions.clone())
        }
    }
}
