//! Defines the transaction model and the queries the categorizer needs from it.
//!
//! Transactions are owned by the rest of the app. The categorizer only ever
//! reads them, but creating them lives here too so the store can be seeded and
//! tested.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, history::HistoricalTransaction, transaction_kind::TransactionKind, user::UserId,
};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// An expense, income or investment recorded by a user.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user who recorded the transaction.
    pub user_id: UserId,
    /// The amount of money involved.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// The free text the user typed to describe the transaction, if any.
    pub detail: Option<String>,
    /// The name of the category the transaction was filed under, if any.
    pub category_name: Option<String>,
    /// Whether this was income, an expense or an investment.
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        user_id: UserId,
        amount: f64,
        date: Date,
        kind: TransactionKind,
    ) -> TransactionBuilder {
        TransactionBuilder {
            user_id,
            amount,
            date,
            kind,
            detail: None,
            category_name: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Transaction::build(user_id, 4_990.0, date!(2025-03-14), TransactionKind::Expense)
///     .detail("Almuerzo en McDonalds")
///     .category_name("Comida");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The user recording the transaction.
    pub user_id: UserId,
    /// The amount of money involved.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether this is income, an expense or an investment.
    pub kind: TransactionKind,
    /// The free text description.
    pub detail: Option<String>,
    /// The category the transaction is filed under.
    pub category_name: Option<String>,
}

impl TransactionBuilder {
    /// Set the detail text for the transaction.
    pub fn detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_owned());
        self
    }

    /// Set the category name for the transaction.
    pub fn category_name(mut self, category_name: &str) -> Self {
        self.category_name = Some(category_name.to_owned());
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, date, detail, category_name, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, amount, date, detail, category_name, kind",
        )?
        .query_row(
            (
                builder.user_id.as_str(),
                builder.amount,
                builder.date,
                builder.detail,
                builder.category_name,
                builder.kind,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve the detail and category of every past transaction of `user_id`
/// that has both, oldest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_categorized_details(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<HistoricalTransaction>, Error> {
    connection
        .prepare(
            "SELECT detail, category_name FROM \"transaction\"
             WHERE user_id = :user_id AND detail IS NOT NULL AND category_name IS NOT NULL
             ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", user_id.as_str())], |row| {
            Ok(HistoricalTransaction {
                detail: row.get(0)?,
                category_name: row.get(1)?,
            })
        })?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                detail TEXT,
                category_name TEXT,
                kind TEXT NOT NULL
                )",
        (),
    )?;

    // The historical lookup always filters by user.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id: String = row.get(1)?;
    let amount = row.get(2)?;
    let date = row.get(3)?;
    let detail = row.get(4)?;
    let category_name = row.get(5)?;
    let kind = row.get(6)?;

    Ok(Transaction {
        id,
        user_id: UserId::new_unchecked(&user_id),
        amount,
        date,
        detail,
        category_name,
        kind,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        history::HistoricalTransaction,
        transaction::{Transaction, create_transaction, get_categorized_details},
        transaction_kind::TransactionKind,
        user::UserId,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let user_id = UserId::new_unchecked("user-1");

        let result = create_transaction(
            Transaction::build(
                user_id.clone(),
                4990.0,
                date!(2025 - 03 - 14),
                TransactionKind::Expense,
            )
            .detail("Almuerzo en McDonalds")
            .category_name("Comida"),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.user_id, user_id);
                assert_eq!(transaction.amount, 4990.0);
                assert_eq!(transaction.detail.as_deref(), Some("Almuerzo en McDonalds"));
                assert_eq!(transaction.category_name.as_deref(), Some("Comida"));
                assert_eq!(transaction.kind, TransactionKind::Expense);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn categorized_details_skip_missing_fields_and_other_users() {
        let conn = get_test_connection();
        let user_id = UserId::new_unchecked("user-1");
        let other_user = UserId::new_unchecked("user-2");
        let today = date!(2025 - 03 - 14);

        let builders = [
            Transaction::build(user_id.clone(), 1.0, today, TransactionKind::Expense)
                .detail("pan amasado")
                .category_name("Supermercado"),
            Transaction::build(user_id.clone(), 2.0, today, TransactionKind::Expense)
                .detail("sin categoria"),
            Transaction::build(user_id.clone(), 3.0, today, TransactionKind::Expense)
                .category_name("Comida"),
            Transaction::build(other_user, 4.0, today, TransactionKind::Expense)
                .detail("bencina")
                .category_name("Transporte"),
            Transaction::build(user_id.clone(), 5.0, today, TransactionKind::Income)
                .detail("sueldo marzo")
                .category_name("Sueldo"),
        ];
        for builder in builders {
            create_transaction(builder, &conn).expect("Could not create transaction");
        }

        let got = get_categorized_details(&user_id, &conn).expect("Could not get history");

        assert_eq!(
            got,
            vec![
                HistoricalTransaction {
                    detail: "pan amasado".to_owned(),
                    category_name: "Supermercado".to_owned(),
                },
                HistoricalTransaction {
                    detail: "sueldo marzo".to_owned(),
                    category_name: "Sueldo".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn categorized_details_empty_for_unknown_user() {
        let conn = get_test_connection();

        let got = get_categorized_details(&UserId::new_unchecked("nobody"), &conn)
            .expect("Could not get history");

        assert!(got.is_empty());
    }
}
