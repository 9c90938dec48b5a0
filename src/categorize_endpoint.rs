//! The route handler that suggests a category for a transaction detail.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    categorizer::categorize_transaction,
    category::get_existing_categories,
    history::SQLiteTransactionHistory,
    transaction_kind::TransactionKind,
    user::UserId,
};

/// The body of a request for a category suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeRequest {
    /// The free text the user typed for the transaction.
    #[serde(default)]
    pub detail: Option<String>,
    /// The user the transaction belongs to.
    pub user_id: String,
    /// The names of the categories the user already has.
    ///
    /// When omitted, the user's categories are read from the database.
    #[serde(default)]
    pub existing_categories: Option<Vec<String>>,
    /// The kind of transaction being entered.
    ///
    /// Only used when `existing_categories` is omitted, to limit the user's
    /// categories to the ones of this kind.
    #[serde(default)]
    pub kind: Option<TransactionKind>,
}

/// The state needed to categorize transactions.
#[derive(Debug, Clone)]
pub struct CategorizeState {
    /// The database connection for reading the user's categories.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Where the user's past transactions are read from.
    pub history: SQLiteTransactionHistory,
}

impl FromRef<AppState> for CategorizeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            history: SQLiteTransactionHistory::new(state.db_connection.clone()),
        }
    }
}

/// A route handler that returns a category suggestion for a transaction detail.
///
/// The response is always a suggestion, possibly with no category, unless the
/// user ID is blank.
pub async fn categorize_endpoint(
    State(state): State<CategorizeState>,
    Json(request): Json<CategorizeRequest>,
) -> Response {
    let user_id = match UserId::new(&request.user_id) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    let existing_categories = match request.existing_categories {
        Some(existing_categories) => existing_categories,
        None => load_existing_categories(&state, &user_id, request.kind),
    };

    let detail = request.detail.unwrap_or_default();

    let result = categorize_transaction(
        &detail,
        &user_id,
        Some(existing_categories.as_slice()),
        &state.history,
    )
    .await;

    tracing::info!(
        "suggested {:?} for user {user_id} with confidence {}",
        result.category,
        result.confidence
    );

    Json(result).into_response()
}

/// Read the names of the user's categories, limited to `kind` if given.
///
/// Failures are logged and treated as the user having no categories, so a
/// suggestion can still be made from the dictionary alone.
fn load_existing_categories(
    state: &CategorizeState,
    user_id: &UserId,
    kind: Option<TransactionKind>,
) -> Vec<String> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::warn!("could not acquire database lock: {error}");
            return Vec::new();
        }
    };

    match get_existing_categories(user_id, &connection) {
        Ok(existing) if existing.is_empty() => {
            tracing::debug!("user {user_id} has no categories");
            Vec::new()
        }
        Ok(existing) => match kind {
            Some(kind) => existing.for_kind(kind).to_vec(),
            None => existing.names(),
        },
        Err(error) => {
            tracing::warn!("could not load categories for user {user_id}: {error}");
            Vec::new()
        }
    }
}
