//! Categorizador suggests a category for a transaction from the free text a
//! user typed for it, e.g. "Almuerzo en McDonalds" or "pago luz enel".
//!
//! Suggestions come from the user's own history first and a built-in
//! dictionary of Chilean Spanish keywords second. This library provides the
//! engine and a small JSON API that serves it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod categorize_endpoint;
mod categorizer;
mod category;
mod category_kinds;
mod db;
mod dictionary;
mod endpoints;
mod history;
mod logging;
mod normalize;
mod routing;
mod scoring;
mod transaction;
mod transaction_kind;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use categorize_endpoint::CategorizeRequest;
pub use categorizer::{CategorizationResult, LOW_CONFIDENCE_THRESHOLD, categorize_transaction};
pub use category::{
    Category, CategoryName, ExistingCategories, create_category, get_existing_categories,
};
pub use category_kinds::kind_of;
pub use db::initialize as initialize_db;
pub use dictionary::{KEYWORD_DICTIONARY, keywords_for};
pub use history::{
    HistoricalMatch, HistoricalTransaction, SQLiteTransactionHistory, TransactionHistory,
    find_historical_patterns,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use normalize::normalize;
pub use routing::build_router;
pub use scoring::{KeywordScore, score, score_keywords};
pub use transaction::{Transaction, create_transaction};
pub use transaction_kind::TransactionKind;
pub use user::UserId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An empty string was used as a user ID.
    #[error("user ID cannot be empty")]
    EmptyUserId,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The user already has a category with this name.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The string is not the name of a transaction kind.
    #[error("\"{0}\" is not a transaction kind, expected Ingreso, Gasto or Inversión")]
    InvalidTransactionKind(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::EmptyUserId | Error::EmptyCategoryName | Error::InvalidTransactionKind(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::DuplicateCategoryName(_) => StatusCode::CONFLICT,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an unexpected error occurred" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn no_rows_is_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn client_errors_are_bad_requests() {
        for error in [
            Error::EmptyUserId,
            Error::EmptyCategoryName,
            Error::InvalidTransactionKind("Gastos varios".to_owned()),
        ] {
            assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn duplicate_category_is_a_conflict() {
        let response = Error::DuplicateCategoryName("Comida".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn sql_errors_are_internal_server_errors() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
