//! This file defines the `Category` type, the queries for a user's categories,
//! and the API route that lists them.
//!
//! Users create their own categories on top of the built-in ones. The
//! categorizer prefers a user's existing categories when they also match the
//! transaction detail.

use std::{
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, transaction_kind::TransactionKind, user::UserId};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type CategoryId = i64;

/// A category a user files transactions under, e.g. 'Comida', 'Sueldo', 'Fintual'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The user that created the category.
    pub user_id: UserId,
    /// The name of the category.
    pub name: CategoryName,
    /// The kind of transaction the category is for.
    pub kind: TransactionKind,
}

/// A user's category names, partitioned by transaction kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingCategories {
    /// Names of income categories.
    pub income: Vec<String>,
    /// Names of expense categories.
    pub expense: Vec<String>,
    /// Names of investment categories.
    pub investment: Vec<String>,
}

impl ExistingCategories {
    /// The names of the categories for `kind`.
    pub fn for_kind(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
            TransactionKind::Investment => &self.investment,
        }
    }

    /// Every category name regardless of kind, income first.
    pub fn names(&self) -> Vec<String> {
        TransactionKind::ALL
            .iter()
            .flat_map(|kind| self.for_kind(*kind).iter().cloned())
            .collect()
    }

    /// Whether the user has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty() && self.investment.is_empty()
    }

    fn push(&mut self, kind: TransactionKind, name: String) {
        match kind {
            TransactionKind::Income => self.income.push(name),
            TransactionKind::Expense => self.expense.push(name),
            TransactionKind::Investment => self.investment.push(name),
        }
    }
}

impl From<Vec<Category>> for ExistingCategories {
    fn from(categories: Vec<Category>) -> Self {
        let mut existing = ExistingCategories::default();

        for category in categories {
            existing.push(category.kind, category.name.0);
        }

        existing
    }
}

/// The state needed for the category routes.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that lists a user's categories partitioned by kind.
pub async fn get_user_categories_endpoint(
    State(state): State<CategoryState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(&user_id) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_existing_categories(&user_id, &connection) {
        Ok(existing) => Json(existing).into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve categories for user {user_id}: {error}");
            error.into_response()
        }
    }
}

/// Create a category in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategoryName] if the user already has a category with this name,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(
    user_id: &UserId,
    name: CategoryName,
    kind: TransactionKind,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (user_id, name, kind) VALUES (?1, ?2, ?3)
             RETURNING id, user_id, name, kind",
        )?
        .query_row((user_id.as_str(), name.as_ref(), kind), map_category_row)
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateCategoryName(name.to_string()),
            error => error.into(),
        })
}

/// Retrieve all of a user's categories, sorted by name.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_user_categories(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, kind FROM category
             WHERE user_id = :user_id
             ORDER BY name ASC",
        )?
        .query_map(&[(":user_id", user_id.as_str())], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a user's category names partitioned by kind.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_existing_categories(
    user_id: &UserId,
    connection: &Connection,
) -> Result<ExistingCategories, Error> {
    get_user_categories(user_id, connection).map(ExistingCategories::from)
}

/// Create the category table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                UNIQUE(user_id, name)
                )",
        (),
    )?;

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let kind = row.get(3)?;

    Ok(Category {
        id,
        user_id: UserId::new_unchecked(&user_id),
        name: CategoryName::new_unchecked(&name),
        kind,
    })
}


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, ExistingCategories, create_category, get_existing_categories},
        db::initialize,
        transaction_kind::TransactionKind,
        user::UserId,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_category_succeeds() {
        let conn = get_test_connection();
        let user_id = UserId::new_unchecked("user-1");
        let name = CategoryName::new_unchecked("Comida");

        let category = create_category(&user_id, name.clone(), TransactionKind::Expense, &conn)
            .expect("Could not create category");

        assert_eq!(category.user_id, user_id);
        assert_eq!(category.name, name);
        assert_eq!(category.kind, TransactionKind::Expense);
    }

    #[test]
    fn create_category_fails_on_duplicate_name() {
        let conn = get_test_connection();
        let user_id = UserId::new_unchecked("user-1");
        let name = CategoryName::new_unchecked("Comida");
        create_category(&user_id, name.clone(), TransactionKind::Expense, &conn)
            .expect("Could not create category");

        let duplicate = create_category(&user_id, name, TransactionKind::Expense, &conn);

        assert_eq!(duplicate, Err(Error::DuplicateCategoryName("Comida".to_owned())));
    }

    #[test]
    fn different_users_can_share_a_category_name() {
        let conn = get_test_connection();
        let name = CategoryName::new_unchecked("Comida");

        create_category(
            &UserId::new_unchecked("user-1"),
            name.clone(),
            TransactionKind::Expense,
            &conn,
        )
        .expect("Could not create category");
        let result = create_category(
            &UserId::new_unchecked("user-2"),
            name,
            TransactionKind::Expense,
            &conn,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn existing_categories_are_partitioned_by_kind() {
        let conn = get_test_connection();
        let user_id = UserId::new_unchecked("user-1");
        let categories = [
            ("Sueldo", TransactionKind::Income),
            ("Comida", TransactionKind::Expense),
            ("Fintual", TransactionKind::Investment),
            ("Arriendo", TransactionKind::Expense),
        ];
        for (name, kind) in categories {
            create_category(&user_id, CategoryName::new_unchecked(name), kind, &conn)
                .expect("Could not create category");
        }
        create_category(
            &UserId::new_unchecked("user-2"),
            CategoryName::new_unchecked("Mascotas"),
            TransactionKind::Expense,
            &conn,
        )
        .expect("Could not create category");

        let existing = get_existing_categories(&user_id, &conn).expect("Could not get categories");

        assert_eq!(
            existing,
            ExistingCategories {
                income: vec!["Sueldo".to_owned()],
                expense: vec!["Arriendo".to_owned(), "Comida".to_owned()],
                investment: vec!["Fintual".to_owned()],
            }
        );
        assert_eq!(existing.names(), vec!["Sueldo", "Arriendo", "Comida", "Fintual"]);
    }

    #[test]
    fn existing_categories_empty_for_new_user() {
        let conn = get_test_connection();

        let existing = get_existing_categories(&UserId::new_unchecked("new-user"), &conn)
            .expect("Could not get categories");

        assert!(existing.is_empty());
        assert!(existing.names().is_empty());
    }
}

#[cfg(test)]
mod endpoint_tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState,
        category::{
            CategoryName, ExistingCategories, create_category, get_user_categories_endpoint,
        },
        endpoints::{self, format_endpoint},
        transaction_kind::TransactionKind,
        user::UserId,
    };

    fn get_test_state() -> AppState {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");

        AppState::new(connection).expect("Could not create app state")
    }

    #[tokio::test]
    async fn lists_user_categories() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(
                &UserId::new_unchecked("user-1"),
                CategoryName::new_unchecked("Comida"),
                TransactionKind::Expense,
                &connection,
            )
            .unwrap();
        }
        let app = Router::new()
            .route(endpoints::USER_CATEGORIES, get(get_user_categories_endpoint))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server
            .get(&format_endpoint(endpoints::USER_CATEGORIES, "user-1"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<ExistingCategories>(),
            ExistingCategories {
                expense: vec!["Comida".to_owned()],
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn rejects_blank_user_id() {
        let app = Router::new()
            .route(endpoints::USER_CATEGORIES, get(get_user_categories_endpoint))
            .with_state(get_test_state());
        let server = TestServer::new(app);

        let response = server.get("/api/users/%20/categories").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
