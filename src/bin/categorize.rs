use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use categorizador::{
    SQLiteTransactionHistory, TransactionKind, UserId, categorize_transaction,
    get_existing_categories, initialize_db,
};

/// Suggest a category for a transaction detail using a categorizador database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The user whose history and categories are used.
    #[arg(long)]
    user_id: String,

    /// A category the user already has. May be repeated.
    ///
    /// When no category is given, the user's categories are read from the database.
    #[arg(long = "existing-category")]
    existing_categories: Vec<String>,

    /// Only consider the user's categories of this kind, e.g. "Gasto".
    #[arg(long)]
    kind: Option<TransactionKind>,

    /// The free text the user typed for the transaction.
    detail: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())),
        )
        .init();

    let args = Args::parse();

    let user_id = UserId::new(&args.user_id)?;
    let connection = Connection::open(&args.db_path)?;
    initialize_db(&connection)?;

    let existing_categories = if args.existing_categories.is_empty() {
        let existing = get_existing_categories(&user_id, &connection)?;

        match args.kind {
            Some(kind) => existing.for_kind(kind).to_vec(),
            None => existing.names(),
        }
    } else {
        args.existing_categories
    };

    let history = SQLiteTransactionHistory::new(Arc::new(Mutex::new(connection)));

    let result = categorize_transaction(
        &args.detail,
        &user_id,
        Some(existing_categories.as_slice()),
        &history,
    )
    .await;

    let json = serde_json::to_string_pretty(&result)
        .map_err(|error| categorizador::Error::JSONSerializationError(error.to_string()))?;
    println!("{json}");

    if result.is_low_confidence() {
        eprintln!("Low confidence suggestion, check it before using it.");
    }

    Ok(())
}
