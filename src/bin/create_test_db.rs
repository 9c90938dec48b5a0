use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use categorizador::{
    CategoryName, Transaction, TransactionKind, UserId, create_category, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for categorizador.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user to create categories and transactions for.
    #[arg(long, default_value = "test-user")]
    user_id: String,
}

const CATEGORIES: &[(&str, TransactionKind)] = &[
    ("Comida", TransactionKind::Expense),
    ("Transporte", TransactionKind::Expense),
    ("Supermercado", TransactionKind::Expense),
    ("Servicios Básicos", TransactionKind::Expense),
    ("Colaciones", TransactionKind::Expense),
    ("Sueldo", TransactionKind::Income),
    ("Ahorro", TransactionKind::Investment),
];

const TRANSACTIONS: &[(&str, &str, f64, TransactionKind)] = &[
    ("Almuerzo oficina centro", "Colaciones", 6_500.0, TransactionKind::Expense),
    ("Almuerzo en la oficina", "Colaciones", 7_200.0, TransactionKind::Expense),
    ("Uber a la pega", "Transporte", 4_300.0, TransactionKind::Expense),
    ("Compra Lider semanal", "Supermercado", 58_900.0, TransactionKind::Expense),
    ("Pago luz Enel", "Servicios Básicos", 32_100.0, TransactionKind::Expense),
    ("Sueldo marzo", "Sueldo", 1_250_000.0, TransactionKind::Income),
    ("Deposito cuenta ahorro", "Ahorro", 100_000.0, TransactionKind::Investment),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let user_id = UserId::new(&args.user_id)?;

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories for {user_id}...");

    for (name, kind) in CATEGORIES {
        create_category(&user_id, CategoryName::new(name)?, *kind, &conn)?;
    }

    println!("Creating transactions for {user_id}...");

    for (detail, category_name, amount, kind) in TRANSACTIONS {
        create_transaction(
            Transaction::build(user_id.clone(), *amount, date!(2025 - 03 - 01), *kind)
                .detail(detail)
                .category_name(category_name),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
