//! The kinds of transaction a category can belong to.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{Error, normalize::normalize};

/// Whether money came in, went out, or was put to work.
///
/// The app's labels are Spanish, so that is what gets stored and sent over
/// the wire: "Ingreso", "Gasto" and "Inversión".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money earned, e.g. salary or a refund.
    #[serde(rename = "Ingreso")]
    Income,
    /// Money spent.
    #[serde(rename = "Gasto")]
    Expense,
    /// Money moved into savings or investment products.
    #[serde(rename = "Inversión")]
    Investment,
}

impl TransactionKind {
    /// All kinds, in the order the app lists them.
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Income,
        TransactionKind::Expense,
        TransactionKind::Investment,
    ];

    /// The label shown to users and stored in the database.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Ingreso",
            TransactionKind::Expense => "Gasto",
            TransactionKind::Investment => "Inversión",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parse a kind from either its Spanish label or its English name.
    ///
    /// Case and accents are ignored, so "inversion" and "INVERSIÓN" both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ingreso" | "income" => Ok(TransactionKind::Income),
            "gasto" | "expense" => Ok(TransactionKind::Expense),
            "inversion" | "investment" => Ok(TransactionKind::Investment),
            _ => Err(Error::InvalidTransactionKind(s.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
