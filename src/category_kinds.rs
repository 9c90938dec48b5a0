//! Which kind of transaction each built-in category belongs to.
//!
//! This table is kept apart from [crate::dictionary] on purpose: some
//! categories, like "Otros", have a kind but no keywords.

use crate::{normalize::normalize, transaction_kind::TransactionKind};

/// The kind registered for each built-in category.
pub static CATEGORY_KINDS: &[(&str, TransactionKind)] = &[
    ("Comida", TransactionKind::Expense),
    ("Supermercado", TransactionKind::Expense),
    ("Transporte", TransactionKind::Expense),
    ("Vivienda", TransactionKind::Expense),
    ("Servicios Básicos", TransactionKind::Expense),
    ("Salud", TransactionKind::Expense),
    ("Educación", TransactionKind::Expense),
    ("Entretenimiento", TransactionKind::Expense),
    ("Suscripciones", TransactionKind::Expense),
    ("Ropa", TransactionKind::Expense),
    ("Tecnología", TransactionKind::Expense),
    ("Cuidado Personal", TransactionKind::Expense),
    ("Mascotas", TransactionKind::Expense),
    ("Viajes", TransactionKind::Expense),
    ("Deporte", TransactionKind::Expense),
    ("Regalos", TransactionKind::Expense),
    ("Bancos y Comisiones", TransactionKind::Expense),
    ("Otros", TransactionKind::Expense),
    ("Sueldo", TransactionKind::Income),
    ("Freelance", TransactionKind::Income),
    ("Otros Ingresos", TransactionKind::Income),
    ("Inversiones", TransactionKind::Investment),
    ("Ahorro", TransactionKind::Investment),
];

/// Look up the kind of a category.
///
/// Exact names are tried first, then a normalized comparison so that a
/// user-typed "educacion" still resolves to "Educación". Categories that only
/// exist in a user's history return `None`.
pub fn kind_of(category: &str) -> Option<TransactionKind> {
    if let Some((_, kind)) = CATEGORY_KINDS.iter().find(|(name, _)| *name == category) {
        return Some(*kind);
    }

    let normalized = normalize(category);

    if normalized.is_empty() {
        return None;
    }

    CATEGORY_KINDS
        .iter()
        .find(|(name, _)| normalize(name) == normalized)
        .map(|(_, kind)| *kind)
}
