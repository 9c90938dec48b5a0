//! Text normalization shared by every matching step.
//!
//! Transaction details are typed by hand on phones and copied from bank
//! statements, so "Café", "CAFE" and "cafe." all need to compare equal.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize `text` for locale-insensitive comparisons.
///
/// In order: lowercase, decompose and drop diacritics ("café" -> "cafe"),
/// replace anything that is not an ASCII letter, digit or whitespace with a
/// space, collapse runs of whitespace, and trim.
///
/// This never fails and is idempotent.
///
/// ```
/// use categorizador::normalize;
///
/// assert_eq!(normalize("  Pan de PASCUA, ¡rico!  "), "pan de pascua rico");
/// assert_eq!(normalize("CAFÉ"), "cafe");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split already normalized text into its words.
pub(crate) fn words(normalized_text: &str) -> Vec<&str> {
    normalized_text.split_whitespace().collect()
}
