//! Entity store gateway: per-entity reads and writes over SeaORM.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so it runs on
//! the pool or inside a transaction. Soft-deleted rows are never returned.

pub mod categories;
pub mod customers;
pub mod products;
pub mod sellers;
pub mod users;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// `%term%` for ILIKE, with `\`, `%` and `_` in the term matched literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wildcards_in_search_terms_are_escaped() {
        assert_eq!(contains_pattern("linen"), "%linen%");
        assert_eq!(contains_pattern("50%"), r"%50\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\x"), r"%c:\\x%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
