//! Substring filter over the four contact text fields.
//!
//! # Invariants
//! - A blank (empty) filter matches every contact.
//! - User input is always a literal substring: `%`, `_` and `\` are escaped.
//! - Matching follows SQLite `LIKE`, which folds ASCII letters only.

/// Escape character used in generated `LIKE ... ESCAPE` clauses.
pub const LIKE_ESCAPE: char = '\\';

/// SQL fragment matching any of the four searchable columns.
///
/// Binds the same pattern once through the numbered parameter.
pub(crate) fn like_clause(param_index: usize) -> String {
    ["name", "phone", "email", "address"]
        .iter()
        .map(|column| format!("{column} LIKE ?{param_index} ESCAPE '\\'"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Normalizes an optional search text.
///
/// Returns `None` when the filter should match everything.
pub fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|text| !text.is_empty())
}

/// Builds a `%…%` substring pattern with wildcard characters escaped.
pub fn build_like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::{build_like_pattern, like_clause, normalize_filter};

    #[test]
    fn build_like_pattern_escapes_wildcards() {
        assert_eq!(build_like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(build_like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(build_like_pattern("smith"), "%smith%");
    }

    #[test]
    fn normalize_filter_treats_empty_as_absent() {
        assert_eq!(normalize_filter(None), None);
        assert_eq!(normalize_filter(Some("")), None);
        assert_eq!(normalize_filter(Some(" ")), Some(" "));
    }

    #[test]
    fn like_clause_covers_all_searchable_columns() {
        let clause = like_clause(1);
        for column in ["name", "phone", "email", "address"] {
            assert!(clause.contains(&format!("{column} LIKE ?1")));
        }
    }
}
