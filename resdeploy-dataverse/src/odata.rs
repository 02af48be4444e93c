//! Structured OData query building for the web-resource entity set.
//!
//! Filters are built from names here and nowhere else — call sites never
//! interpolate query syntax themselves.

use resdeploy_core::types::QualifiedName;

/// Build a disjunctive `$filter` matching any of `names` exactly.
///
/// `names` must be non-empty; a vacuous filter clause is never built.
pub(crate) fn name_filter(names: &[QualifiedName]) -> String {
    debug_assert!(!names.is_empty());
    names
        .iter()
        .map(|name| format!("name eq '{}'", escape(&name.0)))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Single quotes inside an OData string literal are doubled.
fn escape(value: &str) -> String {
    value.replace('\'', "''")
}
