//! Shared utility functions used across multiple modules.

/// Split a comma-joined column value into trimmed, non-empty tokens.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
