//! Label scanning helpers.
//!
//! Route labels are plain strings inspected byte-by-byte. Every split
//! point produced here lands on an ASCII `/`, `:` or `*`, so slicing a
//! label at a returned index always preserves UTF-8 validity.

/// Length of the longest shared byte prefix of `a` and `b`.
#[must_use]
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Index of the first parameter or wildcard marker in `s`.
#[must_use]
pub(crate) fn find_variable(s: &str) -> Option<usize> {
    s.as_bytes().iter().position(|&b| b == b':' || b == b'*')
}

/// Index of the first parameter marker (`:`) in `s`.
#[must_use]
pub(crate) fn find_parameter(s: &str) -> Option<usize> {
    s.as_bytes().iter().position(|&b| b == b':')
}

/// Index of the first wildcard marker (`*`) in `s`.
#[must_use]
pub(crate) fn find_wildcard(s: &str) -> Option<usize> {
    s.as_bytes().iter().position(|&b| b == b'*')
}

/// Index of the first `/` in `s`.
///
/// Returns `(index, true)` when a separator exists, `(s.len(), false)`
/// when the segment runs to the end of the string.
#[must_use]
pub(crate) fn find_segment_end(s: &str) -> (usize, bool) {
    match s.as_bytes().iter().position(|&b| b == b'/') {
        Some(idx) => (idx, true),
        None => (s.len(), false),
    }
}

/// Whether `s` can label the root of a tree: non-empty and `/`-leading.
#[must_use]
pub(crate) fn is_valid_root_label(s: &str) -> bool {
    s.as_bytes().first() == Some(&b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_of_disjoint_strings_is_zero() {
        assert_eq!(common_prefix_len("foo", "bar"), 0);
    }

    #[test]
    fn common_prefix_stops_at_first_difference() {
        assert_eq!(common_prefix_len("/api/v1/users", "/api/v2/users"), 6);
    }

    #[test]
    fn common_prefix_handles_containment() {
        assert_eq!(common_prefix_len("/users", "/users/42"), 6);
        assert_eq!(common_prefix_len("/users/42", "/users"), 6);
        assert_eq!(common_prefix_len("", "/users"), 0);
    }

    #[test]
    fn find_variable_reports_first_marker() {
        assert_eq!(find_variable("/users/:id"), Some(7));
        assert_eq!(find_variable("/files/*path"), Some(7));
        assert_eq!(find_variable("/:a/*b"), Some(1));
        assert_eq!(find_variable("/plain"), None);
    }

    #[test]
    fn find_parameter_ignores_wildcards() {
        assert_eq!(find_parameter("/files/*path"), None);
        assert_eq!(find_parameter(":id"), Some(0));
    }

    #[test]
    fn find_wildcard_ignores_parameters() {
        assert_eq!(find_wildcard("/users/:id"), None);
        assert_eq!(find_wildcard("*rest"), Some(0));
    }

    #[test]
    fn segment_end_with_and_without_separator() {
        assert_eq!(find_segment_end(":id/sites"), (3, true));
        assert_eq!(find_segment_end(":id"), (3, false));
        assert_eq!(find_segment_end(""), (0, false));
        assert_eq!(find_segment_end("/"), (0, true));
    }

    #[test]
    fn root_label_requires_leading_slash() {
        assert!(is_valid_root_label("/"));
        assert!(is_valid_root_label("/users"));
        assert!(!is_valid_root_label("users"));
        assert!(!is_valid_root_label(""));
    }
}
