//! Directory summarizer
//!
//! Reduces a list of directory paths to its most-specific members: the
//! minimal set such that materializing each retained path (with all its
//! ancestors) covers every input. Callers use this to issue the fewest
//! directory-creation calls.

use crate::paths::remove_both_ends_slash;

/// Whether `path` equals `ancestor` or lives underneath it.
///
/// Segment-aware: `"dir1"` is not an ancestor of `"dir10"`. Plain
/// `starts_with` would conflate sibling names sharing a prefix.
fn is_descendant_or_equal(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Reduce `dir_paths` to the minimal covering set of maximal paths.
///
/// No retained path is an ancestor of (or equal to) another retained path:
/// a new path already covered by a deeper entry is dropped, and a new path
/// deeper than an existing entry replaces it. First-seen order of the
/// surviving branches is preserved.
pub fn summarize_dir_paths<I, S>(dir_paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    'next_path: for dir_path in dir_paths {
        let dir_path = remove_both_ends_slash(dir_path.as_ref()).to_string();
        if dir_path.is_empty() {
            continue;
        }
        for retained in result.iter_mut() {
            if is_descendant_or_equal(retained, &dir_path) {
                // A deeper (or identical) path is already retained
                continue 'next_path;
            }
            if is_descendant_or_equal(&dir_path, retained) {
                *retained = dir_path;
                continue 'next_path;
            }
        }
        result.push(dir_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_deepest_paths_only() {
        let result = summarize_dir_paths(["dir1/dir1-1", "dir1/dir1-1/dir1-1-1", "dir2/dir2-1"]);
        assert_eq!(result, vec!["dir1/dir1-1/dir1-1-1", "dir2/dir2-1"]);
    }

    #[test]
    fn test_descendant_first_drops_later_ancestor() {
        let result = summarize_dir_paths(["a/b/c", "a/b", "a"]);
        assert_eq!(result, vec!["a/b/c"]);
    }

    #[test]
    fn test_ancestor_first_is_replaced_by_descendant() {
        let result = summarize_dir_paths(["a", "a/b", "a/b/c"]);
        assert_eq!(result, vec!["a/b/c"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let result = summarize_dir_paths(["a/b", "a/b"]);
        assert_eq!(result, vec!["a/b"]);
    }

    #[test]
    fn test_sibling_names_sharing_a_prefix_are_distinct() {
        // Earlier implementations compared with a plain starts_with, which
        // treated "dir10" as living under "dir1". Segment-aware comparison
        // keeps both.
        let result = summarize_dir_paths(["dir1", "dir10"]);
        assert_eq!(result, vec!["dir1", "dir10"]);

        let result = summarize_dir_paths(["dir1/a", "dir10/a"]);
        assert_eq!(result, vec!["dir1/a", "dir10/a"]);
    }

    #[test]
    fn test_no_output_is_ancestor_of_another() {
        let result = summarize_dir_paths(["x/y", "x/y/z", "x", "w/v", "w"]);
        for a in &result {
            for b in &result {
                if a != b {
                    assert!(!is_descendant_or_equal(b, a), "{} covers {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_empty_and_slash_only_inputs_are_skipped() {
        let result = summarize_dir_paths(["", "/", "a"]);
        assert_eq!(result, vec!["a"]);
    }
}
