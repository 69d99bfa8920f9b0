//! Path utilities
//!
//! Pure string functions over `/`-separated storage paths. No filesystem
//! semantics: paths here are object-storage key fragments, already free of
//! platform separators.

/// Strip at most one leading `/`.
pub fn remove_start_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Strip at most one trailing `/`.
pub fn remove_end_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Strip at most one slash from each end.
pub fn remove_both_ends_slash(path: &str) -> &str {
    remove_start_slash(remove_end_slash(path))
}

/// Split a file path into `(file_name, dir_path)` at the last `/`.
///
/// `dir_path` is `""` when the path has no separator.
pub fn split_file_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[idx + 1..], &path[..idx]),
        None => (path, ""),
    }
}

/// Explode directory paths into their full ancestor chains and return the
/// union, deduplicated with insertion order preserved.
///
/// `"a/b/c"` contributes `["a", "a/b", "a/b/c"]`. Empty segments are
/// filtered, so leading/trailing/double slashes are tolerated. This is the
/// basis of virtual directory padding: it names every directory level that
/// must exist for the inputs to be reachable.
pub fn split_hierarchical_dir_paths<I, S>(dir_paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for dir_path in dir_paths {
        let mut parent = String::new();
        for segment in dir_path.as_ref().split('/').filter(|s| !s.is_empty()) {
            let current = if parent.is_empty() {
                segment.to_string()
            } else {
                format!("{}/{}", parent, segment)
            };
            if !result.contains(&current) {
                result.push(current.clone());
            }
            parent = current;
        }
    }
    result
}
