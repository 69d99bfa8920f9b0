//! Storage node model
//!
//! Classification of raw backend keys into file and directory nodes. The
//! trailing-slash rule here is the sole typing rule in the engine: it applies
//! identically to keys returned by a real backend listing and to paths
//! synthesized by the reconciler.

use crate::backend::ObjectHandle;
use crate::paths::{remove_both_ends_slash, split_file_path};
use serde::{Deserialize, Serialize};

/// Node classification.
///
/// Serialized as the strings `"File"` / `"Dir"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageNodeType {
    File,
    Dir,
}

/// A single node of the reconciled tree.
///
/// `path` is always `dir + "/" + name` (or `name` alone at the root) and
/// carries no leading or trailing separator. The backend handle is attached
/// only to nodes actually present in the backend; it is a runtime
/// association, not wire data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageNode {
    pub node_type: StorageNodeType,
    /// Last path segment, separator-free.
    pub name: String,
    /// Parent directory path, separator-free at both ends. Empty for
    /// root-level nodes.
    pub dir: String,
    /// Full relative node path.
    pub path: String,
    #[serde(skip)]
    pub handle: Option<ObjectHandle>,
}

impl StorageNode {
    /// A node is virtual iff it was synthesized by the reconciler rather
    /// than observed in the backend.
    pub fn is_virtual(&self) -> bool {
        self.handle.is_none()
    }
}

/// Classify a raw key: `Dir` iff it ends with a path separator.
pub fn storage_node_type(raw_key: &str) -> StorageNodeType {
    if raw_key.ends_with('/') {
        StorageNodeType::Dir
    } else {
        StorageNodeType::File
    }
}

/// Convert a raw backend key into a node relative to `base_path`.
///
/// The both-ends-trimmed base path is removed as a literal first-occurrence
/// prefix (plain string replace, not a glob), the remainder is trimmed, and
/// name/dir split at the last `/`. The type comes from the raw, pre-strip
/// key. No handle is attached here; callers attach one for keys that came
/// from an actual listing.
pub fn to_storage_node(raw_key: &str, base_path: &str) -> StorageNode {
    let base = remove_both_ends_slash(base_path);
    let stripped = if base.is_empty() {
        raw_key.to_string()
    } else {
        raw_key.replacen(base, "", 1)
    };
    let relative = remove_both_ends_slash(&stripped);
    let (name, dir) = split_file_path(relative);
    let path = if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    };
    StorageNode {
        node_type: storage_node_type(raw_key),
        name: name.to_string(),
        dir: dir.to_string(),
        path,
        handle: None,
    }
}

/// Synthesize a directory node from an already-relative directory path.
///
/// No base-path stripping occurs and no handle is attached: the result is a
/// virtual node until a caller materializes a marker for it.
pub fn to_dir_storage_node(dir_path: &str) -> StorageNode {
    let relative = remove_both_ends_slash(dir_path);
    let (name, dir) = split_file_path(relative);
    StorageNode {
        node_type: StorageNodeType::Dir,
        name: name.to_string(),
        dir: dir.to_string(),
        path: relative.to_string(),
        handle: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_classifies_dir() {
        assert_eq!(storage_node_type("a/b/"), StorageNodeType::Dir);
        assert_eq!(storage_node_type("a/b"), StorageNodeType::File);
        assert_eq!(storage_node_type("a.txt"), StorageNodeType::File);
    }

    #[test]
    fn test_to_storage_node_without_base_path() {
        let node = to_storage_node("a/b/c.txt", "");
        assert_eq!(node.node_type, StorageNodeType::File);
        assert_eq!(node.name, "c.txt");
        assert_eq!(node.dir, "a/b");
        assert_eq!(node.path, "a/b/c.txt");
        assert!(node.is_virtual());
    }

    #[test]
    fn test_to_storage_node_strips_base_path() {
        let node = to_storage_node("users/u1/photos/x.png", "users/u1");
        assert_eq!(node.node_type, StorageNodeType::File);
        assert_eq!(node.name, "x.png");
        assert_eq!(node.dir, "photos");
        assert_eq!(node.path, "photos/x.png");
    }

    #[test]
    fn test_base_path_is_trimmed_before_stripping() {
        let node = to_storage_node("users/u1/a/", "/users/u1/");
        assert_eq!(node.node_type, StorageNodeType::Dir);
        assert_eq!(node.path, "a");
        assert_eq!(node.dir, "");
    }

    #[test]
    fn test_type_comes_from_raw_key() {
        // The relative remainder has no trailing slash after trimming; the
        // raw key decides the type.
        let node = to_storage_node("a/b/", "");
        assert_eq!(node.node_type, StorageNodeType::Dir);
        assert_eq!(node.path, "a/b");
    }

    #[test]
    fn test_to_dir_storage_node() {
        let node = to_dir_storage_node("a/b/c");
        assert_eq!(node.node_type, StorageNodeType::Dir);
        assert_eq!(node.name, "c");
        assert_eq!(node.dir, "a/b");
        assert_eq!(node.path, "a/b/c");
        assert!(node.is_virtual());
    }

    #[test]
    fn test_path_round_trips_from_dir_and_name() {
        for key in ["a/b/c.txt", "root.txt", "x/", "x/y/z/"] {
            let node = to_storage_node(key, "");
            let expected = if node.dir.is_empty() {
                node.name.clone()
            } else {
                format!("{}/{}", node.dir, node.name)
            };
            assert_eq!(node.path, expected);
        }
    }

    #[test]
    fn test_serialized_shape_uses_camel_case_and_string_enum() {
        let node = to_dir_storage_node("a/b");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["nodeType"], "Dir");
        assert_eq!(json["name"], "b");
        assert_eq!(json["dir"], "a");
        assert_eq!(json["path"], "a/b");
        // The handle is runtime-only
        assert!(json.get("handle").is_none());
    }
}
