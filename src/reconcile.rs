//! Tree reconciler
//!
//! Object stores routinely omit marker objects for directories that were
//! never explicitly created, so a raw listing is sparse: a file can appear
//! with no trace of its ancestors. Padding saturates a node map with the
//! virtual directory nodes implied by the `dir` of every present node.

use crate::node::to_dir_storage_node;
use crate::paths::{remove_both_ends_slash, split_hierarchical_dir_paths};
use crate::types::NodeMap;

/// Insert a virtual `Dir` node for every missing ancestor directory.
///
/// With a `base_path`, ancestors above the scoping boundary are never
/// synthesized. Mutates the map in place; idempotent (a second pass inserts
/// nothing).
pub fn pad_virtual_dir_node(node_map: &mut NodeMap, base_path: Option<&str>) {
    let base = base_path.map(remove_both_ends_slash).unwrap_or("");
    let dirs: Vec<String> = node_map.values().map(|node| node.dir.clone()).collect();
    for dir_path in split_hierarchical_dir_paths(&dirs) {
        if !base.is_empty() && !dir_path.starts_with(base) {
            continue;
        }
        if node_map.contains_key(&dir_path) {
            continue;
        }
        node_map.insert(dir_path.clone(), to_dir_storage_node(&dir_path));
    }
}
