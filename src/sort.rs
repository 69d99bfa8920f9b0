//! Node sorter
//!
//! Total order over nodes yielding a flattened pre-order-like tree listing
//! without explicit recursion: within a directory, subdirectories come
//! before files, ties broken lexicographically.

use crate::node::{StorageNode, StorageNodeType};
use std::cmp::Ordering;

/// Sort nodes for hierarchical display. `desc` flips the final ordering.
pub fn sort_storage_nodes(nodes: &mut [StorageNode], desc: bool) {
    nodes.sort_by(|a, b| {
        let ord = sort_key(a).cmp(&sort_key(b));
        if desc {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Compare two nodes in ascending display order.
pub fn compare_storage_nodes(a: &StorageNode, b: &StorageNode) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

// U+FFFF sorts after every character that can appear in a path (UTF-8 byte
// order is code-point order), so a file key sorts below every directory
// entry sharing its `dir` prefix.
fn sort_key(node: &StorageNode) -> String {
    match node.node_type {
        StorageNodeType::File => format!("{}\u{ffff}{}", node.dir, node.name),
        StorageNodeType::Dir => node.path.clone(),
    }
}
