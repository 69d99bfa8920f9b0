//! Core types for the node reconciliation engine.

use crate::node::StorageNode;
use std::collections::HashMap;

/// NodeMap: relative path → node, the engine's primary intermediate
/// representation. Paths are unique within one reconciliation pass.
pub type NodeMap = HashMap<String, StorageNode>;
