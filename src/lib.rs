//! Objtree: Hierarchical Node Reconciliation
//!
//! Converts flat cloud-storage object listings into a consistent hierarchical
//! node model: missing ancestor directories are synthesized ("virtual
//! directory padding"), nodes are deterministically ordered for tree display,
//! and directory path sets can be summarized to their most-specific members.
//! Backend I/O lives behind the [`backend::StorageBackend`] trait; the engine
//! itself performs no network I/O.

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod paths;
pub mod reconcile;
pub mod service;
pub mod sort;
pub mod summarize;
pub mod types;
