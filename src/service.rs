//! Storage service
//!
//! Composes the backend boundary with the reconciliation primitives into the
//! retrieval and mutation pipeline: raw listing → node conversion → virtual
//! directory padding → ordering. The backend is injected explicitly at
//! construction; there is no ambient singleton state.
//!
//! Batch I/O (deleting N files, creating N markers) is issued concurrently
//! and fully settled before a call returns: on failure the first backend
//! error is propagated only after every in-flight operation has finished, so
//! no operation is abandoned mid-air. No per-operation retry is performed.

use crate::backend::{ObjectHandle, StorageBackend};
use crate::error::{BackendError, StorageError};
use crate::node::{to_dir_storage_node, to_storage_node, StorageNode};
use crate::paths::{remove_both_ends_slash, split_hierarchical_dir_paths};
use crate::reconcile::pad_virtual_dir_node;
use crate::sort::sort_storage_nodes;
use crate::types::NodeMap;
use futures::future::join_all;
use tracing::debug;

/// Reconciliation engine over an injected storage backend.
///
/// `base_path` arguments scope every operation beneath a prefix (for
/// example a per-user root); all returned node paths are relative to it.
/// An empty `base_path` means unscoped.
pub struct StorageService<B> {
    backend: B,
}

impl<B: StorageBackend> StorageService<B> {
    pub fn new(backend: B) -> Self {
        StorageService { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Retrieve the raw node map under `dir_path`, keyed by relative path.
    ///
    /// The base directory's own marker object is excluded: it names the
    /// scope, not a content node. Ancestors are NOT padded here; callers
    /// needing a complete tree apply [`pad_virtual_dir_node`] (or use
    /// [`Self::dir_nodes`]).
    pub async fn node_map(&self, dir_path: &str, base_path: &str) -> Result<NodeMap, StorageError> {
        let base = remove_both_ends_slash(base_path);
        let dir = remove_both_ends_slash(dir_path);
        let prefix = query_prefix(base, dir);

        let handles = self.backend.list_keys(&prefix).await?;
        let base_marker = format!("{}/", base);
        let mut map = NodeMap::new();
        for handle in handles {
            if !base.is_empty() && handle.key == base_marker {
                continue;
            }
            let mut node = to_storage_node(&handle.key, base);
            if node.path.is_empty() {
                // A key equal to the base path itself is not a content node
                continue;
            }
            node.handle = Some(handle);
            map.insert(node.path.clone(), node);
        }
        debug!(prefix = %prefix, nodes = map.len(), "listed node map");
        Ok(map)
    }

    /// Retrieve the complete, ordered node list under `dir_path`: listing,
    /// virtual directory padding, then ascending tree order.
    pub async fn dir_nodes(
        &self,
        dir_path: &str,
        base_path: &str,
    ) -> Result<Vec<StorageNode>, StorageError> {
        let mut map = self.node_map(dir_path, base_path).await?;
        // Paths in the map are already relative, so padding needs no scope
        pad_virtual_dir_node(&mut map, None);
        let mut nodes: Vec<StorageNode> = map.into_values().collect();
        sort_storage_nodes(&mut nodes, false);
        Ok(nodes)
    }

    /// Materialize marker objects for `dir_paths` and every ancestor level.
    ///
    /// Levels whose marker already exists are skipped. Returns the newly
    /// created `Dir` nodes, handles attached, in tree order.
    pub async fn create_dirs<S: AsRef<str>>(
        &self,
        dir_paths: &[S],
        base_path: &str,
    ) -> Result<Vec<StorageNode>, StorageError> {
        let base = remove_both_ends_slash(base_path);
        let levels = split_hierarchical_dir_paths(dir_paths);

        let ops = levels.iter().map(|dir_path| async move {
            let key = format!("{}/", backend_key(base, dir_path));
            if self.backend.file_exists(&key).await? {
                return Ok::<Option<StorageNode>, BackendError>(None);
            }
            self.backend.create_empty_marker(&key).await?;
            let mut node = to_dir_storage_node(dir_path);
            node.handle = Some(ObjectHandle { key, size: 0 });
            Ok(Some(node))
        });

        let mut created = Vec::new();
        for result in join_all(ops).await {
            if let Some(node) = result? {
                created.push(node);
            }
        }
        sort_storage_nodes(&mut created, false);
        debug!(requested = levels.len(), created = created.len(), "created directory markers");
        Ok(created)
    }

    /// Delete the listed files, concurrently.
    ///
    /// Missing files are silently omitted from the result, which otherwise
    /// preserves the caller-supplied order. Returned nodes keep the handle
    /// of the object they were deleted from.
    pub async fn remove_files<S: AsRef<str>>(
        &self,
        file_paths: &[S],
        base_path: &str,
    ) -> Result<Vec<StorageNode>, StorageError> {
        let base = remove_both_ends_slash(base_path);

        let ops = file_paths.iter().map(|file_path| {
            let rel = remove_both_ends_slash(file_path.as_ref()).to_string();
            async move {
                if rel.is_empty() {
                    return Ok::<Option<StorageNode>, BackendError>(None);
                }
                let key = backend_key(base, &rel);
                if !self.backend.file_exists(&key).await? {
                    return Ok(None);
                }
                self.backend.delete_file(&key).await?;
                let mut node = to_storage_node(&key, base);
                node.handle = Some(ObjectHandle { key, size: 0 });
                Ok(Some(node))
            }
        });

        let mut removed = Vec::new();
        for result in join_all(ops).await {
            if let Some(node) = result? {
                removed.push(node);
            }
        }
        debug!(requested = file_paths.len(), removed = removed.len(), "removed files");
        Ok(removed)
    }

    /// Delete everything under `dir_path`, concurrently.
    ///
    /// The base directory's own marker is never touched. Returns the deleted
    /// nodes in tree order; a directory with no backend objects yields an
    /// empty result.
    pub async fn remove_dir(
        &self,
        dir_path: &str,
        base_path: &str,
    ) -> Result<Vec<StorageNode>, StorageError> {
        let base = remove_both_ends_slash(base_path);
        let dir = remove_both_ends_slash(dir_path);
        if base.is_empty() && dir.is_empty() {
            // An unscoped empty prefix would match the whole store
            return Ok(Vec::new());
        }
        let prefix = query_prefix(base, dir);

        let base_marker = format!("{}/", base);
        let targets: Vec<ObjectHandle> = self
            .backend
            .list_keys(&prefix)
            .await?
            .into_iter()
            .filter(|handle| base.is_empty() || handle.key != base_marker)
            .collect();

        let ops = targets
            .iter()
            .map(|handle| self.backend.delete_file(&handle.key));
        for result in join_all(ops).await {
            result?;
        }

        let mut removed: Vec<StorageNode> = targets
            .into_iter()
            .map(|handle| {
                let mut node = to_storage_node(&handle.key, base);
                node.handle = Some(handle);
                node
            })
            .collect();
        sort_storage_nodes(&mut removed, false);
        debug!(prefix = %prefix, removed = removed.len(), "removed directory");
        Ok(removed)
    }
}

/// Backend listing prefix for a scoped directory: `base/dir/`, with absent
/// parts dropped. Empty when both parts are empty (lists the whole store).
fn query_prefix(base: &str, dir: &str) -> String {
    match (base.is_empty(), dir.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("{}/", base),
        (true, false) => format!("{}/", dir),
        (false, false) => format!("{}/{}/", base, dir),
    }
}

/// Backend key for a relative path under an optional base.
fn backend_key(base: &str, relative: &str) -> String {
    if base.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", base, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_prefix_composition() {
        assert_eq!(query_prefix("", ""), "");
        assert_eq!(query_prefix("users/u1", ""), "users/u1/");
        assert_eq!(query_prefix("", "docs"), "docs/");
        assert_eq!(query_prefix("users/u1", "docs"), "users/u1/docs/");
    }

    #[test]
    fn test_backend_key_composition() {
        assert_eq!(backend_key("", "a/b.txt"), "a/b.txt");
        assert_eq!(backend_key("users/u1", "a/b.txt"), "users/u1/a/b.txt");
    }
}
