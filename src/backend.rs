//! Storage backend boundary
//!
//! Abstract, backend-agnostic interface to the object store. The engine only
//! ever sees flat keys: directories exist by convention as zero-byte marker
//! objects whose key ends with `/`. Conflicting writes are serialized by the
//! remote backend itself; no locking happens on this side of the boundary.

pub mod memory;

use crate::error::BackendError;
use async_trait::async_trait;

pub use memory::MemoryBackend;

/// Handle to an object actually present in the backend.
///
/// Stands in for any backend-native object reference. A node carrying a
/// handle was observed in (or written to) the backend; a node without one is
/// virtual, synthesized by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    /// Backend-native key, including any base path prefix and the trailing
    /// `/` for directory markers.
    pub key: String,
    pub size: u64,
}

/// Object storage primitives the engine is built on.
///
/// Implementations are expected to be cheap to share (`&self` methods) and
/// safe for concurrent use: batch operations in the service layer issue
/// these calls concurrently.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// List all objects whose key starts with `prefix`. An empty prefix
    /// lists the entire store.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<ObjectHandle>, BackendError>;

    /// Whether an object exists at exactly `key`.
    async fn file_exists(&self, key: &str) -> Result<bool, BackendError>;

    /// Delete the object at `key`. Deleting a missing key is a
    /// [`BackendError::NotFound`].
    async fn delete_file(&self, key: &str) -> Result<(), BackendError>;

    /// Create a zero-byte directory marker object at `key`.
    async fn create_empty_marker(&self, key: &str) -> Result<(), BackendError>;
}
