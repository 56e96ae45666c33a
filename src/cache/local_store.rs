use std::collections::HashMap;
use std::fmt;

/// Opaque reference to bytes held in a [`LocalStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalHandle(u64);

impl fmt::Display for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local:{}", self.0)
    }
}

/// Owns fetched image bytes until their handle is revoked.
///
/// Handle numbers are never reused, so a revoked handle cannot resolve to newer bytes.
#[derive(Debug, Default)]
pub struct LocalStore {
    next_id: u64,
    blobs: HashMap<u64, Vec<u8>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, bytes: Vec<u8>) -> LocalHandle {
        self.next_id += 1;
        self.blobs.insert(self.next_id, bytes);
        LocalHandle(self.next_id)
    }

    pub fn get(&self, handle: &LocalHandle) -> Option<&[u8]> {
        self.blobs.get(&handle.0).map(Vec::as_slice)
    }

    /// Free the bytes behind `handle`. Returns false if it was already revoked.
    pub fn revoke(&mut self, handle: &LocalHandle) -> bool {
        self.blobs.remove(&handle.0).is_some()
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
