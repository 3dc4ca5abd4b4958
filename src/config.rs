//! Creation-time configuration for a [`crate::Pool`].

/// Tunables resolved once at [`crate::Pool::new`] and fixed for the pool's
/// lifetime; the pool does not re-read configuration after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacities above this many bytes attempt an anonymous OS mapping
    /// before falling back to the heap. Defaults to
    /// [`crate::storage::MMAP_THRESHOLD`].
    pub mmap_threshold: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { mmap_threshold: crate::storage::MMAP_THRESHOLD }
    }
}

impl PoolConfig {
    /// Returns a config that always takes the heap path, regardless of
    /// capacity. Useful in tests that want deterministic backing storage.
    #[must_use]
    pub fn heap_only() -> Self {
        Self { mmap_threshold: usize::MAX }
    }
}
