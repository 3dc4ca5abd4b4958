//! Backing-store acquisition: chooses between an anonymous OS mapping and a
//! heap allocation for the pool's buffer, and remembers which was used so
//! teardown calls the matching release primitive.

use std::ptr::NonNull;

use crate::error::PoolError;

/// Capacities at or below this many bytes always come from the heap — the
/// page-level setup cost of an OS mapping isn't worth it for small pools.
pub const MMAP_THRESHOLD: usize = 32 * 1024;

/// Owned backing buffer for a [`crate::Pool`].
///
/// A tagged sum of the two ways the raw bytes can have been obtained. Each
/// variant carries what its own release path needs; `Drop` dispatches on the
/// variant rather than on a separate `is_mapped` flag, so there's no way to
/// call the wrong release primitive.
pub(crate) enum Backing {
    /// Anonymous `mmap`'d region, released with `munmap`.
    Mapped { ptr: NonNull<u8>, len: usize },
    /// Heap-allocated region, released by dropping the boxed slice.
    Heap(Box<[u8]>),
}

impl Backing {
    /// Acquires `len` bytes of backing storage, preferring an anonymous
    /// mapping when `len` exceeds `mmap_threshold` and the platform
    /// supports it, falling back to the heap otherwise.
    pub(crate) fn acquire(len: usize, mmap_threshold: usize) -> Result<Self, PoolError> {
        if len > mmap_threshold {
            #[cfg(all(unix, feature = "std"))]
            {
                match unix::map_anonymous(len) {
                    Ok(ptr) => {
                        #[cfg(feature = "logging")]
                        tracing::debug!(len, "pool backing store: anonymous mapping");
                        return Ok(Self::Mapped { ptr, len });
                    },
                    Err(_) => {
                        #[cfg(feature = "logging")]
                        tracing::debug!(len, "pool backing store: mapping unavailable, falling back to heap");
                    },
                }
            }
        }

        Self::acquire_heap(len)
    }

    fn acquire_heap(len: usize) -> Result<Self, PoolError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|e| PoolError::Creation(format!("heap allocation of {len} bytes failed: {e}")))?;
        buf.resize(len, 0u8);
        Ok(Self::Heap(buf.into_boxed_slice()))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut u8 {
        match self {
            Self::Mapped { ptr, .. } => ptr.as_ptr(),
            Self::Heap(b) => b.as_ptr() as *mut u8,
        }
    }

    #[inline]
    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

impl Drop for Backing {
    fn drop(&mut self) {
        if let Self::Mapped { ptr, len } = self {
            #[cfg(all(unix, feature = "std"))]
            unix::unmap(*ptr, *len);
            #[cfg(not(all(unix, feature = "std")))]
            let _ = (ptr, len);
        }
        // Heap variant: the boxed slice's own Drop handles release.
    }
}

#[cfg(all(unix, feature = "std"))]
mod unix {
    use std::io;
    use std::ptr::NonNull;

    /// Maps `len` anonymous, read-write, private bytes.
    ///
    /// # Safety-relevant invariants
    /// `len` must be nonzero; `mmap` is called with `fd = -1, offset = 0` as
    /// required for `MAP_ANONYMOUS`.
    pub(super) fn map_anonymous(len: usize) -> io::Result<NonNull<u8>> {
        // SAFETY: addr is null (let the kernel choose), len is nonzero,
        // fd/offset are the required -1/0 pair for an anonymous mapping.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: mmap succeeded, so ptr is non-null.
        Ok(unsafe { NonNull::new_unchecked(ptr as *mut u8) })
    }

    /// Releases a region previously returned by [`map_anonymous`].
    ///
    /// # Safety-relevant invariants
    /// `ptr`/`len` must be exactly the pair returned by a prior successful
    /// `map_anonymous` call that has not already been unmapped.
    pub(super) fn unmap(ptr: NonNull<u8>, len: usize) {
        // SAFETY: ptr/len come from a matching map_anonymous call per the
        // caller obligation documented above.
        let rc = unsafe { libc::munmap(ptr.as_ptr() as *mut libc::c_void, len) };
        debug_assert_eq!(rc, 0, "munmap failed on a region we mapped ourselves");
    }
}
