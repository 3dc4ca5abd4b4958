//! The bump arena itself: a fixed-capacity buffer serving growable head-end
//! scratch allocations and append-only tail-end persistent allocations.

use std::cell::Cell;
use std::ptr::NonNull;

use crate::align::{checked_round_sum, is_aligned, round, rounding_overflowed};
use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};
use crate::storage::Backing;

/// A bidirectional bump-allocated memory pool.
///
/// Head-end allocations (`from_end = false`) grow upward from offset `0` and
/// may be grown, shrunk, or relocated via [`Pool::reallocate`]. Tail-end
/// allocations (`from_end = true`) grow downward from `capacity` and are
/// append-only for the life of an epoch. Both streams are discarded by
/// [`Pool::reset`], optionally preserving one head-end block.
///
/// The pool is single-owner and non-reentrant: operations take `&self`
/// (cursors live in `Cell`s, matching the crate's `Arena`/`BumpAllocator`
/// convention for single-threaded bump cursors) but nothing here
/// synchronizes concurrent callers. `Pool` is `Send` — moving the handle to
/// another thread is fine — but not `Sync`.
pub struct Pool {
    backing: Backing,
    capacity: usize,
    head: Cell<usize>,
    tail: Cell<usize>,
}

// SAFETY: Pool owns its backing buffer exclusively; no other handle can
// observe it concurrently, so moving the whole value to another thread is
// sound. It is intentionally not Sync (the Cell cursors forbid that
// automatically): concurrent access through a shared reference is not
// supported.
unsafe impl Send for Pool {}

impl Pool {
    /// Creates a pool with at least `max` bytes of capacity (rounded up to
    /// the alignment quantum).
    pub fn new(max: usize, config: PoolConfig) -> PoolResult<Self> {
        let capacity = round(max);
        if rounding_overflowed(max, capacity) {
            return Err(PoolError::Overflow);
        }

        let backing = Backing::acquire(capacity, config.mmap_threshold)?;

        #[cfg(feature = "logging")]
        tracing::debug!(capacity, mapped = backing.is_mapped(), "pool created");

        Ok(Self { backing, capacity, head: Cell::new(0), tail: Cell::new(capacity) })
    }

    /// Total usable bytes; fixed for the pool's lifetime.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently free between the head and tail cursors.
    #[inline]
    #[must_use]
    pub fn free_bytes(&self) -> usize {
        self.tail.get() - self.head.get()
    }

    /// Whether the backing buffer came from an anonymous OS mapping.
    #[inline]
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.backing.is_mapped()
    }

    #[inline]
    fn base_ptr(&self) -> *mut u8 {
        self.backing.as_ptr()
    }

    #[inline]
    fn offset_of(&self, ptr: NonNull<u8>) -> usize {
        ptr.as_ptr() as usize - self.base_ptr() as usize
    }

    #[inline]
    unsafe fn ptr_at(&self, offset: usize) -> NonNull<u8> {
        // SAFETY: caller guarantees offset <= capacity.
        unsafe { NonNull::new_unchecked(self.base_ptr().add(offset)) }
    }

    fn zero_range(&self, from: usize, to: usize) {
        if to > from {
            // SAFETY: from..to is within [0, capacity) by every caller here,
            // and the pool exclusively owns this buffer.
            unsafe {
                self.base_ptr().add(from).write_bytes(0, to - from);
            }
        }
    }

    /// Claims `size` bytes from one end of the pool.
    ///
    /// `from_end = false` claims from the head (growable, reallocatable);
    /// `from_end = true` claims from the tail (persistent, append-only).
    pub fn allocate(&self, size: usize, from_end: bool) -> PoolResult<NonNull<u8>> {
        let asize = round(size);
        if rounding_overflowed(size, asize) {
            return Err(PoolError::Overflow);
        }

        let head = self.head.get();
        let tail = self.tail.get();
        let free = tail - head;
        if asize > free {
            return Err(PoolError::out_of_capacity(asize, free));
        }

        if from_end {
            let new_tail = tail - asize;
            self.tail.set(new_tail);
            Ok(unsafe { self.ptr_at(new_tail) })
        } else {
            self.head.set(head + asize);
            Ok(unsafe { self.ptr_at(head) })
        }
    }

    /// Grows or shrinks a previously head-end-allocated block.
    ///
    /// # Safety
    /// `old` must have been returned by a prior head-end [`Pool::allocate`]
    /// or [`Pool::reallocate`] call on this pool, not yet invalidated by a
    /// [`Pool::reset`]; `old_size` must be the logical size that call
    /// returned; `old + old_size` must not exceed the buffer's end.
    pub unsafe fn reallocate(
        &self,
        old: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> PoolResult<NonNull<u8>> {
        let new_rounded = round(new_size);
        if rounding_overflowed(new_size, new_rounded) {
            return Err(PoolError::Overflow);
        }

        let old_offset = self.offset_of(old);
        let head = self.head.get();
        let old_end = round(old_offset + old_size);

        if head == old_end {
            // Fast path: old is the last head-end block, grow or shrink in place.
            let new_head = checked_round_sum(old_offset, new_size).ok_or(PoolError::Overflow)?;
            let tail = self.tail.get();
            if new_head > tail {
                return Err(PoolError::out_of_capacity(new_head - old_offset, tail - old_offset));
            }

            self.head.set(new_head);
            if new_size < old_size {
                self.zero_range(old_offset + new_size, old_offset + old_size);
            }
            Ok(old)
        } else {
            // Slow path: relocate. The old block is left behind, zeroed, and
            // reclaimed only by the next reset or destroy.
            let new_block = self.allocate(new_size, false)?;
            let copy_len = old_size.min(new_size);
            if copy_len > 0 {
                // SAFETY: old and new_block are disjoint head-end blocks —
                // new_block starts at the head that was strictly past old's
                // rounded end, since old wasn't the last block.
                unsafe {
                    std::ptr::copy_nonoverlapping(old.as_ptr(), new_block.as_ptr(), copy_len);
                }
            }
            self.zero_range(old_offset, old_offset + old_size);
            Ok(new_block)
        }
    }

    /// Discards all head-end and tail-end allocations, optionally
    /// relocating one live block to the start of the buffer first.
    ///
    /// Returns the (possibly relocated) address of `keep`, or `None` when
    /// `keep` is `None` (a full reset).
    ///
    /// # Safety
    /// If `keep` is `Some(p)`, `p` must point into this pool's buffer with
    /// `p + copy_bytes` not exceeding the buffer's end; if `keep` is `None`,
    /// `copy_bytes` must be `0`.
    pub unsafe fn reset(
        &self,
        keep: Option<NonNull<u8>>,
        copy_bytes: usize,
        new_size: usize,
    ) -> PoolResult<Option<NonNull<u8>>> {
        match keep {
            None => {
                self.zero_range(0, self.capacity);
                self.tail.set(self.capacity);
                self.head.set(0);
                Ok(None)
            },
            Some(keep_ptr) => {
                let new_head = round(new_size);
                if rounding_overflowed(new_size, new_head) {
                    return Err(PoolError::Overflow);
                }
                if new_head > self.capacity {
                    return Err(PoolError::out_of_capacity(new_head, self.capacity));
                }

                let keep_offset = self.offset_of(keep_ptr);
                let base = self.base_ptr();
                if keep_offset != 0 {
                    // SAFETY: keep_ptr + copy_bytes <= buffer + capacity per
                    // caller obligation; ptr::copy tolerates overlap.
                    unsafe {
                        std::ptr::copy(keep_ptr.as_ptr(), base, copy_bytes);
                    }
                }

                self.tail.set(self.capacity);
                self.zero_range(copy_bytes, self.capacity);
                self.head.set(new_head);

                Ok(Some(unsafe { self.ptr_at(0) }))
            },
        }
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        #[cfg(feature = "logging")]
        tracing::debug!(capacity = self.capacity, "pool destroyed");
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.capacity)
            .field("head", &self.head.get())
            .field("tail", &self.tail.get())
            .field("is_mapped", &self.is_mapped())
            .finish()
    }
}
