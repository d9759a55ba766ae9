// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Buffer - Owned, uninitialized storage sized in element units.
//!
//! The buffer never reads, writes, constructs or drops a `T`. It only owns
//! the block and hands out slot addresses.

use alloc::alloc::{Layout, alloc, dealloc};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::error::BufferError;

/// Raw storage for `capacity` values of `T`.
///
/// `capacity == 0` exactly when no block is owned. A `Buffer` can be moved,
/// swapped or [taken](Buffer::take), but never cloned: it has no idea which
/// of its slots hold live values.
pub struct Buffer<T> {
    address: Option<NonNull<T>>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// Safety: Buffer owns its block exclusively, like Box<[T]>.
unsafe impl<T: Send> Send for Buffer<T> {}
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    /// Creates an empty buffer without touching the allocator.
    pub const fn new() -> Self {
        Self {
            address: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Requests uninitialized storage for `capacity` elements.
    ///
    /// A zero capacity returns an empty buffer and never calls the allocator.
    /// Zero-sized `T` never allocate either; their slots live at a dangling,
    /// well-aligned address.
    ///
    /// # Errors
    ///
    /// - [`BufferError::CapacityOverflow`] if `capacity * size_of::<T>()`
    ///   does not fit a [`Layout`].
    /// - [`BufferError::AllocationFailure`] if the allocator returns null.
    pub fn allocate(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout(capacity)?;

        if layout.size() == 0 {
            return Ok(Self {
                address: Some(NonNull::dangling()),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc(layout) };

        let Some(address) = NonNull::new(raw.cast::<T>()) else {
            log::debug!(
                "allocation of {capacity} slots ({} bytes) failed",
                layout.size()
            );
            return Err(BufferError::AllocationFailure {
                capacity,
                bytes: layout.size(),
            });
        };

        log::trace!("allocated {capacity} slots ({} bytes)", layout.size());

        Ok(Self {
            address: Some(address),
            capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, BufferError> {
        Layout::array::<T>(capacity).map_err(|_| BufferError::CapacityOverflow { capacity })
    }

    /// Returns the number of slots in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the buffer owns no block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the address of the first slot, or `None` for an empty buffer.
    #[inline]
    pub fn address(&self) -> Option<NonNull<T>> {
        self.address
    }

    /// Returns the address of slot `offset`.
    ///
    /// `offset == capacity` is allowed and yields the one-past-the-end
    /// address. An empty buffer answers with a dangling address, valid only
    /// for zero-length ranges.
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[inline]
    pub fn slot(&self, offset: usize) -> *const T {
        self.slot_address(offset).as_ptr()
    }

    /// Mutable counterpart of [`slot`](Buffer::slot).
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[inline]
    pub fn slot_mut(&mut self, offset: usize) -> *mut T {
        self.slot_address(offset).as_ptr()
    }

    #[inline]
    fn slot_address(&self, offset: usize) -> NonNull<T> {
        assert!(
            offset <= self.capacity,
            "slot offset {offset} is beyond capacity {}",
            self.capacity
        );

        match self.address {
            // SAFETY: offset <= capacity keeps the address inside the block or one past its end.
            Some(address) => unsafe { address.add(offset) },
            None => NonNull::dangling(),
        }
    }

    /// Exchanges the blocks owned by `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.address, &mut other.address);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the block out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        let Some(address) = self.address.take() else {
            return;
        };

        let Ok(layout) = Self::layout(self.capacity) else {
            return;
        };

        if layout.size() == 0 {
            return;
        }

        // SAFETY: the block was obtained from `alloc` with this exact layout.
        unsafe { dealloc(address.as_ptr().cast::<u8>(), layout) };

        log::trace!(
            "released {} slots ({} bytes)",
            self.capacity,
            layout.size()
        );
    }
}

impl<T> core::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
