// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Slot-range primitives shared by the array operations.
//!
//! Every helper that builds a range of values does it through an
//! [`InitializedRun`], so a failing (or panicking) element operation drops the
//! values built so far and leaves the target slots uninitialized again.

use core::mem;
use core::ptr;

use crate::element::{Element, Relocation, relocation_of};
use crate::error::ElementError;

/// Drop guard over a growing run of initialized slots.
pub(crate) struct InitializedRun<T> {
    start: *mut T,
    len: usize,
}

impl<T> InitializedRun<T> {
    /// Starts an empty run at `start`.
    pub(crate) fn new(start: *mut T) -> Self {
        Self { start, len: 0 }
    }

    /// Takes charge of `len` slots at `start` that are already initialized.
    pub(crate) fn adopt(start: *mut T, len: usize) -> Self {
        Self { start, len }
    }

    /// Writes `value` into the slot right after the run.
    ///
    /// # Safety
    ///
    /// The slot at `start + len` must be uninitialized and inside the block.
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY (PRECONDITIONS ARE MET): the caller guarantees the slot is in bounds and vacant.
        unsafe { self.start.add(self.len).write(value) };
        self.len += 1;
    }

    /// Disarms the guard, leaving the run initialized.
    pub(crate) fn commit(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T> Drop for InitializedRun<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `len` slots from `start` were initialized by this run.
        unsafe { destroy_n(self.start, self.len) };
    }
}

/// Drops `count` live values starting at `start`.
///
/// # Safety
///
/// The range must hold `count` initialized values that nobody else will drop.
pub(crate) unsafe fn destroy_n<T>(start: *mut T, count: usize) {
    // SAFETY (PRECONDITIONS ARE MET): the caller owns the initialized range.
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count)) };
}

/// Fills `count` uninitialized slots at `target` with values from `make`.
///
/// All-or-nothing: on failure every value built by this call is dropped.
///
/// # Safety
///
/// The target range must be uninitialized and inside one block.
pub(crate) unsafe fn construct_n<T, F>(
    target: *mut T,
    count: usize,
    mut make: F,
) -> Result<(), ElementError>
where
    F: FnMut(usize) -> Result<T, ElementError>,
{
    let mut run = InitializedRun::new(target);

    for index in 0..count {
        let value = make(index)?;
        // SAFETY (PRECONDITIONS ARE MET): index < count keeps the slot inside the target range.
        unsafe { run.push(value) };
    }

    run.commit();
    Ok(())
}

/// Duplicates `count` values from `source` into the uninitialized `target`.
///
/// # Safety
///
/// `source` must hold `count` live values; `target` must be `count`
/// uninitialized slots not overlapping `source`.
pub(crate) unsafe fn duplicate_n<T: Element>(
    source: *const T,
    count: usize,
    target: *mut T,
) -> Result<(), ElementError> {
    // SAFETY (PRECONDITIONS ARE MET): index < count stays inside the live source range.
    unsafe { construct_n(target, count, |index| (*source.add(index)).duplicate()) }
}

/// Transfers `count` values out of `source` into the uninitialized `target`.
///
/// The source values stay live (moved-from) and must still be dropped.
///
/// # Safety
///
/// Same as [`duplicate_n`], with exclusive access to `source`.
pub(crate) unsafe fn transfer_n<T: Element>(
    source: *mut T,
    count: usize,
    target: *mut T,
) -> Result<(), ElementError> {
    // SAFETY (PRECONDITIONS ARE MET): index < count stays inside the live source range.
    unsafe { construct_n(target, count, |index| (*source.add(index)).transfer()) }
}

/// Relocates `count` values according to [`relocation_of::<T>()`].
///
/// The source range is left live either way; the caller drops it once the
/// whole relocation has succeeded.
///
/// # Safety
///
/// Same as [`transfer_n`].
pub(crate) unsafe fn relocate_n<T: Element>(
    source: *mut T,
    count: usize,
    target: *mut T,
) -> Result<(), ElementError> {
    match const { relocation_of::<T>() } {
        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller.
        Relocation::Transfer => unsafe { transfer_n(source, count, target) },
        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller.
        Relocation::Duplicate => unsafe { duplicate_n(source, count, target) },
    }
}
