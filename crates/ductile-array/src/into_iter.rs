// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::iter::FusedIterator;

use ductile_buffer::Buffer;

use crate::relocate::destroy_n;

/// Owning iterator returned by [`DynamicArray::into_iter`](crate::DynamicArray).
///
/// Holds the array's buffer; values not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    buffer: Buffer<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// `buffer` must hold `len` live values in its first slots.
    pub(crate) fn new(buffer: Buffer<T>, len: usize) -> Self {
        Self {
            buffer,
            start: 0,
            end: len,
        }
    }

    /// Returns the values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) are live and the slot address is non-null and aligned.
        unsafe { core::slice::from_raw_parts(self.buffer.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: the slot is live and leaves the range before anyone can read it again.
        let value = unsafe { self.buffer.slot(self.start).read() };
        self.start += 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;

        // SAFETY: the slot was live and is no longer part of the range.
        Some(unsafe { self.buffer.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: [start, end) are the values never handed out.
        unsafe { destroy_n(self.buffer.slot_mut(self.start), self.end - self.start) };
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
