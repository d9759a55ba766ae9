// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::mem;
use core::ops::{Deref, DerefMut};
use core::slice;

use ductile_buffer::{Buffer, BufferError};

use crate::element::{Element, relocation_of};
use crate::error::{ArrayError, ElementError};
use crate::into_iter::IntoIter;
use crate::relocate::{InitializedRun, construct_n, destroy_n, duplicate_n, relocate_n};

/// A growable, contiguous array built on a [`Buffer`].
///
/// Slots `[0, len)` hold live elements, slots `[len, capacity)` are raw
/// storage. When an append or insert finds the buffer full, capacity grows
/// 0 → 1 → 2 → 4 → 8... and the live elements are relocated with the policy
/// returned by [`relocation_of`].
///
/// # Example
///
/// ```rust
/// use ductile_array::{ArrayError, DynamicArray};
///
/// fn example() -> Result<(), ArrayError> {
///     let mut array = DynamicArray::new();
///     array.push_back(1u32)?;
///     array.push_back(2)?;
///     array.push_back(3)?;
///
///     array.insert(1, 9)?;
///     assert_eq!(array, [1, 9, 2, 3]);
///
///     array.erase(1)?;
///     assert_eq!(array.pop_back(), 3);
///     assert_eq!(array, [1, 2]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct DynamicArray<T> {
    buffer: Buffer<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates a new empty array without allocating.
    pub const fn new() -> Self {
        Self {
            buffer: Buffer::new(),
            len: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots available without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns a slice containing the entire array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live and the slot address is non-null and aligned.
        unsafe { slice::from_raw_parts(self.buffer.slot(0), self.len) }
    }

    /// Returns a mutable slice containing the entire array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots [0, len) are live and the slot address is non-null and aligned.
        unsafe { slice::from_raw_parts_mut(self.buffer.slot_mut(0), self.len) }
    }

    /// Exchanges the contents of two arrays without touching any element.
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the elements and storage out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Drops the current contents and takes over those of `source`, which is
    /// left empty.
    pub fn move_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    /// Drops every element past `len`. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = self.len - len;
        self.len = len;

        // SAFETY: slots [len, len + tail) were live and are no longer counted.
        unsafe { destroy_n(self.buffer.slot_mut(len), tail) };
    }

    /// Drops every element, keeping the storage.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Removes the last element and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) -> T {
        assert!(self.len > 0, "pop_back() on an empty array");

        self.len -= 1;

        // SAFETY: the slot was live and is no longer counted, so ownership moves out.
        unsafe { self.buffer.slot(self.len).read() }
    }
}

impl<T: Element> DynamicArray<T> {
    /// Creates an empty array with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Buffer`] if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Ok(Self {
            buffer: Buffer::allocate(capacity)?,
            len: 0,
        })
    }

    /// Creates an array of `len` value-constructed elements.
    ///
    /// All-or-nothing: if any [`Element::construct`] fails, the elements built
    /// so far are dropped before the error is returned.
    pub fn with_len(len: usize) -> Result<Self, ArrayError> {
        let mut buffer = Buffer::allocate(len)?;

        // SAFETY (PRECONDITIONS ARE MET): the fresh buffer has `len` vacant slots.
        unsafe { construct_n(buffer.slot_mut(0), len, |_| T::construct())? };

        Ok(Self { buffer, len })
    }

    /// Creates an array holding duplicates of `source`, with capacity exactly
    /// `source.len()`.
    pub fn from_slice(source: &[T]) -> Result<Self, ArrayError> {
        let mut buffer = Buffer::allocate(source.len())?;

        // SAFETY (PRECONDITIONS ARE MET): a slice never overlaps a buffer we just allocated.
        unsafe { duplicate_n(source.as_ptr(), source.len(), buffer.slot_mut(0))? };

        Ok(Self {
            buffer,
            len: source.len(),
        })
    }

    /// Duplicates the array. `self` is never modified, even on failure.
    pub fn try_clone(&self) -> Result<Self, ArrayError> {
        Self::from_slice(self.as_slice())
    }

    /// Makes `self` an element-wise copy of `source`.
    ///
    /// If `source` does not fit the current capacity, a full copy is built
    /// first and swapped in, so a failure leaves `self` untouched. Otherwise
    /// the storage is reused: the common prefix is copy-assigned, then the
    /// tail is either duplicated from `source` or dropped.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), ArrayError> {
        if source.len > self.capacity() {
            let mut copy = source.try_clone()?;
            self.swap(&mut copy);

            return Ok(());
        }

        for (target, value) in self.iter_mut().zip(source.iter()) {
            target.assign(value)?;
        }

        if source.len > self.len {
            let extra = source.len - self.len;

            // SAFETY (PRECONDITIONS ARE MET): source.len <= capacity, so [len, source.len) are vacant slots.
            unsafe {
                duplicate_n(
                    source.buffer.slot(self.len),
                    extra,
                    self.buffer.slot_mut(self.len),
                )?
            };

            self.len = source.len;
        } else {
            self.truncate(source.len);
        }

        Ok(())
    }

    /// Grows the storage to exactly `capacity` slots.
    ///
    /// Does nothing if the current capacity is already large enough.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let fresh = Buffer::allocate(capacity)?;
        self.relocate_into(fresh)
    }

    /// Changes the length to `len`, value-constructing new elements or
    /// dropping surplus ones.
    ///
    /// Growing reserves exactly `len` slots. If a construction fails, the
    /// elements built by this call are dropped and the length is unchanged.
    pub fn resize(&mut self, len: usize) -> Result<(), ArrayError> {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }

        self.reserve(len)?;

        let extra = len - self.len;

        // SAFETY (PRECONDITIONS ARE MET): after reserve, [self.len, len) are vacant slots.
        unsafe { construct_n(self.buffer.slot_mut(self.len), extra, |_| T::construct())? };

        self.len = len;
        Ok(())
    }

    /// Appends `value` to the back of the array.
    pub fn push_back(&mut self, value: T) -> Result<(), ArrayError> {
        self.emplace(self.len, || Ok(value))?;
        Ok(())
    }

    /// Appends a duplicate of `value` to the back of the array.
    pub fn push_back_copy(&mut self, value: &T) -> Result<(), ArrayError> {
        self.emplace(self.len, || value.duplicate())?;
        Ok(())
    }

    /// Constructs an element at the back and returns a reference to it.
    pub fn emplace_back<F>(&mut self, constructor: F) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        let index = self.emplace(self.len, constructor)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Inserts `value` at `index`, shifting later elements back.
    ///
    /// Returns the index of the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, ArrayError> {
        self.emplace(index, || Ok(value))
    }

    /// Inserts a duplicate of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_copy(&mut self, index: usize, value: &T) -> Result<usize, ArrayError> {
        self.emplace(index, || value.duplicate())
    }

    /// Constructs an element at `index` with `constructor`, shifting later
    /// elements back.
    ///
    /// Returns the index of the new element. If the array is full, a buffer of
    /// twice the capacity is allocated and the prefix and suffix are relocated
    /// around the new element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, constructor: F) -> Result<usize, ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        assert!(
            index <= self.len,
            "emplace index {index} is beyond length {}",
            self.len
        );

        if self.len == self.capacity() {
            self.emplace_with_reallocation(index, constructor)?;
        } else {
            self.emplace_in_place(index, constructor)?;
        }

        Ok(index)
    }

    /// Removes the element at `index`, shifting later elements forward.
    ///
    /// Returns the index of the element that followed the removed one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> Result<usize, ArrayError> {
        assert!(
            index < self.len,
            "erase index {index} is out of bounds for length {}",
            self.len
        );

        let elements = self.as_mut_slice();

        for slot in index..elements.len() - 1 {
            let (head, tail) = elements.split_at_mut(slot + 1);
            head[slot].assign_transfer(&mut tail[0])?;
        }

        self.truncate(self.len - 1);

        Ok(index)
    }

    fn grown_capacity(&self) -> Result<usize, BufferError> {
        match self.capacity() {
            0 => Ok(1),
            capacity => capacity
                .checked_mul(2)
                .ok_or(BufferError::CapacityOverflow { capacity }),
        }
    }

    #[cold]
    #[inline(never)]
    fn relocate_into(&mut self, mut fresh: Buffer<T>) -> Result<(), ArrayError> {
        log::trace!(
            "growing array from {} to {} slots ({:?})",
            self.capacity(),
            fresh.capacity(),
            relocation_of::<T>()
        );

        // SAFETY (PRECONDITIONS ARE MET): [0, len) are live, fresh has at least len vacant slots.
        unsafe { relocate_n(self.buffer.slot_mut(0), self.len, fresh.slot_mut(0))? };

        self.buffer.swap(&mut fresh);

        // SAFETY: fresh now holds the old block, whose [0, len) are the relocated-from values.
        unsafe { destroy_n(fresh.slot_mut(0), self.len) };

        Ok(())
    }

    #[cold]
    #[inline(never)]
    fn emplace_with_reallocation<F>(&mut self, index: usize, constructor: F) -> Result<(), ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        let mut fresh = Buffer::allocate(self.grown_capacity()?)?;
        let value = constructor()?;

        log::trace!(
            "growing array from {} to {} slots ({:?})",
            self.capacity(),
            fresh.capacity(),
            relocation_of::<T>()
        );

        let source = self.buffer.slot_mut(0);
        let target = fresh.slot_mut(0);

        // SAFETY (PRECONDITIONS ARE MET): fresh has len + 1 vacant slots; prefix, new element and
        // suffix land in disjoint ranges [0, index), index and [index + 1, len + 1).
        unsafe {
            relocate_n(source, index, target)?;

            let mut run = InitializedRun::adopt(target, index);
            run.push(value);

            relocate_n(source.add(index), self.len - index, target.add(index + 1))?;
            run.commit();
        }

        self.buffer.swap(&mut fresh);

        // SAFETY: fresh now holds the old block, whose [0, len) are the relocated-from values.
        unsafe { destroy_n(fresh.slot_mut(0), self.len) };

        self.len += 1;
        Ok(())
    }

    fn emplace_in_place<F>(&mut self, index: usize, constructor: F) -> Result<(), ArrayError>
    where
        F: FnOnce() -> Result<T, ElementError>,
    {
        let value = constructor()?;
        let len = self.len;

        if index == len {
            // SAFETY: len < capacity, so the slot at len is vacant.
            unsafe { self.buffer.slot_mut(len).write(value) };
            self.len += 1;

            return Ok(());
        }

        // Open the slot past the end with the last element.
        // SAFETY: index < len, so len - 1 is live; len < capacity, so len is vacant.
        unsafe {
            let last = self.buffer.slot_mut(len - 1);
            let moved = (*last).transfer()?;
            self.buffer.slot_mut(len).write(moved);
        }
        self.len += 1;

        // Shift [index, len - 1) one slot back, walking from the end.
        let elements = self.as_mut_slice();
        for slot in (index..len - 1).rev() {
            let (head, tail) = elements.split_at_mut(slot + 1);
            tail[0].assign_transfer(&mut head[slot])?;
        }

        elements[index] = value;

        Ok(())
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live and owned by the array; the buffer releases the block afterwards.
        unsafe { destroy_n(self.buffer.slot_mut(0), self.len) };
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<DynamicArray<U>> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::take(&mut self.len);
        IntoIter::new(self.buffer.take(), len)
    }
}

/// Arrays nest: an array of arrays relocates inner arrays by handle transfer.
impl<T: Element> Element for DynamicArray<T> {
    const INFALLIBLE_TRANSFER: bool = true;
    const DUPLICABLE: bool = T::DUPLICABLE;

    fn construct() -> Result<Self, ElementError> {
        Ok(Self::new())
    }

    fn duplicate(&self) -> Result<Self, ElementError> {
        self.try_clone().map_err(|error| match error {
            ArrayError::Element(error) => error,
            ArrayError::Buffer(_) => ElementError::Duplicate,
        })
    }

    fn transfer(&mut self) -> Result<Self, ElementError> {
        Ok(self.take())
    }

    fn assign(&mut self, source: &Self) -> Result<(), ElementError> {
        self.assign_from(source).map_err(|error| match error {
            ArrayError::Element(error) => error,
            ArrayError::Buffer(_) => ElementError::Assign,
        })
    }

    fn assign_transfer(&mut self, source: &mut Self) -> Result<(), ElementError> {
        self.move_from(source);
        Ok(())
    }
}
