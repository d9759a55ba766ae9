// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owned, uninitialized storage blocks sized in element units.
//!
//! [`Buffer<T>`] is the bottom layer of `ductile`: it owns one block with room
//! for `capacity` values of `T` and knows nothing about which slots are live.
//! Constructing, relocating and dropping values is the caller's job.
//!
//! # Guarantees
//!
//! - `capacity == 0` exactly when no block is owned
//! - Zero capacity (and zero-sized `T`) never reaches the allocator
//! - Ownership moves with the value; [`Buffer::swap`] and [`Buffer::take`]
//!   never copy slots and never fail
//! - Dropping a buffer releases the block and never drops a `T`
//!
//! # Example
//!
//! ```rust
//! use ductile_buffer::{Buffer, BufferError};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = Buffer::<u32>::allocate(4)?;
//!     assert_eq!(buffer.capacity(), 4);
//!
//!     unsafe {
//!         buffer.slot_mut(0).write(7);
//!         assert_eq!(buffer.slot(0).read(), 7);
//!     }
//!
//!     let mut other = Buffer::new();
//!     other.swap(&mut buffer);
//!
//!     assert!(buffer.is_empty());
//!     assert_eq!(other.capacity(), 4);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod buffer;
mod error;

pub use buffer::Buffer;
pub use error::BufferError;
