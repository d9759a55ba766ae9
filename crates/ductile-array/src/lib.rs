// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous array with fallible element lifecycles.
//!
//! `DynamicArray<T>` owns one [`ductile_buffer::Buffer<T>`] and tracks which
//! of its slots are live. Elements describe their lifecycle through the
//! [`Element`] trait, where construction, duplication, transfer and assignment
//! may all fail.
//!
//! # Core Guarantees
//!
//! - **Amortized O(1) append**: capacity doubles (0 → 1 → 2 → 4...) when full
//! - **Safe relocation**: on growth, elements are transferred only if their
//!   transfer cannot fail or they cannot be duplicated; otherwise they are
//!   duplicated, so a failure never strands a value between two buffers
//! - **Unwinding**: a failed construction run drops everything it built before
//!   the error is returned
//! - **Strong copies**: `try_clone()` and a growing `assign_from()` leave the
//!   target untouched on failure
//!
//! Out-of-range positions and `pop_back()` on an empty array are programmer
//! errors and panic.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use ductile_array::{ArrayError, DynamicArray};
//!
//! fn example() -> Result<(), ArrayError> {
//!     let mut array = DynamicArray::<u32>::new();
//!
//!     for i in 0..5 {
//!         array.push_back(i)?;
//!     }
//!
//!     assert_eq!(array.len(), 5);
//!     assert_eq!(array.capacity(), 8);
//!     assert_eq!(array[4], 4);
//!
//!     let copy = array.try_clone()?;
//!     assert_eq!(copy, array);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to use instrumented elements:
//!
//! ```toml
//! [dev-dependencies]
//! ductile-array = { version = "*", features = ["test-utils"] }
//! ```
//!
//! Then use `support::test_utils` to count lifecycle calls and inject
//! failures:
//!
//! ```rust
//! // test-utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use ductile_array::DynamicArray;
//!     use ductile_array::support::test_utils::{
//!         ThrowingTracked, TrackedBehaviour, change_behaviour, ledger, reset,
//!     };
//!
//!     #[test]
//!     fn test_handles_duplicate_failure() {
//!         reset();
//!         let mut array = DynamicArray::new();
//!         array.push_back(ThrowingTracked::new(1)).unwrap();
//!
//!         change_behaviour(TrackedBehaviour::FailAtDuplicate(0));
//!         assert!(array.push_back(ThrowingTracked::new(2)).is_err());
//!
//!         drop(array);
//!         assert!(ledger().is_balanced());
//!     }
//! }
//! ```

#![cfg_attr(not(any(test, feature = "test-utils")), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod dynamic_array;
mod element;
mod error;
mod into_iter;
mod relocate;

#[cfg(any(test, feature = "test-utils"))]
pub mod support;

#[cfg(test)]
mod tests;

pub use dynamic_array::DynamicArray;
pub use element::{Element, Relocation, relocation_of};
pub use error::{ArrayError, ElementError};
pub use into_iter::IntoIter;
