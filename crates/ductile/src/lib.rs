// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Growable arrays over raw buffers, with fallible element lifecycles.</em></p>
//!
//! ---
//!
//! Ductile is a two-layer container library. A [`Buffer`] owns uninitialized
//! storage for a fixed number of slots. A [`DynamicArray`] sits on top of it,
//! keeps track of which slots are live and grows by doubling.
//!
//! Unlike `Vec`, every element operation (construction, duplication, transfer
//! and assignment) may fail, and the array reports those failures as
//! [`ArrayError`] values instead of panicking.
//!
//! # Features
//!
//! - **Amortized O(1) append** with capacity doubling (0 → 1 → 2 → 4...)
//! - **Safe growth**: elements whose transfer may fail are duplicated into the
//!   new buffer, so a failure never strands a value between two blocks
//! - **All-or-nothing construction** of value runs, copies and insertions that
//!   reallocate
//! - **Nested arrays**: `DynamicArray<DynamicArray<T>>` relocates inner arrays by
//!   handle transfer
//! - **`no_std` compatible**: only `alloc` is required
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! ductile = "0.1.0-rc.1"
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use ductile::{ArrayError, DynamicArray};
//!
//! fn main() -> Result<(), ArrayError> {
//!     let mut names = DynamicArray::new();
//!
//!     names.push_back(String::from("alpha"))?;
//!     names.push_back(String::from("gamma"))?;
//!     names.insert(1, String::from("beta"))?;
//!
//!     assert_eq!(names, ["alpha", "beta", "gamma"]);
//!     assert_eq!(names.capacity(), 4);
//!
//!     let copy = names.try_clone()?;
//!     names.erase(0)?;
//!
//!     assert_eq!(copy.len(), 3);
//!     assert_eq!(names.len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! # Custom Elements
//!
//! Implement [`Element`] to describe how a type is built, copied and moved.
//! The two associated constants pick the growth strategy at compile time:
//!
//! ```rust
//! use ductile::{DynamicArray, Element, ElementError, Relocation, relocation_of};
//!
//! struct Handle(u32);
//!
//! impl Element for Handle {
//!     const INFALLIBLE_TRANSFER: bool = true;
//!     const DUPLICABLE: bool = false;
//!
//!     fn transfer(&mut self) -> Result<Self, ElementError> {
//!         Ok(Handle(core::mem::take(&mut self.0)))
//!     }
//! }
//!
//! assert_eq!(relocation_of::<Handle>(), Relocation::Transfer);
//!
//! let mut handles = DynamicArray::new();
//! handles.push_back(Handle(1)).unwrap();
//! handles.push_back(Handle(2)).unwrap();
//!
//! // Handles cannot be duplicated.
//! assert_eq!(
//!     handles.try_clone().err(),
//!     Some(ductile::ArrayError::Element(ElementError::Unsupported))
//! );
//! ```
//!
//! # Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`buffer`] | `ductile-buffer` | [`Buffer`], [`BufferError`] |
//! | [`array`] | `ductile-array` | [`DynamicArray`], [`Element`], [`ArrayError`] |
//!
//! # Test Utilities
//!
//! With the `test-utils` feature, `support::test_utils::array` exposes
//! `Tracked` elements that count their lifecycle calls and fail on demand.
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub mod support;

#[cfg(test)]
mod tests;

pub use ductile_array as array;
pub use ductile_buffer as buffer;

pub use ductile_array::{ArrayError, DynamicArray, Element, ElementError, Relocation, relocation_of};
pub use ductile_buffer::{Buffer, BufferError};
