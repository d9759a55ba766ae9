// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities re-exported from ductile-array

#[cfg(feature = "test-utils")]
pub mod array {
    pub use ductile_array::support::test_utils::*;
}
