// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for ductile-buffer.
use thiserror::Error;

/// Errors that can occur when requesting raw storage.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// The byte size of the request is not representable.
    #[error("capacity overflow: {capacity} elements")]
    CapacityOverflow {
        /// Number of elements requested.
        capacity: usize,
    },

    /// The allocator could not satisfy the request.
    #[error("allocation failed: {capacity} elements ({bytes} bytes)")]
    AllocationFailure {
        /// Number of elements requested.
        capacity: usize,
        /// Number of bytes requested.
        bytes: usize,
    },
}
