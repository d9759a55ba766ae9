// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for ductile-array.
use ductile_buffer::BufferError;
use thiserror::Error;

/// Failures reported by an [`Element`](crate::Element) lifecycle operation.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum ElementError {
    /// [`Element::construct`](crate::Element::construct) failed.
    #[error("element construction failed")]
    Construct = 0,

    /// [`Element::duplicate`](crate::Element::duplicate) failed.
    #[error("element duplication failed")]
    Duplicate = 1,

    /// [`Element::transfer`](crate::Element::transfer) failed.
    #[error("element transfer failed")]
    Transfer = 2,

    /// An assignment, by copy or by transfer, failed.
    #[error("element assignment failed")]
    Assign = 3,

    /// The element type does not implement the operation.
    #[error("operation not supported by the element type")]
    Unsupported = 4,
}

/// Errors that can occur when working with a [`DynamicArray`](crate::DynamicArray).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ArrayError {
    /// Raw storage could not be obtained.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),

    /// An element refused to be constructed, duplicated, transferred or assigned.
    #[error("ElementError: {0}")]
    Element(#[from] ElementError),
}
