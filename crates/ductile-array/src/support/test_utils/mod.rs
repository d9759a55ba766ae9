// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Instrumented elements for lifecycle and failure-injection tests.

mod tracked;

pub use tracked::{
    Ledger, MoveOnlyTracked, NothrowTracked, ThrowingTracked, Tracked, TrackedBehaviour,
    UniqueTracked, change_behaviour, ledger, reset,
};
