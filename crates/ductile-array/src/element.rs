// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Element lifecycle capabilities.

use alloc::string::String;
use core::mem;

use crate::error::ElementError;

/// How elements are carried over into a new buffer when an array grows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Relocation {
    /// Move each value out of its old slot with [`Element::transfer`].
    Transfer,
    /// Copy each value with [`Element::duplicate`], leaving the old slots intact.
    Duplicate,
}

/// Lifecycle operations a [`DynamicArray`](crate::DynamicArray) performs on its elements.
///
/// Every operation may fail. The two associated constants are the type's
/// declared capabilities and decide, at compile time, how the array relocates
/// elements (see [`relocation_of`]).
///
/// Destruction is the type's `Drop`. A transferred-from value stays live
/// (in a moved-from state) and is still dropped by its owner.
///
/// # Example
///
/// ```rust
/// use ductile_array::{Element, ElementError, Relocation, relocation_of};
///
/// struct Ticket(u32);
///
/// impl Element for Ticket {
///     const INFALLIBLE_TRANSFER: bool = false;
///     const DUPLICABLE: bool = true;
///
///     fn construct() -> Result<Self, ElementError> {
///         Ok(Ticket(0))
///     }
///
///     fn duplicate(&self) -> Result<Self, ElementError> {
///         Ok(Ticket(self.0))
///     }
///
///     fn transfer(&mut self) -> Result<Self, ElementError> {
///         Ok(Ticket(core::mem::take(&mut self.0)))
///     }
/// }
///
/// // A transfer that may fail is never used for growth when a copy is possible.
/// assert_eq!(relocation_of::<Ticket>(), Relocation::Duplicate);
/// ```
pub trait Element: Sized {
    /// `true` if [`transfer`](Element::transfer) and
    /// [`assign_transfer`](Element::assign_transfer) never fail.
    const INFALLIBLE_TRANSFER: bool;

    /// `true` if [`duplicate`](Element::duplicate) and
    /// [`assign`](Element::assign) are supported.
    const DUPLICABLE: bool;

    /// Value-constructs a new element.
    fn construct() -> Result<Self, ElementError> {
        Err(ElementError::Unsupported)
    }

    /// Produces an independent copy of `self`.
    fn duplicate(&self) -> Result<Self, ElementError> {
        Err(ElementError::Unsupported)
    }

    /// Moves the value out of `self`, leaving `self` live but moved-from.
    fn transfer(&mut self) -> Result<Self, ElementError>;

    /// Copy-assigns `source` into the live element `self`.
    fn assign(&mut self, source: &Self) -> Result<(), ElementError> {
        *self = source.duplicate()?;
        Ok(())
    }

    /// Transfer-assigns `source` into the live element `self`, leaving
    /// `source` moved-from.
    fn assign_transfer(&mut self, source: &mut Self) -> Result<(), ElementError> {
        *self = source.transfer()?;
        Ok(())
    }
}

/// Returns the relocation policy for `T`.
///
/// Transfer is chosen when it cannot fail, or when `T` cannot be duplicated
/// at all. Otherwise elements are duplicated so that a failure never leaves a
/// value stranded half-way between two buffers.
pub const fn relocation_of<T: Element>() -> Relocation {
    if T::INFALLIBLE_TRANSFER || !T::DUPLICABLE {
        Relocation::Transfer
    } else {
        Relocation::Duplicate
    }
}

macro_rules! impl_element_for_primitives {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::element::Element for $ty {
                const INFALLIBLE_TRANSFER: bool = true;
                const DUPLICABLE: bool = true;

                #[inline(always)]
                fn construct() -> Result<Self, ElementError> {
                    Ok(<$ty>::default())
                }

                #[inline(always)]
                fn duplicate(&self) -> Result<Self, ElementError> {
                    Ok(*self)
                }

                #[inline(always)]
                fn transfer(&mut self) -> Result<Self, ElementError> {
                    Ok(*self)
                }

                #[inline(always)]
                fn assign(&mut self, source: &Self) -> Result<(), ElementError> {
                    *self = *source;
                    Ok(())
                }

                #[inline(always)]
                fn assign_transfer(&mut self, source: &mut Self) -> Result<(), ElementError> {
                    *self = *source;
                    Ok(())
                }
            }
        )*
    };
}

impl_element_for_primitives!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
);

impl Element for String {
    const INFALLIBLE_TRANSFER: bool = true;
    const DUPLICABLE: bool = true;

    fn construct() -> Result<Self, ElementError> {
        Ok(String::new())
    }

    fn duplicate(&self) -> Result<Self, ElementError> {
        Ok(self.clone())
    }

    fn transfer(&mut self) -> Result<Self, ElementError> {
        Ok(mem::take(self))
    }

    fn assign(&mut self, source: &Self) -> Result<(), ElementError> {
        self.clone_from(source);
        Ok(())
    }

    fn assign_transfer(&mut self, source: &mut Self) -> Result<(), ElementError> {
        *self = mem::take(source);
        Ok(())
    }
}
