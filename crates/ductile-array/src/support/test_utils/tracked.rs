// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;

use crate::element::Element;
use crate::error::ElementError;

std::thread_local! {
    static LEDGER: Cell<Ledger> = const { Cell::new(Ledger::new()) };
    static BEHAVIOUR: Cell<TrackedBehaviour> = const { Cell::new(TrackedBehaviour::None) };
}

/// Failure injection for [`Tracked`] elements on the current thread.
///
/// `FailAtX(n)` lets `n` operations of kind X succeed (counted since the last
/// [`reset`]) and makes every later one fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackedBehaviour {
    /// Normal behavior (no error injection).
    #[default]
    None,
    /// Fail [`Element::construct`] after `n` successful constructions.
    FailAtConstruct(usize),
    /// Fail [`Element::duplicate`] after `n` successful duplications.
    FailAtDuplicate(usize),
    /// Fail [`Element::transfer`] after `n` successful transfers.
    ///
    /// Ignored by types declaring an infallible transfer.
    FailAtTransfer(usize),
    /// Fail [`Element::assign`] and [`Element::assign_transfer`] after `n`
    /// successful assignments of either kind.
    ///
    /// Ignored by `assign_transfer` on types declaring an infallible transfer.
    FailAtAssign(usize),
}

/// Lifecycle counters of every [`Tracked`] element on the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Values created with [`Tracked::new`].
    pub values: usize,
    /// Successful [`Element::construct`] calls.
    pub constructs: usize,
    /// Successful [`Element::duplicate`] calls.
    pub duplicates: usize,
    /// Successful [`Element::transfer`] calls.
    pub transfers: usize,
    /// Successful [`Element::assign`] calls.
    pub assigns: usize,
    /// Successful [`Element::assign_transfer`] calls.
    pub transfer_assigns: usize,
    /// Dropped elements, moved-from ones included.
    pub drops: usize,
}

impl Ledger {
    const fn new() -> Self {
        Self {
            values: 0,
            constructs: 0,
            duplicates: 0,
            transfers: 0,
            assigns: 0,
            transfer_assigns: 0,
            drops: 0,
        }
    }

    /// Number of elements brought to life.
    pub fn created(&self) -> usize {
        self.values + self.constructs + self.duplicates + self.transfers
    }

    /// Number of elements created but not yet dropped.
    ///
    /// # Panics
    ///
    /// Panics if more elements were dropped than created.
    pub fn live(&self) -> usize {
        self.created()
            .checked_sub(self.drops)
            .expect("more Tracked elements dropped than created")
    }

    /// Returns `true` when every created element has been dropped exactly once.
    pub fn is_balanced(&self) -> bool {
        self.created() == self.drops
    }
}

/// Returns a snapshot of the current thread's ledger.
pub fn ledger() -> Ledger {
    LEDGER.with(Cell::get)
}

/// Clears the ledger and restores [`TrackedBehaviour::None`].
pub fn reset() {
    LEDGER.with(|cell| cell.set(Ledger::new()));
    BEHAVIOUR.with(|cell| cell.set(TrackedBehaviour::None));
}

/// Changes the failure injection behavior for the current thread.
pub fn change_behaviour(behaviour: TrackedBehaviour) {
    BEHAVIOUR.with(|cell| cell.set(behaviour));
}

#[derive(Clone, Copy)]
enum Operation {
    Construct,
    Duplicate,
    Transfer,
    Assign,
    TransferAssign,
}

fn record(operation: Operation, injectable: bool) -> Result<(), ElementError> {
    let mut ledger = ledger();
    let behaviour = BEHAVIOUR.with(Cell::get);

    let fails = injectable
        && match (operation, behaviour) {
            (Operation::Construct, TrackedBehaviour::FailAtConstruct(n)) => ledger.constructs >= n,
            (Operation::Duplicate, TrackedBehaviour::FailAtDuplicate(n)) => ledger.duplicates >= n,
            (Operation::Transfer, TrackedBehaviour::FailAtTransfer(n)) => ledger.transfers >= n,
            (
                Operation::Assign | Operation::TransferAssign,
                TrackedBehaviour::FailAtAssign(n),
            ) => ledger.assigns + ledger.transfer_assigns >= n,
            _ => false,
        };

    if fails {
        return Err(match operation {
            Operation::Construct => ElementError::Construct,
            Operation::Duplicate => ElementError::Duplicate,
            Operation::Transfer => ElementError::Transfer,
            Operation::Assign | Operation::TransferAssign => ElementError::Assign,
        });
    }

    match operation {
        Operation::Construct => ledger.constructs += 1,
        Operation::Duplicate => ledger.duplicates += 1,
        Operation::Transfer => ledger.transfers += 1,
        Operation::Assign => ledger.assigns += 1,
        Operation::TransferAssign => ledger.transfer_assigns += 1,
    }

    LEDGER.with(|cell| cell.set(ledger));
    Ok(())
}

/// Element that counts its lifecycle in the thread's [`Ledger`] and fails on
/// demand according to [`TrackedBehaviour`].
///
/// The const parameters are the declared capabilities:
/// `TRANSFER_NEVER_FAILS` becomes [`Element::INFALLIBLE_TRANSFER`] and
/// `CAN_DUPLICATE` becomes [`Element::DUPLICABLE`].
#[derive(Debug)]
pub struct Tracked<const TRANSFER_NEVER_FAILS: bool, const CAN_DUPLICATE: bool> {
    value: u64,
    moved_from: bool,
}

/// Transfers never fail; duplication is supported. Grows by transfer.
pub type NothrowTracked = Tracked<true, true>;

/// Transfers may fail; duplication is supported. Grows by duplication.
pub type ThrowingTracked = Tracked<false, true>;

/// Transfers may fail; no duplication. Grows by transfer.
pub type UniqueTracked = Tracked<false, false>;

/// Transfers never fail; no duplication. Grows by transfer.
pub type MoveOnlyTracked = Tracked<true, false>;

impl<const TRANSFER_NEVER_FAILS: bool, const CAN_DUPLICATE: bool>
    Tracked<TRANSFER_NEVER_FAILS, CAN_DUPLICATE>
{
    /// Creates a live element holding `value`.
    pub fn new(value: u64) -> Self {
        LEDGER.with(|cell| {
            let mut ledger = cell.get();
            ledger.values += 1;
            cell.set(ledger);
        });

        Self {
            value,
            moved_from: false,
        }
    }

    /// Returns the held value (`0` once moved-from).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns `true` if the value was transferred out of this element.
    pub fn is_moved_from(&self) -> bool {
        self.moved_from
    }

    fn vacate(&mut self) -> (u64, bool) {
        let taken = (self.value, self.moved_from);
        self.value = 0;
        self.moved_from = true;
        taken
    }
}

impl<const TRANSFER_NEVER_FAILS: bool, const CAN_DUPLICATE: bool> Element
    for Tracked<TRANSFER_NEVER_FAILS, CAN_DUPLICATE>
{
    const INFALLIBLE_TRANSFER: bool = TRANSFER_NEVER_FAILS;
    const DUPLICABLE: bool = CAN_DUPLICATE;

    fn construct() -> Result<Self, ElementError> {
        record(Operation::Construct, true)?;

        Ok(Self {
            value: 0,
            moved_from: false,
        })
    }

    fn duplicate(&self) -> Result<Self, ElementError> {
        if !CAN_DUPLICATE {
            return Err(ElementError::Unsupported);
        }

        record(Operation::Duplicate, true)?;

        Ok(Self {
            value: self.value,
            moved_from: self.moved_from,
        })
    }

    fn transfer(&mut self) -> Result<Self, ElementError> {
        record(Operation::Transfer, !TRANSFER_NEVER_FAILS)?;

        let (value, moved_from) = self.vacate();
        Ok(Self { value, moved_from })
    }

    fn assign(&mut self, source: &Self) -> Result<(), ElementError> {
        if !CAN_DUPLICATE {
            return Err(ElementError::Unsupported);
        }

        record(Operation::Assign, true)?;

        self.value = source.value;
        self.moved_from = source.moved_from;
        Ok(())
    }

    fn assign_transfer(&mut self, source: &mut Self) -> Result<(), ElementError> {
        record(Operation::TransferAssign, !TRANSFER_NEVER_FAILS)?;

        (self.value, self.moved_from) = source.vacate();
        Ok(())
    }
}

impl<const TRANSFER_NEVER_FAILS: bool, const CAN_DUPLICATE: bool> Drop
    for Tracked<TRANSFER_NEVER_FAILS, CAN_DUPLICATE>
{
    fn drop(&mut self) {
        LEDGER.with(|cell| {
            let mut ledger = cell.get();
            ledger.drops += 1;
            cell.set(ledger);
        });
    }
}

impl<const TRANSFER_NEVER_FAILS: bool, const CAN_DUPLICATE: bool> PartialEq<u64>
    for Tracked<TRANSFER_NEVER_FAILS, CAN_DUPLICATE>
{
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}
