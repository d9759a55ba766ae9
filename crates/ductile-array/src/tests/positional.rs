// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::support::test_utils::{
    NothrowTracked, ThrowingTracked, Tracked, TrackedBehaviour, change_behaviour, ledger, reset,
};
use crate::{ArrayError, DynamicArray, ElementError};

fn values<const X: bool, const D: bool>(array: &DynamicArray<Tracked<X, D>>) -> Vec<u64> {
    array.iter().map(Tracked::value).collect()
}

fn tracked_array<const X: bool, const D: bool>(
    items: &[u64],
    capacity: usize,
) -> DynamicArray<Tracked<X, D>> {
    let mut array = DynamicArray::with_capacity(capacity).expect("Failed to with_capacity(..)");
    for item in items {
        array
            .push_back(Tracked::new(*item))
            .expect("Failed to push_back(..)");
    }
    array
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn test_push_insert_erase_pop_scenario() {
    let mut array = DynamicArray::new();

    array.push_back(1u32).expect("Failed to push_back(..)");
    array.push_back(2).expect("Failed to push_back(..)");
    array.push_back(3).expect("Failed to push_back(..)");
    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.len(), 3);

    let inserted = array.insert(1, 9).expect("Failed to insert(..)");
    assert_eq!(inserted, 1);
    assert_eq!(array, [1, 9, 2, 3]);
    assert_eq!(array.len(), 4);

    let next = array.erase(1).expect("Failed to erase(..)");
    assert_eq!(next, 1);
    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.len(), 3);

    array.pop_back();
    assert_eq!(array, [1, 2]);
    assert_eq!(array.len(), 2);
}

// =============================================================================
// push_back() / push_back_copy()
// =============================================================================

#[test]
fn test_push_back_capacity_doubles() {
    let mut array = DynamicArray::new();
    let mut capacities = Vec::new();

    for i in 0u16..9 {
        array.push_back(i).expect("Failed to push_back(..)");
        capacities.push(array.capacity());
    }

    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_push_back_copy_duplicates() {
    reset();
    let mut array = tracked_array::<true, true>(&[], 4);
    let original = NothrowTracked::new(5);

    array
        .push_back_copy(&original)
        .expect("Failed to push_back_copy(..)");

    assert_eq!(ledger().duplicates, 1);
    assert_eq!(values(&array), [5]);
    assert_eq!(original.value(), 5);
}

// =============================================================================
// emplace_back()
// =============================================================================

#[test]
fn test_emplace_back_returns_new_element() {
    let mut array = DynamicArray::new();

    *array
        .emplace_back(|| Ok(5u32))
        .expect("Failed to emplace_back(..)") += 1;

    assert_eq!(array, [6]);
}

#[test]
fn test_emplace_back_constructor_failure_at_capacity() {
    let mut array = DynamicArray::from_slice(&[1u32, 2]).expect("Failed to from_slice(..)");

    let result = array.emplace_back(|| Err(ElementError::Construct));

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Construct))
    ));
    assert_eq!(array, [1, 2]);
    assert_eq!(array.capacity(), 2);
}

// =============================================================================
// insert() / insert_copy() / emplace()
// =============================================================================

#[test]
fn test_insert_into_empty() {
    let mut array = DynamicArray::new();

    let index = array.insert(0, 7u8).expect("Failed to insert(..)");

    assert_eq!(index, 0);
    assert_eq!(array, [7]);
    assert_eq!(array.capacity(), 1);
}

#[test]
fn test_insert_at_front_in_place() {
    let mut array = DynamicArray::with_capacity(8).expect("Failed to with_capacity(..)");
    for i in 1u8..=3 {
        array.push_back(i).expect("Failed to push_back(..)");
    }

    array.insert(0, 0).expect("Failed to insert(..)");

    assert_eq!(array, [0, 1, 2, 3]);
    assert_eq!(array.capacity(), 8);
}

#[test]
fn test_insert_at_end_in_place() {
    let mut array = DynamicArray::with_capacity(4).expect("Failed to with_capacity(..)");
    array.push_back(1u8).expect("Failed to push_back(..)");

    let index = array.insert(1, 2).expect("Failed to insert(..)");

    assert_eq!(index, 1);
    assert_eq!(array, [1, 2]);
}

#[test]
fn test_insert_at_capacity_relocates_around_new_element() {
    let mut array = DynamicArray::from_slice(&[1u8, 2, 3, 4]).expect("Failed to from_slice(..)");

    array.insert(2, 9).expect("Failed to insert(..)");

    assert_eq!(array, [1, 2, 9, 3, 4]);
    assert_eq!(array.capacity(), 8);
}

#[test]
fn test_insert_at_capacity_at_front_and_back() {
    let mut front = DynamicArray::from_slice(&[1u8, 2]).expect("Failed to from_slice(..)");
    let mut back = DynamicArray::from_slice(&[1u8, 2]).expect("Failed to from_slice(..)");

    front.insert(0, 0).expect("Failed to insert(..)");
    back.insert(2, 3).expect("Failed to insert(..)");

    assert_eq!(front, [0, 1, 2]);
    assert_eq!(back, [1, 2, 3]);
}

#[test]
fn test_insert_copy() {
    let mut array = DynamicArray::from_slice(&[String::from("a"), String::from("c")])
        .expect("Failed to from_slice(..)");
    let value = String::from("b");

    array.insert_copy(1, &value).expect("Failed to insert_copy(..)");

    assert_eq!(array, ["a", "b", "c"]);
    assert_eq!(value, "b");
}

#[test]
#[should_panic(expected = "beyond length")]
fn test_insert_beyond_len_panics() {
    let mut array = DynamicArray::from_slice(&[1u8]).expect("Failed to from_slice(..)");

    let _ = array.insert(2, 5);
}

#[test]
fn test_insert_in_place_shifts_by_transfer() {
    reset();
    let mut array = tracked_array::<true, true>(&[1, 2, 3], 4);
    let before = ledger();

    array
        .insert(0, NothrowTracked::new(9))
        .expect("Failed to insert(..)");

    assert_eq!(values(&array), [9, 1, 2, 3]);
    assert_eq!(ledger().transfers - before.transfers, 1);
    assert_eq!(ledger().transfer_assigns - before.transfer_assigns, 2);
    assert_eq!(ledger().duplicates - before.duplicates, 0);
    assert_eq!(ledger().drops - before.drops, 1);
    assert!(array.iter().all(|element| !element.is_moved_from()));

    drop(array);
    assert!(ledger().is_balanced());
}

#[test]
fn test_emplace_constructor_failure_in_place_leaves_array_unchanged() {
    let mut array = DynamicArray::with_capacity(4).expect("Failed to with_capacity(..)");
    for i in 1u32..=3 {
        array.push_back(i).expect("Failed to push_back(..)");
    }

    let result = array.emplace(1, || Err(ElementError::Construct));

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Construct))
    ));
    assert_eq!(array, [1, 2, 3]);
}

#[test]
fn test_insert_in_place_transfer_failure_leaves_array_unchanged() {
    reset();
    let mut array = tracked_array::<false, true>(&[1, 2, 3], 4);
    change_behaviour(TrackedBehaviour::FailAtTransfer(ledger().transfers));

    let result = array.insert(1, ThrowingTracked::new(9));

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Transfer))
    ));
    assert_eq!(values(&array), [1, 2, 3]);
    assert_eq!(ledger().live(), 3);

    drop(array);
    assert!(ledger().is_balanced());
}

#[test]
fn test_insert_shift_failure_keeps_every_slot_live() {
    reset();
    let mut array = tracked_array::<false, true>(&[1, 2, 3, 4], 8);
    change_behaviour(TrackedBehaviour::FailAtAssign(1));

    let result = array.insert(0, ThrowingTracked::new(9));

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Assign))
    ));
    assert_eq!(array.len(), 5);
    assert_eq!(values(&array), [1, 2, 0, 3, 4]);
    assert_eq!(ledger().live(), 5);

    drop(array);
    assert!(ledger().is_balanced());
}

#[test]
fn test_insert_at_capacity_duplicate_failure_leaves_array_unchanged() {
    reset();
    let mut array: DynamicArray<ThrowingTracked> = tracked_array(&[1, 2], 2);
    change_behaviour(TrackedBehaviour::FailAtDuplicate(ledger().duplicates + 1));

    let result = array.insert(1, ThrowingTracked::new(9));

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Duplicate))
    ));
    assert_eq!(values(&array), [1, 2]);
    assert_eq!(array.capacity(), 2);
    assert_eq!(ledger().live(), 2);

    drop(array);
    assert!(ledger().is_balanced());
}

#[test]
fn test_insert_at_capacity_duplicates_prefix_and_suffix() {
    reset();
    let mut array: DynamicArray<ThrowingTracked> = tracked_array(&[1, 2, 3, 4], 4);
    let before = ledger();

    array
        .insert(1, ThrowingTracked::new(9))
        .expect("Failed to insert(..)");

    assert_eq!(values(&array), [1, 9, 2, 3, 4]);
    assert_eq!(array.capacity(), 8);
    assert_eq!(ledger().duplicates - before.duplicates, 4);
    assert_eq!(ledger().transfers - before.transfers, 0);
}

// =============================================================================
// erase()
// =============================================================================

#[test]
fn test_erase_returns_following_index() {
    let mut array = DynamicArray::from_slice(&[1u8, 2, 3, 4]).expect("Failed to from_slice(..)");

    let next = array.erase(1).expect("Failed to erase(..)");

    assert_eq!(next, 1);
    assert_eq!(array[next], 3);
    assert_eq!(array, [1, 3, 4]);
    assert_eq!(array.capacity(), 4);
}

#[test]
fn test_erase_last() {
    let mut array = DynamicArray::from_slice(&[1u8, 2]).expect("Failed to from_slice(..)");

    let next = array.erase(1).expect("Failed to erase(..)");

    assert_eq!(next, array.len());
    assert_eq!(array, [1]);
}

#[test]
fn test_erase_only_element() {
    let mut array = DynamicArray::from_slice(&[String::from("x")]).expect("Failed to from_slice(..)");

    array.erase(0).expect("Failed to erase(..)");

    assert!(array.is_empty());
}

#[test]
fn test_erase_drops_exactly_one() {
    reset();
    let mut array = tracked_array::<true, true>(&[1, 2, 3, 4], 4);
    let before = ledger();

    array.erase(0).expect("Failed to erase(..)");

    assert_eq!(values(&array), [2, 3, 4]);
    assert_eq!(ledger().transfer_assigns - before.transfer_assigns, 3);
    assert_eq!(ledger().drops - before.drops, 1);
    assert_eq!(ledger().live(), 3);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_erase_end_panics() {
    let mut array = DynamicArray::from_slice(&[1u8, 2]).expect("Failed to from_slice(..)");

    let _ = array.erase(2);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_erase_on_empty_panics() {
    let mut array: DynamicArray<u8> = DynamicArray::new();

    let _ = array.erase(0);
}

#[test]
fn test_erase_shift_failure_keeps_every_slot_live() {
    reset();
    let mut array = tracked_array::<false, true>(&[1, 2, 3], 4);
    change_behaviour(TrackedBehaviour::FailAtAssign(1));

    let result = array.erase(0);

    assert!(matches!(
        result,
        Err(ArrayError::Element(ElementError::Assign))
    ));
    assert_eq!(array.len(), 3);
    assert_eq!(values(&array), [2, 0, 3]);

    drop(array);
    assert!(ledger().is_balanced());
}
