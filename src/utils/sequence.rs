//! Slice helpers: membership, head/tail slicing and integer ranges.

use crate::{Error, Result};

pub fn contains<T: PartialEq>(items: &[T], item: &T) -> bool {
    items.contains(item)
}

pub fn first<T>(items: &[T]) -> Option<&T> {
    items.first()
}

/// Up to `amount` leading items. Negative amounts yield an empty slice.
pub fn first_n<T>(items: &[T], amount: i64) -> &[T] {
    &items[..clamp(amount, items.len())]
}

/// Alias of [`first_n`].
pub fn take<T>(items: &[T], amount: i64) -> &[T] {
    first_n(items, amount)
}

pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

/// Up to `amount` trailing items. Negative amounts yield an empty slice.
pub fn last_n<T>(items: &[T], amount: i64) -> &[T] {
    &items[items.len() - clamp(amount, items.len())..]
}

pub fn clone_sequence<T: Clone>(items: &[T]) -> Vec<T> {
    items.to_vec()
}

/// `count` integers starting at `start` (default 0), `step` apart (default 1).
///
/// Fails when any value of the range does not fit in an `i64`.
pub fn range(count: usize, step: Option<i64>, start: Option<i64>) -> Result<Vec<i64>> {
    let step = step.unwrap_or(1);
    let start = start.unwrap_or(0);
    let count = i64::try_from(count).map_err(|_| out_of_bounds("count", count, step, start))?;

    // The range is linear, so every value lies between `start` and the last one.
    if count > 0 {
        (count - 1)
            .checked_mul(step)
            .and_then(|offset| start.checked_add(offset))
            .ok_or_else(|| out_of_bounds("step", count as usize, step, start))?;
    }

    Ok((0..count).map(|i| start + i * step).collect())
}

fn out_of_bounds(field: &str, count: usize, step: i64, start: i64) -> Error {
    Error::validation_invalid_argument(
        field,
        format!(
            "Range of {} values from {} by {} overflows a 64-bit integer",
            count, start, step
        ),
        None,
        None,
    )
}

fn clamp(amount: i64, len: usize) -> usize {
    if amount <= 0 {
        0
    } else {
        (amount as u64).min(len as u64) as usize
    }
}
