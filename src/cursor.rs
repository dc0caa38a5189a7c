//! Cursor coordinates.
//!
//! A cursor is stored as a *display index* into the formatted value. Edits
//! operate on the *raw index* into the digit string. The three-character
//! separator occupies display indices `SEPARATOR_START..=SEPARATOR_END` and
//! has no raw counterpart, so any display index inside it collapses to
//! `AFTER_SEPARATOR`.

use crate::consts::{AFTER_SEPARATOR, MONTH_DIGITS, SEPARATOR_END, SEPARATOR_LEN, SEPARATOR_START};

/// Direction of a single-step cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Moves a display index that falls inside the separator to just past it
pub fn normalize_cursor(pos: usize) -> usize {
    if (SEPARATOR_START + 1..=SEPARATOR_END).contains(&pos) {
        AFTER_SEPARATOR
    } else {
        pos
    }
}

pub const fn value_index_to_raw(pos: usize) -> usize {
    if pos <= MONTH_DIGITS {
        pos
    } else {
        pos.saturating_sub(SEPARATOR_LEN)
    }
}

pub const fn raw_index_to_value(index: usize) -> usize {
    if index <= MONTH_DIGITS {
        index
    } else {
        index + SEPARATOR_LEN
    }
}

/// Snaps a position inside the separator span (inclusive of the slot right
/// after the month) to its far side in the direction of travel.
pub fn skip_separator(pos: usize, direction: Direction) -> usize {
    if !(SEPARATOR_START..=SEPARATOR_END).contains(&pos) {
        return pos;
    }
    match direction {
        Direction::Left => SEPARATOR_START,
        Direction::Right => AFTER_SEPARATOR,
    }
}

/// Moves one display position from `pos`, skipping the separator and
/// staying within `0..=len`.
pub fn step(pos: usize, direction: Direction, len: usize) -> usize {
    let moved = match direction {
        Direction::Left => pos.saturating_sub(1),
        Direction::Right => pos.saturating_add(1),
    };
    skip_separator(moved, direction).min(len)
}
