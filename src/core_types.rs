use serde::{Deserialize, Serialize};

/// One symbol of the 30-key alphabet, stored as its ASCII byte.
///
/// Legal values are `A..=Z` plus `,` `.` `;` `/`.
pub type KeyValue = u8;

/// One of the 30 grid slots, numbered row-major from 0 to 29.
pub type Position = u8;

pub type Row = u8;
pub type Col = u8;

/// A key pinned to a single position for the lifetime of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedKey {
    pub val: KeyValue,
    pub pos: Position,
}

impl FixedKey {
    pub fn new(val: KeyValue, pos: Position) -> Self {
        Self { val, pos }
    }
}
