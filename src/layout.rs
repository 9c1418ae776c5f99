use crate::consts::{KEY_COUNT, KEY_VALUES, POSITIONS, TABLE_SIZE};
use crate::core_types::{KeyValue, Position};
use crate::error::LayoutError;
use crate::util::{is_key_value_legal, is_position_legal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bijection between the 30 key values and the 30 grid positions.
///
/// Both directions live in one table: `table[pos]` holds the value at `pos`
/// and `table[val]` holds the position of `val`. The index ranges never
/// overlap (positions stop at 29, values start at `,` = 44), so a lookup in
/// either direction is a single index.
///
/// Ordering is lexicographic over the values in position order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Layout {
    table: [u8; TABLE_SIZE],
}

impl Layout {
    /// Validates `seq` and loads it, position 0 first.
    /// E.g. `"QWERTYUIOPASDFGHJKL;ZXCVBNM,./"`.
    pub fn parse(seq: &str) -> Result<Self, LayoutError> {
        Self::verify(seq)?;
        Ok(Self::load_unchecked(seq))
    }

    /// Loads `seq` without validating it.
    ///
    /// The caller should pass 30 legal key values. Illegal bytes are
    /// skipped and leave their position empty, and a short `seq` leaves the
    /// tail empty; either way, and with duplicates, `valid()` rejects the
    /// result. Call `valid()` before trusting it.
    pub fn load_unchecked(seq: &str) -> Self {
        let mut layout = Self::blank();
        for (pos, val) in seq.bytes().take(KEY_COUNT).enumerate() {
            if is_key_value_legal(val) {
                layout.set(val, pos as Position);
            }
        }
        layout
    }

    /// An unfilled table. Not valid until every key has been `set`.
    pub fn blank() -> Self {
        Self {
            table: [0; TABLE_SIZE],
        }
    }

    fn verify(seq: &str) -> Result<(), LayoutError> {
        let len = seq.chars().count();
        if len != KEY_COUNT {
            return Err(LayoutError::Length {
                input: seq.to_string(),
                expected: KEY_COUNT,
                actual: len,
            });
        }

        if let Some(ch) = seq
            .chars()
            .find(|&ch| !ch.is_ascii() || !is_key_value_legal(ch as u8))
        {
            return Err(LayoutError::IllegalChar {
                input: seq.to_string(),
                ch,
            });
        }

        let mut seen = [false; TABLE_SIZE];
        for val in seq.bytes() {
            if seen[val as usize] {
                return Err(LayoutError::Duplicate {
                    input: seq.to_string(),
                    ch: val as char,
                });
            }
            seen[val as usize] = true;
        }
        Ok(())
    }

    #[inline(always)]
    pub fn get_value(&self, pos: Position) -> KeyValue {
        debug_assert!(is_position_legal(pos));
        self.table[pos as usize]
    }

    #[inline(always)]
    pub fn get_position(&self, val: KeyValue) -> Position {
        debug_assert!(is_key_value_legal(val));
        self.table[val as usize]
    }

    /// Values in position order (the text form as bytes).
    pub fn keys(&self) -> &[KeyValue] {
        &self.table[..KEY_COUNT]
    }

    /// The three grid rows as text, top row first.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.keys()
            .chunks(crate::consts::COL_COUNT)
            .map(|row| row.iter().map(|&b| b as char).collect())
    }

    /// Overwrites both directions for this pair. Can break the bijection.
    #[inline(always)]
    pub(crate) fn set(&mut self, val: KeyValue, pos: Position) {
        debug_assert!(is_key_value_legal(val));
        debug_assert!(is_position_legal(pos));
        self.table[val as usize] = pos;
        self.table[pos as usize] = val;
    }

    /// Exchanges the values at two positions.
    #[inline(always)]
    pub fn swap(&mut self, pos1: Position, pos2: Position) {
        debug_assert!(is_position_legal(pos1));
        debug_assert!(is_position_legal(pos2));
        self.table.swap(pos1 as usize, pos2 as usize);
        let val1 = self.table[pos1 as usize];
        let val2 = self.table[pos2 as usize];
        self.table[val1 as usize] = pos1;
        self.table[val2 as usize] = pos2;
    }

    /// True iff the table is a full, self-consistent bijection.
    pub fn valid(&self) -> bool {
        let positions_ok = POSITIONS.iter().all(|&pos| {
            let val = self.table[pos as usize];
            is_key_value_legal(val) && self.table[val as usize] == pos
        });
        let values_ok = KEY_VALUES.iter().all(|&val| {
            let pos = self.table[val as usize];
            is_position_legal(pos) && self.table[pos as usize] == val
        });
        positions_ok && values_ok
    }

    /// Positions whose values differ between `self` and `other`.
    pub fn diff<'a>(&'a self, other: &'a Layout) -> impl Iterator<Item = Position> + 'a {
        POSITIONS
            .iter()
            .copied()
            .filter(move |&pos| self.get_value(pos) != other.get_value(pos))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &val in self.keys() {
            write!(f, "{}", val as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Layout").field(&self.to_string()).finish()
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Layout {
    type Error = LayoutError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Layout {
    type Error = LayoutError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.to_string()
    }
}
