use crate::core_types::{KeyValue, Position};

/// Number of keys in the 3x10 block this crate operates on.
pub const KEY_COUNT: usize = 30;

pub const ROW_COUNT: usize = 3;
pub const COL_COUNT: usize = 10;

/// Size of the shared lookup table inside a `Layout`.
/// Positions occupy 0..=29 and key values 44..=90, so one table indexed by
/// either never sees the two ranges collide.
pub const TABLE_SIZE: usize = b'Z' as usize + 1;

/// The 30 legal key values in ascending byte order.
pub const KEY_VALUES: [KeyValue; KEY_COUNT] = [
    b',', b'.', b'/', b';', b'A', b'B', b'C', b'D', b'E', b'F', //
    b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', b'P', //
    b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z', //
];

/// The punctuation marks that complete the alphabet beside `A..=Z`.
pub const PUNCTUATION: [KeyValue; 4] = [b',', b'.', b';', b'/'];

pub const POSITIONS: [Position; KEY_COUNT] = {
    let mut out = [0; KEY_COUNT];
    let mut i = 0;
    while i < KEY_COUNT {
        out[i] = i as Position;
        i += 1;
    }
    out
};

/// Smallest area that can take part in a swap.
pub const MIN_AREA_SIZE: usize = 2;
pub const MAX_AREA_SIZE: usize = KEY_COUNT;

/// A partition with fewer free keys than this has nothing to mutate.
pub const MIN_MUTABLE_KEYS: usize = 2;

pub const DEFAULT_SEED: u64 = 42;
