use crate::consts::{COL_COUNT, KEY_COUNT, PUNCTUATION, ROW_COUNT};
use crate::core_types::{Col, KeyValue, Position, Row};

#[inline(always)]
pub fn is_key_value_legal(val: KeyValue) -> bool {
    val.is_ascii_uppercase() || PUNCTUATION.contains(&val)
}

#[inline(always)]
pub fn is_position_legal(pos: Position) -> bool {
    (pos as usize) < KEY_COUNT
}

#[inline(always)]
pub fn is_row_legal(row: Row) -> bool {
    (row as usize) < ROW_COUNT
}

#[inline(always)]
pub fn is_col_legal(col: Col) -> bool {
    (col as usize) < COL_COUNT
}

pub fn coord_to_pos(row: Row, col: Col) -> Position {
    debug_assert!(is_row_legal(row) && is_col_legal(col));
    row * COL_COUNT as u8 + col
}

pub fn pos_to_row(pos: Position) -> Row {
    debug_assert!(is_position_legal(pos));
    pos / COL_COUNT as u8
}

pub fn pos_to_col(pos: Position) -> Col {
    debug_assert!(is_position_legal(pos));
    pos % COL_COUNT as u8
}
