//! Nim analysis of a position.
//!
//! Every row behaves as a Nim heap: spans may straddle cleared cells, so a
//! move removes any positive number of a row's remaining tokens. The player
//! who faces a position whose per-bit column sums are all even loses against
//! correct play.

use crate::core::Board;

/// Bits needed for the largest possible row count, i.e. `num_columns`.
pub fn bit_width(num_columns: usize) -> usize {
    (usize::BITS - num_columns.leading_zeros()).max(1) as usize
}

/// Fixed-width binary digits of `value`, most significant bit first.
pub fn binary_digits(value: usize, width: usize) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|bit| ((value >> bit) & 1) as u8)
        .collect()
}

/// Per-bit-position totals of the binary row counts, most significant first.
pub fn column_sums(row_counts: &[usize], width: usize) -> Vec<usize> {
    let mut sums = vec![0; width];
    for &count in row_counts {
        for (sum, digit) in sums.iter_mut().zip(binary_digits(count, width)) {
            *sum += digit as usize;
        }
    }
    sums
}

/// XOR of the row counts.
pub fn nim_sum(board: &Board) -> usize {
    board.row_counts().iter().fold(0, |acc, &c| acc ^ c)
}

/// True when every per-bit column sum is even, which makes the position lost
/// for the player about to move and won for the player who just moved.
pub fn is_balanced(board: &Board) -> bool {
    let width = bit_width(board.num_columns());
    column_sums(&board.row_counts(), width)
        .iter()
        .all(|sum| sum % 2 == 0)
}
