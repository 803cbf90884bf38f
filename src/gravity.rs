//! Post-clear settling: column compaction after a clearing pass.

use crate::grid::Grid;

/// Let occupied cells fall into the gaps a clearing pass left behind.
///
/// Each column is resolved independently in a single top-to-bottom pass: for
/// every empty cell, the nearest occupant strictly above it in the same
/// column slides down into the slot, leaving its source empty. Gaps are each
/// resolved against whatever is currently above them at the moment the scan
/// reaches them; this exact scan order is part of the contract and is not
/// interchangeable with a one-shot stable compaction on multi-gap columns.
/// No colours are introduced or dropped.
pub fn apply_gravity(grid: &mut Grid) {
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            if !grid.is_empty(col, row) {
                continue;
            }
            for src in (0..row).rev() {
                if let Some(color) = grid.color_at(col, src) {
                    grid.clear(col, src);
                    grid.occupy(col, row, color);
                    break;
                }
            }
        }
    }
}
