//! Match detection: 4-connected same-colour components via iterative flood fill.

use crate::grid::{Grid, PuyoColor};

/// Minimum component size that qualifies for clearing.
pub const MATCH_MIN: usize = 4;

/// Fixed neighbour push order: up, down, left, right. No diagonals.
const NEIGHBOURS_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// One clearable component: a maximal 4-connected set of cells sharing a colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: PuyoColor,
    pub cells: Vec<(usize, usize)>,
}

/// All qualifying (size >= [`MATCH_MIN`]) groups in the grid.
///
/// Row-major outer scan; each unvisited occupied cell seeds a stack-based
/// depth-first traversal that only admits identically coloured neighbours.
/// Every traversed cell is marked visited, sub-threshold components included,
/// so no cell is walked twice. Traversal order is fixed, so the result is
/// reproducible for a given grid snapshot.
pub fn find_groups(grid: &Grid) -> Vec<Group> {
    let (cols, rows) = (grid.cols(), grid.rows());
    let mut visited = vec![false; cols * rows];
    let mut groups = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if visited[row * cols + col] {
                continue;
            }
            let Some(color) = grid.color_at(col, row) else {
                continue;
            };
            visited[row * cols + col] = true;
            let mut cells = Vec::new();
            let mut stack = vec![(col, row)];
            while let Some((c, r)) = stack.pop() {
                cells.push((c, r));
                for (dc, dr) in NEIGHBOURS_4 {
                    let nc = c as i32 + dc;
                    let nr = r as i32 + dr;
                    if nc < 0 || nr < 0 {
                        continue;
                    }
                    let (nc, nr) = (nc as usize, nr as usize);
                    if nc >= cols || nr >= rows || visited[nr * cols + nc] {
                        continue;
                    }
                    if grid.color_at(nc, nr) == Some(color) {
                        visited[nr * cols + nc] = true;
                        stack.push((nc, nr));
                    }
                }
            }
            if cells.len() >= MATCH_MIN {
                groups.push(Group { color, cells });
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows[0].len(), rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let color = match ch {
                    'R' => Some(PuyoColor::Red),
                    'G' => Some(PuyoColor::Green),
                    'B' => Some(PuyoColor::Blue),
                    'Y' => Some(PuyoColor::Yellow),
                    'P' => Some(PuyoColor::Purple),
                    _ => None,
                };
                if let Some(color) = color {
                    grid.occupy(c, r, color);
                }
            }
        }
        grid
    }

    #[test]
    fn test_empty_grid_has_no_groups() {
        assert!(find_groups(&Grid::default()).is_empty());
    }

    #[test]
    fn test_sub_threshold_components_excluded() {
        let grid = grid_from_rows(&["RRR...", "......", "..GG..", "..GG.."]);
        let groups = find_groups(&grid);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].color, PuyoColor::Green);
        assert_eq!(groups[0].cells.len(), 4);
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let grid = grid_from_rows(&["R.R...", ".R.R..", "R.R...", ".R.R.."]);
        assert!(find_groups(&grid).is_empty());
    }

    #[test]
    fn test_same_shape_different_colors_split() {
        // An L of red touching an L of blue: two components, only red qualifies.
        let grid = grid_from_rows(&["R.....", "R.....", "RRBB..", "...B.."]);
        let groups = find_groups(&grid);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].color, PuyoColor::Red);
    }

    #[test]
    fn test_groups_disjoint_and_union_is_qualifying_cells() {
        let grid = grid_from_rows(&[
            "RRRR..",
            "....GG",
            "BB..GG",
            "BB....",
            "YYY...",
            "......",
        ]);
        let groups = find_groups(&grid);
        assert_eq!(groups.len(), 3);
        let mut seen = HashSet::new();
        for group in &groups {
            for &cell in &group.cells {
                assert!(seen.insert(cell), "cell {cell:?} appears in two groups");
            }
        }
        // The 3-cell yellow run must not be in the union.
        assert_eq!(seen.len(), 12);
        assert!(!seen.contains(&(0, 4)));
    }

    #[test]
    fn test_result_is_deterministic() {
        let grid = grid_from_rows(&["RRRR..", "R..R..", "RRRR..", "......"]);
        let a = find_groups(&grid);
        let b = find_groups(&grid);
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].cells.len(), 10);
    }
}
