use alloc::collections::VecDeque;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A fully colored play grid.
///
/// A `Board` cannot represent an unfilled cell; the generation-time
/// placeholder only exists inside [`StampedBoardGenerator`] and is gone by the
/// time a board is handed out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<ColorSlot>,
}

impl Board {
    pub(crate) fn from_cells(cells: Array2<ColorSlot>) -> Self {
        Self { cells }
    }

    /// Builds a board from row-major slot indices, `slots[y * width + x]`.
    /// Both dimensions must be non-zero; an empty board has no top-left cell
    /// to seed regions or the uniformity check from.
    pub fn from_slots((size_x, size_y): Coord2, slots: &[u8]) -> Result<Self> {
        if size_x == 0 || size_y == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if slots.len() != usize::from(mult(size_x, size_y)) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Array2::from_elem(
            (size_x, size_y).to_nd_index(),
            ColorSlot::new_unchecked(0),
        );
        for y in 0..size_y {
            for x in 0..size_x {
                let raw = slots[usize::from(y) * usize::from(size_x) + usize::from(x)];
                cells[(x, y).to_nd_index()] = ColorSlot::new(raw)?;
            }
        }
        Ok(Self::from_cells(cells))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn cell_at(&self, coords: Coord2) -> ColorSlot {
        self[coords]
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = ColorSlot> + '_ {
        self.cells.iter().copied()
    }

    pub fn contains_color(&self, slot: ColorSlot) -> bool {
        self.cells.iter().any(|&cell| cell == slot)
    }

    /// True iff every cell matches the top-left cell, i.e. the level is done.
    pub fn is_uniform(&self) -> bool {
        let first = self[(0, 0)];
        self.cells.iter().all(|&cell| cell == first)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> CardinalIter {
        CardinalIter::new(coords, self.size())
    }

    /// Recolors the maximal 4-connected `target`-colored region containing
    /// `start` to `replacement`, returning the number of cells changed.
    ///
    /// A no-op (0) when `start` is out of bounds, the start cell is not
    /// `target`, or the two colors are equal. Iterative so a region covering
    /// the whole board stays off the call stack; recoloring in place doubles
    /// as the visited mark, bounding the queue by the board size.
    pub fn flood_fill(
        &mut self,
        start: Coord2,
        target: ColorSlot,
        replacement: ColorSlot,
    ) -> CellCount {
        if !self.in_bounds(start) || self[start] != target || target == replacement {
            return 0;
        }

        let mut changed: CellCount = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if self[coords] != target {
                continue;
            }

            self[coords] = replacement;
            changed += 1;

            to_visit.extend(
                self.iter_neighbors(coords)
                    .filter(|&pos| self[pos] == target),
            );
        }

        log::trace!(
            "flood fill from {:?}: {} -> {}, {} cells",
            start,
            target.index(),
            replacement.index(),
            changed
        );
        changed
    }
}

impl Index<Coord2> for Board {
    type Output = ColorSlot;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.cells[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: u8) -> ColorSlot {
        ColorSlot::new(index).unwrap()
    }

    #[test]
    fn from_slots_rejects_bad_shape_and_bad_slots() {
        assert_eq!(
            Board::from_slots((2, 2), &[0, 1, 2]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_slots((2, 2), &[0, 1, 2, 6]),
            Err(GameError::InvalidColorSlot)
        );
    }

    #[test]
    fn zero_area_boards_are_rejected() {
        assert_eq!(
            Board::from_slots((0, 0), &[]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_slots((0, 3), &[]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_slots((3, 0), &[]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn from_slots_is_row_major() {
        let board = Board::from_slots((2, 2), &[0, 1, 2, 3]).unwrap();

        assert_eq!(board[(1, 0)], slot(1));
        assert_eq!(board[(0, 1)], slot(2));
    }

    #[test]
    fn uniform_board_is_detected() {
        let board = Board::from_slots((2, 2), &[1, 1, 1, 1]).unwrap();
        assert!(board.is_uniform());

        let board = Board::from_slots((2, 2), &[1, 1, 1, 2]).unwrap();
        assert!(!board.is_uniform());
    }

    #[test]
    fn flood_fill_is_a_noop_for_identical_colors() {
        let mut board = Board::from_slots((2, 2), &[1, 1, 1, 1]).unwrap();

        assert_eq!(board.flood_fill((0, 0), slot(1), slot(1)), 0);
        assert!(board.is_uniform());
    }

    #[test]
    fn flood_fill_is_a_noop_out_of_bounds_or_off_target() {
        let mut board = Board::from_slots((2, 2), &[1, 1, 1, 2]).unwrap();

        assert_eq!(board.flood_fill((5, 0), slot(1), slot(0)), 0);
        assert_eq!(board.flood_fill((0, 0), slot(2), slot(0)), 0);
        assert_eq!(board[(0, 0)], slot(1));
    }

    #[test]
    fn flood_fill_recolors_only_the_connected_region() {
        // two slot-1 regions separated by a slot-2 diagonal
        let mut board = Board::from_slots(
            (3, 3),
            &[
                1, 1, 2, //
                1, 2, 1, //
                2, 1, 1,
            ],
        )
        .unwrap();

        assert_eq!(board.flood_fill((0, 0), slot(1), slot(0)), 3);
        assert_eq!(board[(0, 0)], slot(0));
        assert_eq!(board[(1, 0)], slot(0));
        assert_eq!(board[(0, 1)], slot(0));
        // the other region is untouched
        assert_eq!(board[(2, 1)], slot(1));
        assert_eq!(board[(2, 2)], slot(1));
    }

    #[test]
    fn flood_fill_spans_a_whole_board_region() {
        let mut board = Board::from_slots((30, 30), &[0; 900]).unwrap();

        assert_eq!(board.flood_fill((0, 0), slot(0), slot(3)), 900);
        assert!(board.is_uniform());
        assert_eq!(board[(29, 29)], slot(3));
    }
}
