use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for cell totals and per-level scores.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Level number, starting at 1.
pub type Level = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One-cell player movement intents produced by the input layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Translates `coords` by one cell, returning a value only when it remains in bounds.
    pub fn step(self, coords: Coord2, bounds: Coord2) -> Option<Coord2> {
        apply_delta(coords, self.delta(), bounds)
    }
}

const CARDINAL_DISPLACEMENTS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the 4-connected neighbors of a cell, clipped to the board bounds.
#[derive(Debug)]
pub struct CardinalIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl CardinalIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for CardinalIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= CARDINAL_DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                CARDINAL_DISPLACEMENTS[self.index as usize],
                self.bounds,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_iter_clips_at_corners_and_edges() {
        let corner: alloc::vec::Vec<_> = CardinalIter::new((0, 0), (3, 3)).collect();
        assert_eq!(corner, [(1, 0), (0, 1)]);

        let center: alloc::vec::Vec<_> = CardinalIter::new((1, 1), (3, 3)).collect();
        assert_eq!(center, [(1, 0), (0, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn direction_step_rejects_out_of_bounds() {
        assert_eq!(Direction::Up.step((0, 0), (3, 3)), None);
        assert_eq!(Direction::Left.step((0, 2), (3, 3)), None);
        assert_eq!(Direction::Down.step((2, 2), (3, 3)), None);
        assert_eq!(Direction::Right.step((1, 1), (3, 3)), Some((2, 1)));
    }
}
