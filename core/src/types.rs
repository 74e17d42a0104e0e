use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Distinct cells around a center, never more than eight.
pub type Neighbors = SmallVec<[Coord2; 8]>;

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

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, clamping each axis into `0..bounds`.
fn apply_clamped_delta(coords: Coord2, delta: (i16, i16), bounds: Coord2) -> Coord2 {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let max_row = i16::from(rows.saturating_sub(1));
    let max_col = i16::from(cols.saturating_sub(1));
    let next_row = (i16::from(row) + d_row).clamp(0, max_row);
    let next_col = (i16::from(col) + d_col).clamp(0, max_col);

    // both values are inside `0..=Coord::MAX` after clamping
    (next_row as Coord, next_col as Coord)
}

/// Cells adjacent to `center` on a board of `bounds = (height, width)`.
///
/// Every displacement is clamped onto the board rather than dropped, so near an
/// edge several displacements land on the same cell, or back on `center`.
/// Those collisions are collapsed and `center` is never part of the result.
pub fn clamped_neighbors(center: Coord2, bounds: Coord2) -> Neighbors {
    let mut neighbors = Neighbors::new();
    for delta in DISPLACEMENTS {
        let pos = apply_clamped_delta(center, delta, bounds);
        if pos != center && !neighbors.contains(&pos) {
            neighbors.push(pos);
        }
    }
    neighbors
}

pub trait AdjacentExt {
    fn bounds(&self) -> Coord2;

    fn adjacent(&self, center: Coord2) -> Neighbors {
        clamped_neighbors(center, self.bounds())
    }
}

impl<T> AdjacentExt for Array2<T> {
    fn bounds(&self) -> Coord2 {
        let (rows, cols) = self.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }
}
