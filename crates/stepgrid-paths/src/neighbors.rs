use std::f64::consts::SQRT_2;

use stepgrid_core::Point;

use crate::traits::Terrain;

/// Cost of an orthogonal step.
pub const STRAIGHT_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = SQRT_2;

/// Orthogonal offsets in expansion order: up, down, left, right.
pub const ORTHOGONAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
];

/// Diagonal offsets in expansion order, tried after [`ORTHOGONAL`].
pub const DIAGONAL: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

/// Cost of moving by `offset`.
#[inline]
pub fn step_cost(offset: Point) -> f64 {
    if offset.is_diagonal() {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// Cached neighbor computation helper.
///
/// Enumerates the passable neighbors of a position together with the cost
/// of stepping there. The order is fixed (orthogonal offsets first, then
/// diagonals) because it decides tie-breaking in every search.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<(Point, f64)>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the in-bounds, non-obstacle neighbors of `p` with their move
    /// costs. Diagonal steps are included iff `allow_diagonal`.
    pub fn moves<T: Terrain + ?Sized>(
        &mut self,
        terrain: &T,
        p: Point,
        allow_diagonal: bool,
    ) -> &[(Point, f64)] {
        self.buf.clear();
        let diagonals: &[Point] = if allow_diagonal { &DIAGONAL } else { &[] };
        for &d in ORTHOGONAL.iter().chain(diagonals) {
            let n = p + d;
            if terrain.contains(n) && !terrain.is_obstacle(n) {
                self.buf.push((n, step_cost(d)));
            }
        }
        &self.buf
    }
}

/// Allocating convenience form of [`Neighbors::moves`].
pub fn neighbors_and_costs<T: Terrain + ?Sized>(
    terrain: &T,
    p: Point,
    allow_diagonal: bool,
) -> Vec<(Point, f64)> {
    Neighbors::new().moves(terrain, p, allow_diagonal).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepgrid_core::Grid;

    fn positions(moves: &[(Point, f64)]) -> Vec<Point> {
        moves.iter().map(|&(p, _)| p).collect()
    }

    #[test]
    fn orthogonal_order_is_up_down_left_right() {
        let g = Grid::new(5, 5).unwrap();
        let moves = neighbors_and_costs(&g, Point::new(2, 2), false);
        assert_eq!(
            positions(&moves),
            vec![
                Point::new(2, 1),
                Point::new(2, 3),
                Point::new(1, 2),
                Point::new(3, 2),
            ]
        );
        assert!(moves.iter().all(|&(_, c)| c == STRAIGHT_COST));
    }

    #[test]
    fn diagonals_follow_orthogonals() {
        let g = Grid::new(5, 5).unwrap();
        let moves = neighbors_and_costs(&g, Point::new(2, 2), true);
        assert_eq!(moves.len(), 8);
        assert_eq!(
            positions(&moves[4..]),
            vec![
                Point::new(1, 1),
                Point::new(1, 3),
                Point::new(3, 1),
                Point::new(3, 3),
            ]
        );
        assert!(moves[4..].iter().all(|&(_, c)| c == DIAGONAL_COST));
    }

    #[test]
    fn bounds_and_obstacles_are_rejected() {
        let g = Grid::parse(
            "
            S#.
            #..
            ..E
            ",
        )
        .unwrap();
        let mut nb = Neighbors::new();
        assert!(nb.moves(&g, Point::new(0, 0), false).is_empty());
        assert_eq!(positions(nb.moves(&g, Point::new(0, 0), true)), vec![Point::new(1, 1)]);
        // Corner cutting past obstacles is allowed.
        let around = positions(nb.moves(&g, Point::new(1, 1), true));
        assert_eq!(
            around,
            vec![
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(0, 0),
                Point::new(0, 2),
                Point::new(2, 0),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn step_costs() {
        assert_eq!(step_cost(Point::new(0, 1)), 1.0);
        assert_eq!(step_cost(Point::new(-1, 1)), SQRT_2);
    }
}
