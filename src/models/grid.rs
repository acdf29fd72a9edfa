// Grid model: the walkability matrix of a store floor

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlannerError, Result};
use crate::models::{CellKind, Coordinate, MapCell};

/// Largest number of cells a grid may hold
pub const MAX_GRID_CELLS: i64 = 1 << 20;

/// Which diagonal moves a search may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalMovement {
    /// Orthogonal moves only
    Never,
    /// Diagonal allowed when both orthogonal cells it passes are walkable (no corner cutting)
    #[default]
    OnlyWhenNoObstacles,
    /// Diagonal allowed when at least one of the two orthogonal cells is walkable
    IfAtMostOneObstacle,
    /// Any diagonal onto a walkable cell
    Always,
}

/// Immutable walkable/blocked matrix of a store floor.
///
/// Searches only ever read a grid; copies made with `clone` may be edited with
/// [`Grid::set_walkable`] without affecting the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

impl Grid {
    /// Creates a fully walkable grid of at most [`MAX_GRID_CELLS`] cells
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 || i64::from(width) * i64::from(height) > MAX_GRID_CELLS {
            return Err(PlannerError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            walkable: vec![true; width as usize * height as usize],
        })
    }

    /// Builds the grid of a store map: every listed cell other than the entrance
    /// blocks movement. Cells outside the bounds are rejected.
    ///
    /// Entrances are opened after all blocking items, so an item listed on the
    /// entrance cell never closes it, whatever the listing order.
    pub fn build(width: i32, height: i32, cells: &[MapCell]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;

        for cell in cells.iter().filter(|cell| !cell.kind.is_walkable()) {
            grid.set_walkable(cell.coordinate(), false)?;
        }
        for cell in cells.iter().filter(|cell| cell.kind == CellKind::Entrance) {
            grid.set_walkable(cell.coordinate(), true)?;
        }

        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (0..self.width).contains(&coordinate.x) && (0..self.height).contains(&coordinate.y)
    }

    /// Walkability of `(x, y)`; anything outside the grid is not walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.is_walkable_at(Coordinate::new(x, y))
    }

    pub fn is_walkable_at(&self, coordinate: Coordinate) -> bool {
        self.index(coordinate)
            .map(|index| self.walkable[index])
            .unwrap_or(false)
    }

    /// Marks a cell walkable or blocked
    pub fn set_walkable(&mut self, coordinate: Coordinate, walkable: bool) -> Result<()> {
        let index = self
            .index(coordinate)
            .ok_or(PlannerError::CellOutOfBounds {
                at: coordinate,
                width: self.width,
                height: self.height,
            })?;
        self.walkable[index] = walkable;
        Ok(())
    }

    /// Row-major index of a coordinate inside the grid
    pub fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if self.contains(coordinate) {
            Some(coordinate.y as usize * self.width as usize + coordinate.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::index`]
    pub fn coordinate(&self, index: usize) -> Coordinate {
        let width = self.width as usize;
        Coordinate::new((index % width) as i32, (index / width) as i32)
    }

    /// Walkable orthogonal neighbours in the order left, right, up, down.
    ///
    /// This is the expansion order of the depth- and breadth-first searches.
    pub fn orthogonal_neighbors(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        [
            coordinate.offset(-1, 0),
            coordinate.offset(1, 0),
            coordinate.offset(0, -1),
            coordinate.offset(0, 1),
        ]
        .into_iter()
        .filter(|&cell| self.is_walkable_at(cell))
        .collect()
    }

    /// Walkable neighbours: orthogonal ones first (up, right, down, left), then
    /// the diagonals permitted by `diagonal` (up-left, up-right, down-right, down-left).
    pub fn neighbors(&self, coordinate: Coordinate, diagonal: DiagonalMovement) -> Vec<Coordinate> {
        let mut neighbors = Vec::with_capacity(8);

        let up = coordinate.offset(0, -1);
        let right = coordinate.offset(1, 0);
        let down = coordinate.offset(0, 1);
        let left = coordinate.offset(-1, 0);

        let s0 = self.is_walkable_at(up);
        let s1 = self.is_walkable_at(right);
        let s2 = self.is_walkable_at(down);
        let s3 = self.is_walkable_at(left);

        for (open, cell) in [(s0, up), (s1, right), (s2, down), (s3, left)] {
            if open {
                neighbors.push(cell);
            }
        }

        let (d0, d1, d2, d3) = match diagonal {
            DiagonalMovement::Never => return neighbors,
            DiagonalMovement::OnlyWhenNoObstacles => (s3 && s0, s0 && s1, s1 && s2, s2 && s3),
            DiagonalMovement::IfAtMostOneObstacle => (s3 || s0, s0 || s1, s1 || s2, s2 || s3),
            DiagonalMovement::Always => (true, true, true, true),
        };

        let diagonals = [
            (d0, coordinate.offset(-1, -1)),
            (d1, coordinate.offset(1, -1)),
            (d2, coordinate.offset(1, 1)),
            (d3, coordinate.offset(-1, 1)),
        ];
        for (allowed, cell) in diagonals {
            if allowed && self.is_walkable_at(cell) {
                neighbors.push(cell);
            }
        }

        neighbors
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = if self.is_walkable(x, y) { '.' } else { '#' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_marks_items_blocked() {
        let cells = [
            MapCell::new(0, 0, CellKind::Entrance),
            MapCell::new(1, 0, CellKind::Shelf),
            MapCell::new(2, 0, CellKind::Checkout),
            MapCell::new(3, 0, CellKind::Empty),
        ];
        let grid = Grid::build(4, 2, &cells).unwrap();

        assert!(grid.is_walkable(0, 0));
        assert!(!grid.is_walkable(1, 0));
        assert!(!grid.is_walkable(2, 0));
        // a listed empty cell blocks like any other item
        assert!(!grid.is_walkable(3, 0));
        assert!(grid.is_walkable(1, 1));
    }

    #[test]
    fn test_entrance_stays_walkable_under_items() {
        let entrance = MapCell::new(0, 0, CellKind::Entrance);
        let shelf = MapCell::new(0, 0, CellKind::Shelf);

        for cells in [[entrance, shelf], [shelf, entrance]] {
            let grid = Grid::build(3, 3, &cells).unwrap();
            assert!(grid.is_walkable(0, 0), "{cells:?}");
        }
    }

    #[test]
    fn test_rejects_oversized_grid() {
        assert!(matches!(
            Grid::new(100_000, 100_000),
            Err(PlannerError::InvalidDimensions { width: 100_000, height: 100_000 })
        ));
        assert!(Grid::new(1024, 1024).is_ok());
        assert!(Grid::new(1025, 1024).is_err());
    }

    #[test]
    fn test_orthogonal_neighbor_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Coordinate::new(1, 1);
        assert_eq!(
            grid.orthogonal_neighbors(center),
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(2, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 2),
            ]
        );

        grid.set_walkable(Coordinate::new(0, 1), false).unwrap();
        assert_eq!(grid.orthogonal_neighbors(center)[0], Coordinate::new(2, 1));
    }

    #[test]
    fn test_out_of_bounds_is_not_walkable() {
        let grid = Grid::new(3, 3).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MAX, i32::MIN)] {
            assert!(!grid.is_walkable(x, y));
        }
    }

    #[test]
    fn test_rejects_cells_outside_bounds() {
        let cells = [MapCell::new(10, 2, CellKind::Shelf)];
        let err = Grid::build(10, 10, &cells).unwrap_err();
        assert!(matches!(err, PlannerError::CellOutOfBounds { at, .. } if at == Coordinate::new(10, 2)));

        assert!(matches!(
            Grid::new(0, 5),
            Err(PlannerError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let grid = Grid::new(2, 2).unwrap();
        let mut copy = grid.clone();
        copy.set_walkable(Coordinate::new(1, 1), false).unwrap();

        assert!(grid.is_walkable(1, 1));
        assert!(!copy.is_walkable(1, 1));
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(7, 3).unwrap();
        let c = Coordinate::new(5, 2);
        let index = grid.index(c).unwrap();
        assert_eq!(index, 19);
        assert_eq!(grid.coordinate(index), c);
        assert_eq!(grid.index(Coordinate::new(7, 0)), None);
    }

    #[test]
    fn test_neighbors_no_corner_cutting() {
        // .#.
        // ...
        // ...
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_walkable(Coordinate::new(1, 0), false).unwrap();
        let center = Coordinate::new(1, 1);

        let orthogonal = grid.neighbors(center, DiagonalMovement::Never);
        assert_eq!(
            orthogonal,
            vec![Coordinate::new(2, 1), Coordinate::new(1, 2), Coordinate::new(0, 1)]
        );

        let safe = grid.neighbors(center, DiagonalMovement::OnlyWhenNoObstacles);
        assert!(!safe.contains(&Coordinate::new(0, 0)));
        assert!(!safe.contains(&Coordinate::new(2, 0)));
        assert!(safe.contains(&Coordinate::new(2, 2)));
        assert!(safe.contains(&Coordinate::new(0, 2)));

        let relaxed = grid.neighbors(center, DiagonalMovement::IfAtMostOneObstacle);
        assert!(relaxed.contains(&Coordinate::new(0, 0)));
        assert!(relaxed.contains(&Coordinate::new(2, 0)));
    }

    #[test]
    fn test_neighbors_at_corner() {
        let grid = Grid::new(3, 3).unwrap();
        let corner = grid.neighbors(Coordinate::new(0, 0), DiagonalMovement::Always);
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn test_display() {
        let cells = [MapCell::new(1, 0, CellKind::Obstacle)];
        let grid = Grid::build(2, 2, &cells).unwrap();
        assert_eq!(grid.to_string(), ".#\n..\n");
    }
}
