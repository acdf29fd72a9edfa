use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{AccessPoint, Coordinate, Grid, ShelfTarget};

/// Default point access cells are measured against: the grid origin
pub const ORIGIN: Coordinate = Coordinate::new(0, 0);

/// Nearest walkable cell from which `target` can be reached.
///
/// A walkable target is returned as is. Otherwise only the four orthogonal
/// neighbours are considered, checked in the order left, right, up, down; the
/// one closest to `reference` in straight-line distance wins, the earlier one on
/// ties. This is a local check: the returned cell may still be unreachable from
/// the entrance.
pub fn nearest_walkable(grid: &Grid, target: Coordinate, reference: Coordinate) -> Option<Coordinate> {
    if grid.is_walkable_at(target) {
        return Some(target);
    }

    let candidates = [
        target.offset(-1, 0),
        target.offset(1, 0),
        target.offset(0, -1),
        target.offset(0, 1),
    ];

    let mut nearest: Option<(Coordinate, f64)> = None;
    for candidate in candidates {
        if !grid.is_walkable_at(candidate) {
            continue;
        }
        let distance = candidate.distance_to(&reference);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((candidate, distance));
        }
    }

    nearest.map(|(cell, _)| cell)
}

/// Resolves a shelf to the access point a route should visit
pub fn resolve_access_point(
    grid: &Grid,
    shelf: &ShelfTarget,
    reference: Coordinate,
) -> Result<AccessPoint> {
    let location = nearest_walkable(grid, shelf.location, reference).ok_or(
        PlannerError::NoAccessiblePoint {
            product_id: shelf.product_id,
            location: shelf.location,
        },
    )?;

    debug!(
        product_id = shelf.product_id,
        shelf = %shelf.location,
        access = %location,
        "resolved access point"
    );
    Ok(AccessPoint::new(shelf.product_id, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_blocked(cells: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(10, 10).unwrap();
        for &c in cells {
            grid.set_walkable(Coordinate::from(c), false).unwrap();
        }
        grid
    }

    #[test]
    fn test_walkable_target_is_kept() {
        let grid = grid_with_blocked(&[]);
        let target = Coordinate::new(4, 4);
        assert_eq!(nearest_walkable(&grid, target, Coordinate::new(0, 0)), Some(target));
    }

    #[test]
    fn test_closest_neighbour_to_reference() {
        let grid = grid_with_blocked(&[(5, 5)]);
        let shelf = Coordinate::new(5, 5);

        assert_eq!(
            nearest_walkable(&grid, shelf, Coordinate::new(5, 0)),
            Some(Coordinate::new(5, 4))
        );
        assert_eq!(
            nearest_walkable(&grid, shelf, Coordinate::new(9, 5)),
            Some(Coordinate::new(6, 5))
        );
        assert_eq!(
            nearest_walkable(&grid, shelf, Coordinate::new(0, 5)),
            Some(Coordinate::new(4, 5))
        );
    }

    #[test]
    fn test_tie_keeps_first_checked() {
        // reference on the diagonal: left and up are equally close
        let grid = grid_with_blocked(&[(5, 5)]);
        assert_eq!(
            nearest_walkable(&grid, Coordinate::new(5, 5), ORIGIN),
            Some(Coordinate::new(4, 5))
        );

        // right and down tie from the far corner; right is checked first
        assert_eq!(
            nearest_walkable(&grid, Coordinate::new(5, 5), Coordinate::new(9, 9)),
            Some(Coordinate::new(6, 5))
        );
    }

    #[test]
    fn test_check_order_left_right_up_down() {
        // left blocked: up is the closest remaining side
        let grid = grid_with_blocked(&[(5, 5), (4, 5)]);
        assert_eq!(
            nearest_walkable(&grid, Coordinate::new(5, 5), ORIGIN),
            Some(Coordinate::new(5, 4))
        );

        // right and down tie; right is checked first
        let grid = grid_with_blocked(&[(5, 5), (4, 5), (5, 4)]);
        assert_eq!(
            nearest_walkable(&grid, Coordinate::new(5, 5), ORIGIN),
            Some(Coordinate::new(6, 5))
        );
    }

    #[test]
    fn test_diagonals_are_ignored() {
        let grid = grid_with_blocked(&[(5, 5), (5, 4), (5, 6), (4, 5), (6, 5)]);
        assert_eq!(nearest_walkable(&grid, Coordinate::new(5, 5), Coordinate::new(0, 0)), None);
    }

    #[test]
    fn test_shelf_on_the_border() {
        let grid = grid_with_blocked(&[(0, 3), (1, 3), (0, 2)]);
        assert_eq!(
            nearest_walkable(&grid, Coordinate::new(0, 3), Coordinate::new(0, 0)),
            Some(Coordinate::new(0, 4))
        );
    }

    #[test]
    fn test_walled_in_shelf_reports_product() {
        let grid = grid_with_blocked(&[(2, 2), (2, 1), (2, 3), (1, 2), (3, 2)]);
        let shelf = ShelfTarget::new(77, Coordinate::new(2, 2));

        let err = resolve_access_point(&grid, &shelf, Coordinate::new(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::NoAccessiblePoint { product_id: 77, location } if location == Coordinate::new(2, 2)
        ));
    }
}
