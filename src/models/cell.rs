// Map cell model: typed items placed on a store floor

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// What occupies a cell of the store map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Shelf,
    Fridge,
    Checkout,
    Obstacle,
    Entrance,
    Empty,
}

impl CellKind {
    /// Whether a shopper may walk through a listed cell of this kind.
    ///
    /// Only the entrance is; a listed `empty` cell still blocks. Unlisted cells
    /// are the open floor.
    pub fn is_walkable(self) -> bool {
        matches!(self, CellKind::Entrance)
    }
}

/// A single item of a store map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl MapCell {
    /// Creates a new map cell
    pub fn new(x: i32, y: i32, kind: CellKind) -> Self {
        Self { x, y, kind }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkable_kinds() {
        assert!(CellKind::Entrance.is_walkable());
        for kind in [
            CellKind::Empty,
            CellKind::Shelf,
            CellKind::Fridge,
            CellKind::Checkout,
            CellKind::Obstacle,
        ] {
            assert!(!kind.is_walkable(), "{kind:?} should block movement");
        }
    }

    #[test]
    fn test_cell_json() {
        let cell: MapCell = serde_json::from_str(r#"{"x":3,"y":4,"type":"fridge"}"#).unwrap();
        assert_eq!(cell, MapCell::new(3, 4, CellKind::Fridge));
        assert_eq!(cell.coordinate(), Coordinate::new(3, 4));

        let unknown = serde_json::from_str::<MapCell>(r#"{"x":0,"y":0,"type":"window"}"#);
        assert!(unknown.is_err());
    }
}
