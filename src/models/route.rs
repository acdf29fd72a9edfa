// Route models for representing planned paths through a store

use serde::{Deserialize, Serialize};

use crate::algorithms::Strategy;
use crate::models::{Coordinate, ProductId, Steps, StoreId};

/// Ordered cells of one traversal leg, start and end included.
///
/// An empty path means the end could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    cells: Vec<Coordinate>,
}

impl Path {
    pub fn new(cells: Vec<Coordinate>) -> Self {
        Self { cells }
    }

    /// The empty path returned for an unreachable end
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Path of a search whose start is its end
    pub fn single(cell: Coordinate) -> Self {
        Self { cells: vec![cell] }
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves taken, one less than the cell count
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.cells.last().copied()
    }

    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Coordinate> {
        self.cells
    }

    /// Whether every consecutive pair of cells touches (orthogonally or diagonally)
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|pair| pair[0].is_adjacent_to(&pair[1]))
    }
}

impl FromIterator<Coordinate> for Path {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Path to one product, labeled with the product it leads to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub product_id: ProductId,
    pub path: Vec<Coordinate>,
}

impl RouteSegment {
    pub fn new(product_id: ProductId, path: Path) -> Self {
        Self {
            product_id,
            path: path.into_cells(),
        }
    }
}

/// Complete planned route through a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    /// Store the route was planned for
    pub store_id: StoreId,

    /// Path finder used for every leg
    pub strategy: Strategy,

    /// One segment per product, in visit order
    pub segments: Vec<RouteSegment>,

    /// Final leg from the last product back to the entrance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<Vec<Coordinate>>,

    /// Sum of the cell counts of every leg
    pub total_cost: Steps,

    /// Products that were not routed (no shelf location, or over the stop limit)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<ProductId>,
}

impl RoutePlan {
    /// A plan with nothing to visit
    pub fn empty(store_id: StoreId, strategy: Strategy, skipped: Vec<ProductId>) -> Self {
        Self {
            store_id,
            strategy,
            segments: Vec::new(),
            return_leg: None,
            total_cost: 0,
            skipped,
        }
    }

    /// Products in the order they are picked up
    pub fn visit_order(&self) -> Vec<ProductId> {
        self.segments.iter().map(|segment| segment.product_id).collect()
    }

    /// Every cell of the route, segment by segment, return leg last
    pub fn cells(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.path.iter())
            .chain(self.return_leg.iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
