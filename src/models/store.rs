// Store map model: the typed layout of a store floor

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{CellKind, Coordinate, Grid, MapCell, StoreId};

/// Side length used when a map does not declare its dimensions
pub const DEFAULT_GRID_SIZE: i32 = 10;

/// Represents the floor map of a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMap {
    /// Unique identifier for the store
    pub store_id: StoreId,

    /// Declared grid width; the planner's configured width applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,

    /// Declared grid height; the planner's configured height applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,

    /// Shelves, fridges, checkouts, obstacles and the entrance
    #[serde(default)]
    pub items: Vec<MapCell>,
}

impl StoreMap {
    /// Creates an empty map with explicit dimensions
    pub fn new(store_id: StoreId, width: i32, height: i32) -> Self {
        Self {
            store_id,
            width: Some(width),
            height: Some(height),
            items: Vec::new(),
        }
    }

    /// Places an item on the map
    pub fn add_cell(&mut self, x: i32, y: i32, kind: CellKind) {
        self.items.push(MapCell::new(x, y, kind));
    }

    /// Builder-style variant of [`StoreMap::add_cell`]
    pub fn with_cell(mut self, x: i32, y: i32, kind: CellKind) -> Self {
        self.add_cell(x, y, kind);
        self
    }

    /// Dimensions of the map, falling back to the given defaults
    pub fn dimensions(&self, default_width: i32, default_height: i32) -> (i32, i32) {
        (
            self.width.unwrap_or(default_width),
            self.height.unwrap_or(default_height),
        )
    }

    /// Locates the unique entrance cell
    pub fn entrance(&self) -> Result<Coordinate> {
        let entrances: Vec<Coordinate> = self
            .cells_of_kind(CellKind::Entrance)
            .map(|cell| cell.coordinate())
            .collect();

        match entrances.as_slice() {
            [] => Err(PlannerError::NoEntrance {
                store_id: self.store_id,
            }),
            [entrance] => Ok(*entrance),
            _ => Err(PlannerError::MultipleEntrances {
                store_id: self.store_id,
                count: entrances.len(),
            }),
        }
    }

    /// Iterates over the items of one kind
    pub fn cells_of_kind(&self, kind: CellKind) -> impl Iterator<Item = &MapCell> + '_ {
        self.items.iter().filter(move |cell| cell.kind == kind)
    }

    /// Builds the walkability grid of this map
    pub fn build_grid(&self, default_width: i32, default_height: i32) -> Result<Grid> {
        let (width, height) = self.dimensions(default_width, default_height);
        Grid::build(width, height, &self.items)
    }
}
