// Models module - exports all model types

mod cell;
mod coordinate;
mod grid;
mod product;
mod route;
mod shopping_list;
mod store;

// Re-export model types
pub use self::cell::{CellKind, MapCell};
pub use self::coordinate::Coordinate;
pub use self::grid::{DiagonalMovement, Grid, MAX_GRID_CELLS};
pub use self::product::{AccessPoint, Product, ProductCatalog, ShelfTarget};
pub use self::route::{Path, RoutePlan, RouteSegment};
pub use self::shopping_list::{ShoppingList, ShoppingListItem};
pub use self::store::{StoreMap, DEFAULT_GRID_SIZE};

// Common type aliases for improved code readability
pub type ProductId = u32;
pub type StoreId = u32;
/// Travel cost of a route, counted in visited cells.
pub type Steps = usize;
