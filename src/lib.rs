// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::route_planner::RoutePlanner;
pub use algorithms::{PathFinder, Strategy};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use models::{Coordinate, Grid, RoutePlan, ShoppingList, StoreMap};
