use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{Coordinate, ProductId, StoreId};

/// Errors returned by route planning.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The store map has no cell tagged as entrance.
    #[error("store {store_id} has no entrance; store is not routable")]
    NoEntrance { store_id: StoreId },

    /// The store map has more than one entrance cell.
    #[error("store {store_id} has {count} entrances, expected exactly one")]
    MultipleEntrances { store_id: StoreId, count: usize },

    /// A shelf and its four orthogonal neighbours are all blocked.
    #[error("product {product_id} at {location} has no walkable neighbouring cell")]
    NoAccessiblePoint {
        product_id: ProductId,
        location: Coordinate,
    },

    /// A path finder was given an endpoint outside the grid or on a blocked cell.
    #[error("path endpoint {at} is outside the grid or not walkable")]
    InvalidEndpoint { at: Coordinate },

    /// Every visit order contains at least one unreachable leg.
    #[error("no visit order reaches every stop")]
    NoValidRoute,

    #[error("cell {at} lies outside the {width}x{height} grid")]
    CellOutOfBounds {
        at: Coordinate,
        width: i32,
        height: i32,
    },

    #[error("grid dimensions must be positive and hold at most 1048576 cells, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("{requested} stops requested but at most {limit} can be routed in one call")]
    TooManyStops { requested: usize, limit: usize },

    #[error("route planning was cancelled")]
    Cancelled,

    #[error("route planning exceeded its deadline")]
    DeadlineExceeded,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// Stable machine-readable code of the error
    pub fn code(&self) -> &'static str {
        match self {
            PlannerError::NoEntrance { .. } => "NO_ENTRANCE",
            PlannerError::MultipleEntrances { .. } => "MULTIPLE_ENTRANCES",
            PlannerError::NoAccessiblePoint { .. } => "NO_ACCESSIBLE_POINT",
            PlannerError::InvalidEndpoint { .. } => "INVALID_ENDPOINT",
            PlannerError::NoValidRoute => "NO_VALID_ROUTE",
            PlannerError::CellOutOfBounds { .. } => "CELL_OUT_OF_BOUNDS",
            PlannerError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            PlannerError::TooManyStops { .. } => "TOO_MANY_STOPS",
            PlannerError::Cancelled => "CANCELLED",
            PlannerError::DeadlineExceeded => "DEADLINE_EXCEEDED",
            PlannerError::Config(_) => "INVALID_CONFIG",
            PlannerError::Io(_) => "IO_ERROR",
            PlannerError::Json(_) => "INVALID_JSON",
        }
    }

    /// Code plus message, ready to be serialized for a caller
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Serializable form of a [`PlannerError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
