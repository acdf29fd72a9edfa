// Product model and the shelf locations routes are planned to

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Coordinate, ProductId};

/// Represents a product stocked on a store shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier of the product
    pub id: ProductId,

    /// Name of the product
    pub name: String,

    /// Shelf location, if the product has been placed on the map
    #[serde(default)]
    pub location: Option<Coordinate>,
}

impl Product {
    /// Creates a new product with the given name and shelf location
    pub fn new<S: Into<String>>(id: ProductId, name: S, location: Option<Coordinate>) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }
}

/// Product lookup used to resolve shopping-list entries to shelf locations
pub trait ProductCatalog {
    /// Stored shelf location of a product, `None` when unknown or unplaced
    fn shelf_location(&self, product_id: ProductId) -> Option<Coordinate>;
}

impl ProductCatalog for HashMap<ProductId, Product> {
    fn shelf_location(&self, product_id: ProductId) -> Option<Coordinate> {
        self.get(&product_id).and_then(|product| product.location)
    }
}

impl ProductCatalog for HashMap<ProductId, Coordinate> {
    fn shelf_location(&self, product_id: ProductId) -> Option<Coordinate> {
        self.get(&product_id).copied()
    }
}

/// Stored shelf location of a product. Usually not walkable itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfTarget {
    pub product_id: ProductId,
    pub location: Coordinate,
}

impl ShelfTarget {
    pub fn new(product_id: ProductId, location: Coordinate) -> Self {
        Self {
            product_id,
            location,
        }
    }
}

/// Walkable cell from which a shelf is reached; this is what routes visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub product_id: ProductId,
    pub location: Coordinate,
}

impl AccessPoint {
    pub fn new(product_id: ProductId, location: Coordinate) -> Self {
        Self {
            product_id,
            location,
        }
    }
}
