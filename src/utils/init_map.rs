// Loading store maps, product catalogs and shopping lists from JSON files

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{
    CellKind, Coordinate, Product, ProductId, ShoppingList, ShoppingListItem, StoreId, StoreMap,
};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a store map (`{"storeId": .., "items": [{"x", "y", "type"}, ..]}`)
pub fn load_store_map(path: impl AsRef<Path>) -> Result<StoreMap> {
    let path = path.as_ref();
    let map: StoreMap = read_json(path)?;
    info!(
        path = %path.display(),
        store_id = map.store_id,
        items = map.items.len(),
        "loaded store map"
    );
    Ok(map)
}

/// Load a product catalog from a JSON array of products, keyed by product id
pub fn load_catalog(path: impl AsRef<Path>) -> Result<HashMap<ProductId, Product>> {
    let path = path.as_ref();
    let products: Vec<Product> = read_json(path)?;
    let catalog = catalog_from_products(products);
    info!(path = %path.display(), products = catalog.len(), "loaded product catalog");
    Ok(catalog)
}

/// Load a shopping list from a JSON array of `{"productId", "quantity"}` entries.
///
/// Repeated products are merged in the order they first appear.
pub fn load_shopping_list(path: impl AsRef<Path>) -> Result<ShoppingList> {
    let path = path.as_ref();
    let items: Vec<ShoppingListItem> = read_json(path)?;
    let list: ShoppingList = items
        .into_iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();
    info!(
        path = %path.display(),
        products = list.unique_product_count(),
        "loaded shopping list"
    );
    Ok(list)
}

pub fn catalog_from_products(products: Vec<Product>) -> HashMap<ProductId, Product> {
    products
        .into_iter()
        .map(|product| (product.id, product))
        .collect()
}

/// The 10x10 demo store: entrance in the top-left corner and a wall of shelves
/// across row 5 with a single gap at x = 5.
pub fn demo_store(store_id: StoreId) -> (StoreMap, HashMap<ProductId, Product>) {
    let mut map = StoreMap::new(store_id, 10, 10);
    map.add_cell(0, 0, CellKind::Entrance);
    for x in (0..10).filter(|&x| x != 5) {
        map.add_cell(x, 5, CellKind::Shelf);
    }
    map.add_cell(2, 6, CellKind::Shelf);
    map.add_cell(8, 6, CellKind::Fridge);
    map.add_cell(9, 0, CellKind::Checkout);
    map.add_cell(4, 2, CellKind::Obstacle);

    let catalog = catalog_from_products(vec![
        Product::new(1, "Bread", Some(Coordinate::new(2, 6))),
        Product::new(2, "Milk", Some(Coordinate::new(8, 6))),
        Product::new(3, "Coffee", Some(Coordinate::new(7, 5))),
        Product::new(4, "Gift card", None),
    ]);

    (map, catalog)
}
