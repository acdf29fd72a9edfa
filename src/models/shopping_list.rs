// Shopping list model: the products a shopper wants to pick up in one visit

use serde::{Deserialize, Serialize};

use crate::models::{ProductCatalog, ProductId, ShelfTarget};

/// One entry of a shopping list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Ordered set of products with quantities. Order is the order products were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Creates a new empty shopping list
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item; quantities of a product already on the list are merged
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(ShoppingListItem {
                product_id,
                quantity,
            }),
        }
    }

    /// Removes an item from the shopping list
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Updates the quantity of an item, removing it when the quantity is zero
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = quantity,
            None => self.items.push(ShoppingListItem {
                product_id,
                quantity,
            }),
        }
    }

    /// Gets the total number of unique products in the list
    pub fn unique_product_count(&self) -> usize {
        self.items.len()
    }

    /// Gets the total number of items (including quantities)
    pub fn total_item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(|item| item.product_id)
    }

    /// Looks up every product's shelf location.
    ///
    /// Returns the resolved targets in list order, and the products the catalog
    /// has no location for.
    pub fn resolve_targets<C>(&self, catalog: &C) -> (Vec<ShelfTarget>, Vec<ProductId>)
    where
        C: ProductCatalog + ?Sized,
    {
        let mut targets = Vec::with_capacity(self.items.len());
        let mut missing = Vec::new();

        for product_id in self.product_ids() {
            match catalog.shelf_location(product_id) {
                Some(location) => targets.push(ShelfTarget::new(product_id, location)),
                None => missing.push(product_id),
            }
        }

        (targets, missing)
    }
}

impl FromIterator<(ProductId, u32)> for ShoppingList {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        let mut list = ShoppingList::new();
        for (product_id, quantity) in iter {
            list.add_item(product_id, quantity);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use std::collections::HashMap;

    #[test]
    fn test_add_item_merges_and_keeps_order() {
        let mut list = ShoppingList::new();
        list.add_item(3, 1);
        list.add_item(1, 2);
        list.add_item(3, 4);
        list.add_item(9, 0);

        assert_eq!(list.product_ids().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(list.unique_product_count(), 2);
        assert_eq!(list.total_item_count(), 7);
    }

    #[test]
    fn test_update_and_remove() {
        let mut list: ShoppingList = [(1, 1), (2, 5)].into_iter().collect();

        list.update_quantity(1, 3);
        assert_eq!(list.items[0].quantity, 3);

        list.update_quantity(2, 0);
        assert_eq!(list.unique_product_count(), 1);

        list.remove_item(1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_resolve_targets() {
        let mut catalog: HashMap<ProductId, Coordinate> = HashMap::new();
        catalog.insert(1, Coordinate::new(2, 6));
        catalog.insert(2, Coordinate::new(8, 6));

        let list: ShoppingList = [(2, 1), (5, 1), (1, 1)].into_iter().collect();
        let (targets, missing) = list.resolve_targets(&catalog);

        assert_eq!(
            targets,
            vec![
                ShelfTarget::new(2, Coordinate::new(8, 6)),
                ShelfTarget::new(1, Coordinate::new(2, 6)),
            ]
        );
        assert_eq!(missing, vec![5]);
    }

    #[test]
    fn test_list_json() {
        let list: ShoppingList =
            serde_json::from_str(r#"{"items":[{"productId":4,"quantity":2}]}"#).unwrap();
        assert_eq!(list.total_item_count(), 2);
    }
}
