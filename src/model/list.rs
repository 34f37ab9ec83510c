use serde::Serialize;
use uuid::Uuid;

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub count: f64,
    pub unit: String,
    pub ingredient: String,
}

/// Ordered shopping list, looked up by item id
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ListItem>,
}

/// Counts are never negative; anything unusable becomes zero
fn sanitize_count(count: f64) -> f64 {
    if count.is_finite() && count > 0.0 {
        count
    } else {
        0.0
    }
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item under a freshly generated id
    pub fn add_item(
        &mut self,
        count: f64,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> &ListItem {
        let item = ListItem {
            id: Uuid::new_v4().to_string(),
            count: sanitize_count(count),
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Remove the item with `id`, if present
    pub fn delete_item(&mut self, id: &str) -> Option<ListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Replace the count of the item with `id`.
    ///
    /// Returns `false` without changing anything when the id is unknown or
    /// the count is negative or not a number.
    pub fn update_count(&mut self, id: &str, count: f64) -> bool {
        if !count.is_finite() || count < 0.0 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.count = count;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_item() {
        let mut list = ShoppingList::new();
        let item = list.add_item(2.0, "cup", "flour").clone();
        assert_eq!(item.count, 2.0);
        assert_eq!(item.unit, "cup");
        assert_eq!(item.ingredient, "flour");
        assert_eq!(list.get(&item.id), Some(&item));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut list = ShoppingList::new();
        let ids: HashSet<String> = (0..100)
            .map(|_| list.add_item(1.0, "tsp", "salt").id.clone())
            .collect();
        assert_eq!(ids.len(), 100);
        assert_eq!(list.len(), 100);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut list = ShoppingList::new();
        list.add_item(1.0, "", "eggs");
        list.add_item(2.0, "cup", "milk");
        list.add_item(3.0, "g", "yeast");
        let names: Vec<&str> = list.items().iter().map(|i| i.ingredient.as_str()).collect();
        assert_eq!(names, vec!["eggs", "milk", "yeast"]);
    }

    #[test]
    fn test_delete_item() {
        let mut list = ShoppingList::new();
        let id = list.add_item(1.0, "", "eggs").id.clone();
        list.add_item(2.0, "cup", "milk");

        let removed = list.delete_item(&id).unwrap();
        assert_eq!(removed.ingredient, "eggs");
        assert_eq!(list.len(), 1);
        assert!(list.get(&id).is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut list = ShoppingList::new();
        list.add_item(1.0, "", "eggs");
        let before = list.items().to_vec();

        assert!(list.delete_item("missing").is_none());
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_update_count() {
        let mut list = ShoppingList::new();
        let id = list.add_item(1.0, "cup", "milk").id.clone();

        assert!(list.update_count(&id, 2.5));
        assert_eq!(list.get(&id).unwrap().count, 2.5);

        assert!(!list.update_count("missing", 3.0));
        assert!(!list.update_count(&id, -1.0));
        assert!(!list.update_count(&id, f64::NAN));
        assert_eq!(list.get(&id).unwrap().count, 2.5);
    }

    #[test]
    fn test_negative_count_clamped_on_add() {
        let mut list = ShoppingList::new();
        assert_eq!(list.add_item(-2.0, "", "eggs").count, 0.0);
    }
}
