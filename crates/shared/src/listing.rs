use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// One row of the presented table. `position` is 1-based and only meaningful
/// for the snapshot it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    pub position: usize,
    pub item: Item,
}

pub fn rows_from_items(items: Vec<Item>) -> Vec<ListRow> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ListRow {
            position: index + 1,
            item,
        })
        .collect()
}
