//! What a front end draws for the current list.
//!
//! The view holds no logic beyond presentation policy: completed items show
//! a check mark and their quantity buttons are disabled.

use crate::types::{ItemId, ShoppingList};

/// Icon in front of an item name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionIcon {
    /// Open circle, still to buy
    Circle,
    /// Checked circle, ticked off
    CheckCircle,
}

/// One rendered item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRow {
    /// Id to send back with toggle/quantity actions
    pub id: ItemId,
    /// Item name
    pub name: String,
    /// Current quantity
    pub quantity: u32,
    /// Icon reflecting the completed flag
    pub icon: CompletionIcon,
    /// Whether the +/- buttons accept clicks
    pub quantity_controls_enabled: bool,
}

/// The whole rendered list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    /// Rows in display order
    pub rows: Vec<ItemRow>,
    /// Count shown under the list
    pub total: usize,
}

impl From<&ShoppingList> for ListView {
    fn from(list: &ShoppingList) -> Self {
        let rows = list
            .iter()
            .map(|item| ItemRow {
                id: item.id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                icon: if item.completed {
                    CompletionIcon::CheckCircle
                } else {
                    CompletionIcon::Circle
                },
                quantity_controls_enabled: !item.completed,
            })
            .collect();

        Self {
            rows,
            total: list.len(),
        }
    }
}
