//! Domain types for the shopping list.
//!
//! A shopping list is an ordered collection of items. Items are appended,
//! never removed or reordered; each one can be ticked off and have its
//! quantity nudged up or down.
//!
//! The persisted form of a [`ShoppingList`] is a plain JSON array of
//! `{id, name, completed, quantity}` objects.

use serde::{Deserialize, Serialize};

/// Opaque identifier of an item
///
/// Generated once when the item is added and never changed afterwards.
/// Any string is accepted when loading, so lists written by other clients
/// keep their ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an `ItemId` from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single shopping-list entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// What to buy
    pub name: String,
    /// Whether the item has been ticked off
    pub completed: bool,
    /// How many to buy
    pub quantity: u32,
}

impl Item {
    /// Creates a fresh, not yet completed item with a quantity of one
    #[must_use]
    pub const fn new(id: ItemId, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
            quantity: 1,
        }
    }
}

/// Ordered list of items; insertion order is display order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList(Vec<Item>);

impl ShoppingList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of items, the total shown under the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items in display order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// Iterates over items in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    /// Returns an item by ID
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.0.iter().find(|item| &item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Number of ticked-off items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|item| item.completed).count()
    }

    pub(crate) fn position(&self, id: &ItemId) -> Option<usize> {
        self.0.iter().position(|item| &item.id == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.0
    }
}

impl From<Vec<Item>> for ShoppingList {
    fn from(items: Vec<Item>) -> Self {
        Self(items)
    }
}

impl FromIterator<Item> for ShoppingList {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ShoppingList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Which way a quantity button nudges the count
///
/// The textual form used by controls is `"add"` / `"subtract"`. Any other
/// text maps to [`QuantityDirection::Increment`]: unknown buttons have always
/// behaved like "add". This looks like a latent bug rather than a decision,
/// but existing callers rely on it, so it stays.
///
/// ```
/// use shopping_list::QuantityDirection;
///
/// assert_eq!(QuantityDirection::from("subtract"), QuantityDirection::Decrement);
/// assert_eq!(QuantityDirection::from("add"), QuantityDirection::Increment);
/// assert_eq!(QuantityDirection::from("sideways"), QuantityDirection::Increment);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum QuantityDirection {
    /// Quantity + 1, unbounded
    Increment,
    /// Quantity - 1, never below zero
    Decrement,
}

impl QuantityDirection {
    /// The textual form of this direction
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "add",
            Self::Decrement => "subtract",
        }
    }
}

impl From<&str> for QuantityDirection {
    fn from(value: &str) -> Self {
        match value {
            "subtract" => Self::Decrement,
            // "add" and anything unrecognised
            _ => Self::Increment,
        }
    }
}

impl From<String> for QuantityDirection {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl Serialize for QuantityDirection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for QuantityDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the shopping-list feature
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    /// The list itself; the only part that is persisted
    pub items: ShoppingList,
    /// Why the most recent write to storage failed, if it did
    pub last_persist_error: Option<String>,
}

impl ListState {
    /// Creates a state holding `items`
    #[must_use]
    pub const fn new(items: ShoppingList) -> Self {
        Self {
            items,
            last_persist_error: None,
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Actions representing commands and events for the shopping list
///
/// Commands come from the user. Events are fed back by the persist effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListAction {
    // ========== Commands ==========
    /// Command: Append a new item (ignored when `name` is empty)
    AddItem {
        /// Name of the item
        name: String,
    },

    /// Command: Flip the completed flag of an item
    ToggleCompleted {
        /// Item to toggle
        id: ItemId,
    },

    /// Command: Nudge the quantity of an item
    AdjustQuantity {
        /// Item to adjust
        id: ItemId,
        /// Up or down
        direction: QuantityDirection,
    },

    // ========== Events ==========
    /// Event: The current list was written to storage
    Persisted,

    /// Event: Writing the list to storage failed
    PersistFailed {
        /// Error message
        reason: String,
    },
}

impl ListAction {
    /// Returns true if this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AddItem { .. } | Self::ToggleCompleted { .. } | Self::AdjustQuantity { .. }
        )
    }

    /// Returns true if this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
