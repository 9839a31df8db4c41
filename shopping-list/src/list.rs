//! Pure, copy-on-write operations on a [`ShoppingList`].
//!
//! Every operation takes the list by reference and returns a new one; the
//! input is never modified. Each comes in two forms:
//!
//! - `try_*` returns `Err(Unchanged)` naming why nothing happened, so the
//!   reducer knows whether there is anything to persist.
//! - the plain form always returns a list, equal to the input when the
//!   operation does not apply. Unknown ids, empty names and decrements at
//!   zero are never errors for callers.

use crate::config::ListConfig;
use crate::types::{Item, ItemId, QuantityDirection, ShoppingList};
use pantry_core::environment::IdGenerator;
use thiserror::Error;

/// Why an operation left the list as it was
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unchanged {
    /// `AddItem` with a zero-length name
    #[error("item name is empty")]
    EmptyName,

    /// No item has the requested id
    #[error("no item with id {0}")]
    UnknownItem(ItemId),

    /// Decrement requested on an item whose quantity is already zero
    #[error("quantity of {0} is already zero")]
    ZeroQuantity(ItemId),

    /// The id generator kept returning ids already in the list
    #[error("no unused id after {0} attempts")]
    IdsExhausted(usize),
}

impl ShoppingList {
    /// Appends a new item named `name`
    ///
    /// Only the empty string is rejected; whitespace-only names are kept as
    /// typed. The new item gets an id not used by any existing item, asking
    /// `ids` up to `max_attempts` times.
    ///
    /// # Errors
    ///
    /// [`Unchanged::EmptyName`] or [`Unchanged::IdsExhausted`].
    pub fn try_add_item(
        &self,
        name: &str,
        ids: &dyn IdGenerator,
        max_attempts: usize,
    ) -> Result<Self, Unchanged> {
        if name.is_empty() {
            return Err(Unchanged::EmptyName);
        }

        let id = (0..max_attempts)
            .map(|_| ItemId::new(ids.new_id()))
            .find(|candidate| !self.contains(candidate))
            .ok_or(Unchanged::IdsExhausted(max_attempts))?;

        let mut next = self.clone();
        next.items_mut().push(Item::new(id, name.to_string()));
        Ok(next)
    }

    /// Appends a new item, or returns an equal list if `name` is empty
    ///
    /// ```
    /// use pantry_core::environment::ShortIdGenerator;
    /// use shopping_list::ShoppingList;
    ///
    /// let empty = ShoppingList::new();
    /// let list = empty.add_item("Milk", &ShortIdGenerator::default());
    ///
    /// assert!(empty.is_empty());
    /// assert_eq!(list.len(), 1);
    /// assert_eq!(list.items()[0].quantity, 1);
    /// assert_eq!(list.add_item("", &ShortIdGenerator::default()), list);
    /// ```
    #[must_use]
    pub fn add_item(&self, name: &str, ids: &dyn IdGenerator) -> Self {
        self.try_add_item(name, ids, ListConfig::DEFAULT_MAX_ID_ATTEMPTS)
            .unwrap_or_else(|_| self.clone())
    }

    /// Nudges the quantity of item `id`
    ///
    /// Increments saturate at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// [`Unchanged::UnknownItem`] or, when decrementing at zero,
    /// [`Unchanged::ZeroQuantity`].
    pub fn try_adjust_quantity(
        &self,
        id: &ItemId,
        direction: QuantityDirection,
    ) -> Result<Self, Unchanged> {
        let index = self
            .position(id)
            .ok_or_else(|| Unchanged::UnknownItem(id.clone()))?;
        let current = self.items()[index].quantity;

        let quantity = match direction {
            QuantityDirection::Increment => current.saturating_add(1),
            QuantityDirection::Decrement => current
                .checked_sub(1)
                .ok_or_else(|| Unchanged::ZeroQuantity(id.clone()))?,
        };

        let mut next = self.clone();
        next.items_mut()[index].quantity = quantity;
        Ok(next)
    }

    /// Nudges the quantity of item `id`, or returns an equal list
    #[must_use]
    pub fn adjust_quantity(&self, id: &ItemId, direction: QuantityDirection) -> Self {
        self.try_adjust_quantity(id, direction)
            .unwrap_or_else(|_| self.clone())
    }

    /// Flips the completed flag of item `id`
    ///
    /// # Errors
    ///
    /// [`Unchanged::UnknownItem`].
    pub fn try_toggle_completed(&self, id: &ItemId) -> Result<Self, Unchanged> {
        let index = self
            .position(id)
            .ok_or_else(|| Unchanged::UnknownItem(id.clone()))?;

        let mut next = self.clone();
        let item = &mut next.items_mut()[index];
        item.completed = !item.completed;
        Ok(next)
    }

    /// Flips the completed flag of item `id`, or returns an equal list
    #[must_use]
    pub fn toggle_completed(&self, id: &ItemId) -> Self {
        self.try_toggle_completed(id)
            .unwrap_or_else(|_| self.clone())
    }
}
