//! Property tests for the list operations.

use pantry_testing::SequentialIdGenerator;
use proptest::prelude::*;
use shopping_list::{ItemId, QuantityDirection, ShoppingList};

/// Lists of 1..8 items named from arbitrary non-empty text, ids `item-1..`
fn list_strategy() -> impl Strategy<Value = ShoppingList> {
    prop::collection::vec(".{1,12}", 1..8).prop_map(|names| {
        let ids = SequentialIdGenerator::new("item");
        names
            .iter()
            .fold(ShoppingList::new(), |list, name| list.add_item(name, &ids))
    })
}

/// A list together with the id of one of its items
fn list_and_id() -> impl Strategy<Value = (ShoppingList, ItemId)> {
    list_strategy().prop_flat_map(|list| {
        let len = list.len();
        (Just(list), 0..len).prop_map(|(list, index)| {
            let id = list.items()[index].id.clone();
            (list, id)
        })
    })
}

proptest! {
    #[test]
    fn add_grows_by_one_with_fresh_item(list in list_strategy(), name in ".{1,20}") {
        let ids = SequentialIdGenerator::new("new");
        let next = list.add_item(&name, &ids);

        prop_assert_eq!(next.len(), list.len() + 1);
        prop_assert_eq!(&next.items()[..list.len()], list.items());

        let added = &next.items()[list.len()];
        prop_assert_eq!(&added.name, &name);
        prop_assert!(!added.completed);
        prop_assert_eq!(added.quantity, 1);
        prop_assert!(!list.contains(&added.id));
    }

    #[test]
    fn add_empty_name_changes_nothing(list in list_strategy()) {
        let ids = SequentialIdGenerator::new("new");
        prop_assert_eq!(list.add_item("", &ids), list);
    }

    #[test]
    fn decrements_bottom_out_at_zero((list, id) in list_and_id(), steps in 0u32..10) {
        let start = list.get(&id).map(|item| item.quantity).unwrap_or_default();
        let end = (0..steps).fold(list, |list, _| {
            list.adjust_quantity(&id, QuantityDirection::Decrement)
        });
        let quantity = end.get(&id).map(|item| item.quantity).unwrap_or_default();
        prop_assert_eq!(quantity, start.saturating_sub(steps));
    }

    #[test]
    fn increments_then_decrements_restore((list, id) in list_and_id(), n in 0usize..20) {
        let up = (0..n).fold(list.clone(), |list, _| {
            list.adjust_quantity(&id, QuantityDirection::Increment)
        });
        let down = (0..n).fold(up, |list, _| {
            list.adjust_quantity(&id, QuantityDirection::Decrement)
        });
        prop_assert_eq!(down, list);
    }

    #[test]
    fn toggle_twice_restores((list, id) in list_and_id()) {
        prop_assert_eq!(list.toggle_completed(&id).toggle_completed(&id), list);
    }

    #[test]
    fn unknown_id_returns_equal_list(list in list_strategy(), direction in prop_oneof![
        Just(QuantityDirection::Increment),
        Just(QuantityDirection::Decrement),
    ]) {
        let ghost = ItemId::new("ghost");
        prop_assert_eq!(list.toggle_completed(&ghost), list.clone());
        prop_assert_eq!(list.adjust_quantity(&ghost, direction), list);
    }

    #[test]
    fn stored_form_round_trips(list in list_strategy()) {
        let json = serde_json::to_string(&list).unwrap();
        let back: ShoppingList = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, list);
    }
}
