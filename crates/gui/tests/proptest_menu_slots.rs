//! Property-based tests for menu slot bookkeeping and pagination windows
//!
//! Validates:
//! - every in-range slot round-trips through add_item
//! - slots at or past the size are rejected for every menu shape
//! - auto-placement fills ascending and then reports a full menu
//! - last_page never leaves a trailing empty page

use std::rc::Rc;

use invmenu_core::{InventoryType, Material, Text};
use invmenu_gui::{GuiError, Icon, Menu, Pagination};
use proptest::prelude::*;

fn stone() -> Rc<Icon> {
    Rc::new(Icon::of(Material::parse("stone").unwrap()))
}

fn any_inventory_type() -> impl Strategy<Value = InventoryType> {
    prop_oneof![
        (-3i32..10).prop_map(InventoryType::from_rows),
        Just(InventoryType::Hopper),
        Just(InventoryType::Dispenser),
        Just(InventoryType::ShulkerBox),
    ]
}

proptest! {
    /// Property: a menu built from a row count has 9 slots per row, 54 when out of range
    #[test]
    fn row_count_sets_size(rows in -10i32..20) {
        let menu = Menu::new("m", Text::empty(), rows);
        let expected = if (1..=6).contains(&rows) { rows as usize * 9 } else { 54 };
        prop_assert_eq!(menu.size(), expected);
    }

    /// Property: add_item then items()[slot] is the same icon
    #[test]
    fn add_item_round_trips(ty in any_inventory_type(), seed in 0usize..1000) {
        let mut menu = Menu::with_type("m", Text::empty(), ty);
        let slot = seed % menu.size();
        let icon = stone();
        menu.add_item(slot, Rc::clone(&icon)).unwrap();
        prop_assert!(Rc::ptr_eq(&menu.items()[&slot], &icon));

        menu.remove_item(slot).unwrap();
        prop_assert!(menu.items().get(&slot).is_none());
    }

    /// Property: slots >= size fail with a bounds error
    #[test]
    fn out_of_range_slots_fail(ty in any_inventory_type(), extra in 0usize..100) {
        let mut menu = Menu::with_type("m", Text::empty(), ty);
        let size = menu.size();
        prop_assert_eq!(
            menu.add_item(size + extra, stone()),
            Err(GuiError::SlotOutOfRange { slot: size + extra, size })
        );
        prop_assert!(menu.items().is_empty());
    }

    /// Property: N auto-placements fill 0..N in order, the next one fails
    #[test]
    fn auto_placement_fills_ascending(ty in any_inventory_type()) {
        let mut menu = Menu::with_type("m", Text::empty(), ty);
        let size = menu.size();
        for expected in 0..size {
            prop_assert_eq!(menu.push_item(stone()), Ok(expected));
        }
        prop_assert_eq!(menu.push_item(stone()), Err(GuiError::MenuFull { size }));
    }

    /// Property: the last page is non-empty and every icon shows on exactly one page
    #[test]
    fn last_page_has_no_trailing_empty_page(total in 1usize..60, viewport in 1usize..12) {
        let menu = Menu::new("list", Text::empty(), 6).into_handle();
        let mut pagination = Pagination::new(menu);
        pagination.register_slots(0..viewport);
        pagination.add_icons((0..total).map(|_| stone()));

        let last = pagination.last_page();
        prop_assert!(last * viewport < total);
        prop_assert!((last + 1) * viewport >= total);
    }
}
