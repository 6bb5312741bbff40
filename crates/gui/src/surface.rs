//! Backing display surfaces for menus.

use invmenu_core::{InventoryType, ItemStack, Text};
use tracing::trace;

/// Something the engine can render as a container window.
///
/// Writes are synchronous; the engine reads whatever is in the surface when it
/// renders or resyncs.
pub trait Surface {
    /// Container shape.
    fn inventory_type(&self) -> InventoryType;

    /// Window title.
    fn title(&self) -> &Text;

    /// Write `item` into `slot`. Callers guarantee `slot < size()`.
    fn set_slot(&mut self, slot: usize, item: &ItemStack);

    /// Current content of `slot`.
    fn slot(&self, slot: usize) -> Option<&ItemStack>;

    /// Number of slots.
    fn size(&self) -> usize {
        self.inventory_type().size()
    }
}

/// In-memory surface; every slot starts as air.
#[derive(Debug, Clone)]
pub struct Container {
    inventory_type: InventoryType,
    title: Text,
    slots: Vec<ItemStack>,
}

impl Container {
    /// Empty container of the given shape.
    pub fn new(inventory_type: InventoryType, title: Text) -> Self {
        Self {
            inventory_type,
            title,
            slots: vec![ItemStack::air(); inventory_type.size()],
        }
    }

    /// All slots in order.
    pub fn slots(&self) -> &[ItemStack] {
        &self.slots
    }
}

impl Surface for Container {
    fn inventory_type(&self) -> InventoryType {
        self.inventory_type
    }

    fn title(&self) -> &Text {
        &self.title
    }

    fn set_slot(&mut self, slot: usize, item: &ItemStack) {
        if let Some(target) = self.slots.get_mut(slot) {
            trace!(slot, material = %item.material, "container slot write");
            *target = item.clone();
        }
    }

    fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invmenu_core::Material;

    #[test]
    fn starts_empty() {
        let container = Container::new(InventoryType::Hopper, Text::markup("Hopper"));
        assert_eq!(container.size(), 5);
        assert!(container.slots().iter().all(ItemStack::is_air));
        assert_eq!(container.title().to_plain(), "Hopper");
    }

    #[test]
    fn writes_land_in_slot() {
        let mut container = Container::new(InventoryType::Chest1Row, Text::empty());
        let stone = ItemStack::of(Material::parse("stone").unwrap());
        container.set_slot(4, &stone);
        assert_eq!(container.slot(4), Some(&stone));
        assert!(container.slot(9).is_none());
    }
}
