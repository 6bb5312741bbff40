//! Menus: addressable slot grids holding icons.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use invmenu_core::{InventoryType, ItemStack, Text};
use tracing::trace;

use crate::error::GuiError;
use crate::event::{CloseEvent, OpenEvent};
use crate::icon::Icon;
use crate::surface::{Container, Surface};

/// Shared handle to a menu. Menus live on the engine's event thread only.
pub type MenuHandle = Rc<RefCell<Menu>>;

/// Open/close callbacks a menu author can attach.
pub trait MenuHooks {
    /// The menu was shown to a player.
    fn on_open(&self, _event: &OpenEvent) {}

    /// A player closed the menu.
    fn on_close(&self, _event: &CloseEvent) {}
}

/// A grid of slots, each optionally holding an [`Icon`].
///
/// Every mutation writes through to the backing [`Surface`].
pub struct Menu {
    id: String,
    icons: BTreeMap<usize, Rc<Icon>>,
    surface: Box<dyn Surface>,
    hooks: Option<Rc<dyn MenuHooks>>,
    closed: bool,
}

impl Menu {
    /// Chest menu with `rows` rows; rows outside 1..=6 give a 6-row chest.
    pub fn new(id: impl Into<String>, title: Text, rows: i32) -> Self {
        Self::with_type(id, title, InventoryType::from_rows(rows))
    }

    /// Menu of an explicit container type.
    pub fn with_type(id: impl Into<String>, title: Text, inventory_type: InventoryType) -> Self {
        Self::with_surface(id, Box::new(Container::new(inventory_type, title)))
    }

    /// Menu backed by an engine-supplied surface.
    pub fn with_surface(id: impl Into<String>, surface: Box<dyn Surface>) -> Self {
        Self {
            id: id.into(),
            icons: BTreeMap::new(),
            surface,
            hooks: None,
            closed: false,
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> MenuHandle {
        Rc::new(RefCell::new(self))
    }

    /// Menu identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Window title.
    pub fn title(&self) -> &Text {
        self.surface.title()
    }

    /// Container type.
    pub fn inventory_type(&self) -> InventoryType {
        self.surface.inventory_type()
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.surface.size()
    }

    /// Backing surface.
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Whether the last viewer closed this menu.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the menu closed (or re-opened).
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Attach open/close hooks.
    pub fn set_hooks(&mut self, hooks: Rc<dyn MenuHooks>) {
        self.hooks = Some(hooks);
    }

    /// Attached hooks, if any.
    pub fn hooks(&self) -> Option<Rc<dyn MenuHooks>> {
        self.hooks.clone()
    }

    /// Sparse slot to icon mapping.
    pub fn items(&self) -> &BTreeMap<usize, Rc<Icon>> {
        &self.icons
    }

    /// Icon at `slot`, if any.
    pub fn icon(&self, slot: usize) -> Option<Rc<Icon>> {
        self.icons.get(&slot).cloned()
    }

    /// Place `icon` at `slot`, replacing whatever was there.
    pub fn add_item(&mut self, slot: usize, icon: impl Into<Rc<Icon>>) -> Result<(), GuiError> {
        self.validate_slot(slot)?;
        let icon = icon.into();
        trace!(menu = %self.id, slot, "add icon");
        self.surface.set_slot(slot, icon.item());
        self.icons.insert(slot, icon);
        Ok(())
    }

    /// Place `icon` in the first empty slot and return that slot.
    pub fn push_item(&mut self, icon: impl Into<Rc<Icon>>) -> Result<usize, GuiError> {
        let slot = self.first_empty().ok_or(GuiError::MenuFull { size: self.size() })?;
        self.add_item(slot, icon)?;
        Ok(slot)
    }

    /// Place the same icon in every slot of `slots`.
    pub fn add_item_to_slots(
        &mut self,
        icon: impl Into<Rc<Icon>>,
        slots: impl IntoIterator<Item = usize>,
    ) -> Result<(), GuiError> {
        let icon = icon.into();
        for slot in slots {
            self.add_item(slot, Rc::clone(&icon))?;
        }
        Ok(())
    }

    /// Clear `slot`, both logically and on the surface.
    pub fn remove_item(&mut self, slot: usize) -> Result<(), GuiError> {
        self.validate_slot(slot)?;
        trace!(menu = %self.id, slot, "remove icon");
        self.icons.remove(&slot);
        self.surface.set_slot(slot, &ItemStack::air());
        Ok(())
    }

    /// Remove every icon.
    pub fn clear(&mut self) {
        let slots: Vec<usize> = self.icons.keys().copied().collect();
        let air = ItemStack::air();
        for slot in slots {
            self.icons.remove(&slot);
            self.surface.set_slot(slot, &air);
        }
    }

    /// Put `icon` in every slot.
    pub fn fill_all(&mut self, icon: impl Into<Rc<Icon>>) -> Result<(), GuiError> {
        self.add_item_to_slots(icon, 0..self.size())
    }

    /// Put `icon` in every slot not listed in `excluded`.
    pub fn fill_all_except(
        &mut self,
        icon: impl Into<Rc<Icon>>,
        excluded: impl IntoIterator<Item = usize>,
    ) -> Result<(), GuiError> {
        let excluded: BTreeSet<usize> = excluded.into_iter().collect();
        let slots: Vec<usize> = (0..self.size())
            .filter(|slot| !excluded.contains(slot))
            .collect();
        self.add_item_to_slots(icon, slots)
    }

    /// Put `icon` across row `row`. Rows past the bottom fail on the first slot.
    pub fn fill_row(&mut self, icon: impl Into<Rc<Icon>>, row: usize) -> Result<(), GuiError> {
        let width = self.inventory_type().columns();
        self.add_item_to_slots(icon, (0..width).map(|i| row * width + i))
    }

    /// Put `icon` down column `column`.
    pub fn fill_column(&mut self, icon: impl Into<Rc<Icon>>, column: usize) -> Result<(), GuiError> {
        let width = self.inventory_type().columns();
        let height = self.size() / width;
        self.add_item_to_slots(icon, (0..height).map(|i| i * width + column))
    }

    /// Lowest slot without an icon.
    pub fn first_empty(&self) -> Option<usize> {
        (0..self.size()).find(|slot| !self.icons.contains_key(slot))
    }

    fn validate_slot(&self, slot: usize) -> Result<(), GuiError> {
        let size = self.size();
        if slot >= size {
            return Err(GuiError::SlotOutOfRange { slot, size });
        }
        Ok(())
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("inventory_type", &self.inventory_type())
            .field("icons", &self.icons.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
