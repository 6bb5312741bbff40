//! Clickable display units placed in menu slots.

use std::fmt;
use std::rc::Rc;

use invmenu_core::{ItemStack, Material, Text};

use crate::event::ClickContext;

/// Procedure run when an icon is clicked.
pub type ClickAction = Rc<dyn Fn(&mut ClickContext<'_>)>;

/// A display item bound to click behaviour.
///
/// Icons are built fluently and then shared between slots (and menus) as `Rc<Icon>`.
#[derive(Clone)]
pub struct Icon {
    item: ItemStack,
    click_action: ClickAction,
    no_permission_action: Option<ClickAction>,
    permission: Option<String>,
    stealable: bool,
}

impl Icon {
    /// Icon showing `item`, with a no-op click action.
    pub fn new(item: ItemStack) -> Self {
        Self {
            item,
            click_action: Rc::new(|_| {}),
            no_permission_action: None,
            permission: None,
            stealable: false,
        }
    }

    /// Icon showing a single `material`.
    pub fn of(material: Material) -> Self {
        Self::new(ItemStack::of(material))
    }

    /// Explicitly empty icon; renders as an air slot.
    pub fn empty() -> Self {
        Self::new(ItemStack::air())
    }

    /// Allow players to take the displayed item out of the menu.
    pub fn stealable(mut self, stealable: bool) -> Self {
        self.stealable = stealable;
        self
    }

    /// Require `permission` before the click action runs.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: Text) -> Self {
        self.item = self.item.with_name(name);
        self
    }

    /// Replace the lore.
    pub fn lore(mut self, lore: Vec<Text>) -> Self {
        self.item = self.item.with_lore(lore);
        self
    }

    /// Append lore lines.
    pub fn append_lore(mut self, lore: Vec<Text>) -> Self {
        self.item = self.item.with_appended_lore(lore);
        self
    }

    /// Set the displayed amount.
    pub fn amount(mut self, amount: u8) -> Self {
        self.item = self.item.with_amount(amount);
        self
    }

    /// Set the damage value.
    pub fn damage(mut self, damage: u32) -> Self {
        self.item = self.item.with_damage(damage);
        self
    }

    /// Replace the whole display item.
    pub fn display(mut self, item: ItemStack) -> Self {
        self.item = item;
        self
    }

    /// Set the click action.
    pub fn on_click<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ClickContext<'_>) + 'static,
    {
        self.click_action = Rc::new(action);
        self
    }

    /// Set the action run instead of the click action when the permission check fails.
    pub fn on_no_permission<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut ClickContext<'_>) + 'static,
    {
        self.no_permission_action = Some(Rc::new(action));
        self
    }

    /// Displayed item.
    pub fn item(&self) -> &ItemStack {
        &self.item
    }

    /// Permission required to click, if any.
    pub fn required_permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Whether the item may be taken out of the menu.
    pub fn is_stealable(&self) -> bool {
        self.stealable
    }

    /// Whether a custom no-permission action is set.
    pub fn has_no_permission_action(&self) -> bool {
        self.no_permission_action.is_some()
    }

    /// Run the click action.
    pub fn click(&self, ctx: &mut ClickContext<'_>) {
        (self.click_action)(ctx);
    }

    /// Run the no-permission action. Returns `false` when none is set.
    pub fn deny(&self, ctx: &mut ClickContext<'_>) -> bool {
        match &self.no_permission_action {
            Some(action) => {
                action(ctx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("item", &self.item)
            .field("permission", &self.permission)
            .field("stealable", &self.stealable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unrestricted_and_locked() {
        let icon = Icon::of(Material::parse("stone").unwrap());
        assert!(!icon.is_stealable());
        assert_eq!(icon.required_permission(), None);
        assert!(!icon.has_no_permission_action());
    }

    #[test]
    fn fluent_setters_apply() {
        let icon = Icon::of(Material::parse("emerald").unwrap())
            .name(Text::markup("<green>Buy"))
            .lore(vec![Text::markup("costs 5")])
            .append_lore(vec![Text::markup("<d>click")])
            .amount(5)
            .damage(2)
            .permission("shop.buy")
            .stealable(true)
            .on_no_permission(|_| {});

        assert_eq!(icon.item().amount, 5);
        assert_eq!(icon.item().lore.len(), 2);
        assert_eq!(icon.item().damage, Some(2));
        assert_eq!(icon.required_permission(), Some("shop.buy"));
        assert!(icon.is_stealable());
        assert!(icon.has_no_permission_action());
    }

    #[test]
    fn empty_icon_is_air() {
        assert!(Icon::empty().item().is_air());
        let replaced = Icon::empty().display(ItemStack::of(Material::parse("dirt").unwrap()));
        assert!(!replaced.item().is_air());
    }
}
