use anyhow::{Context, Result};
use invmenu_core::{InventoryType, ItemStack, Material, Text};
use invmenu_gui::{ClickContext, GuiConfig, Icon, Menu, MenuHandle, Pagination, PaginationHandle};
use serde::Deserialize;
use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    rc::{Rc, Weak},
};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    settings: GuiConfig,
    #[serde(default)]
    menus: Vec<MenuDef>,
}

#[derive(Debug, Deserialize)]
struct MenuDef {
    id: String,
    #[serde(default)]
    title: String,
    rows: Option<i32>,
    #[serde(rename = "type")]
    inventory_type: Option<InventoryType>,
    fill: Option<Material>,
    #[serde(default)]
    icons: Vec<IconDef>,
    pagination: Option<PaginationDef>,
}

#[derive(Debug, Deserialize)]
struct IconDef {
    slot: Option<usize>,
    material: Material,
    name: Option<String>,
    #[serde(default)]
    lore: Vec<String>,
    amount: Option<u8>,
    permission: Option<String>,
    #[serde(default)]
    stealable: bool,
    #[serde(default)]
    action: ActionDef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionDef {
    #[default]
    None,
    Message(String),
    Close,
    Open(String),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
}

#[derive(Debug, Deserialize)]
struct PaginationDef {
    #[serde(default)]
    slots: Vec<usize>,
    between: Option<[usize; 2]>,
    #[serde(default)]
    icons: Vec<IconDef>,
    previous: Option<usize>,
    next: Option<usize>,
    first: Option<usize>,
    last: Option<usize>,
}

/// Menus built from a layout file, keyed by id.
#[derive(Debug)]
pub struct Layout {
    config: GuiConfig,
    menus: BTreeMap<String, MenuHandle>,
    paginations: BTreeMap<String, PaginationHandle>,
}

impl Layout {
    /// Load and build a layout from a TOML file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        Self::from_str(&contents).with_context(|| format!("invalid layout {}", path.display()))
    }

    /// Build a layout from an in-memory TOML string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: LayoutFile = toml::from_str(contents)?;
        if file.menus.is_empty() {
            anyhow::bail!("layout declares no menus");
        }

        // Every menu exists before any icon is built so `open` actions can point forward.
        let mut menus = BTreeMap::new();
        let mut paginations = BTreeMap::new();
        for def in &file.menus {
            let title = Text::markup(def.title.clone());
            let menu = match (def.rows, def.inventory_type) {
                (Some(_), Some(_)) => {
                    anyhow::bail!("menu '{}' sets both rows and type", def.id)
                }
                (Some(rows), None) => Menu::new(def.id.clone(), title, rows),
                (None, Some(ty)) => Menu::with_type(def.id.clone(), title, ty),
                (None, None) => Menu::new(def.id.clone(), title, 6),
            }
            .into_handle();
            if def.pagination.is_some() {
                paginations.insert(
                    def.id.clone(),
                    Pagination::new(Rc::clone(&menu)).into_handle(),
                );
            }
            if menus.insert(def.id.clone(), menu).is_some() {
                anyhow::bail!("duplicate menu id '{}'", def.id);
            }
        }

        let layout = Self {
            config: file.settings,
            menus,
            paginations,
        };
        for def in &file.menus {
            layout
                .populate(def)
                .with_context(|| format!("menu '{}'", def.id))?;
        }
        Ok(layout)
    }

    fn populate(&self, def: &MenuDef) -> Result<()> {
        let menu = self.menu_handle(&def.id)?;
        let pagination = self.paginations.get(&def.id);

        for icon_def in &def.icons {
            let icon = self.build_icon(icon_def, &def.id)?;
            let mut menu = menu.borrow_mut();
            match icon_def.slot {
                Some(slot) => menu.add_item(slot, icon)?,
                None => {
                    menu.push_item(icon)?;
                }
            }
        }

        let mut reserved = BTreeSet::new();
        if let (Some(handle), Some(page_def)) = (pagination, &def.pagination) {
            {
                let mut pagination = handle.borrow_mut();
                pagination.register_slots(page_def.slots.iter().copied());
                if let Some([start, end]) = page_def.between {
                    pagination.register_slots_between(start, end);
                }
                if pagination.slots().is_empty() {
                    anyhow::bail!("pagination has no slots");
                }
                for icon_def in &page_def.icons {
                    pagination.add_icon(self.build_icon(icon_def, &def.id)?);
                }
                reserved.extend(pagination.slots().iter().copied());
            }

            let buttons: [(Option<usize>, fn(&PaginationHandle, Icon) -> Icon, &str); 4] = [
                (page_def.previous, Pagination::previous_button, "<gray>Previous page"),
                (page_def.next, Pagination::next_button, "<gray>Next page"),
                (page_def.first, Pagination::first_button, "<gray>First page"),
                (page_def.last, Pagination::last_button, "<gray>Last page"),
            ];
            for (slot, make, label) in buttons {
                if let Some(slot) = slot {
                    let icon = Icon::of(Material::parse("arrow")?).name(Text::markup(label));
                    menu.borrow_mut().add_item(slot, make(handle, icon))?;
                }
            }
            handle.borrow().update()?;
        }

        if let Some(material) = &def.fill {
            let filler = Rc::new(
                Icon::new(ItemStack::of(material.clone()).with_name(Text::legacy(" "))),
            );
            let mut menu = menu.borrow_mut();
            reserved.extend(menu.items().keys().copied());
            menu.fill_all_except(filler, reserved)?;
        }
        debug!(menu = %def.id, icons = menu.borrow().items().len(), "menu built");
        Ok(())
    }

    fn build_icon(&self, def: &IconDef, menu_id: &str) -> Result<Icon> {
        let mut icon = Icon::of(def.material.clone()).stealable(def.stealable);
        if let Some(name) = &def.name {
            icon = icon.name(Text::markup(name.clone()));
        }
        if !def.lore.is_empty() {
            icon = icon.lore(def.lore.iter().cloned().map(Text::markup).collect());
        }
        if let Some(amount) = def.amount {
            icon = icon.amount(amount);
        }
        if let Some(permission) = &def.permission {
            icon = icon.permission(permission.clone());
        }

        let icon = match &def.action {
            ActionDef::None => icon,
            ActionDef::Message(message) => {
                let message = Text::markup(message.clone());
                icon.on_click(move |ctx| ctx.send_message(message.clone()))
            }
            ActionDef::Close => icon.on_click(|ctx| ctx.close()),
            ActionDef::Open(target) => {
                let target_id = target.clone();
                let target = Rc::downgrade(self.menu_handle(target)?);
                icon.on_click(move |ctx| open_weak(ctx, &target, &target_id))
            }
            ActionDef::NextPage => self.page_action(icon, menu_id, |p| {
                p.next();
            })?,
            ActionDef::PreviousPage => self.page_action(icon, menu_id, |p| {
                p.previous();
            })?,
            ActionDef::FirstPage => self.page_action(icon, menu_id, |p| {
                p.first();
            })?,
            ActionDef::LastPage => self.page_action(icon, menu_id, |p| {
                p.last();
            })?,
        };
        Ok(icon)
    }

    fn page_action(&self, icon: Icon, menu_id: &str, step: fn(&mut Pagination)) -> Result<Icon> {
        let Some(handle) = self.paginations.get(menu_id) else {
            anyhow::bail!("page action on a menu without pagination");
        };
        Ok(Pagination::button(handle, icon, step))
    }

    fn menu_handle(&self, id: &str) -> Result<&MenuHandle> {
        self.menus
            .get(id)
            .with_context(|| format!("unknown menu '{id}'"))
    }

    /// Menu by id.
    pub fn menu(&self, id: &str) -> Option<&MenuHandle> {
        self.menus.get(id)
    }

    /// Pagination attached to menu `id`, if any.
    #[cfg(test)]
    pub fn pagination(&self, id: &str) -> Option<&PaginationHandle> {
        self.paginations.get(id)
    }

    /// `[settings]` from the layout.
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Non-air container contents per menu.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<usize, ItemStack>> {
        self.menus
            .iter()
            .map(|(id, menu)| {
                let menu = menu.borrow();
                let surface = menu.surface();
                let slots = (0..surface.size())
                    .filter_map(|slot| {
                        surface
                            .slot(slot)
                            .filter(|item| !item.is_air())
                            .map(|item| (slot, item.clone()))
                    })
                    .collect();
                (id.clone(), slots)
            })
            .collect()
    }
}

fn open_weak(ctx: &mut ClickContext<'_>, target: &Weak<RefCell<Menu>>, target_id: &str) {
    let Some(menu) = target.upgrade() else {
        warn!(menu = target_id, "open target dropped");
        return;
    };
    if let Err(err) = ctx.open(&menu) {
        warn!(menu = target_id, "open failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"
        [settings]
        no_permission_message = "<red>Members only."

        [[menus]]
        id = "main"
        title = "<gold>Main"
        rows = 1
        fill = "gray_stained_glass_pane"

        [[menus.icons]]
        slot = 4
        material = "emerald"
        name = "<green>Shop"
        action = { open = "shop" }

        [[menus.icons]]
        slot = 8
        material = "barrier"
        action = "close"

        [[menus]]
        id = "shop"
        title = "Shop"
        rows = 2

        [menus.pagination]
        between = [0, 3]
        next = 17
        previous = 9

        [[menus.pagination.icons]]
        material = "diamond"
        permission = "shop.vip"
        action = { message = "Bought" }

        [[menus.pagination.icons]]
        material = "iron_ingot"

        [[menus.pagination.icons]]
        material = "gold_ingot"

        [[menus.pagination.icons]]
        material = "coal"

        [[menus.pagination.icons]]
        material = "apple"
    "#;

    #[test]
    fn builds_menus_and_fill() {
        let layout = Layout::from_str(SHOP).expect("layout should build");
        assert_eq!(layout.config().no_permission_message, "<red>Members only.");

        let main = layout.menu("main").unwrap().borrow();
        assert_eq!(main.size(), 9);
        assert_eq!(main.items().len(), 9);
        assert_eq!(main.items()[&4].item().material.path(), "emerald");
        assert_eq!(
            main.items()[&0].item().material.path(),
            "gray_stained_glass_pane"
        );
    }

    #[test]
    fn pagination_shows_first_page_and_buttons() {
        let layout = Layout::from_str(SHOP).expect("layout should build");
        let snapshot = layout.snapshot();
        let shop = &snapshot["shop"];
        assert_eq!(shop[&0].material.path(), "diamond");
        assert_eq!(shop[&3].material.path(), "coal");
        assert_eq!(shop[&9].material.path(), "arrow");
        assert_eq!(shop[&17].material.path(), "arrow");
        assert!(!shop.contains_key(&4));

        let pagination = layout.pagination("shop").unwrap().borrow();
        assert_eq!(pagination.last_page(), 1);
    }

    #[test]
    fn unknown_open_target_is_rejected() {
        let toml = r#"
            [[menus]]
            id = "main"
            rows = 1
            [[menus.icons]]
            material = "stone"
            action = { open = "missing" }
        "#;
        let err = Layout::from_str(toml).unwrap_err();
        assert!(
            format!("{err:#}").contains("unknown menu 'missing'"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn icon_outside_menu_is_rejected() {
        let toml = r#"
            [[menus]]
            id = "main"
            rows = 1
            [[menus.icons]]
            slot = 9
            material = "stone"
        "#;
        let err = Layout::from_str(toml).unwrap_err();
        assert!(
            format!("{err:#}").contains("slot 9"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn page_action_requires_pagination() {
        let toml = r#"
            [[menus]]
            id = "main"
            type = "hopper"
            [[menus.icons]]
            material = "arrow"
            action = "next_page"
        "#;
        assert!(Layout::from_str(toml).is_err());
    }
}
