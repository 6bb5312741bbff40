//! Paging a long icon list through a fixed set of menu slots.
//!
//! Pages are numbered from 0. Page `p` shows icons
//! `[p * viewport, p * viewport + viewport)` of the backing list, and viewport
//! slots past the end of the list are padded with an empty icon. Navigation only
//! moves the page counter; call [`Pagination::update`] to redraw.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::error::GuiError;
use crate::icon::Icon;
use crate::menu::MenuHandle;

/// Shared handle, so navigation icons can drive a pagination.
pub type PaginationHandle = Rc<RefCell<Pagination>>;

/// A backing icon list paged through a menu's viewport slots.
#[derive(Debug)]
pub struct Pagination {
    menu: MenuHandle,
    slots: Vec<usize>,
    icons: Vec<Rc<Icon>>,
    page: usize,
    empty: Rc<Icon>,
}

impl Pagination {
    /// Pagination drawing into `menu`, with no slots and no icons yet.
    pub fn new(menu: MenuHandle) -> Self {
        Self {
            menu,
            slots: Vec::new(),
            icons: Vec::new(),
            page: 0,
            empty: Rc::new(Icon::empty()),
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> PaginationHandle {
        Rc::new(RefCell::new(self))
    }

    /// Menu this pagination draws into.
    pub fn menu(&self) -> &MenuHandle {
        &self.menu
    }

    /// Append viewport slots. They are not checked against the menu size here;
    /// a bad slot surfaces as a [`GuiError::SlotOutOfRange`] from [`Self::update`].
    pub fn register_slots(&mut self, slots: impl IntoIterator<Item = usize>) {
        self.slots.extend(slots);
    }

    /// Append the viewport slots `start..=end`.
    pub fn register_slots_between(&mut self, start: usize, end: usize) {
        self.slots.extend(start..=end);
    }

    /// Forget every viewport slot.
    pub fn unregister_slots(&mut self) {
        self.slots.clear();
    }

    /// Viewport slots in display order.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Append icons to the backing list.
    pub fn add_icons<I>(&mut self, icons: impl IntoIterator<Item = I>)
    where
        I: Into<Rc<Icon>>,
    {
        self.icons.extend(icons.into_iter().map(Into::into));
    }

    /// Append one icon to the backing list.
    pub fn add_icon(&mut self, icon: impl Into<Rc<Icon>>) {
        self.icons.push(icon.into());
    }

    /// Empty the backing list.
    pub fn clear_icons(&mut self) {
        self.icons.clear();
    }

    /// Backing list.
    pub fn icons(&self) -> &[Rc<Icon>] {
        &self.icons
    }

    /// Current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to `page` without bounds checks.
    pub fn set_page(&mut self, page: usize) -> &mut Self {
        self.page = page;
        self
    }

    /// Advance one page, stopping at the last.
    pub fn next(&mut self) -> &mut Self {
        if self.page < self.last_page() {
            self.page += 1;
        }
        self
    }

    /// Go back one page, stopping at 0.
    pub fn previous(&mut self) -> &mut Self {
        if self.page > 0 {
            self.page -= 1;
        }
        self
    }

    /// Go to page 0.
    pub fn first(&mut self) -> &mut Self {
        self.page = 0;
        self
    }

    /// Go to the last page.
    pub fn last(&mut self) -> &mut Self {
        self.page = self.last_page();
        self
    }

    /// Whether the current page is page 0.
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether the current page is the last page.
    pub fn is_last(&self) -> bool {
        self.page == self.last_page()
    }

    /// Index of the last page; 0 when there are no slots or no icons.
    pub fn last_page(&self) -> usize {
        let viewport = self.slots.len();
        let total = self.icons.len();
        if viewport == 0 || total == 0 {
            return 0;
        }
        let pages = total / viewport;
        if total % viewport == 0 {
            pages - 1
        } else {
            pages
        }
    }

    /// Redraw the viewport slots from the current page.
    pub fn update(&self) -> Result<(), GuiError> {
        let offset = self.page.saturating_mul(self.slots.len());
        let mut menu = self.menu.borrow_mut();
        debug!(menu = %menu.id(), page = self.page, "pagination update");
        for (i, &slot) in self.slots.iter().enumerate() {
            let icon = offset
                .checked_add(i)
                .and_then(|index| self.icons.get(index))
                .unwrap_or(&self.empty);
            menu.add_item(slot, Rc::clone(icon))?;
        }
        Ok(())
    }

    /// Wrap `icon` so clicking it moves to the next page and redraws.
    pub fn next_button(handle: &PaginationHandle, icon: Icon) -> Icon {
        Self::button(handle, icon, |p| {
            p.next();
        })
    }

    /// Wrap `icon` so clicking it moves to the previous page and redraws.
    pub fn previous_button(handle: &PaginationHandle, icon: Icon) -> Icon {
        Self::button(handle, icon, |p| {
            p.previous();
        })
    }

    /// Wrap `icon` so clicking it jumps to page 0 and redraws.
    pub fn first_button(handle: &PaginationHandle, icon: Icon) -> Icon {
        Self::button(handle, icon, |p| {
            p.first();
        })
    }

    /// Wrap `icon` so clicking it jumps to the last page and redraws.
    pub fn last_button(handle: &PaginationHandle, icon: Icon) -> Icon {
        Self::button(handle, icon, |p| {
            p.last();
        })
    }

    /// Wrap `icon` so clicking it applies `step` and redraws.
    ///
    /// Buttons usually live in the menu this pagination draws into, so they only
    /// hold a weak reference back to it.
    pub fn button(handle: &PaginationHandle, icon: Icon, step: fn(&mut Pagination)) -> Icon {
        let pagination: Weak<RefCell<Pagination>> = Rc::downgrade(handle);
        icon.on_click(move |_ctx| {
            let Some(pagination) = pagination.upgrade() else {
                return;
            };
            let mut pagination = pagination.borrow_mut();
            step(&mut pagination);
            if let Err(err) = pagination.update() {
                warn!(%err, "pagination redraw failed");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Menu;
    use invmenu_core::{Material, Text};

    fn numbered(n: usize) -> Vec<Icon> {
        (0..n)
            .map(|i| Icon::of(Material::parse("paper").unwrap()).amount(i as u8 + 1))
            .collect()
    }

    fn paged(icons: usize, viewport: usize) -> Pagination {
        let menu = Menu::new("list", Text::empty(), 6).into_handle();
        let mut pagination = Pagination::new(menu);
        pagination.register_slots(0..viewport);
        pagination.add_icons(numbered(icons));
        pagination
    }

    #[test]
    fn last_page_examples() {
        assert_eq!(paged(10, 4).last_page(), 2);
        assert_eq!(paged(8, 4).last_page(), 1);
        assert_eq!(paged(0, 4).last_page(), 0);
        assert_eq!(paged(5, 0).last_page(), 0);
        assert_eq!(paged(3, 4).last_page(), 0);
    }

    #[test]
    fn navigation_clamps() {
        let mut pagination = paged(10, 4);
        assert!(pagination.is_first());
        pagination.previous();
        assert_eq!(pagination.page(), 0);

        pagination.next().next().next().next();
        assert_eq!(pagination.page(), 2);
        assert!(pagination.is_last());

        pagination.first();
        assert_eq!(pagination.page(), 0);
        pagination.last();
        assert_eq!(pagination.page(), 2);
    }

    #[test]
    fn navigation_does_not_redraw() {
        let pagination = paged(10, 4).into_handle();
        pagination.borrow_mut().next();
        let menu = Rc::clone(pagination.borrow().menu());
        assert!(menu.borrow().items().is_empty());
    }

    #[test]
    fn update_renders_window_in_order() {
        let mut pagination = paged(10, 4);
        pagination.set_page(1);
        pagination.update().unwrap();

        let menu = pagination.menu().borrow();
        for (slot, index) in (0..4).zip(4..8) {
            assert!(Rc::ptr_eq(&menu.items()[&slot], &pagination.icons()[index]));
        }
    }

    #[test]
    fn last_page_pads_with_empty() {
        let mut pagination = paged(10, 4);
        pagination.last();
        pagination.update().unwrap();

        let menu = pagination.menu().borrow();
        assert_eq!(menu.items()[&0].item().amount, 9);
        assert_eq!(menu.items()[&1].item().amount, 10);
        assert!(menu.items()[&2].item().is_air());
        assert!(menu.items()[&3].item().is_air());
    }

    #[test]
    fn slots_render_in_registration_order() {
        let menu = Menu::new("list", Text::empty(), 3).into_handle();
        let mut pagination = Pagination::new(Rc::clone(&menu));
        pagination.register_slots([12, 10, 11]);
        pagination.add_icons(numbered(3));
        pagination.update().unwrap();

        let menu = menu.borrow();
        assert_eq!(menu.items()[&12].item().amount, 1);
        assert_eq!(menu.items()[&10].item().amount, 2);
        assert_eq!(menu.items()[&11].item().amount, 3);
    }

    #[test]
    fn out_of_range_viewport_fails_on_update() {
        let menu = Menu::new("tiny", Text::empty(), 1).into_handle();
        let mut pagination = Pagination::new(menu);
        pagination.register_slots_between(7, 10);
        assert_eq!(pagination.slots(), &[7, 8, 9, 10]);
        pagination.add_icons(numbered(2));

        assert_eq!(
            pagination.update(),
            Err(GuiError::SlotOutOfRange { slot: 9, size: 9 })
        );
    }

    #[test]
    fn unregister_and_clear() {
        let mut pagination = paged(10, 4);
        pagination.unregister_slots();
        assert!(pagination.slots().is_empty());
        pagination.clear_icons();
        assert!(pagination.icons().is_empty());
        assert_eq!(pagination.last_page(), 0);
    }
}
