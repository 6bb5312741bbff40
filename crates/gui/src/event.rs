//! Notifications delivered by the engine, and the context icon actions run in.

use invmenu_core::{PlayerId, Text};
use serde::{Deserialize, Serialize};

use crate::error::GuiError;
use crate::menu::MenuHandle;
use crate::session::{SessionRegistry, Viewer};

/// How the player clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickType {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Shift + primary.
    ShiftLeft,
    /// Shift + secondary.
    ShiftRight,
    /// Middle button (creative pick).
    Middle,
    /// Drop key over the slot.
    Drop,
    /// Double click (collect to cursor).
    DoubleClick,
    /// Hotbar number key swap.
    Number(u8),
}

/// A click inside an open container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Who clicked.
    pub player: PlayerId,
    /// Raw slot index.
    pub slot: usize,
    /// Button/modifier combination.
    pub click_type: ClickType,
    cancelled: bool,
}

impl ClickEvent {
    /// Uncancelled left click.
    pub fn new(player: PlayerId, slot: usize) -> Self {
        Self {
            player,
            slot,
            click_type: ClickType::Left,
            cancelled: false,
        }
    }

    /// Same click with another click type.
    pub fn with_click_type(mut self, click_type: ClickType) -> Self {
        self.click_type = click_type;
        self
    }

    /// Stop the engine from applying the click.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Set the cancel flag.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    /// Whether the engine will drop the click.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A container was shown to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEvent {
    /// Viewer.
    pub player: PlayerId,
}

/// A player's container window closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseEvent {
    /// Viewer.
    pub player: PlayerId,
    /// Id of the menu the closed window belonged to, when the engine knows it.
    pub menu_id: Option<String>,
}

impl OpenEvent {
    /// Open notification for `player`.
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl CloseEvent {
    /// Close notification without a menu id.
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            menu_id: None,
        }
    }

    /// Close notification for a specific menu.
    pub fn for_menu(player: PlayerId, menu_id: impl Into<String>) -> Self {
        Self {
            player,
            menu_id: Some(menu_id.into()),
        }
    }
}

/// Any notification routed through [`crate::InventoryApi::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Slot click.
    Click(ClickEvent),
    /// Window opened.
    Open(OpenEvent),
    /// Window closed.
    Close(CloseEvent),
}

impl InventoryEvent {
    /// Player the notification is about.
    pub fn player(&self) -> PlayerId {
        match self {
            InventoryEvent::Click(event) => event.player,
            InventoryEvent::Open(event) => event.player,
            InventoryEvent::Close(event) => event.player,
        }
    }
}

/// What an icon action gets to work with.
///
/// No borrow of the clicked menu is held while an action runs, so actions may
/// mutate that menu or open another one.
pub struct ClickContext<'a> {
    /// The click; actions may change its cancel flag.
    pub event: &'a mut ClickEvent,
    /// The clicking player.
    pub viewer: &'a mut dyn Viewer,
    /// Active menus.
    pub sessions: &'a mut SessionRegistry,
    /// Menu the click landed in.
    pub menu: MenuHandle,
}

impl ClickContext<'_> {
    /// Clicking player.
    pub fn player(&self) -> PlayerId {
        self.event.player
    }

    /// Clicked slot.
    pub fn slot(&self) -> usize {
        self.event.slot
    }

    /// Click type.
    pub fn click_type(&self) -> ClickType {
        self.event.click_type
    }

    /// Cancel the click.
    pub fn cancel(&mut self) {
        self.event.cancel();
    }

    /// Send a chat message to the clicking player.
    pub fn send_message(&mut self, message: Text) {
        self.viewer.send_message(message);
    }

    /// Close the player's window; the engine reports it back as a close notification.
    pub fn close(&mut self) {
        self.viewer.close_inventory();
    }

    /// Open another menu for the clicking player.
    pub fn open(&mut self, menu: &MenuHandle) -> Result<(), GuiError> {
        self.sessions.open(menu, &mut *self.viewer)
    }
}
