//! Which menu each player currently has open.

use std::collections::HashMap;
use std::rc::Rc;

use invmenu_core::{PlayerId, Text};
use tracing::{debug, info, warn};

use crate::error::GuiError;
use crate::menu::{Menu, MenuHandle};

/// The engine-side player a menu is shown to.
pub trait Viewer {
    /// Player identity.
    fn id(&self) -> PlayerId;

    /// Render `menu` as the player's open container.
    fn open_inventory(&mut self, menu: &Menu) -> Result<(), GuiError>;

    /// Close whatever container the player has open.
    fn close_inventory(&mut self);

    /// Deliver a chat message.
    fn send_message(&mut self, message: Text);
}

/// One active menu per player; the last open wins.
///
/// Not synchronised. Every call must come from the thread that delivers
/// inventory notifications for these players.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: HashMap<PlayerId, MenuHandle>,
}

impl SessionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `menu` the active menu of `player`, returning the one it replaced.
    pub fn register(&mut self, player: PlayerId, menu: MenuHandle) -> Option<MenuHandle> {
        debug!(%player, menu = %menu.borrow().id(), "register active menu");
        self.active.insert(player, menu)
    }

    /// Active menu of `player`.
    pub fn lookup(&self, player: PlayerId) -> Option<MenuHandle> {
        self.active.get(&player).cloned()
    }

    /// Drop the entry for `player`.
    pub fn unregister(&mut self, player: PlayerId) -> Option<MenuHandle> {
        self.active.remove(&player)
    }

    /// Number of players with an active menu.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no player has an active menu.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Players with an active menu, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.active.keys().copied()
    }

    /// Register `menu` for the viewer, then ask the engine to show it.
    ///
    /// If the engine refuses, the viewer's previous entry is restored.
    pub fn open(&mut self, menu: &MenuHandle, viewer: &mut dyn Viewer) -> Result<(), GuiError> {
        let player = viewer.id();
        let previous = self.register(player, Rc::clone(menu));
        menu.borrow_mut().set_closed(false);

        let shown = viewer.open_inventory(&menu.borrow());
        match shown {
            Ok(()) => {
                info!(%player, menu = %menu.borrow().id(), "menu opened");
                Ok(())
            }
            Err(err) => {
                warn!(%player, %err, "engine refused to open menu");
                match previous {
                    Some(previous) => {
                        self.active.insert(player, previous);
                    }
                    None => {
                        self.active.remove(&player);
                    }
                }
                Err(err)
            }
        }
    }

    /// Open `menu` for each viewer in turn.
    ///
    /// Stops at the first failure; viewers opened before it keep the menu.
    pub fn open_all<'v, V, I>(&mut self, menu: &MenuHandle, viewers: I) -> Result<(), GuiError>
    where
        V: Viewer + 'v,
        I: IntoIterator<Item = &'v mut V>,
    {
        for viewer in viewers {
            self.open(menu, viewer)?;
        }
        Ok(())
    }
}
