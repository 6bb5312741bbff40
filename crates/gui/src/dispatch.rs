//! Routing of click/open/close notifications to menus and icons.

use std::fmt;

use invmenu_core::PlayerId;
use tracing::{debug, info, instrument};

use crate::config::GuiConfig;
use crate::event::{ClickContext, ClickEvent, CloseEvent, OpenEvent};
use crate::session::{SessionRegistry, Viewer};

/// Decides whether a player holds a permission.
pub trait PermissionOracle {
    /// `true` if `player` may use things guarded by `permission`.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;
}

impl<F> PermissionOracle for F
where
    F: Fn(PlayerId, &str) -> bool,
{
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self(player, permission)
    }
}

/// Grants every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionOracle for AllowAll {
    fn has_permission(&self, _player: PlayerId, _permission: &str) -> bool {
        true
    }
}

/// What a dispatch call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No active menu or no icon; the engine's default applies.
    PassThrough,
    /// Permission check failed; event cancelled, no-permission action ran.
    Denied,
    /// Click action ran.
    Handled {
        /// Final cancel flag of the event.
        cancelled: bool,
    },
    /// Open hook ran.
    Opened,
    /// Close hook ran and the session entry was dropped.
    Closed,
}

/// Turns engine notifications into icon actions and menu hooks.
pub struct ClickDispatcher {
    oracle: Box<dyn PermissionOracle>,
    config: GuiConfig,
}

impl ClickDispatcher {
    /// Dispatcher using `oracle` for permission checks.
    pub fn new(oracle: Box<dyn PermissionOracle>, config: GuiConfig) -> Self {
        Self { oracle, config }
    }

    /// Active settings.
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Handle a click inside a container.
    #[instrument(skip_all, fields(player = %event.player, slot = event.slot))]
    pub fn dispatch_click(
        &self,
        sessions: &mut SessionRegistry,
        event: &mut ClickEvent,
        viewer: &mut dyn Viewer,
    ) -> DispatchOutcome {
        let Some(menu) = sessions.lookup(event.player) else {
            return DispatchOutcome::PassThrough;
        };
        let Some(icon) = menu.borrow().icon(event.slot) else {
            debug!("no icon at slot");
            return DispatchOutcome::PassThrough;
        };

        if let Some(permission) = icon.required_permission() {
            if !self.oracle.has_permission(event.player, permission) {
                if self.config.log_denied_clicks {
                    info!(permission, "click denied");
                } else {
                    debug!(permission, "click denied");
                }
                event.cancel();
                let mut ctx = ClickContext {
                    event: &mut *event,
                    viewer: &mut *viewer,
                    sessions: &mut *sessions,
                    menu,
                };
                if !icon.deny(&mut ctx) {
                    ctx.send_message(self.config.no_permission_text());
                }
                return DispatchOutcome::Denied;
            }
        }

        let mut ctx = ClickContext {
            event: &mut *event,
            viewer,
            sessions,
            menu,
        };
        icon.click(&mut ctx);

        if !icon.is_stealable() {
            event.cancel();
        }
        let cancelled = event.is_cancelled();
        debug!(cancelled, "click handled");
        DispatchOutcome::Handled { cancelled }
    }

    /// Handle a container being shown.
    #[instrument(skip_all, fields(player = %event.player))]
    pub fn dispatch_open(&self, sessions: &SessionRegistry, event: &OpenEvent) -> DispatchOutcome {
        let Some(menu) = sessions.lookup(event.player) else {
            return DispatchOutcome::PassThrough;
        };
        let hooks = menu.borrow().hooks();
        if let Some(hooks) = hooks {
            hooks.on_open(event);
        }
        DispatchOutcome::Opened
    }

    /// Handle a container window closing.
    ///
    /// The close hook runs before the session entry is dropped. A close that names
    /// a menu other than the active one is stale and ignored.
    #[instrument(skip_all, fields(player = %event.player))]
    pub fn dispatch_close(
        &self,
        sessions: &mut SessionRegistry,
        event: &CloseEvent,
    ) -> DispatchOutcome {
        let Some(menu) = sessions.lookup(event.player) else {
            return DispatchOutcome::PassThrough;
        };
        if let Some(closed_id) = event.menu_id.as_deref() {
            if menu.borrow().id() != closed_id {
                debug!(closed_id, "close for a replaced menu");
                return DispatchOutcome::PassThrough;
            }
        }

        let hooks = menu.borrow().hooks();
        if let Some(hooks) = hooks {
            hooks.on_close(event);
        }
        menu.borrow_mut().set_closed(true);
        sessions.unregister(event.player);
        info!(menu = %menu.borrow().id(), "menu closed");
        DispatchOutcome::Closed
    }
}

impl Default for ClickDispatcher {
    fn default() -> Self {
        Self::new(Box::new(AllowAll), GuiConfig::default())
    }
}

impl fmt::Debug for ClickDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_grants_everything() {
        assert!(AllowAll.has_permission(PlayerId(1), "anything.at.all"));
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |player: PlayerId, permission: &str| player == PlayerId(1) && permission == "vip";
        assert!(oracle.has_permission(PlayerId(1), "vip"));
        assert!(!oracle.has_permission(PlayerId(2), "vip"));
        assert!(!oracle.has_permission(PlayerId(1), "admin"));
    }

    #[test]
    fn default_dispatcher_uses_default_config() {
        let dispatcher = ClickDispatcher::default();
        assert_eq!(dispatcher.config(), &GuiConfig::default());
    }
}
