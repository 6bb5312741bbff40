//! Single entry point wiring the registry and the dispatcher together.

use tracing::info;

use crate::config::GuiConfig;
use crate::dispatch::{AllowAll, ClickDispatcher, DispatchOutcome, PermissionOracle};
use crate::error::GuiError;
use crate::event::InventoryEvent;
use crate::menu::MenuHandle;
use crate::session::{SessionRegistry, Viewer};

/// Owns the session registry and dispatcher for one server.
///
/// Engine glue builds one at startup and forwards every click/open/close
/// notification to [`InventoryApi::handle`].
#[derive(Debug, Default)]
pub struct InventoryApi {
    sessions: SessionRegistry,
    dispatcher: ClickDispatcher,
}

impl InventoryApi {
    /// Set up with `oracle`, or with [`AllowAll`] when none is given.
    pub fn init(oracle: Option<Box<dyn PermissionOracle>>) -> Self {
        Self::init_with_config(oracle, GuiConfig::default())
    }

    /// Same as [`Self::init`] with explicit settings.
    pub fn init_with_config(oracle: Option<Box<dyn PermissionOracle>>, config: GuiConfig) -> Self {
        let custom = oracle.is_some();
        let oracle = oracle.unwrap_or_else(|| Box::new(AllowAll));
        info!(custom_oracle = custom, "inventory menus initialised");
        Self {
            sessions: SessionRegistry::new(),
            dispatcher: ClickDispatcher::new(oracle, config),
        }
    }

    /// Route one engine notification. Click events come back with their cancel flag set.
    pub fn handle(&mut self, event: &mut InventoryEvent, viewer: &mut dyn Viewer) -> DispatchOutcome {
        match event {
            InventoryEvent::Click(click) => {
                self.dispatcher
                    .dispatch_click(&mut self.sessions, click, viewer)
            }
            InventoryEvent::Open(open) => self.dispatcher.dispatch_open(&self.sessions, open),
            InventoryEvent::Close(close) => {
                self.dispatcher.dispatch_close(&mut self.sessions, close)
            }
        }
    }

    /// Open `menu` for the viewer.
    pub fn open(&mut self, menu: &MenuHandle, viewer: &mut dyn Viewer) -> Result<(), GuiError> {
        self.sessions.open(menu, viewer)
    }

    /// Active menus.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Active menus, mutably.
    pub fn sessions_mut(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &ClickDispatcher {
        &self.dispatcher
    }
}
