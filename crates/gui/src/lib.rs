#![warn(missing_docs)]
//! Inventory-backed menus: icons, click dispatch, permissions and pagination.
//!
//! Everything here runs on the engine's event thread. Menus are shared as
//! `Rc<RefCell<_>>` handles and nothing is `Send`.

mod api;
mod config;
mod dispatch;
mod error;
mod event;
mod icon;
mod menu;
mod pagination;
mod session;
mod surface;

pub use api::InventoryApi;
pub use config::GuiConfig;
pub use dispatch::{AllowAll, ClickDispatcher, DispatchOutcome, PermissionOracle};
pub use error::GuiError;
pub use event::{ClickContext, ClickEvent, ClickType, CloseEvent, InventoryEvent, OpenEvent};
pub use icon::{ClickAction, Icon};
pub use menu::{Menu, MenuHandle, MenuHooks};
pub use pagination::{Pagination, PaginationHandle};
pub use session::{SessionRegistry, Viewer};
pub use surface::{Container, Surface};
