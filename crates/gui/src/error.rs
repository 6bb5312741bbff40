use invmenu_core::PlayerId;
use thiserror::Error;

/// Errors raised by menu operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuiError {
    /// A slot index at or past the end of the menu.
    #[error("slot {slot} is out of range for a menu of {size} slots")]
    SlotOutOfRange {
        /// Offending slot.
        slot: usize,
        /// Menu size.
        size: usize,
    },
    /// Auto-placement found no empty slot.
    #[error("no empty slot left in a menu of {size} slots")]
    MenuFull {
        /// Menu size.
        size: usize,
    },
    /// The engine refused to show the menu to a player.
    #[error("could not open menu for {player}: {reason}")]
    ViewerRejected {
        /// Player the menu was opened for.
        player: PlayerId,
        /// Engine-supplied reason.
        reason: String,
    },
}
