#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod inventory;
pub mod item;
pub mod material;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use inventory::InventoryType;
pub use item::ItemStack;
pub use material::{Material, MaterialError};
pub use text::Text;

/// Opaque identity of a connected player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Engine tick counter (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// First tick of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "player#7");
    }

    #[test]
    fn tick_advances() {
        assert_eq!(Tick::ZERO.advance(3), Tick(3));
        assert!(Tick(2) < Tick(3));
    }
}
