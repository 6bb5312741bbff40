//! Container shapes a menu can be presented in.

use serde::{Deserialize, Serialize};

/// Width of a chest row.
pub const CHEST_ROW_WIDTH: usize = 9;

/// Container type of a menu; fixes its slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryType {
    /// 1x9 chest.
    Chest1Row,
    /// 2x9 chest.
    Chest2Row,
    /// 3x9 chest.
    Chest3Row,
    /// 4x9 chest.
    Chest4Row,
    /// 5x9 chest.
    Chest5Row,
    /// 6x9 chest (largest).
    Chest6Row,
    /// 1x5 hopper.
    Hopper,
    /// 3x3 dispenser.
    Dispenser,
    /// 3x9 shulker box.
    ShulkerBox,
}

impl InventoryType {
    /// Chest type for a row count. Anything outside 1..=6 falls back to the 6-row chest.
    pub fn from_rows(rows: i32) -> Self {
        match rows {
            1 => InventoryType::Chest1Row,
            2 => InventoryType::Chest2Row,
            3 => InventoryType::Chest3Row,
            4 => InventoryType::Chest4Row,
            5 => InventoryType::Chest5Row,
            _ => InventoryType::Chest6Row,
        }
    }

    /// Number of slots.
    pub fn size(self) -> usize {
        self.rows() * self.columns()
    }

    /// Number of rows.
    pub fn rows(self) -> usize {
        match self {
            InventoryType::Chest1Row | InventoryType::Hopper => 1,
            InventoryType::Chest2Row => 2,
            InventoryType::Chest3Row | InventoryType::Dispenser | InventoryType::ShulkerBox => 3,
            InventoryType::Chest4Row => 4,
            InventoryType::Chest5Row => 5,
            InventoryType::Chest6Row => 6,
        }
    }

    /// Number of columns.
    pub fn columns(self) -> usize {
        match self {
            InventoryType::Hopper => 5,
            InventoryType::Dispenser => 3,
            _ => CHEST_ROW_WIDTH,
        }
    }
}
