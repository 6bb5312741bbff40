//! Item stacks as shown in menu slots.

use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::text::Text;

/// Largest amount a displayed stack can show.
pub const MAX_DISPLAY_AMOUNT: u8 = 99;

/// Visual payload written into a menu slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack looks like.
    pub material: Material,
    /// Displayed count (1..=99).
    pub amount: u8,
    /// Custom display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<Text>,
    /// Lore lines under the name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<Text>,
    /// Damage value (durability bar).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
}

impl ItemStack {
    /// A single item of `material`.
    pub fn of(material: Material) -> Self {
        Self {
            material,
            amount: 1,
            custom_name: None,
            lore: Vec::new(),
            damage: None,
        }
    }

    /// The empty-slot sentinel.
    pub fn air() -> Self {
        Self::of(Material::air())
    }

    /// Whether this stack renders as an empty slot.
    pub fn is_air(&self) -> bool {
        self.material.is_air()
    }

    /// Replace the display name.
    pub fn with_name(mut self, name: Text) -> Self {
        self.custom_name = Some(name);
        self
    }

    /// Replace the lore.
    pub fn with_lore(mut self, lore: Vec<Text>) -> Self {
        self.lore = lore;
        self
    }

    /// Append lines to the existing lore.
    pub fn with_appended_lore(mut self, lore: impl IntoIterator<Item = Text>) -> Self {
        self.lore.extend(lore);
        self
    }

    /// Replace the amount, clamped to `1..=MAX_DISPLAY_AMOUNT`.
    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount.clamp(1, MAX_DISPLAY_AMOUNT);
        self
    }

    /// Replace the damage value.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Material {
        Material::parse("diamond").unwrap()
    }

    #[test]
    fn air_is_the_default() {
        assert!(ItemStack::default().is_air());
        assert!(!ItemStack::of(diamond()).is_air());
    }

    #[test]
    fn builder_sets_display_fields() {
        let stack = ItemStack::of(diamond())
            .with_name(Text::markup("<aqua>Gem"))
            .with_lore(vec![Text::markup("first")])
            .with_appended_lore([Text::markup("second")])
            .with_damage(3);

        assert_eq!(stack.custom_name.as_ref().map(Text::to_plain).as_deref(), Some("Gem"));
        assert_eq!(stack.lore.len(), 2);
        assert_eq!(stack.lore[1].to_plain(), "second");
        assert_eq!(stack.damage, Some(3));
    }

    #[test]
    fn amount_is_clamped() {
        assert_eq!(ItemStack::of(diamond()).with_amount(0).amount, 1);
        assert_eq!(ItemStack::of(diamond()).with_amount(64).amount, 64);
        assert_eq!(ItemStack::of(diamond()).with_amount(200).amount, 99);
    }

    #[test]
    fn serializes_compactly() {
        let json = serde_json::to_string(&ItemStack::of(diamond())).unwrap();
        assert_eq!(json, r#"{"material":"minecraft:diamond","amount":1}"#);
    }
}
