use std::collections::{BTreeSet, HashMap};

use invmenu_core::PlayerId;
use invmenu_gui::PermissionOracle;

/// Permission table fixed up front.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    grants: HashMap<PlayerId, BTreeSet<String>>,
}

impl StaticOracle {
    /// Table with no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to `player`.
    pub fn grant(mut self, player: PlayerId, permission: impl Into<String>) -> Self {
        self.grants
            .entry(player)
            .or_default()
            .insert(permission.into());
        self
    }

    /// Grant every permission in `permissions` to `player`.
    pub fn grant_all<I, S>(mut self, player: PlayerId, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants
            .entry(player)
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }
}

impl PermissionOracle for StaticOracle {
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.grants
            .get(&player)
            .is_some_and(|granted| granted.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_are_per_player() {
        let oracle = StaticOracle::new()
            .grant(PlayerId(1), "shop.buy")
            .grant_all(PlayerId(2), ["a", "b"]);

        assert!(oracle.has_permission(PlayerId(1), "shop.buy"));
        assert!(!oracle.has_permission(PlayerId(2), "shop.buy"));
        assert!(oracle.has_permission(PlayerId(2), "b"));
        assert!(!oracle.has_permission(PlayerId(3), "a"));
    }
}
