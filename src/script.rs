use anyhow::{Context, Result};
use invmenu_core::{PlayerId, Tick};
use invmenu_gui::ClickType;
use invmenu_testkit::StaticOracle;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, VecDeque},
    fs,
    path::Path,
};

#[derive(Debug, Deserialize)]
struct SessionScriptFile {
    #[serde(default)]
    permissions: BTreeMap<u64, Vec<String>>,
    steps: Vec<SessionStepDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StepKind {
    Open,
    Click,
    Close,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionStepDef {
    tick: u64,
    player: u64,
    event: StepKind,
    menu: Option<String>,
    slot: Option<usize>,
    #[serde(default)]
    click: ClickType,
}

/// What a player does on a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Open menu `menu`.
    Open { menu: String },
    /// Click `slot` of whatever the player has open.
    Click { slot: usize, click: ClickType },
    /// Close the window; `menu` marks which one the engine believes is closing.
    Close { menu: Option<String> },
}

/// One scheduled player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStep {
    /// Tick the step fires on.
    pub tick: Tick,
    /// Acting player.
    pub player: PlayerId,
    /// What the player does.
    pub action: StepAction,
}

/// Deterministic player session script.
///
/// Scripts list `{tick, player, event}` steps, replayed in file order.
#[derive(Debug)]
pub struct SessionScript {
    permissions: BTreeMap<PlayerId, Vec<String>>,
    pending: VecDeque<SessionStep>,
}

impl SessionScript {
    /// Load a session script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Load a session script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: SessionScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("session script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for (index, step) in file.steps.into_iter().enumerate() {
            if let Some(prev) = last_tick {
                if step.tick < prev {
                    anyhow::bail!("session script steps must be sorted by tick");
                }
            }
            last_tick = Some(step.tick);

            let action = match step.event {
                StepKind::Open => match step.menu {
                    Some(menu) if !menu.trim().is_empty() => StepAction::Open { menu },
                    _ => anyhow::bail!("step {index}: open needs a menu"),
                },
                StepKind::Click => match step.slot {
                    Some(slot) => StepAction::Click {
                        slot,
                        click: step.click,
                    },
                    None => anyhow::bail!("step {index}: click needs a slot"),
                },
                StepKind::Close => StepAction::Close { menu: step.menu },
            };
            pending.push_back(SessionStep {
                tick: Tick(step.tick),
                player: PlayerId(step.player),
                action,
            });
        }

        let permissions = file
            .permissions
            .into_iter()
            .map(|(player, perms)| (PlayerId(player), perms))
            .collect();
        Ok(Self {
            permissions,
            pending,
        })
    }

    /// Permission table declared by the script.
    pub fn oracle(&self) -> StaticOracle {
        self.permissions
            .iter()
            .fold(StaticOracle::new(), |oracle, (player, perms)| {
                oracle.grant_all(*player, perms.iter().cloned())
            })
    }

    /// Tick of the next pending step.
    pub fn next_tick(&self) -> Option<Tick> {
        self.pending.front().map(|step| step.tick)
    }

    /// Drain and return all steps scheduled for ticks `<= tick`.
    pub fn drain_ready(&mut self, tick: Tick) -> Vec<SessionStep> {
        let mut ready = Vec::new();
        while self.pending.front().is_some_and(|step| step.tick <= tick) {
            if let Some(step) = self.pending.pop_front() {
                ready.push(step);
            }
        }
        ready
    }

    /// Whether every step has been drained.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
