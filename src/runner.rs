use anyhow::Result;
use invmenu_core::{PlayerId, Tick};
use invmenu_gui::{
    ClickEvent, CloseEvent, DispatchOutcome, InventoryApi, InventoryEvent, OpenEvent,
};
use invmenu_testkit::{EventRecord, JsonlSink, RecordingViewer};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::layout::Layout;
use crate::script::{SessionScript, SessionStep, StepAction};

/// Counters reported after a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps replayed.
    pub steps: usize,
    /// Clicks that reached an icon action.
    pub handled: usize,
    /// Clicks refused by the permission check.
    pub denied: usize,
    /// Clicks with no menu or no icon under them.
    pub passed_through: usize,
    /// Chat messages sent to players.
    pub messages: usize,
}

/// Replays a session script against a layout, one fake viewer per player.
pub struct SessionRunner {
    api: InventoryApi,
    layout: Layout,
    viewers: BTreeMap<PlayerId, RecordingViewer>,
    sink: Option<JsonlSink>,
    summary: RunSummary,
}

impl SessionRunner {
    /// Runner with the script's permission table and the layout's settings.
    pub fn new(layout: Layout, script: &SessionScript, sink: Option<JsonlSink>) -> Self {
        let api = InventoryApi::init_with_config(
            Some(Box::new(script.oracle())),
            layout.config().clone(),
        );
        Self {
            api,
            layout,
            viewers: BTreeMap::new(),
            sink,
            summary: RunSummary::default(),
        }
    }

    /// Run every step of `script` in tick order.
    pub fn run(&mut self, script: &mut SessionScript) -> Result<RunSummary> {
        while let Some(tick) = script.next_tick() {
            for step in script.drain_ready(tick) {
                self.apply(step)?;
            }
        }
        debug_assert!(script.is_finished());
        info!(steps = self.summary.steps, "session replay finished");
        Ok(self.summary.clone())
    }

    /// Menus being replayed.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Registry and dispatcher state.
    pub fn api(&self) -> &InventoryApi {
        &self.api
    }

    /// Viewer for `player`, if it took part.
    #[cfg(test)]
    pub fn viewer(&self, player: PlayerId) -> Option<&RecordingViewer> {
        self.viewers.get(&player)
    }

    fn apply(&mut self, step: SessionStep) -> Result<()> {
        self.summary.steps += 1;
        let SessionStep {
            tick,
            player,
            action,
        } = step;
        let mut viewer = self
            .viewers
            .entry(player)
            .or_insert_with(|| RecordingViewer::new(player.0))
            .clone();
        let messages_before = viewer.messages().len();
        let closes_before = viewer.closes();

        match action {
            StepAction::Open { menu } => {
                let Some(handle) = self.layout.menu(&menu).cloned() else {
                    anyhow::bail!("tick {}: unknown menu '{menu}'", tick.0);
                };
                match self.api.open(&handle, &mut viewer) {
                    Ok(()) => {
                        let outcome = self
                            .api
                            .handle(&mut InventoryEvent::Open(OpenEvent::new(player)), &mut viewer);
                        self.record(tick, player, "Open", &format!("{menu} {outcome:?}"))?;
                    }
                    Err(err) => {
                        warn!(%player, "open refused: {err}");
                        self.record(tick, player, "OpenFailed", &err.to_string())?;
                    }
                }
            }
            StepAction::Click { slot, click } => {
                let mut event =
                    InventoryEvent::Click(ClickEvent::new(player, slot).with_click_type(click));
                let outcome = self.api.handle(&mut event, &mut viewer);
                match outcome {
                    DispatchOutcome::Denied => self.summary.denied += 1,
                    DispatchOutcome::PassThrough => self.summary.passed_through += 1,
                    _ => self.summary.handled += 1,
                }
                debug!(%player, slot, ?outcome, "click replayed");
                self.record(tick, player, "Click", &format!("{slot} {outcome:?}"))?;

                // A close requested by an action comes back from the engine as a close event.
                if viewer.closes() > closes_before {
                    self.close(tick, player, None, &mut viewer)?;
                }
            }
            StepAction::Close { menu } => {
                self.close(tick, player, menu, &mut viewer)?;
            }
        }

        let messages = viewer.messages();
        for message in &messages[messages_before..] {
            self.summary.messages += 1;
            self.record(tick, player, "Message", message)?;
        }
        Ok(())
    }

    fn close(
        &mut self,
        tick: Tick,
        player: PlayerId,
        menu: Option<String>,
        viewer: &mut RecordingViewer,
    ) -> Result<()> {
        let close = match menu {
            Some(menu) => CloseEvent::for_menu(player, menu),
            None => CloseEvent::new(player),
        };
        let outcome = self.api.handle(&mut InventoryEvent::Close(close), viewer);
        self.record(tick, player, "Close", &format!("{outcome:?}"))
    }

    fn record(&mut self, tick: Tick, player: PlayerId, kind: &str, payload: &str) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&EventRecord {
                tick,
                player,
                kind,
                payload,
            })?;
        }
        Ok(())
    }
}
