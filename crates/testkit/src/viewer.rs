use std::cell::RefCell;
use std::rc::Rc;

use invmenu_core::{PlayerId, Text};
use invmenu_gui::{GuiError, Menu, Viewer};

/// Everything a [`RecordingViewer`] was asked to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewerLog {
    /// Ids of menus shown, in order.
    pub opened: Vec<String>,
    /// Number of close requests.
    pub closes: usize,
    /// Plain-text messages received.
    pub messages: Vec<String>,
}

/// Fake player that records what the library asked of it.
///
/// The log is shared, so a test can keep a copy of the handle while the viewer
/// itself is moved into a harness.
#[derive(Debug, Clone)]
pub struct RecordingViewer {
    id: PlayerId,
    refuse_open: Option<String>,
    log: Rc<RefCell<ViewerLog>>,
}

impl RecordingViewer {
    /// Viewer for player `id`.
    pub fn new(id: u64) -> Self {
        Self {
            id: PlayerId(id),
            refuse_open: None,
            log: Rc::default(),
        }
    }

    /// Make every `open_inventory` call fail with `reason`.
    pub fn refusing(mut self, reason: impl Into<String>) -> Self {
        self.refuse_open = Some(reason.into());
        self
    }

    /// Shared log handle.
    pub fn log(&self) -> Rc<RefCell<ViewerLog>> {
        Rc::clone(&self.log)
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.log.borrow().messages.clone()
    }

    /// Menu ids shown so far.
    pub fn opened(&self) -> Vec<String> {
        self.log.borrow().opened.clone()
    }

    /// Close requests so far.
    pub fn closes(&self) -> usize {
        self.log.borrow().closes
    }
}

impl Viewer for RecordingViewer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn open_inventory(&mut self, menu: &Menu) -> Result<(), GuiError> {
        if let Some(reason) = &self.refuse_open {
            return Err(GuiError::ViewerRejected {
                player: self.id,
                reason: reason.clone(),
            });
        }
        tracing::debug!(player = %self.id, menu = %menu.id(), "viewer shows menu");
        self.log.borrow_mut().opened.push(menu.id().to_string());
        Ok(())
    }

    fn close_inventory(&mut self) {
        self.log.borrow_mut().closes += 1;
    }

    fn send_message(&mut self, message: Text) {
        self.log.borrow_mut().messages.push(message.to_plain());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls() {
        let mut viewer = RecordingViewer::new(3);
        let menu = Menu::new("main", Text::empty(), 1);
        viewer.open_inventory(&menu).unwrap();
        viewer.send_message(Text::markup("<red>hi"));
        viewer.close_inventory();

        assert_eq!(viewer.id(), PlayerId(3));
        assert_eq!(viewer.opened(), vec!["main"]);
        assert_eq!(viewer.messages(), vec!["hi"]);
        assert_eq!(viewer.closes(), 1);
    }

    #[test]
    fn clones_share_one_log() {
        let viewer = RecordingViewer::new(5);
        let log = viewer.log();
        let mut moved = viewer.clone();
        moved.send_message(Text::legacy("&aSaved"));
        moved.close_inventory();

        assert_eq!(
            *log.borrow(),
            ViewerLog {
                opened: Vec::new(),
                closes: 1,
                messages: vec!["Saved".to_string()],
            }
        );
        assert_eq!(viewer.closes(), 1);
    }

    #[test]
    fn refusing_viewer_errors() {
        let mut viewer = RecordingViewer::new(3).refusing("offline");
        let menu = Menu::new("main", Text::empty(), 1);
        let err = viewer.open_inventory(&menu).unwrap_err();
        assert_eq!(err.to_string(), "could not open menu for player#3: offline");
        assert!(viewer.opened().is_empty());
    }
}
