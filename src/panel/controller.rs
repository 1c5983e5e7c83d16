//! Child controller contract
//!
//! Child controllers are opaque content providers. The container only tells
//! them when their view appears or disappears and which container they live
//! in; everything else is theirs.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::containment::RevealHandle;

/// A controller that can sit in one of the container's slots.
///
/// All callbacks default to no-ops. `parent_controller` and
/// `containing_reveal` form the containment chain walked by
/// [`crate::containment::reveal_controller`].
pub trait PanelController {
    /// Name used in logs
    fn name(&self) -> &str;

    fn will_appear(&self, _animated: bool) {}
    fn did_appear(&self, _animated: bool) {}
    fn will_disappear(&self, _animated: bool) {}
    fn did_disappear(&self, _animated: bool) {}

    /// Called when the controller is installed in (`Some`) or removed from
    /// (`None`) a reveal container's slot
    fn did_move_to_container(&self, _container: Option<RevealHandle>) {}

    /// The controller this one is nested in, if any
    fn parent_controller(&self) -> Option<Rc<dyn PanelController>> {
        None
    }

    /// The reveal container this controller sits in directly, if any
    fn containing_reveal(&self) -> Option<RevealHandle> {
        None
    }
}

/// Appearance callback as seen by a child controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "panel", rename_all = "snake_case")]
pub enum AppearanceEvent {
    WillAppear(String),
    DidAppear(String),
    WillDisappear(String),
    DidDisappear(String),
    MovedToContainer(String),
    RemovedFromContainer(String),
}

impl AppearanceEvent {
    /// Name of the panel the event was delivered to
    pub fn panel(&self) -> &str {
        match self {
            AppearanceEvent::WillAppear(name)
            | AppearanceEvent::DidAppear(name)
            | AppearanceEvent::WillDisappear(name)
            | AppearanceEvent::DidDisappear(name)
            | AppearanceEvent::MovedToContainer(name)
            | AppearanceEvent::RemovedFromContainer(name) => name,
        }
    }
}

/// Shared, ordered record of appearance callbacks across several panels
#[derive(Debug, Clone, Default)]
pub struct LifecycleLog(Rc<RefCell<Vec<AppearanceEvent>>>);

impl LifecycleLog {
    pub fn push(&self, event: AppearanceEvent) {
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<AppearanceEvent> {
        self.0.borrow().clone()
    }

    /// Events delivered to one panel
    pub fn events_for(&self, panel: &str) -> Vec<AppearanceEvent> {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.panel() == panel)
            .cloned()
            .collect()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<AppearanceEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// A content-free controller that records its callbacks.
///
/// Used by the scenario runner and handy for host integration tests.
pub struct RecordingPanel {
    name: String,
    log: LifecycleLog,
    container: RefCell<Option<RevealHandle>>,
    parent: RefCell<Option<Weak<dyn PanelController>>>,
}

impl RecordingPanel {
    pub fn new(name: impl Into<String>, log: &LifecycleLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            container: RefCell::new(None),
            parent: RefCell::new(None),
        }
    }

    /// Nest this controller inside `parent` (non-owning)
    pub fn set_parent(&self, parent: &Rc<dyn PanelController>) {
        *self.parent.borrow_mut() = Some(Rc::downgrade(parent));
    }
}

impl fmt::Debug for RecordingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingPanel")
            .field("name", &self.name)
            .field("installed", &self.container.borrow().is_some())
            .finish()
    }
}

impl PanelController for RecordingPanel {
    fn name(&self) -> &str {
        &self.name
    }

    fn will_appear(&self, _animated: bool) {
        self.log.push(AppearanceEvent::WillAppear(self.name.clone()));
    }

    fn did_appear(&self, _animated: bool) {
        self.log.push(AppearanceEvent::DidAppear(self.name.clone()));
    }

    fn will_disappear(&self, _animated: bool) {
        self.log
            .push(AppearanceEvent::WillDisappear(self.name.clone()));
    }

    fn did_disappear(&self, _animated: bool) {
        self.log.push(AppearanceEvent::DidDisappear(self.name.clone()));
    }

    fn did_move_to_container(&self, container: Option<RevealHandle>) {
        let event = if container.is_some() {
            AppearanceEvent::MovedToContainer(self.name.clone())
        } else {
            AppearanceEvent::RemovedFromContainer(self.name.clone())
        };
        self.log.push(event);
        *self.container.borrow_mut() = container;
    }

    fn parent_controller(&self) -> Option<Rc<dyn PanelController>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn containing_reveal(&self) -> Option<RevealHandle> {
        self.container.borrow().clone()
    }
}
