//! Containment lookup and declarative wiring
//!
//! Child controllers never hold the container itself. They reach it through a
//! [`RevealHandle`], a weak reference to the container's mailbox: requests
//! sent through it are queued and processed by the container after whatever
//! it is currently doing, so they can never interleave with a transition.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::gesture::PanSample;
use crate::messages::RevealMsg;
use crate::model::position::FrontViewPosition;
use crate::panel::{PanelController, PanelSlot};

/// Queue of messages waiting for the container
pub type Mailbox = Rc<RefCell<VecDeque<RevealMsg>>>;

/// Upper bound on the containment walk, guards against parent cycles
const MAX_CONTAINMENT_DEPTH: usize = 64;

/// Weak, non-owning handle to a reveal container
#[derive(Clone)]
pub struct RevealHandle {
    mailbox: Weak<RefCell<VecDeque<RevealMsg>>>,
}

impl RevealHandle {
    pub fn new(mailbox: &Mailbox) -> Self {
        Self {
            mailbox: Rc::downgrade(mailbox),
        }
    }

    /// Whether the container still exists
    pub fn is_alive(&self) -> bool {
        self.mailbox.strong_count() > 0
    }

    /// Whether both handles point at the same container
    pub fn same_container(&self, other: &RevealHandle) -> bool {
        Weak::ptr_eq(&self.mailbox, &other.mailbox)
    }

    /// Queue a message. Returns `false` if the container is gone.
    pub fn send(&self, msg: RevealMsg) -> bool {
        match self.mailbox.upgrade() {
            Some(mailbox) => {
                mailbox.borrow_mut().push_back(msg);
                true
            }
            None => {
                tracing::debug!("Dropping {:?}: reveal container no longer exists", msg);
                false
            }
        }
    }

    pub fn reveal_toggle(&self, animated: bool) -> bool {
        self.send(RevealMsg::RevealToggle { animated })
    }

    pub fn right_reveal_toggle(&self, animated: bool) -> bool {
        self.send(RevealMsg::RightRevealToggle { animated })
    }

    pub fn set_front_view_position(&self, position: FrontViewPosition, animated: bool) -> bool {
        self.send(RevealMsg::SetFrontViewPosition {
            position,
            animated,
            duration: None,
        })
    }

    pub fn set_front_view_position_with_duration(
        &self,
        position: FrontViewPosition,
        duration: Duration,
    ) -> bool {
        self.send(RevealMsg::SetFrontViewPosition {
            position,
            animated: true,
            duration: Some(duration),
        })
    }

    pub fn set_front_view_controller(
        &self,
        controller: Rc<dyn PanelController>,
        animated: bool,
    ) -> bool {
        self.send(RevealMsg::SetFrontViewController {
            controller,
            animated,
        })
    }

    /// Install `controller` in `slot`
    pub fn install(&self, slot: PanelSlot, controller: Rc<dyn PanelController>) -> bool {
        match slot {
            PanelSlot::Front => self.set_front_view_controller(controller, false),
            PanelSlot::Rear => self.send(RevealMsg::SetRearViewController(Some(controller))),
            PanelSlot::Right => self.send(RevealMsg::SetRightViewController(Some(controller))),
        }
    }
}

impl fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Source of pan samples, attachable to any view that should drive dragging
#[derive(Debug, Clone)]
pub struct PanGestureHandle {
    reveal: RevealHandle,
}

impl PanGestureHandle {
    pub fn new(reveal: RevealHandle) -> Self {
        Self { reveal }
    }

    /// Forward one sample. Returns `false` if the container is gone.
    pub fn send(&self, sample: PanSample) -> bool {
        self.reveal.send(RevealMsg::Pan(sample))
    }
}

/// Find the reveal container `start` lives in by walking up its parent links.
pub fn reveal_controller(start: &dyn PanelController) -> Option<RevealHandle> {
    if let Some(handle) = start.containing_reveal().filter(RevealHandle::is_alive) {
        return Some(handle);
    }

    let mut current = start.parent_controller();
    for _ in 0..MAX_CONTAINMENT_DEPTH {
        let controller = current?;
        if let Some(handle) = controller.containing_reveal().filter(RevealHandle::is_alive) {
            return Some(handle);
        }
        current = controller.parent_controller();
    }

    tracing::warn!(
        "Gave up looking for a reveal container above '{}' after {} levels",
        start.name(),
        MAX_CONTAINMENT_DEPTH
    );
    None
}

/// Setup callback of a [`RevealSegue`]: (segue, source, destination)
pub type SegueBlock =
    Box<dyn Fn(&RevealSegue, &Rc<dyn PanelController>, &Rc<dyn PanelController>)>;

/// Identifier installing the destination as the rear controller
pub const SEGUE_REAR: &str = "sw_rear";
/// Identifier installing the destination as the front controller
pub const SEGUE_FRONT: &str = "sw_front";
/// Identifier installing the destination as the right controller
pub const SEGUE_RIGHT: &str = "sw_right";

/// A named transition that installs a destination controller into the
/// container found above a source controller.
///
/// Application wiring code creates and performs these; the container itself
/// never does.
pub struct RevealSegue {
    identifier: String,
    block: SegueBlock,
}

impl RevealSegue {
    pub fn new(identifier: impl Into<String>, block: SegueBlock) -> Self {
        Self {
            identifier: identifier.into(),
            block,
        }
    }

    /// Segue for the `sw_rear` / `sw_front` / `sw_right` identifiers, which
    /// install the destination in the matching slot. `None` for any other
    /// identifier.
    pub fn set_controller(identifier: &str) -> Option<Self> {
        let slot = Self::slot_for_identifier(identifier)?;
        let block: SegueBlock = Box::new(move |segue, source, destination| {
            let Some(reveal) = reveal_controller(&**source) else {
                tracing::warn!(
                    "Segue '{}': '{}' is not inside a reveal container",
                    segue.identifier(),
                    source.name()
                );
                return;
            };
            tracing::debug!(
                "Segue '{}' installing '{}' as {}",
                segue.identifier(),
                destination.name(),
                slot.display_name()
            );
            reveal.install(slot, Rc::clone(destination));
        });
        Some(Self::new(identifier, block))
    }

    /// Slot targeted by a built-in identifier
    pub fn slot_for_identifier(identifier: &str) -> Option<PanelSlot> {
        match identifier {
            SEGUE_REAR => Some(PanelSlot::Rear),
            SEGUE_FRONT => Some(PanelSlot::Front),
            SEGUE_RIGHT => Some(PanelSlot::Right),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Run the setup callback if `source` sits inside a reveal container.
    /// Returns whether the callback ran.
    pub fn perform(
        &self,
        source: &Rc<dyn PanelController>,
        destination: &Rc<dyn PanelController>,
    ) -> bool {
        if reveal_controller(&**source).is_none() {
            tracing::debug!(
                "Segue '{}' skipped: no reveal container above '{}'",
                self.identifier,
                source.name()
            );
            return false;
        }
        (self.block)(self, source, destination);
        true
    }
}

impl fmt::Debug for RevealSegue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealSegue")
            .field("identifier", &self.identifier)
            .finish()
    }
}
