//! Container model - the complete state of a reveal container
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod geometry;
pub mod position;
pub mod transition;

use std::rc::Rc;

pub use geometry::{Geometry, Rect, Size};
pub use position::{FrontViewPosition, Side};
pub use transition::{DragSession, PendingTransition, TransitionState};

use crate::config::RevealConfig;
use crate::containment::{Mailbox, RevealHandle};
use crate::delegate::Notifier;
use crate::panel::{PanelController, PanelSlot, SlotLayout, ViewHierarchy};

/// Offset magnitude (points) past which a side panel counts as revealed
pub const REVEAL_THRESHOLD: f32 = 0.5;

/// Bounds used until the host reports real ones
pub const DEFAULT_BOUNDS: Size = Size::new(320.0, 480.0);

/// Complete container state
#[derive(Debug)]
pub struct RevealModel {
    /// Tunables, read live
    pub config: RevealConfig,
    /// Container size
    pub bounds: Size,
    /// Installed controllers
    pub slots: SlotLayout,
    /// Position state machine
    pub transition: TransitionState,
    /// Placed views, the visual state the lifecycle callbacks follow
    pub hierarchy: ViewHierarchy,
    /// Delegate and the events waiting for it
    pub notifier: Notifier,
    /// Messages sent through handles, waiting for the container
    pub mailbox: Mailbox,
}

impl RevealModel {
    /// A model with the given slots at `Left`. Nothing is placed yet; see
    /// `update::lifecycle::install_initial`.
    pub fn new(
        config: RevealConfig,
        rear: Option<Rc<dyn PanelController>>,
        front: Option<Rc<dyn PanelController>>,
    ) -> Self {
        Self {
            config,
            bounds: DEFAULT_BOUNDS,
            slots: SlotLayout::new(rear, front),
            transition: TransitionState::default(),
            hierarchy: ViewHierarchy::default(),
            notifier: Notifier::default(),
            mailbox: Mailbox::default(),
        }
    }

    pub fn geometry(&self) -> Geometry<'_> {
        Geometry::new(&self.config, self.bounds)
    }

    /// A fresh weak handle to this container
    pub fn handle(&self) -> RevealHandle {
        RevealHandle::new(&self.mailbox)
    }

    /// A side can be revealed when it has a panel and a non-zero reveal width
    pub fn side_enabled(&self, side: Side) -> bool {
        self.slots.is_filled(PanelSlot::for_side(side))
            && self.geometry().side(side).reveal_width > 0.0
    }

    pub fn has_front(&self) -> bool {
        self.slots.is_filled(PanelSlot::Front)
    }

    pub fn front_attached(&self) -> bool {
        self.hierarchy.contains(PanelSlot::Front)
    }

    /// Offset of `position` under the current configuration and bounds
    pub fn offset_of(&self, position: FrontViewPosition) -> f32 {
        self.geometry().front_offset(position)
    }

    /// Check internal consistency (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        debug_assert!(
            !(self.transition.is_dragging() && self.transition.is_animating()),
            "[{}] drag and animation both own the offset",
            context
        );
        debug_assert!(
            self.hierarchy
                .views()
                .last()
                .map_or(true, |top| top.slot == PanelSlot::Front || !self.front_attached()),
            "[{}] front view is not on top",
            context
        );
        for slot in self.hierarchy.slots() {
            debug_assert!(
                self.slots.is_filled(slot),
                "[{}] {} view placed without a controller",
                context,
                slot.display_name()
            );
        }
    }
}
