//! Slots and slot assignment
//!
//! The container keeps a reference to each child controller; it never owns
//! the controller's lifetime beyond that reference.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::controller::PanelController;
use crate::model::position::Side;

/// One of the three child positions of a reveal container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelSlot {
    Rear,
    Front,
    Right,
}

impl PanelSlot {
    /// All slots for iteration
    pub const ALL: [PanelSlot; 3] = [PanelSlot::Rear, PanelSlot::Front, PanelSlot::Right];

    /// The slot revealed on `side`
    pub fn for_side(side: Side) -> PanelSlot {
        match side {
            Side::Rear => PanelSlot::Rear,
            Side::Right => PanelSlot::Right,
        }
    }

    /// Get the display name for this slot
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelSlot::Rear => "rear",
            PanelSlot::Front => "front",
            PanelSlot::Right => "right",
        }
    }
}

/// Controller assignment for all three slots
#[derive(Default, Clone)]
pub struct SlotLayout {
    pub rear: Option<Rc<dyn PanelController>>,
    pub front: Option<Rc<dyn PanelController>>,
    pub right: Option<Rc<dyn PanelController>>,
}

impl SlotLayout {
    pub fn new(
        rear: Option<Rc<dyn PanelController>>,
        front: Option<Rc<dyn PanelController>>,
    ) -> Self {
        Self {
            rear,
            front,
            right: None,
        }
    }

    /// Get the controller in a slot
    pub fn get(&self, slot: PanelSlot) -> Option<&Rc<dyn PanelController>> {
        match slot {
            PanelSlot::Rear => self.rear.as_ref(),
            PanelSlot::Front => self.front.as_ref(),
            PanelSlot::Right => self.right.as_ref(),
        }
    }

    /// Replace the controller in a slot, returning the previous one
    pub fn replace(
        &mut self,
        slot: PanelSlot,
        controller: Option<Rc<dyn PanelController>>,
    ) -> Option<Rc<dyn PanelController>> {
        let target = match slot {
            PanelSlot::Rear => &mut self.rear,
            PanelSlot::Front => &mut self.front,
            PanelSlot::Right => &mut self.right,
        };
        std::mem::replace(target, controller)
    }

    /// Check if a slot has a controller
    pub fn is_filled(&self, slot: PanelSlot) -> bool {
        self.get(slot).is_some()
    }
}

impl fmt::Debug for SlotLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |c: &Option<Rc<dyn PanelController>>| c.as_ref().map(|c| c.name().to_string());
        f.debug_struct("SlotLayout")
            .field("rear", &name(&self.rear))
            .field("front", &name(&self.front))
            .field("right", &name(&self.right))
            .finish()
    }
}
