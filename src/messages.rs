//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types, whether they come
//! from the host (ticks, resizes, pan samples), from the public API, or from
//! a delegate or child controller through a `RevealHandle`.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::gesture::PanSample;
use crate::model::geometry::Size;
use crate::model::position::FrontViewPosition;
use crate::panel::PanelController;

/// Reveal container messages
#[derive(Clone)]
pub enum RevealMsg {
    // === Position ===
    /// Move the front view. `duration` overrides the default when animated.
    SetFrontViewPosition {
        position: FrontViewPosition,
        animated: bool,
        duration: Option<Duration>,
    },
    /// Toggle between Left and Right
    RevealToggle { animated: bool },
    /// Toggle between Left and LeftSide
    RightRevealToggle { animated: bool },

    // === Slots ===
    /// Replace the front controller, optionally with the push-swap-slide chain
    SetFrontViewController {
        controller: Rc<dyn PanelController>,
        animated: bool,
    },
    SetRearViewController(Option<Rc<dyn PanelController>>),
    SetRightViewController(Option<Rc<dyn PanelController>>),

    // === Host ===
    /// One sample of the pan gesture
    Pan(PanSample),
    /// Frame tick carrying the time since the previous frame
    Tick(Duration),
    /// Container bounds changed
    Resize(Size),

    // === Internal ===
    /// Detach the front view once reaching a removed position has been
    /// reported to the delegate, then resume queued requests. Posted by the
    /// container itself.
    DetachRemovedFront,
}

impl fmt::Debug for RevealMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |c: &Option<Rc<dyn PanelController>>| c.as_ref().map(|c| c.name().to_string());
        match self {
            RevealMsg::SetFrontViewPosition {
                position,
                animated,
                duration,
            } => f
                .debug_struct("SetFrontViewPosition")
                .field("position", position)
                .field("animated", animated)
                .field("duration", duration)
                .finish(),
            RevealMsg::RevealToggle { animated } => f
                .debug_struct("RevealToggle")
                .field("animated", animated)
                .finish(),
            RevealMsg::RightRevealToggle { animated } => f
                .debug_struct("RightRevealToggle")
                .field("animated", animated)
                .finish(),
            RevealMsg::SetFrontViewController {
                controller,
                animated,
            } => f
                .debug_struct("SetFrontViewController")
                .field("controller", &controller.name())
                .field("animated", animated)
                .finish(),
            RevealMsg::SetRearViewController(c) => f
                .debug_tuple("SetRearViewController")
                .field(&name(c))
                .finish(),
            RevealMsg::SetRightViewController(c) => f
                .debug_tuple("SetRightViewController")
                .field(&name(c))
                .finish(),
            RevealMsg::Pan(sample) => f.debug_tuple("Pan").field(sample).finish(),
            RevealMsg::Tick(dt) => f.debug_tuple("Tick").field(dt).finish(),
            RevealMsg::Resize(size) => f.debug_tuple("Resize").field(size).finish(),
            RevealMsg::DetachRemovedFront => f.write_str("DetachRemovedFront"),
        }
    }
}
