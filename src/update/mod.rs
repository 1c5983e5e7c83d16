//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

pub mod gesture;
pub mod lifecycle;
pub mod transition;

use crate::commands::Cmd;
use crate::messages::RevealMsg;
use crate::model::{RevealModel, Side};

#[cfg(debug_assertions)]
use crate::tracing::TransitionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use gesture::update_pan;
pub use transition::{pump, tick};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut RevealModel, msg: RevealMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut RevealModel, msg: RevealMsg) -> Option<Cmd> {
    match msg {
        RevealMsg::SetFrontViewPosition {
            position,
            animated,
            duration,
        } => transition::request_position(model, position, animated, duration),
        RevealMsg::RevealToggle { animated } => transition::reveal_toggle(model, animated),
        RevealMsg::RightRevealToggle { animated } => {
            transition::right_reveal_toggle(model, animated)
        }
        RevealMsg::SetFrontViewController {
            controller,
            animated,
        } => transition::set_front_view_controller(model, controller, animated),
        RevealMsg::SetRearViewController(controller) => {
            lifecycle::set_side_controller(model, Side::Rear, controller);
            Some(Cmd::Redraw)
        }
        RevealMsg::SetRightViewController(controller) => {
            lifecycle::set_side_controller(model, Side::Right, controller);
            Some(Cmd::Redraw)
        }
        RevealMsg::Pan(sample) => gesture::update_pan(model, sample),
        RevealMsg::Tick(dt) => transition::tick(model, dt),
        RevealMsg::Resize(size) => {
            model.bounds = size;
            // Only an idle front view is re-snapped; a drag or animation
            // writes the offset again on its next step. An animation keeps
            // its progress but lands on the resting offset for the new bounds
            if model.transition.is_idle() {
                let offset = model.offset_of(model.transition.current_position);
                lifecycle::set_offset(model, offset, false);
            } else {
                let target = model.transition.animation.as_ref().map(|a| a.target);
                if let Some(target) = target {
                    let to = model.offset_of(target);
                    if let Some(animation) = model.transition.animation.as_mut() {
                        animation.to = to;
                    }
                }
                lifecycle::layout(model);
            }
            Some(Cmd::Redraw)
        }
        RevealMsg::DetachRemovedFront => transition::detach_removed_front(model),
    }
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut RevealModel, msg: RevealMsg) -> Option<Cmd> {
    // Skip logging for noisy periodic messages
    let is_noisy = matches!(&msg, RevealMsg::Tick(_));

    let msg_name = format!("{:?}", msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = TransitionSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = TransitionSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        if is_noisy {
            tracing::trace!(target: "transition", %diff, "state changed");
        } else {
            debug!(target: "transition", %diff, "state changed");
        }
    }

    model.assert_invariants(&msg_name);

    result
}
