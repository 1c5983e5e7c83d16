//! Pan gesture handling
//!
//! A drag owns the offset from `Began` until `Ended`/`Cancelled`. The settle
//! move it produces jumps the queue so it runs before anything requested
//! while the finger was down.

use super::{lifecycle, transition};
use crate::animation::AnimationCurve;
use crate::commands::Cmd;
use crate::delegate::RevealEvent;
use crate::gesture::{self, PanPhase, PanSample};
use crate::model::{DragSession, PendingTransition, RevealModel};

pub fn update_pan(model: &mut RevealModel, sample: PanSample) -> Option<Cmd> {
    match sample.phase {
        PanPhase::Began => began(model),
        PanPhase::Changed => changed(model, sample),
        PanPhase::Ended | PanPhase::Cancelled => ended(model, sample),
    }
}

fn began(model: &mut RevealModel) -> Option<Cmd> {
    if model.transition.is_dragging() {
        tracing::debug!(target: "gesture", "ignoring Began: already dragging");
        return None;
    }
    if !model.has_front() {
        tracing::debug!(target: "gesture", "ignoring Began: no front controller");
        return None;
    }

    transition::cancel_in_flight(model);
    lifecycle::attach_front(model, true);

    let session = DragSession {
        origin: model.transition.current_offset,
        initial_position: model.transition.current_position,
    };
    tracing::debug!(
        target: "gesture",
        "drag began at {:.1} ({})",
        session.origin,
        session.initial_position
    );
    model.transition.drag = Some(session);
    model.notifier.emit(RevealEvent::PanGestureBegan);
    Some(Cmd::Redraw)
}

/// Offset for the sample's translation under the active drag
fn tracked_offset(model: &RevealModel, session: DragSession, sample: &PanSample) -> f32 {
    let raw = session.origin + sample.translation.x;
    gesture::drag_offset(
        raw,
        &model.geometry(),
        session.initial_position,
        |side| model.side_enabled(side),
    )
}

fn changed(model: &mut RevealModel, sample: PanSample) -> Option<Cmd> {
    let Some(session) = model.transition.drag else {
        tracing::trace!(target: "gesture", "ignoring Changed: not dragging");
        return None;
    };
    let offset = tracked_offset(model, session, &sample);
    tracing::trace!(
        target: "gesture",
        "dx {:.1} → offset {:.1}",
        sample.translation.x,
        offset
    );
    lifecycle::set_offset(model, offset, true);
    Some(Cmd::Redraw)
}

fn ended(model: &mut RevealModel, sample: PanSample) -> Option<Cmd> {
    let Some(session) = model.transition.drag else {
        tracing::trace!(target: "gesture", "ignoring {:?}: not dragging", sample.phase);
        return None;
    };

    let offset = tracked_offset(model, session, &sample);
    lifecycle::set_offset(model, offset, true);
    model.transition.drag = None;

    let settle = gesture::settle_target(
        offset,
        sample.velocity.x,
        &model.geometry(),
        model.config.quick_flick_velocity,
        |side| model.side_enabled(side),
    );
    tracing::debug!(
        target: "gesture",
        "released at {:.1} with vx {:.1}: settling at {}{}",
        offset,
        sample.velocity.x,
        settle.position,
        if settle.flick { " (flick)" } else { "" }
    );
    model.notifier.emit(RevealEvent::PanGestureEnded);

    let duration = settle
        .duration
        .unwrap_or_else(|| model.config.toggle_duration());
    model
        .transition
        .pending
        .push_front(PendingTransition::Move {
            target: settle.position,
            duration: Some(duration),
            curve: AnimationCurve::EaseOut,
        });
    transition::pump(model).or(Some(Cmd::Redraw))
}
