//! Transition engine - programmatic position changes
//!
//! Every request becomes a [`PendingTransition`] in a FIFO. The queue is
//! drained whenever nothing owns the offset: each entry either completes on
//! the spot (not animated) or starts an [`Animation`] that `Tick` messages
//! advance until it completes and the next entry runs.

use std::rc::Rc;
use std::time::Duration;

use super::lifecycle;
use crate::animation::{Animation, AnimationCurve};
use crate::commands::Cmd;
use crate::delegate::RevealEvent;
use crate::messages::RevealMsg;
use crate::model::{FrontViewPosition, PendingTransition, RevealModel};
use crate::panel::PanelController;

/// Queue a move to `target`. `duration` overrides the default duration of
/// animated moves.
pub fn request_position(
    model: &mut RevealModel,
    target: FrontViewPosition,
    animated: bool,
    duration: Option<Duration>,
) -> Option<Cmd> {
    let target = adjusted_target(model, target);
    let duration = animated.then(|| duration.unwrap_or_else(|| model.config.toggle_duration()));
    model.transition.pending.push_back(PendingTransition::Move {
        target,
        duration,
        curve: AnimationCurve::EaseInOut,
    });
    pump(model)
}

/// Left <-> Right, against where the queue will leave the front view
pub fn reveal_toggle(model: &mut RevealModel, animated: bool) -> Option<Cmd> {
    let target = if model.transition.projected_position() <= FrontViewPosition::Left {
        FrontViewPosition::Right
    } else {
        FrontViewPosition::Left
    };
    request_position(model, target, animated, None)
}

/// Left <-> LeftSide, against where the queue will leave the front view
pub fn right_reveal_toggle(model: &mut RevealModel, animated: bool) -> Option<Cmd> {
    let target = if model.transition.projected_position() >= FrontViewPosition::Left {
        FrontViewPosition::LeftSide
    } else {
        FrontViewPosition::Left
    };
    request_position(model, target, animated, None)
}

/// A side without a panel cannot be revealed; such targets become Left
fn adjusted_target(model: &RevealModel, target: FrontViewPosition) -> FrontViewPosition {
    match target.side() {
        Some(side) if !model.slots.is_filled(crate::panel::PanelSlot::for_side(side)) => {
            tracing::debug!(
                target: "transition",
                "no panel on the {:?} side, {} becomes left",
                side,
                target
            );
            FrontViewPosition::Left
        }
        _ => target,
    }
}

/// Replace the front controller. Cancels whatever is in flight first; the
/// animated form plays push-off, swap, slide-in as three queued steps.
pub fn set_front_view_controller(
    model: &mut RevealModel,
    controller: Rc<dyn PanelController>,
    animated: bool,
) -> Option<Cmd> {
    if !model.has_front() {
        // Deferred requests wait for exactly this; keep them
        lifecycle::swap_front(model, controller, false);
        return pump(model).or(Some(Cmd::Redraw));
    }

    cancel_in_flight(model);

    if !animated {
        lifecycle::swap_front(model, controller, false);
        let resting = model.offset_of(model.transition.current_position);
        if model.transition.current_offset != resting {
            lifecycle::set_offset(model, resting, false);
        }
        return Some(Cmd::Redraw);
    }

    let duration = Some(model.config.toggle_duration());
    let pending = &mut model.transition.pending;
    pending.push_back(PendingTransition::Move {
        target: FrontViewPosition::RightMostRemoved,
        duration,
        curve: AnimationCurve::EaseInOut,
    });
    pending.push_back(PendingTransition::ReplaceFront(controller));
    pending.push_back(PendingTransition::Move {
        target: FrontViewPosition::Left,
        duration,
        curve: AnimationCurve::EaseInOut,
    });
    pump(model)
}

/// Drop the animation and the queue, ending any drag, and resolve the
/// position from the frozen offset. A front swap still waiting in the queue
/// is applied on the spot.
pub fn cancel_in_flight(model: &mut RevealModel) {
    if model.transition.drag.take().is_some() {
        tracing::debug!(target: "transition", "drag interrupted");
        model.notifier.emit(RevealEvent::PanGestureEnded);
    }
    let swap = model
        .transition
        .pending
        .iter()
        .rev()
        .find_map(|pending| match pending {
            PendingTransition::ReplaceFront(controller) => Some(Rc::clone(controller)),
            PendingTransition::Move { .. } => None,
        });
    let dropped = model.transition.cancel_all();
    if dropped == 0 {
        return;
    }
    let offset = model.transition.current_offset;
    let nearest = model.geometry().nearest_position(offset);
    tracing::debug!(
        target: "transition",
        "cancelled {} request(s) at offset {:.1}, nearest position {}",
        dropped,
        offset,
        nearest
    );
    model.transition.current_position = nearest;

    if let Some(controller) = swap {
        lifecycle::swap_front(model, controller, false);
    }
    // Resting somewhere attached now, even if the cut was mid push-off
    lifecycle::attach_front(model, false);
}

/// Run queued requests until one of them starts an animation, a drag owns
/// the offset, or the queue is empty
pub fn pump(model: &mut RevealModel) -> Option<Cmd> {
    let mut changed = false;

    while model.transition.is_idle() {
        if !model.has_front() {
            if !model.transition.pending.is_empty() {
                tracing::debug!(
                    target: "transition",
                    "{} request(s) deferred until a front controller is set",
                    model.transition.pending.len()
                );
            }
            break;
        }
        let Some(next) = model.transition.pending.pop_front() else {
            break;
        };
        changed = true;
        match next {
            PendingTransition::Move {
                target,
                duration,
                curve,
            } => {
                start_segment(model, target, duration, curve);
                if target.is_removed() && !model.transition.is_animating() {
                    // The removal follow-up resumes the queue
                    break;
                }
            }
            PendingTransition::ReplaceFront(controller) => {
                lifecycle::swap_front(model, controller, true)
            }
        }
    }

    if model.transition.is_animating() {
        Some(Cmd::ScheduleFrame)
    } else if changed {
        Some(Cmd::Redraw)
    } else {
        None
    }
}

fn start_segment(
    model: &mut RevealModel,
    target: FrontViewPosition,
    duration: Option<Duration>,
    curve: AnimationCurve,
) {
    let from = model.transition.current_offset;
    let to = model.offset_of(target);
    let animated = duration.is_some_and(|d| !d.is_zero());
    tracing::debug!(
        target: "transition",
        "segment {} → {} ({:.1} → {:.1}, {:?})",
        model.transition.current_position,
        target,
        from,
        to,
        duration
    );

    model.notifier.emit(RevealEvent::WillMoveToPosition(target));
    if !target.is_removed() {
        lifecycle::attach_front(model, animated);
    }
    model.notifier.emit(RevealEvent::AnimateToPosition(target));

    match duration.filter(|d| !d.is_zero()) {
        Some(duration) => {
            model.transition.animation = Some(Animation::new(target, from, to, duration, curve));
        }
        None => {
            lifecycle::set_offset(model, to, false);
            complete_segment(model, target);
        }
    }
}

fn complete_segment(model: &mut RevealModel, target: FrontViewPosition) {
    model.transition.animation = None;
    model.transition.current_position = target;
    model.notifier.emit(RevealEvent::DidMoveToPosition(target));
    if target.is_removed() {
        // Runs right after the delegate has been told, ahead of anything the
        // delegate queues in response
        model
            .mailbox
            .borrow_mut()
            .push_front(RevealMsg::DetachRemovedFront);
    }
}

/// Follow-up to reaching a removed position: detach the front view if it
/// still rests there, then continue with the queue
pub fn detach_removed_front(model: &mut RevealModel) -> Option<Cmd> {
    let transition = &model.transition;
    let mut cmd = None;
    if transition.current_position.is_removed() && transition.is_idle() && model.front_attached()
    {
        lifecycle::detach_front(model, true);
        cmd = Some(Cmd::Redraw);
    }
    pump(model).or(cmd)
}

/// Advance the in-flight animation by one frame
pub fn tick(model: &mut RevealModel, dt: Duration) -> Option<Cmd> {
    let (offset, finished, target) = {
        let animation = model.transition.animation.as_mut()?;
        let offset = animation.advance(dt);
        (offset, animation.is_finished(), animation.target)
    };
    tracing::trace!(target: "transition", "tick {:?} offset {:.2}", dt, offset);
    lifecycle::set_offset(model, offset, true);

    if !finished {
        return Some(Cmd::ScheduleFrame);
    }
    complete_segment(model, target);
    if target.is_removed() {
        return Some(Cmd::Redraw);
    }
    pump(model).or(Some(Cmd::Redraw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::panel::{LifecycleLog, PanelSlot, RecordingPanel};

    fn panel(name: &str, log: &LifecycleLog) -> Rc<dyn PanelController> {
        Rc::new(RecordingPanel::new(name, log))
    }

    fn model(log: &LifecycleLog) -> RevealModel {
        let mut model = RevealModel::new(
            RevealConfig::default(),
            Some(panel("rear", log)),
            Some(panel("front", log)),
        );
        lifecycle::install_initial(&mut model);
        model
    }

    fn run_to_idle(model: &mut RevealModel) {
        for _ in 0..1000 {
            if tick(model, Duration::from_millis(16)).is_none() {
                return;
            }
        }
        panic!("animation never finished");
    }

    #[test]
    fn test_non_animated_move_completes_immediately() {
        let log = LifecycleLog::default();
        let mut model = model(&log);

        let cmd = request_position(&mut model, FrontViewPosition::Right, false, None);
        assert_eq!(cmd, Some(Cmd::Redraw));
        assert_eq!(model.transition.current_position, FrontViewPosition::Right);
        assert_eq!(model.transition.current_offset, 260.0);
        assert!(model.hierarchy.contains(PanelSlot::Rear));
    }

    #[test]
    fn test_animated_move_needs_ticks() {
        let log = LifecycleLog::default();
        let mut model = model(&log);

        let cmd = request_position(&mut model, FrontViewPosition::Right, true, None);
        assert_eq!(cmd, Some(Cmd::ScheduleFrame));
        assert_eq!(model.transition.current_position, FrontViewPosition::Left);

        assert_eq!(
            tick(&mut model, Duration::from_millis(100)),
            Some(Cmd::ScheduleFrame)
        );
        let halfway = model.transition.current_offset;
        assert!(halfway > 0.0 && halfway < 260.0);

        run_to_idle(&mut model);
        assert_eq!(model.transition.current_position, FrontViewPosition::Right);
        assert_eq!(model.transition.current_offset, 260.0);
    }

    #[test]
    fn test_requests_queue_behind_animation() {
        let log = LifecycleLog::default();
        let mut model = model(&log);

        reveal_toggle(&mut model, true);
        reveal_toggle(&mut model, true);
        assert_eq!(model.transition.pending.len(), 1);
        assert_eq!(model.transition.projected_position(), FrontViewPosition::Left);

        reveal_toggle(&mut model, true);
        assert_eq!(model.transition.projected_position(), FrontViewPosition::Right);
    }

    #[test]
    fn test_missing_panel_target_becomes_left() {
        let log = LifecycleLog::default();
        let mut model = model(&log);
        right_reveal_toggle(&mut model, false);
        assert_eq!(model.transition.current_position, FrontViewPosition::Left);
        assert!(!model.hierarchy.contains(PanelSlot::Right));
    }

    #[test]
    fn test_requests_wait_for_front() {
        let log = LifecycleLog::default();
        let mut model = RevealModel::new(RevealConfig::default(), Some(panel("rear", &log)), None);
        lifecycle::install_initial(&mut model);

        assert_eq!(
            request_position(&mut model, FrontViewPosition::Right, false, None),
            None
        );
        assert_eq!(model.transition.pending.len(), 1);

        set_front_view_controller(&mut model, panel("front", &log), false);
        assert!(model.transition.pending.is_empty());
        assert_eq!(model.transition.current_position, FrontViewPosition::Right);
        assert!(model.front_attached());
    }

    #[test]
    fn test_removed_target_detaches_after_completion() {
        let log = LifecycleLog::default();
        let mut model = model(&log);

        request_position(&mut model, FrontViewPosition::RightMostRemoved, true, None);
        tick(&mut model, Duration::from_millis(200));
        assert!(model.front_attached());

        run_to_idle(&mut model);
        assert_eq!(
            model.transition.current_position,
            FrontViewPosition::RightMostRemoved
        );
        // Still placed until the follow-up message runs
        assert!(model.front_attached());
        let follow_up = model.mailbox.borrow_mut().pop_front();
        assert!(matches!(follow_up, Some(RevealMsg::DetachRemovedFront)));

        assert_eq!(detach_removed_front(&mut model), Some(Cmd::Redraw));
        assert!(!model.front_attached());

        // Leaving the removed position re-attaches at segment start
        request_position(&mut model, FrontViewPosition::Left, true, None);
        assert!(model.front_attached());
    }

    #[test]
    fn test_stale_detach_is_ignored() {
        let log = LifecycleLog::default();
        let mut model = model(&log);
        request_position(&mut model, FrontViewPosition::RightMostRemoved, false, None);
        request_position(&mut model, FrontViewPosition::Left, false, None);
        assert_eq!(detach_removed_front(&mut model), None);
        assert!(model.front_attached());
    }

    #[test]
    fn test_cancel_in_flight_resolves_nearest_position() {
        let log = LifecycleLog::default();
        let mut model = model(&log);
        request_position(&mut model, FrontViewPosition::Right, true, None);
        request_position(&mut model, FrontViewPosition::Left, true, None);
        tick(&mut model, Duration::from_millis(240));

        cancel_in_flight(&mut model);
        assert!(model.transition.is_idle());
        assert!(model.transition.pending.is_empty());
        assert_eq!(model.transition.current_position, FrontViewPosition::Right);
    }
}
