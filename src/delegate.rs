//! Delegate notifications
//!
//! State changes record [`RevealEvent`]s into an outbox while an update runs.
//! Once the update has finished mutating state, the outbox is delivered to the
//! delegate in order. A delegate that wants to react (say, toggle again) gets a
//! [`RevealHandle`]; whatever it sends is queued behind the current message.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use crate::containment::RevealHandle;
use crate::model::position::{FrontViewPosition, Side};

/// One delegate notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "position", rename_all = "snake_case")]
pub enum RevealEvent {
    WillMoveToPosition(FrontViewPosition),
    AnimateToPosition(FrontViewPosition),
    DidMoveToPosition(FrontViewPosition),
    PanGestureBegan,
    PanGestureEnded,
    WillRevealRear,
    DidRevealRear,
    WillHideRear,
    DidHideRear,
    WillRevealRight,
    DidRevealRight,
    WillHideRight,
    DidHideRight,
}

impl RevealEvent {
    pub fn will_reveal(side: Side) -> Self {
        match side {
            Side::Rear => RevealEvent::WillRevealRear,
            Side::Right => RevealEvent::WillRevealRight,
        }
    }

    pub fn did_reveal(side: Side) -> Self {
        match side {
            Side::Rear => RevealEvent::DidRevealRear,
            Side::Right => RevealEvent::DidRevealRight,
        }
    }

    pub fn will_hide(side: Side) -> Self {
        match side {
            Side::Rear => RevealEvent::WillHideRear,
            Side::Right => RevealEvent::WillHideRight,
        }
    }

    pub fn did_hide(side: Side) -> Self {
        match side {
            Side::Rear => RevealEvent::DidHideRear,
            Side::Right => RevealEvent::DidHideRight,
        }
    }

    /// Invoke the matching delegate hook
    pub fn dispatch(self, delegate: &mut dyn RevealDelegate, reveal: &RevealHandle) {
        match self {
            RevealEvent::WillMoveToPosition(p) => delegate.will_move_to_position(reveal, p),
            RevealEvent::AnimateToPosition(p) => delegate.animate_to_position(reveal, p),
            RevealEvent::DidMoveToPosition(p) => delegate.did_move_to_position(reveal, p),
            RevealEvent::PanGestureBegan => delegate.pan_gesture_began(reveal),
            RevealEvent::PanGestureEnded => delegate.pan_gesture_ended(reveal),
            RevealEvent::WillRevealRear => delegate.will_reveal_rear(reveal),
            RevealEvent::DidRevealRear => delegate.did_reveal_rear(reveal),
            RevealEvent::WillHideRear => delegate.will_hide_rear(reveal),
            RevealEvent::DidHideRear => delegate.did_hide_rear(reveal),
            RevealEvent::WillRevealRight => delegate.will_reveal_right(reveal),
            RevealEvent::DidRevealRight => delegate.did_reveal_right(reveal),
            RevealEvent::WillHideRight => delegate.will_hide_right(reveal),
            RevealEvent::DidHideRight => delegate.did_hide_right(reveal),
        }
    }
}

/// Observer of a reveal container. Every hook is optional.
pub trait RevealDelegate {
    fn will_move_to_position(&mut self, _reveal: &RevealHandle, _position: FrontViewPosition) {}
    /// Fired right before the offset starts moving towards `position`, so
    /// mirrored effects can start with identical timing
    fn animate_to_position(&mut self, _reveal: &RevealHandle, _position: FrontViewPosition) {}
    fn did_move_to_position(&mut self, _reveal: &RevealHandle, _position: FrontViewPosition) {}

    fn pan_gesture_began(&mut self, _reveal: &RevealHandle) {}
    fn pan_gesture_ended(&mut self, _reveal: &RevealHandle) {}

    fn will_reveal_rear(&mut self, _reveal: &RevealHandle) {}
    fn did_reveal_rear(&mut self, _reveal: &RevealHandle) {}
    fn will_hide_rear(&mut self, _reveal: &RevealHandle) {}
    fn did_hide_rear(&mut self, _reveal: &RevealHandle) {}

    fn will_reveal_right(&mut self, _reveal: &RevealHandle) {}
    fn did_reveal_right(&mut self, _reveal: &RevealHandle) {}
    fn will_hide_right(&mut self, _reveal: &RevealHandle) {}
    fn did_hide_right(&mut self, _reveal: &RevealHandle) {}
}

/// Holds the delegate and the not-yet-delivered events
#[derive(Default)]
pub struct Notifier {
    delegate: Option<Box<dyn RevealDelegate>>,
    outbox: VecDeque<RevealEvent>,
}

impl Notifier {
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn RevealDelegate>>) {
        self.delegate = delegate;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Record an event for the next delivery
    pub fn emit(&mut self, event: RevealEvent) {
        tracing::trace!("emit {:?}", event);
        self.outbox.push_back(event);
    }

    /// Events waiting for delivery
    pub fn pending(&self) -> impl Iterator<Item = &RevealEvent> {
        self.outbox.iter()
    }

    /// Deliver every recorded event in order, returning them
    pub fn deliver(&mut self, reveal: &RevealHandle) -> Vec<RevealEvent> {
        let events: Vec<RevealEvent> = self.outbox.drain(..).collect();
        if let Some(delegate) = self.delegate.as_deref_mut() {
            for event in &events {
                event.dispatch(delegate, reveal);
            }
        }
        events
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("has_delegate", &self.has_delegate())
            .field("outbox", &self.outbox)
            .finish()
    }
}

/// Shared, ordered record of delivered delegate events
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<RevealEvent>>>);

impl EventLog {
    pub fn events(&self) -> Vec<RevealEvent> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<RevealEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    fn push(&self, event: RevealEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// A delegate that records every hook it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    log: EventLog,
}

impl RecordingDelegate {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl RevealDelegate for RecordingDelegate {
    fn will_move_to_position(&mut self, _reveal: &RevealHandle, position: FrontViewPosition) {
        self.log.push(RevealEvent::WillMoveToPosition(position));
    }

    fn animate_to_position(&mut self, _reveal: &RevealHandle, position: FrontViewPosition) {
        self.log.push(RevealEvent::AnimateToPosition(position));
    }

    fn did_move_to_position(&mut self, _reveal: &RevealHandle, position: FrontViewPosition) {
        self.log.push(RevealEvent::DidMoveToPosition(position));
    }

    fn pan_gesture_began(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::PanGestureBegan);
    }

    fn pan_gesture_ended(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::PanGestureEnded);
    }

    fn will_reveal_rear(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::WillRevealRear);
    }

    fn did_reveal_rear(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::DidRevealRear);
    }

    fn will_hide_rear(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::WillHideRear);
    }

    fn did_hide_rear(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::DidHideRear);
    }

    fn will_reveal_right(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::WillRevealRight);
    }

    fn did_reveal_right(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::DidRevealRight);
    }

    fn will_hide_right(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::WillHideRight);
    }

    fn did_hide_right(&mut self, _reveal: &RevealHandle) {
        self.log.push(RevealEvent::DidHideRight);
    }
}
