//! Transition state - current position, live offset, drag and animation
//!
//! Exactly one writer owns `current_offset` at a time: the active drag, the
//! in-flight animation, or nobody (idle).

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::position::FrontViewPosition;
use crate::animation::{Animation, AnimationCurve};
use crate::panel::PanelController;

/// A request waiting for the engine
#[derive(Clone)]
pub enum PendingTransition {
    /// Move the front view; `duration == None` means "not animated"
    Move {
        target: FrontViewPosition,
        duration: Option<Duration>,
        curve: AnimationCurve,
    },
    /// Swap the front controller (middle step of the animated replacement)
    ReplaceFront(Rc<dyn PanelController>),
}

impl PendingTransition {
    /// Target position this request leaves the front view at, if it moves it
    pub fn target(&self) -> Option<FrontViewPosition> {
        match self {
            PendingTransition::Move { target, .. } => Some(*target),
            PendingTransition::ReplaceFront(_) => None,
        }
    }
}

impl fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingTransition::Move {
                target,
                duration,
                curve,
            } => f
                .debug_struct("Move")
                .field("target", target)
                .field("duration", duration)
                .field("curve", curve)
                .finish(),
            PendingTransition::ReplaceFront(controller) => f
                .debug_tuple("ReplaceFront")
                .field(&controller.name())
                .finish(),
        }
    }
}

/// An active pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Offset when the pan began
    pub origin: f32,
    /// Position when the pan began
    pub initial_position: FrontViewPosition,
}

/// Position state machine
#[derive(Debug, Default)]
pub struct TransitionState {
    pub current_position: FrontViewPosition,
    pub current_offset: f32,
    pub drag: Option<DragSession>,
    pub animation: Option<Animation>,
    pub pending: VecDeque<PendingTransition>,
}

impl TransitionState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Neither dragging nor animating
    pub fn is_idle(&self) -> bool {
        !self.is_dragging() && !self.is_animating()
    }

    /// Position the front view ends at once every queued request has run
    pub fn projected_position(&self) -> FrontViewPosition {
        self.pending
            .iter()
            .rev()
            .find_map(PendingTransition::target)
            .or_else(|| self.animation.as_ref().map(|a| a.target))
            .unwrap_or(self.current_position)
    }

    /// Drop the in-flight animation and everything queued, freezing the offset
    /// at its live interpolated value. Returns how many requests were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let mut dropped = self.pending.len();
        self.pending.clear();
        if let Some(animation) = self.animation.take() {
            self.current_offset = animation.value();
            dropped += 1;
        }
        dropped
    }
}
