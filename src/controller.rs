//! The reveal container
//!
//! [`RevealController`] owns a [`RevealModel`] and is the only place messages
//! enter `update`. After each message it delivers the delegate events the
//! update recorded, then processes whatever those deliveries (or panel
//! callbacks) queued through a [`RevealHandle`], one message at a time.

use std::rc::Rc;
use std::time::Duration;

use crate::commands::Cmd;
use crate::config::RevealConfig;
use crate::containment::{PanGestureHandle, RevealHandle};
use crate::delegate::RevealDelegate;
use crate::messages::RevealMsg;
use crate::model::{FrontViewPosition, RevealModel, Size, TransitionState};
use crate::panel::{PanelController, PanelSlot, ViewHierarchy};
use crate::update::{lifecycle, update};

/// Cap on messages handled by one `process` call; a delegate that answers
/// every move with another instant move would otherwise never return
const MAX_MESSAGES_PER_PROCESS: usize = 10_000;

/// Merge two optional commands
fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
    match a {
        Some(a) => Some(a.and(b)),
        None => b,
    }
}

pub struct RevealController {
    model: RevealModel,
}

impl RevealController {
    /// A container with default configuration, resting at Left
    pub fn new(
        rear: Option<Rc<dyn PanelController>>,
        front: Option<Rc<dyn PanelController>>,
    ) -> Self {
        Self::with_config(RevealConfig::default(), rear, front)
    }

    pub fn with_config(
        config: RevealConfig,
        rear: Option<Rc<dyn PanelController>>,
        front: Option<Rc<dyn PanelController>>,
    ) -> Self {
        let mut model = RevealModel::new(config, rear, front);
        lifecycle::install_initial(&mut model);
        let mut controller = Self { model };
        controller.process();
        controller
    }

    /// Apply one message and everything it causes
    pub fn handle(&mut self, msg: RevealMsg) -> Option<Cmd> {
        let cmd = update(&mut self.model, msg);
        merge(cmd, self.process())
    }

    /// Deliver pending delegate events and handle queued messages until both
    /// are empty. Call this after sending through a handle from outside any
    /// delegate hook or panel callback (e.g. a [`PanGestureHandle`]).
    pub fn process(&mut self) -> Option<Cmd> {
        let handle = self.model.handle();
        let mut result = None;

        for _ in 0..MAX_MESSAGES_PER_PROCESS {
            self.model.notifier.deliver(&handle);
            let next = self.model.mailbox.borrow_mut().pop_front();
            let Some(msg) = next else {
                return result;
            };
            result = merge(result, update(&mut self.model, msg));
        }

        tracing::warn!(
            "Stopped after {} queued messages; {} left in the mailbox",
            MAX_MESSAGES_PER_PROCESS,
            self.model.mailbox.borrow().len()
        );
        self.model.notifier.deliver(&handle);
        result
    }

    /// Advance animations by one frame of `dt`
    pub fn tick(&mut self, dt: Duration) -> Option<Cmd> {
        self.handle(RevealMsg::Tick(dt))
    }

    /// Tick with `frame` until nothing is animating. Returns the number of
    /// frames, or `None` if still animating after `max_frames`.
    pub fn run_until_idle(&mut self, frame: Duration, max_frames: usize) -> Option<usize> {
        for frames in 0..=max_frames {
            if !self.model.transition.is_animating() {
                return Some(frames);
            }
            self.tick(frame);
        }
        (!self.model.transition.is_animating()).then_some(max_frames)
    }

    // === Position ===

    pub fn set_front_view_position(
        &mut self,
        position: FrontViewPosition,
        animated: bool,
    ) -> Option<Cmd> {
        self.handle(RevealMsg::SetFrontViewPosition {
            position,
            animated,
            duration: None,
        })
    }

    pub fn set_front_view_position_with_duration(
        &mut self,
        position: FrontViewPosition,
        duration: Duration,
    ) -> Option<Cmd> {
        self.handle(RevealMsg::SetFrontViewPosition {
            position,
            animated: true,
            duration: Some(duration),
        })
    }

    pub fn reveal_toggle(&mut self, animated: bool) -> Option<Cmd> {
        self.handle(RevealMsg::RevealToggle { animated })
    }

    pub fn right_reveal_toggle(&mut self, animated: bool) -> Option<Cmd> {
        self.handle(RevealMsg::RightRevealToggle { animated })
    }

    pub fn front_view_position(&self) -> FrontViewPosition {
        self.model.transition.current_position
    }

    pub fn front_offset(&self) -> f32 {
        self.model.transition.current_offset
    }

    // === Slots ===

    pub fn set_front_view_controller(
        &mut self,
        controller: Rc<dyn PanelController>,
        animated: bool,
    ) -> Option<Cmd> {
        self.handle(RevealMsg::SetFrontViewController {
            controller,
            animated,
        })
    }

    pub fn set_rear_view_controller(
        &mut self,
        controller: Option<Rc<dyn PanelController>>,
    ) -> Option<Cmd> {
        self.handle(RevealMsg::SetRearViewController(controller))
    }

    pub fn set_right_view_controller(
        &mut self,
        controller: Option<Rc<dyn PanelController>>,
    ) -> Option<Cmd> {
        self.handle(RevealMsg::SetRightViewController(controller))
    }

    pub fn front_view_controller(&self) -> Option<Rc<dyn PanelController>> {
        self.model.slots.get(PanelSlot::Front).cloned()
    }

    pub fn rear_view_controller(&self) -> Option<Rc<dyn PanelController>> {
        self.model.slots.get(PanelSlot::Rear).cloned()
    }

    pub fn right_view_controller(&self) -> Option<Rc<dyn PanelController>> {
        self.model.slots.get(PanelSlot::Right).cloned()
    }

    // === Host ===

    /// A gesture source to attach to any view that should drive dragging.
    /// Samples it sends are handled on the next `process`/`handle` call.
    pub fn pan_gesture_recognizer(&self) -> PanGestureHandle {
        PanGestureHandle::new(self.model.handle())
    }

    /// Weak handle for code that should talk to this container later
    pub fn reveal_handle(&self) -> RevealHandle {
        self.model.handle()
    }

    pub fn set_bounds(&mut self, size: Size) -> Option<Cmd> {
        self.handle(RevealMsg::Resize(size))
    }

    pub fn bounds(&self) -> Size {
        self.model.bounds
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn RevealDelegate>) {
        self.model.notifier.set_delegate(Some(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.model.notifier.set_delegate(None);
    }

    pub fn config(&self) -> &RevealConfig {
        &self.model.config
    }

    /// Live configuration; changes apply from the next transition
    pub fn config_mut(&mut self) -> &mut RevealConfig {
        &mut self.model.config
    }

    pub fn hierarchy(&self) -> &ViewHierarchy {
        &self.model.hierarchy
    }

    pub fn transition(&self) -> &TransitionState {
        &self.model.transition
    }

    pub fn model(&self) -> &RevealModel {
        &self.model
    }
}

impl std::fmt::Debug for RevealController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("position", &self.model.transition.current_position)
            .field("offset", &self.model.transition.current_offset)
            .field("slots", &self.model.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{LifecycleLog, RecordingPanel};

    fn panel(name: &str, log: &LifecycleLog) -> Rc<dyn PanelController> {
        Rc::new(RecordingPanel::new(name, log))
    }

    #[test]
    fn test_handle_messages_are_processed() {
        let log = LifecycleLog::default();
        let mut reveal = RevealController::new(Some(panel("rear", &log)), Some(panel("front", &log)));

        let handle = reveal.reveal_handle();
        handle.set_front_view_position(FrontViewPosition::Right, false);
        assert_eq!(reveal.front_view_position(), FrontViewPosition::Left);

        assert_eq!(reveal.process(), Some(Cmd::Redraw));
        assert_eq!(reveal.front_view_position(), FrontViewPosition::Right);
    }

    #[test]
    fn test_run_until_idle_counts_frames() {
        let log = LifecycleLog::default();
        let mut reveal = RevealController::new(Some(panel("rear", &log)), Some(panel("front", &log)));
        reveal.reveal_toggle(true);
        let frames = reveal.run_until_idle(Duration::from_millis(50), 100);
        assert_eq!(frames, Some(5));
        assert_eq!(reveal.front_offset(), 260.0);
    }
}
