//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use reveal::config::RevealConfig;
use reveal::containment::RevealHandle;
use reveal::delegate::{RevealDelegate, RevealEvent};
use reveal::gesture::PanSample;
use reveal::model::FrontViewPosition;
use reveal::panel::PanelController;
use reveal::RevealController;

/// One frame at 60 fps (rounded)
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames any test animation may take
pub const MAX_FRAMES: usize = 1_000;

/// One entry of a combined, ordered trace of delegate events and panel
/// callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Delegate(RevealEvent),
    WillAppear(String),
    DidAppear(String),
    WillDisappear(String),
    DidDisappear(String),
    Moved(String, bool),
}

/// Shared trace written by [`TracePanel`] and [`TraceDelegate`]
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Entry>>>);

impl Trace {
    pub fn push(&self, entry: Entry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Delegate events only
    pub fn delegate(&self) -> Vec<RevealEvent> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Entry::Delegate(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// will/did-move events only
    pub fn moves(&self) -> Vec<RevealEvent> {
        self.delegate()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    RevealEvent::WillMoveToPosition(_) | RevealEvent::DidMoveToPosition(_)
                )
            })
            .collect()
    }

    /// Appearance callbacks of one panel
    pub fn appearance_of(&self, panel: &str) -> Vec<Entry> {
        self.0
            .borrow()
            .iter()
            .filter(|e| match e {
                Entry::WillAppear(p)
                | Entry::DidAppear(p)
                | Entry::WillDisappear(p)
                | Entry::DidDisappear(p) => p == panel,
                _ => false,
            })
            .cloned()
            .collect()
    }

    pub fn index_of(&self, entry: &Entry) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }
}

/// Panel controller writing its callbacks into a [`Trace`]
pub struct TracePanel {
    name: String,
    trace: Trace,
    container: RefCell<Option<RevealHandle>>,
}

impl TracePanel {
    pub fn new(name: &str, trace: &Trace) -> Rc<dyn PanelController> {
        Rc::new(Self {
            name: name.to_string(),
            trace: trace.clone(),
            container: RefCell::new(None),
        })
    }
}

impl PanelController for TracePanel {
    fn name(&self) -> &str {
        &self.name
    }

    fn will_appear(&self, _animated: bool) {
        self.trace.push(Entry::WillAppear(self.name.clone()));
    }

    fn did_appear(&self, _animated: bool) {
        self.trace.push(Entry::DidAppear(self.name.clone()));
    }

    fn will_disappear(&self, _animated: bool) {
        self.trace.push(Entry::WillDisappear(self.name.clone()));
    }

    fn did_disappear(&self, _animated: bool) {
        self.trace.push(Entry::DidDisappear(self.name.clone()));
    }

    fn did_move_to_container(&self, container: Option<RevealHandle>) {
        self.trace
            .push(Entry::Moved(self.name.clone(), container.is_some()));
        *self.container.borrow_mut() = container;
    }

    fn containing_reveal(&self) -> Option<RevealHandle> {
        self.container.borrow().clone()
    }
}

/// Delegate writing every hook into a [`Trace`]
pub struct TraceDelegate {
    trace: Trace,
}

impl TraceDelegate {
    pub fn new(trace: &Trace) -> Box<dyn RevealDelegate> {
        Box::new(Self {
            trace: trace.clone(),
        })
    }

    fn push(&self, event: RevealEvent) {
        self.trace.push(Entry::Delegate(event));
    }
}

impl RevealDelegate for TraceDelegate {
    fn will_move_to_position(&mut self, _: &RevealHandle, position: FrontViewPosition) {
        self.push(RevealEvent::WillMoveToPosition(position));
    }
    fn animate_to_position(&mut self, _: &RevealHandle, position: FrontViewPosition) {
        self.push(RevealEvent::AnimateToPosition(position));
    }
    fn did_move_to_position(&mut self, _: &RevealHandle, position: FrontViewPosition) {
        self.push(RevealEvent::DidMoveToPosition(position));
    }
    fn pan_gesture_began(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::PanGestureBegan);
    }
    fn pan_gesture_ended(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::PanGestureEnded);
    }
    fn will_reveal_rear(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::WillRevealRear);
    }
    fn did_reveal_rear(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::DidRevealRear);
    }
    fn will_hide_rear(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::WillHideRear);
    }
    fn did_hide_rear(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::DidHideRear);
    }
    fn will_reveal_right(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::WillRevealRight);
    }
    fn did_reveal_right(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::DidRevealRight);
    }
    fn will_hide_right(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::WillHideRight);
    }
    fn did_hide_right(&mut self, _: &RevealHandle) {
        self.push(RevealEvent::DidHideRight);
    }
}

/// A container with traced rear and front panels (and a right panel when
/// `with_right`), setup callbacks already cleared from the trace
pub fn test_reveal_with(config: RevealConfig, with_right: bool) -> (RevealController, Trace) {
    let trace = Trace::default();
    let mut reveal = RevealController::with_config(
        config,
        Some(TracePanel::new("rear", &trace)),
        Some(TracePanel::new("front", &trace)),
    );
    if with_right {
        reveal.set_right_view_controller(Some(TracePanel::new("right", &trace)));
    }
    reveal.set_delegate(TraceDelegate::new(&trace));
    trace.take();
    (reveal, trace)
}

/// Default configuration, rear and front panels
pub fn test_reveal() -> (RevealController, Trace) {
    test_reveal_with(RevealConfig::default(), false)
}

/// Tick until idle, failing the test if that never happens
pub fn settle(reveal: &mut RevealController) -> usize {
    reveal
        .run_until_idle(FRAME, MAX_FRAMES)
        .expect("animation did not finish")
}

/// Feed pan samples through the gesture handle
pub fn pan(reveal: &mut RevealController, samples: &[PanSample]) {
    let gesture = reveal.pan_gesture_recognizer();
    for sample in samples {
        assert!(gesture.send(*sample));
        reveal.process();
    }
}

/// Drag by `dx` in one move and release with `vx`
pub fn drag(reveal: &mut RevealController, dx: f32, vx: f32) {
    pan(
        reveal,
        &[
            PanSample::began(),
            PanSample::changed(dx, vx),
            PanSample::ended(dx, vx),
        ],
    );
}

/// Assert appearance callbacks of `panel` strictly alternate
/// will-appear, did-appear, will-disappear, did-disappear, ...
/// and return the number of complete appear/disappear pairs
pub fn assert_alternating(trace: &Trace, panel: &str) -> (usize, usize) {
    let events = trace.appearance_of(panel);
    let mut appeared = 0;
    let mut disappeared = 0;
    for (i, chunk) in events.chunks(2).enumerate() {
        let expected_appear = i % 2 == 0;
        match chunk {
            [Entry::WillAppear(_), Entry::DidAppear(_)] if expected_appear => appeared += 1,
            [Entry::WillDisappear(_), Entry::DidDisappear(_)] if !expected_appear => {
                disappeared += 1
            }
            other => panic!("{}: out-of-order callbacks at pair {}: {:?}", panel, i, other),
        }
    }
    (appeared, disappeared)
}
