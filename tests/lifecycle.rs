//! Container lifecycle tests
//!
//! Appearance callback ordering, side panel replacement and the frames a
//! host would render from.

mod common;

use common::{
    assert_alternating, drag, pan, settle, test_reveal, test_reveal_with, Entry, TracePanel,
};
use reveal::config::RevealConfig;
use reveal::delegate::RevealEvent;
use reveal::gesture::PanSample;
use reveal::model::{FrontViewPosition, Rect};
use reveal::panel::PanelSlot;

// ========================================================================
// Appearance ordering
// ========================================================================

#[test]
fn test_rear_callbacks_alternate_across_toggles() {
    let (mut reveal, trace) = test_reveal();
    for _ in 0..5 {
        reveal.reveal_toggle(true);
    }
    settle(&mut reveal);

    assert_eq!(reveal.front_view_position(), FrontViewPosition::Right);
    assert_eq!(assert_alternating(&trace, "rear"), (3, 2));
    // The front view never left
    assert!(trace.appearance_of("front").is_empty());
}

#[test]
fn test_threshold_crossings_during_drag() {
    let (mut reveal, trace) = test_reveal();
    pan(
        &mut reveal,
        &[
            PanSample::began(),
            PanSample::changed(100.0, 0.0),
            PanSample::changed(0.0, 0.0),
            PanSample::changed(100.0, 0.0),
            PanSample::changed(0.0, 0.0),
        ],
    );

    assert_eq!(assert_alternating(&trace, "rear"), (2, 2));
    let reveal_events: Vec<RevealEvent> = trace
        .delegate()
        .into_iter()
        .filter(|e| !matches!(e, RevealEvent::PanGestureBegan))
        .collect();
    assert_eq!(
        reveal_events,
        [
            RevealEvent::WillRevealRear,
            RevealEvent::DidRevealRear,
            RevealEvent::WillHideRear,
            RevealEvent::DidHideRear,
        ]
        .repeat(2)
    );
    assert!(!reveal.hierarchy().contains(PanelSlot::Rear));
}

#[test]
fn test_panel_callbacks_run_before_delegate_delivery() {
    let (mut reveal, trace) = test_reveal();
    reveal.reveal_toggle(false);

    // Panels are called while the offset changes; the delegate hears about
    // it once the update is done, in emission order
    assert_eq!(
        trace.entries(),
        vec![
            Entry::WillAppear("rear".to_string()),
            Entry::DidAppear("rear".to_string()),
            Entry::Delegate(RevealEvent::WillMoveToPosition(FrontViewPosition::Right)),
            Entry::Delegate(RevealEvent::AnimateToPosition(FrontViewPosition::Right)),
            Entry::Delegate(RevealEvent::WillRevealRear),
            Entry::Delegate(RevealEvent::DidRevealRear),
            Entry::Delegate(RevealEvent::DidMoveToPosition(FrontViewPosition::Right)),
        ]
    );
}

#[test]
fn test_jump_across_left_hides_before_revealing() {
    let (mut reveal, trace) = test_reveal_with(RevealConfig::default(), true);
    reveal.set_front_view_position(FrontViewPosition::Right, false);
    trace.take();

    reveal.set_front_view_position(FrontViewPosition::LeftSide, false);
    let hidden = trace
        .index_of(&Entry::DidDisappear("rear".to_string()))
        .unwrap();
    let shown = trace
        .index_of(&Entry::WillAppear("right".to_string()))
        .unwrap();
    assert!(hidden < shown);
    assert_eq!(
        reveal.hierarchy().slots(),
        vec![PanelSlot::Right, PanelSlot::Front]
    );
}

// ========================================================================
// Side panel setters
// ========================================================================

#[test]
fn test_replacing_hidden_rear_only_moves_controllers() {
    let (mut reveal, trace) = test_reveal();
    reveal.set_rear_view_controller(Some(TracePanel::new("menu", &trace)));

    assert_eq!(
        trace.entries(),
        vec![
            Entry::Moved("rear".to_string(), false),
            Entry::Moved("menu".to_string(), true),
        ]
    );
    assert_eq!(
        reveal.rear_view_controller().map(|c| c.name().to_string()),
        Some("menu".to_string())
    );

    reveal.reveal_toggle(false);
    assert_eq!(
        reveal.hierarchy().get(PanelSlot::Rear).map(|v| v.controller.as_str()),
        Some("menu")
    );
}

#[test]
fn test_replacing_revealed_rear_swaps_views() {
    let (mut reveal, trace) = test_reveal();
    reveal.reveal_toggle(false);
    trace.take();

    reveal.set_rear_view_controller(Some(TracePanel::new("menu", &trace)));
    assert_eq!(
        trace.appearance_of("rear"),
        vec![
            Entry::WillDisappear("rear".to_string()),
            Entry::DidDisappear("rear".to_string()),
        ]
    );
    assert_eq!(
        trace.appearance_of("menu"),
        vec![
            Entry::WillAppear("menu".to_string()),
            Entry::DidAppear("menu".to_string()),
        ]
    );
    // Still revealed, so the delegate hears nothing
    assert!(trace.delegate().is_empty());
    assert_eq!(
        reveal.hierarchy().slots(),
        vec![PanelSlot::Rear, PanelSlot::Front]
    );
}

#[test]
fn test_clearing_revealed_right_hides_it() {
    let (mut reveal, trace) = test_reveal_with(RevealConfig::default(), true);
    reveal.right_reveal_toggle(false);
    assert!(reveal.hierarchy().contains(PanelSlot::Right));
    trace.take();

    reveal.set_right_view_controller(None);
    assert_eq!(
        trace.delegate(),
        vec![RevealEvent::WillHideRight, RevealEvent::DidHideRight]
    );
    assert!(!reveal.hierarchy().contains(PanelSlot::Right));
    assert!(reveal.right_view_controller().is_none());
    // The front view stays where it was
    assert_eq!(reveal.front_view_position(), FrontViewPosition::LeftSide);
}

#[test]
fn test_right_panel_installed_later_can_be_revealed() {
    let (mut reveal, trace) = test_reveal();
    reveal.right_reveal_toggle(false);
    assert_eq!(reveal.front_view_position(), FrontViewPosition::Left);

    reveal.set_right_view_controller(Some(TracePanel::new("right", &trace)));
    reveal.right_reveal_toggle(true);
    settle(&mut reveal);
    assert_eq!(reveal.front_view_position(), FrontViewPosition::LeftSide);
    assert_eq!(reveal.front_offset(), -260.0);
    assert_eq!(assert_alternating(&trace, "right"), (1, 0));
}

// ========================================================================
// Frames
// ========================================================================

#[test]
fn test_frames_and_shadow_at_rest() {
    let (mut reveal, _trace) = test_reveal();
    reveal.reveal_toggle(false);

    let hierarchy = reveal.hierarchy();
    assert_eq!(
        hierarchy.frame(PanelSlot::Front),
        Some(Rect::new(260.0, 0.0, 320.0, 480.0))
    );
    assert_eq!(
        hierarchy.frame(PanelSlot::Rear),
        Some(Rect::new(0.0, 0.0, 320.0, 480.0))
    );
    let shadow = hierarchy.get(PanelSlot::Front).and_then(|v| v.shadow);
    assert_eq!(shadow.map(|s| s.radius), Some(2.5));
    assert_eq!(shadow.map(|s| s.offset), Some((0.0, 2.5)));
    assert_eq!(
        hierarchy.get(PanelSlot::Rear).and_then(|v| v.shadow),
        None
    );
}

#[test]
fn test_rear_parallax_follows_drag() {
    let (mut reveal, _trace) = test_reveal();
    pan(
        &mut reveal,
        &[PanSample::began(), PanSample::changed(130.0, 0.0)],
    );
    // Half the reveal width, half the displacement
    assert_eq!(
        reveal.hierarchy().frame(PanelSlot::Rear).map(|f| f.x),
        Some(-20.0)
    );

    pan(&mut reveal, &[PanSample::ended(130.0, 0.0)]);
    settle(&mut reveal);
    drag(&mut reveal, -30.0, 0.0);
    settle(&mut reveal);
    assert_eq!(
        reveal.hierarchy().frame(PanelSlot::Front).map(|f| f.x),
        Some(reveal.front_offset())
    );
}
