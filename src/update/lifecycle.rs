//! Container lifecycle - placing and removing panel views
//!
//! Side panels are shown and hidden from the live offset every time it is
//! written. Each change runs the controller's will-callback, the hierarchy
//! mutation and the did-callback, wrapped by the delegate's reveal/hide events.

use std::rc::Rc;

use crate::delegate::RevealEvent;
use crate::model::{RevealModel, Side, REVEAL_THRESHOLD};
use crate::panel::{PanelController, PanelSlot, PlacedView, Shadow};

/// Write the front offset and bring placed panels and frames in line with it
pub fn set_offset(model: &mut RevealModel, offset: f32, animated: bool) {
    model.transition.current_offset = offset;
    sync_side_panels(model, animated);
    layout(model);
}

/// Tell every installed controller about the container and place the front
/// view. Called once by the container constructor.
pub fn install_initial(model: &mut RevealModel) {
    let handle = model.handle();
    for slot in PanelSlot::ALL {
        if let Some(controller) = model.slots.get(slot) {
            controller.did_move_to_container(Some(handle.clone()));
        }
    }

    if !model.transition.current_position.is_removed() {
        attach_front(model, false);
    }
    let offset = model.offset_of(model.transition.current_position);
    set_offset(model, offset, false);
}

fn should_reveal(model: &RevealModel, side: Side) -> bool {
    model.transition.current_offset * side.sign() > REVEAL_THRESHOLD
        && model.slots.is_filled(PanelSlot::for_side(side))
}

/// Reveal or hide side panels whose threshold state changed
pub fn sync_side_panels(model: &mut RevealModel, animated: bool) {
    // Hide first: a jump across Left never has both sides placed
    for side in [Side::Rear, Side::Right] {
        if !should_reveal(model, side) && model.hierarchy.contains(PanelSlot::for_side(side)) {
            hide_side(model, side, animated);
        }
    }
    for side in [Side::Rear, Side::Right] {
        if should_reveal(model, side) && !model.hierarchy.contains(PanelSlot::for_side(side)) {
            reveal_side(model, side, animated);
        }
    }
}

fn reveal_side(model: &mut RevealModel, side: Side, animated: bool) {
    let slot = PanelSlot::for_side(side);
    let Some(controller) = model.slots.get(slot).cloned() else {
        return;
    };
    tracing::debug!(
        target: "lifecycle",
        "revealing {} '{}'",
        slot.display_name(),
        controller.name()
    );
    model.notifier.emit(RevealEvent::will_reveal(side));
    place(model, slot, &controller, animated);
    model.notifier.emit(RevealEvent::did_reveal(side));
}

fn hide_side(model: &mut RevealModel, side: Side, animated: bool) {
    let slot = PanelSlot::for_side(side);
    tracing::debug!(target: "lifecycle", "hiding {}", slot.display_name());
    model.notifier.emit(RevealEvent::will_hide(side));
    match model.slots.get(slot).cloned() {
        Some(controller) => unplace(model, slot, &controller, animated),
        None => {
            model.hierarchy.remove(slot);
        }
    }
    model.notifier.emit(RevealEvent::did_hide(side));
}

/// Place the front view if a front controller is installed and not placed
pub fn attach_front(model: &mut RevealModel, animated: bool) {
    if model.front_attached() {
        return;
    }
    let Some(front) = model.slots.get(PanelSlot::Front).cloned() else {
        return;
    };
    tracing::debug!(target: "lifecycle", "attaching front '{}'", front.name());
    place(model, PanelSlot::Front, &front, animated);
}

/// Remove the front view from the hierarchy, keeping the controller installed
pub fn detach_front(model: &mut RevealModel, animated: bool) {
    if !model.front_attached() {
        return;
    }
    match model.slots.get(PanelSlot::Front).cloned() {
        Some(front) => {
            tracing::debug!(target: "lifecycle", "detaching front '{}'", front.name());
            unplace(model, PanelSlot::Front, &front, animated);
        }
        None => {
            model.hierarchy.remove(PanelSlot::Front);
        }
    }
}

/// Swap the front controller right away: the old view disappears, the new
/// one appears unless the current position keeps the front detached
pub fn swap_front(model: &mut RevealModel, controller: Rc<dyn PanelController>, animated: bool) {
    let old = model.slots.get(PanelSlot::Front).cloned();
    if old.as_ref().is_some_and(|old| Rc::ptr_eq(old, &controller)) {
        tracing::debug!("'{}' is already the front controller", controller.name());
        return;
    }

    if let Some(old) = &old {
        if model.front_attached() {
            unplace(model, PanelSlot::Front, old, animated);
        }
        old.did_move_to_container(None);
    }

    tracing::debug!(target: "lifecycle", "front controller is now '{}'", controller.name());
    model
        .slots
        .replace(PanelSlot::Front, Some(Rc::clone(&controller)));
    controller.did_move_to_container(Some(model.handle()));

    if !model.transition.current_position.is_removed() {
        attach_front(model, animated);
    }
    layout(model);
}

/// Install or clear the rear/right controller. A placed old panel disappears
/// and the new one takes its place; reveal/hide events fire only when the
/// side's revealed state actually changes.
pub fn set_side_controller(
    model: &mut RevealModel,
    side: Side,
    controller: Option<Rc<dyn PanelController>>,
) {
    let slot = PanelSlot::for_side(side);
    let old = model.slots.get(slot).cloned();
    let unchanged = match (&old, &controller) {
        (Some(old), Some(new)) => Rc::ptr_eq(old, new),
        (None, None) => true,
        _ => false,
    };
    if unchanged {
        return;
    }

    let placed = model.hierarchy.contains(slot);
    let keep_revealed = placed && controller.is_some();
    if placed {
        match &old {
            Some(old) if keep_revealed => unplace(model, slot, old, false),
            _ => hide_side(model, side, false),
        }
    }
    if let Some(old) = &old {
        old.did_move_to_container(None);
    }

    model.slots.replace(slot, controller.clone());
    if let Some(new) = &controller {
        tracing::debug!(
            target: "lifecycle",
            "{} controller is now '{}'",
            slot.display_name(),
            new.name()
        );
        new.did_move_to_container(Some(model.handle()));
        if keep_revealed {
            place(model, slot, new, false);
        }
    }

    sync_side_panels(model, false);
    layout(model);
}

/// Recompute every placed view's frame from the current offset
pub fn layout(model: &mut RevealModel) {
    for slot in model.hierarchy.slots() {
        let frame = frame_for(model, slot);
        model.hierarchy.set_frame(slot, frame);
    }
    let shadow = Shadow::from_config(&model.config);
    model.hierarchy.set_shadow(PanelSlot::Front, Some(shadow));
}

fn frame_for(model: &RevealModel, slot: PanelSlot) -> crate::model::Rect {
    let geometry = model.geometry();
    let offset = model.transition.current_offset;
    match slot {
        PanelSlot::Front => geometry.front_frame(offset),
        PanelSlot::Rear => geometry.rear_frame(offset),
        PanelSlot::Right => geometry.right_frame(offset),
    }
}

fn place(
    model: &mut RevealModel,
    slot: PanelSlot,
    controller: &Rc<dyn PanelController>,
    animated: bool,
) {
    controller.will_appear(animated);
    let shadow = (slot == PanelSlot::Front).then(|| Shadow::from_config(&model.config));
    model.hierarchy.insert(PlacedView {
        slot,
        controller: controller.name().to_string(),
        frame: frame_for(model, slot),
        shadow,
    });
    controller.did_appear(animated);
}

fn unplace(
    model: &mut RevealModel,
    slot: PanelSlot,
    controller: &Rc<dyn PanelController>,
    animated: bool,
) {
    controller.will_disappear(animated);
    model.hierarchy.remove(slot);
    controller.did_disappear(animated);
}
