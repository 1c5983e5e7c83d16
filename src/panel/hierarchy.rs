//! Placed views
//!
//! A headless stand-in for the container's view hierarchy: which slots have a
//! view placed, in which z-order, with which frame. A host renders from this.

use serde::Serialize;

use super::slot::PanelSlot;
use crate::config::RevealConfig;
use crate::model::geometry::Rect;

/// Front view drop shadow
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    pub radius: f32,
    pub offset: (f32, f32),
    pub opacity: f32,
}

impl Shadow {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            radius: config.front_view_shadow_radius,
            offset: config.front_view_shadow_offset,
            opacity: config.front_view_shadow_opacity,
        }
    }
}

/// A slot's view as placed in the container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedView {
    pub slot: PanelSlot,
    /// Name of the controller that owns the view
    pub controller: String,
    pub frame: Rect,
    pub shadow: Option<Shadow>,
}

/// Placed views, bottom-most first
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewHierarchy {
    views: Vec<PlacedView>,
}

impl ViewHierarchy {
    /// Place a slot's view. Rear and right go underneath; front stays on top.
    /// Placing an already placed slot only updates it.
    pub fn insert(&mut self, view: PlacedView) {
        if let Some(existing) = self.views.iter_mut().find(|v| v.slot == view.slot) {
            *existing = view;
            return;
        }
        match view.slot {
            PanelSlot::Front => self.views.push(view),
            PanelSlot::Rear | PanelSlot::Right => self.views.insert(0, view),
        }
    }

    /// Remove a slot's view, returning it if it was placed
    pub fn remove(&mut self, slot: PanelSlot) -> Option<PlacedView> {
        let index = self.views.iter().position(|v| v.slot == slot)?;
        Some(self.views.remove(index))
    }

    pub fn contains(&self, slot: PanelSlot) -> bool {
        self.views.iter().any(|v| v.slot == slot)
    }

    pub fn get(&self, slot: PanelSlot) -> Option<&PlacedView> {
        self.views.iter().find(|v| v.slot == slot)
    }

    pub fn frame(&self, slot: PanelSlot) -> Option<Rect> {
        self.get(slot).map(|v| v.frame)
    }

    pub fn set_frame(&mut self, slot: PanelSlot, frame: Rect) {
        if let Some(view) = self.views.iter_mut().find(|v| v.slot == slot) {
            view.frame = frame;
        }
    }

    pub fn set_shadow(&mut self, slot: PanelSlot, shadow: Option<Shadow>) {
        if let Some(view) = self.views.iter_mut().find(|v| v.slot == slot) {
            view.shadow = shadow;
        }
    }

    /// Slots in z-order, bottom-most first
    pub fn slots(&self) -> Vec<PanelSlot> {
        self.views.iter().map(|v| v.slot).collect()
    }

    pub fn views(&self) -> &[PlacedView] {
        &self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(slot: PanelSlot) -> PlacedView {
        PlacedView {
            slot,
            controller: slot.display_name().to_string(),
            frame: Rect::default(),
            shadow: None,
        }
    }

    #[test]
    fn test_front_stays_on_top() {
        let mut hierarchy = ViewHierarchy::default();
        hierarchy.insert(view(PanelSlot::Front));
        hierarchy.insert(view(PanelSlot::Rear));
        assert_eq!(hierarchy.slots(), vec![PanelSlot::Rear, PanelSlot::Front]);

        hierarchy.insert(view(PanelSlot::Right));
        assert_eq!(hierarchy.slots().last(), Some(&PanelSlot::Front));
    }

    #[test]
    fn test_insert_twice_updates_in_place() {
        let mut hierarchy = ViewHierarchy::default();
        hierarchy.insert(view(PanelSlot::Front));
        let mut moved = view(PanelSlot::Front);
        moved.frame.x = 42.0;
        hierarchy.insert(moved);
        assert_eq!(hierarchy.views().len(), 1);
        assert_eq!(hierarchy.frame(PanelSlot::Front).map(|f| f.x), Some(42.0));
    }

    #[test]
    fn test_remove() {
        let mut hierarchy = ViewHierarchy::default();
        hierarchy.insert(view(PanelSlot::Rear));
        assert!(hierarchy.remove(PanelSlot::Rear).is_some());
        assert!(hierarchy.remove(PanelSlot::Rear).is_none());
        assert!(!hierarchy.contains(PanelSlot::Rear));
    }
}
