//! Panel system - the three child slots of a reveal container
//!
//! ## Architecture
//!
//! - `PanelSlot`: Rear, Front, or Right
//! - `PanelController`: the contract child controllers implement (appearance
//!   callbacks and containment links), every method optional except `name`
//! - `SlotLayout`: which controller sits in which slot
//! - `ViewHierarchy`: which slot views are currently placed, with their frames,
//!   front on top
//!
//! ## Integration
//!
//! `update::lifecycle` decides when a slot's view is placed or removed and
//! drives the paired appearance callbacks around each hierarchy mutation.

mod controller;
mod hierarchy;
mod slot;

pub use controller::{AppearanceEvent, LifecycleLog, PanelController, RecordingPanel};
pub use hierarchy::{PlacedView, Shadow, ViewHierarchy};
pub use slot::{PanelSlot, SlotLayout};
