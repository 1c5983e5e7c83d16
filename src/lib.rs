//! Reveal - an Elm-style front/rear/right reveal container core
//!
//! A headless container that slides a front panel to reveal a rear panel
//! (and optionally a right panel) beneath it. Gestures, programmatic moves and
//! controller swaps all flow through one `update` function as messages; the
//! host feeds frame ticks and renders the resulting `ViewHierarchy`.

pub mod animation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod containment;
pub mod controller;
pub mod delegate;
pub mod gesture;
pub mod messages;
pub mod model;
pub mod panel;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::RevealConfig;
pub use containment::{reveal_controller, PanGestureHandle, RevealHandle, RevealSegue};
pub use controller::RevealController;
pub use delegate::{RevealDelegate, RevealEvent};
pub use messages::RevealMsg;
pub use model::{FrontViewPosition, RevealModel};
pub use panel::PanelController;
