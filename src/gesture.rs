//! Pan gesture translation
//!
//! Pure functions turning pan samples into front view offsets while dragging
//! and into a settle position on release. The stateful side (drag session,
//! notifications) lives in `update::gesture`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::animation_duration;
use crate::model::geometry::Geometry;
use crate::model::position::{FrontViewPosition, Side};

/// A 2D vector in points (translation) or points per second (velocity)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// A purely horizontal vector
    pub const fn horizontal(x: f32) -> Self {
        Self { x, y: 0.0 }
    }
}

/// Phase of a pan gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of a pan gesture. Translation is cumulative since `Began`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanSample {
    pub phase: PanPhase,
    #[serde(default)]
    pub translation: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
}

impl PanSample {
    pub fn began() -> Self {
        Self {
            phase: PanPhase::Began,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    pub fn changed(dx: f32, vx: f32) -> Self {
        Self {
            phase: PanPhase::Changed,
            translation: Vec2::horizontal(dx),
            velocity: Vec2::horizontal(vx),
        }
    }

    pub fn ended(dx: f32, vx: f32) -> Self {
        Self {
            phase: PanPhase::Ended,
            translation: Vec2::horizontal(dx),
            velocity: Vec2::horizontal(vx),
        }
    }

    pub fn cancelled(dx: f32, vx: f32) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            translation: Vec2::horizontal(dx),
            velocity: Vec2::horizontal(vx),
        }
    }
}

/// Diminishing-returns travel past the reveal width.
///
/// `overdraw * tanh(excess / (2 * overdraw))`: continuous with the linear
/// region, starts at half speed, never exceeds `overdraw`.
pub fn rubber_band(excess: f32, overdraw: f32) -> f32 {
    if overdraw <= 0.0 || excess <= 0.0 {
        return 0.0;
    }
    overdraw * (excess / (2.0 * overdraw)).tanh()
}

/// Offset of the front view for an unadjusted drag location `raw`
/// (drag origin + horizontal translation).
///
/// `enabled` says whether a side can be revealed at all; disabled sides pin
/// the offset at 0. Dragging is linear up to width + overdraw when the side
/// has stable drag enabled or the drag started at that side's "most"
/// position; otherwise it is linear up to the width and rubber-banded beyond.
pub fn drag_offset(
    raw: f32,
    geometry: &Geometry<'_>,
    initial_position: FrontViewPosition,
    enabled: impl Fn(Side) -> bool,
) -> f32 {
    let Some(side) = Side::of_offset(raw) else {
        return 0.0;
    };
    if !enabled(side) {
        return 0.0;
    }

    let config = geometry.side(side);
    let x = raw * side.sign();
    let started_at_most =
        initial_position.without_removal() == FrontViewPosition::RightMost.on_side(side);
    let stable = config.stable_drag || started_at_most;

    let adjusted = if stable {
        x.min(config.reveal_width + config.overdraw)
    } else if x <= config.reveal_width {
        x
    } else {
        config.reveal_width + rubber_band(x - config.reveal_width, config.overdraw)
    };

    adjusted * side.sign()
}

/// Where a released drag settles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    pub position: FrontViewPosition,
    /// Explicit duration for flicks (distance left / release speed); `None`
    /// means the default toggle duration
    pub duration: Option<Duration>,
    /// Whether the release counted as a quick flick
    pub flick: bool,
}

/// Decide the settle position for a release at `offset` with horizontal
/// velocity `vx`.
///
/// Tie-break order:
/// 1. `vx != 0` and `|vx| >= quick_flick_velocity`: settle in the direction of `vx`
/// 2. past the reveal width: bounce back to Left if enabled, else stay at the
///    primary or "most" position
/// 3. otherwise the nearer of Left and the primary position
pub fn settle_target(
    offset: f32,
    vx: f32,
    geometry: &Geometry<'_>,
    quick_flick_velocity: f32,
    enabled: impl Fn(Side) -> bool,
) -> Settle {
    let side = Side::of_offset(offset)
        .or_else(|| Side::of_offset(vx))
        .unwrap_or(Side::Rear);
    let config = geometry.side(side);
    let width = config.reveal_width;
    let overdraw = config.overdraw;

    // Work in rear-side terms, mirror back at the end
    let x = offset * side.sign();
    let outward = vx * side.sign() > 0.0;

    let mut position = FrontViewPosition::Left;
    let mut duration = None;
    // A release at rest is never a flick, whatever the threshold
    let flick = vx != 0.0 && vx.abs() >= quick_flick_velocity;

    if flick {
        let journey = if outward {
            position = FrontViewPosition::Right;
            if x > width && !config.bounce_back && config.stable_drag {
                position = FrontViewPosition::RightMost;
                width + overdraw - x
            } else {
                width - x
            }
        } else {
            x
        };
        duration = Some(animation_duration(f64::from((journey / vx).abs())));
    } else if x > width {
        if config.bounce_back {
            position = FrontViewPosition::Left;
        } else if config.stable_drag && x > width + overdraw * 0.5 {
            position = FrontViewPosition::RightMost;
        } else {
            position = FrontViewPosition::Right;
        }
    } else if x > width * 0.5 {
        position = FrontViewPosition::Right;
    }

    let mut position = position.on_side(side);
    if position.side().is_some_and(|s| !enabled(s)) {
        position = FrontViewPosition::Left;
    }

    Settle {
        position,
        duration,
        flick,
    }
}
