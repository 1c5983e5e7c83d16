//! Position geometry
//!
//! Maps positions to front view offsets and offsets to panel frames. Every
//! function here is pure: the same configuration and bounds always give the
//! same numbers.

use serde::{Deserialize, Serialize};

use super::position::{FrontViewPosition, Side};
use crate::config::{RevealConfig, SideConfig};

/// Container dimensions in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A view frame in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Linear remap of `value` from `[from_min, from_max]` into `[to_min, to_max]`,
/// clamped to the target range
fn scaled(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    if from_max <= from_min {
        return if value >= from_max { to_max } else { to_min };
    }
    let t = ((value - from_min) / (from_max - from_min)).clamp(0.0, 1.0);
    to_min + (to_max - to_min) * t
}

/// Geometry for one configuration and container size
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    config: &'a RevealConfig,
    bounds: Size,
}

impl<'a> Geometry<'a> {
    pub fn new(config: &'a RevealConfig, bounds: Size) -> Self {
        Self { config, bounds }
    }

    /// Tunables of one side with its reveal width resolved
    pub fn side(&self, side: Side) -> SideConfig {
        self.config.side(side, self.bounds.width)
    }

    /// Horizontal offset of the front view at `position`
    pub fn front_offset(&self, position: FrontViewPosition) -> f32 {
        let Some(side) = position.side() else {
            return 0.0;
        };
        let config = self.side(side);
        let magnitude = match position.without_removal().on_side(side) {
            FrontViewPosition::RightMost => config.reveal_width + config.overdraw,
            _ => config.reveal_width,
        };
        magnitude * side.sign()
    }

    /// Attached position whose offset is closest to `offset`, ties going to
    /// the position nearer to `Left`
    pub fn nearest_position(&self, offset: f32) -> FrontViewPosition {
        const CANDIDATES: [FrontViewPosition; 5] = [
            FrontViewPosition::Left,
            FrontViewPosition::Right,
            FrontViewPosition::LeftSide,
            FrontViewPosition::RightMost,
            FrontViewPosition::LeftSideMost,
        ];
        CANDIDATES
            .into_iter()
            .min_by(|a, b| {
                let da = (self.front_offset(*a) - offset).abs();
                let db = (self.front_offset(*b) - offset).abs();
                da.total_cmp(&db)
            })
            .unwrap_or_default()
    }

    /// Rear parallax amount: 0 at offset 0, the full displacement at the
    /// reveal width, clamped beyond
    pub fn rear_displacement(&self, offset: f32) -> f32 {
        let rear = self.side(Side::Rear);
        scaled(offset, 0.0, rear.reveal_width, 0.0, rear.displacement)
    }

    /// Right parallax amount, mirrored for negative offsets
    pub fn right_displacement(&self, offset: f32) -> f32 {
        let right = self.side(Side::Right);
        scaled(-offset, 0.0, right.reveal_width, 0.0, right.displacement)
    }

    pub fn front_frame(&self, offset: f32) -> Rect {
        Rect::new(offset, 0.0, self.bounds.width, self.bounds.height)
    }

    /// Rear frame: tucked left by the displacement at rest, flush at full reveal
    pub fn rear_frame(&self, offset: f32) -> Rect {
        let rear = self.side(Side::Rear);
        let x = self.rear_displacement(offset) - rear.displacement;
        Rect::new(
            x,
            0.0,
            rear.reveal_width + rear.overdraw,
            self.bounds.height,
        )
    }

    /// Right frame: anchored to the trailing edge, tucked right at rest
    pub fn right_frame(&self, offset: f32) -> Rect {
        let right = self.side(Side::Right);
        let width = right.reveal_width + right.overdraw;
        let x = self.bounds.width - width + (right.displacement - self.right_displacement(offset));
        Rect::new(x, 0.0, width, self.bounds.height)
    }
}
