//! Front view positions
//!
//! The front view rests at one of seven ordered positions. `Left` is the
//! resting position with nothing revealed; positions greater than `Left`
//! reveal the rear panel, positions less than `Left` reveal the right panel.

use serde::{Deserialize, Serialize};

/// Which panel a non-`Left` position reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Revealed by moving the front view towards positive offsets
    Rear,
    /// Revealed by moving the front view towards negative offsets
    Right,
}

impl Side {
    /// +1 for the rear side, -1 for the right side
    pub fn sign(&self) -> f32 {
        match self {
            Side::Rear => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Side an offset lies on, `None` at exactly zero
    pub fn of_offset(offset: f32) -> Option<Side> {
        if offset > 0.0 {
            Some(Side::Rear)
        } else if offset < 0.0 {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Position of the front view, ordered by horizontal offset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FrontViewPosition {
    LeftSideMostRemoved,
    LeftSideMost,
    LeftSide,
    /// Rear and right views hidden behind the front view
    #[default]
    Left,
    /// Front view offset right by the rear reveal width
    Right,
    /// Front view offset right by the rear reveal width plus overdraw
    RightMost,
    /// Same offset as `RightMost`, with the front view detached once there
    RightMostRemoved,
}

impl FrontViewPosition {
    /// All positions in offset order
    pub const ALL: [FrontViewPosition; 7] = [
        FrontViewPosition::LeftSideMostRemoved,
        FrontViewPosition::LeftSideMost,
        FrontViewPosition::LeftSide,
        FrontViewPosition::Left,
        FrontViewPosition::Right,
        FrontViewPosition::RightMost,
        FrontViewPosition::RightMostRemoved,
    ];

    /// Whether reaching this position detaches the front view
    pub fn is_removed(&self) -> bool {
        matches!(
            self,
            FrontViewPosition::LeftSideMostRemoved | FrontViewPosition::RightMostRemoved
        )
    }

    /// The attached position sharing this position's offset
    pub fn without_removal(&self) -> FrontViewPosition {
        match self {
            FrontViewPosition::LeftSideMostRemoved => FrontViewPosition::LeftSideMost,
            FrontViewPosition::RightMostRemoved => FrontViewPosition::RightMost,
            other => *other,
        }
    }

    /// Reflection around `Left` (`Right` <-> `LeftSide`, etc.)
    pub fn mirrored(&self) -> FrontViewPosition {
        match self {
            FrontViewPosition::LeftSideMostRemoved => FrontViewPosition::RightMostRemoved,
            FrontViewPosition::LeftSideMost => FrontViewPosition::RightMost,
            FrontViewPosition::LeftSide => FrontViewPosition::Right,
            FrontViewPosition::Left => FrontViewPosition::Left,
            FrontViewPosition::Right => FrontViewPosition::LeftSide,
            FrontViewPosition::RightMost => FrontViewPosition::LeftSideMost,
            FrontViewPosition::RightMostRemoved => FrontViewPosition::LeftSideMostRemoved,
        }
    }

    /// Expresses a rear-side position on `side` (identity for the rear side)
    pub fn on_side(&self, side: Side) -> FrontViewPosition {
        match side {
            Side::Rear => *self,
            Side::Right => self.mirrored(),
        }
    }

    /// The panel this position reveals
    pub fn side(&self) -> Option<Side> {
        match self.cmp(&FrontViewPosition::Left) {
            std::cmp::Ordering::Greater => Some(Side::Rear),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Short name used in logs and scenario files
    pub fn name(&self) -> &'static str {
        match self {
            FrontViewPosition::LeftSideMostRemoved => "left-side-most-removed",
            FrontViewPosition::LeftSideMost => "left-side-most",
            FrontViewPosition::LeftSide => "left-side",
            FrontViewPosition::Left => "left",
            FrontViewPosition::Right => "right",
            FrontViewPosition::RightMost => "right-most",
            FrontViewPosition::RightMostRemoved => "right-most-removed",
        }
    }
}

impl std::fmt::Display for FrontViewPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
