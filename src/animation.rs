//! Offset interpolation
//!
//! Animations are advanced by explicit frame deltas rather than wall-clock
//! time, so the host decides the frame rate and tests stay deterministic.

use std::time::Duration;

use crate::model::position::FrontViewPosition;

/// Timing curve applied to linear progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationCurve {
    Linear,
    /// Slow start and end; used for programmatic moves
    #[default]
    EaseInOut,
    /// Fast start; used when settling after a drag so the release speed carries
    EaseOut,
}

impl AnimationCurve {
    /// Map linear progress `t` in `[0, 1]` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            AnimationCurve::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

/// One in-flight segment of front view movement
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub target: FrontViewPosition,
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub elapsed: Duration,
    pub curve: AnimationCurve,
}

impl Animation {
    pub fn new(
        target: FrontViewPosition,
        from: f32,
        to: f32,
        duration: Duration,
        curve: AnimationCurve,
    ) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            curve,
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Offset at the current point of the animation
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.curve.apply(self.progress())
    }

    /// Advance by `dt`, returning the new offset
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
