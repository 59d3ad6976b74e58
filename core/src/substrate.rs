//! Capabilities the round needs from the physics/animation layer.
//!
//! The core never integrates motion itself; it asks a [`Substrate`] to move
//! bodies, report their boxes and run scalar tweens. [`crate::arcade`] has the
//! deterministic implementation used headless and in tests.

use crate::geometry::Aabb;
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(pub u64);

/// Scalar body property a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Sine ease-in-out
    #[default]
    SineInOut,
}

impl Easing {
    /// Map linear progress in [0, 1] onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineInOut => 0.5 * (1.0 - (std::f64::consts::PI * t).cos()),
        }
    }
}

/// Spawn parameters for a box-shaped body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub position: Vec2,
    pub half_extents: Vec2,
    /// Velocity kept (and reflected) when hitting a world bound.
    pub bounce: f64,
    pub collide_world_bounds: bool,
}

/// Two watched bodies whose boxes intersected during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub a: BodyId,
    pub b: BodyId,
}

impl Overlap {
    pub fn involves(&self, a: BodyId, b: BodyId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

pub trait Substrate {
    fn spawn(&mut self, spec: BodySpec) -> BodyId;

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2);
    fn set_position(&mut self, body: BodyId, position: Vec2);

    fn position(&self, body: BodyId) -> Vec2;
    fn velocity(&self, body: BodyId) -> Vec2;
    fn bounds(&self, body: BodyId) -> Aabb;

    fn speed(&self, body: BodyId) -> f64 {
        self.velocity(body).length()
    }

    /// Report overlaps of `a` and `b` from every following [`Substrate::step`].
    fn watch_overlap(&mut self, a: BodyId, b: BodyId);

    /// Animate one property of `body` from its current value to `to`.
    /// Starting a tween on a property cancels whatever tween was driving it.
    fn tween(
        &mut self,
        body: BodyId,
        property: TweenProperty,
        to: f64,
        duration_ms: f64,
        easing: Easing,
    ) -> TweenHandle;

    /// Stop a tween where it is. Unknown or finished handles are ignored.
    fn cancel(&mut self, handle: TweenHandle);

    fn is_tweening(&self, handle: TweenHandle) -> bool;

    /// Advance the world by `dt` seconds: integrate velocities, clamp to world
    /// bounds, advance tweens, then report watched overlaps.
    fn step(&mut self, dt: f64) -> Vec<Overlap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_in_out_endpoints_and_midpoint() {
        let e = Easing::SineInOut;
        assert!(e.apply(0.0).abs() < 1e-12);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sine_in_out_is_monotonic() {
        let e = Easing::SineInOut;
        let mut last = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn easing_clamps_progress() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    }

    #[test]
    fn overlap_involves_either_order() {
        let o = Overlap {
            a: BodyId(1),
            b: BodyId(2),
        };
        assert!(o.involves(BodyId(1), BodyId(2)));
        assert!(o.involves(BodyId(2), BodyId(1)));
        assert!(!o.involves(BodyId(1), BodyId(3)));
    }
}
