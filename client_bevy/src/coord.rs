use bevy::prelude::{Vec2, Vec3};

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Canvas pixel coordinates used by the simulation (origin top-left, Y-down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PxPos {
    pub x: f32,
    pub y: f32,
}

impl PxPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<penalty_core::vec2::Vec2> for PxPos {
    fn from(v: penalty_core::vec2::Vec2) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

impl From<PxPos> for penalty_core::vec2::Vec2 {
    fn from(p: PxPos) -> Self {
        penalty_core::vec2::Vec2::new(p.x as f64, p.y as f64)
    }
}

/// Convert canvas pixel coordinates (Y-down) to Bevy world coordinates (Y-up).
pub fn px_to_world(px: PxPos, z: f32) -> Vec3 {
    let wx = px.x - CANVAS_WIDTH * 0.5;
    let wy = (CANVAS_HEIGHT - px.y) - CANVAS_HEIGHT * 0.5;
    Vec3::new(wx, wy, z)
}

/// Convert Bevy world coordinates (Y-up) to canvas pixel coordinates (Y-down).
pub fn world_to_px(world_xy: Vec2) -> PxPos {
    PxPos {
        x: world_xy.x + CANVAS_WIDTH * 0.5,
        y: CANVAS_HEIGHT * 0.5 - world_xy.y,
    }
}

/// Simulation position straight to a Bevy translation.
pub fn sim_to_world(p: penalty_core::vec2::Vec2, z: f32) -> Vec3 {
    px_to_world(PxPos::from(p), z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_world_roundtrip() {
        for (x, y) in [
            (0.0, 0.0),
            (CANVAS_WIDTH, 0.0),
            (0.0, CANVAS_HEIGHT),
            (CANVAS_WIDTH, CANVAS_HEIGHT),
            (CANVAS_WIDTH * 0.5, CANVAS_HEIGHT * 0.5),
        ] {
            let world = px_to_world(PxPos::new(x, y), 0.0);
            let roundtrip = world_to_px(world.truncate());
            assert!((roundtrip.x - x).abs() < 1e-6);
            assert!((roundtrip.y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn goal_at_top_of_canvas_is_above_origin() {
        let goal = sim_to_world(penalty_core::vec2::vec2(450.0, 120.0), 1.0);
        assert!((goal.x - 0.0).abs() < 1e-6);
        assert!((goal.y - 180.0).abs() < 1e-6);
        assert_eq!(goal.z, 1.0);
    }

    #[test]
    fn pointer_round_trips_into_simulation_space() {
        let world = Vec2::new(-100.0, -250.0);
        let sim: penalty_core::vec2::Vec2 = world_to_px(world).into();
        assert!((sim.x - 350.0).abs() < 1e-6);
        assert!((sim.y - 550.0).abs() < 1e-6);
    }
}
