use crate::config::GoalConfig;
use crate::vec2::Vec2;

/// Axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Rectangle-to-rectangle test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }
}

/// Fixed goal rectangle and its scoring line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalGeometry {
    pub center_x: f64,
    /// Vertical center of the goal frame.
    pub goal_y: f64,
    pub width: f64,
    pub height: f64,
    /// A shot is adjudicated once the ball's y reaches this threshold.
    pub line_y: f64,
}

impl GoalGeometry {
    pub fn from_config(cfg: &GoalConfig) -> Self {
        Self {
            center_x: cfg.center_x,
            goal_y: cfg.top_y,
            width: cfg.width,
            height: cfg.height,
            line_y: cfg.top_y + cfg.line_offset,
        }
    }

    pub fn left(&self) -> f64 {
        self.center_x - self.width * 0.5
    }

    pub fn right(&self) -> f64 {
        self.center_x + self.width * 0.5
    }

    /// Clamp an x coordinate into the goal mouth.
    pub fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.left(), self.right())
    }

    pub fn frame(&self) -> Aabb {
        Aabb::from_center(
            Vec2::new(self.center_x, self.goal_y),
            Vec2::new(self.width * 0.5, self.height * 0.5),
        )
    }
}
