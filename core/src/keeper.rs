//! Keeper positioning: the reaction dive, the predictive intercept and the
//! skill-derived save reach.
//!
//! On every launch the keeper first throws itself at a random spot, then (if
//! the ball is heading for the goal line) retargets toward where the ball will
//! cross it. Both motions go through one handle, so the intercept replaces the
//! dive instead of racing it.

use crate::config::{KeeperConfig, KeeperTuning};
use crate::dice::Dice;
use crate::geometry::GoalGeometry;
use crate::substrate::{BodyId, Easing, Substrate, TweenHandle, TweenProperty};
use crate::vec2::Vec2;

/// Where the keeper decided to go for one shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptPlan {
    /// Ball x when it reaches the goal line, before any error
    pub predicted_x: f64,
    pub target_x: f64,
    pub duration_ms: f64,
    pub will_miss: bool,
}

/// Half of the effective save reach. Higher skill widens it.
pub fn save_half_width(cfg: &KeeperConfig) -> f64 {
    ((cfg.body_width + (cfg.skill - 0.5) * cfg.reach_spread) / 2.0)
        .round()
        .max(cfg.min_half_width)
}

/// Predict where the ball crosses the goal line and pick a (possibly wrong)
/// spot to cover. `None` when the ball never reaches the line.
pub fn plan_intercept(
    ball: Vec2,
    velocity: Vec2,
    goal: &GoalGeometry,
    skill: f64,
    tuning: &KeeperTuning,
    dice: &mut impl Dice,
) -> Option<InterceptPlan> {
    if velocity.x == 0.0 || velocity.y == 0.0 {
        return None;
    }

    let t = (goal.line_y - ball.y) / velocity.y;
    if !t.is_finite() || t <= 0.0 {
        return None;
    }

    let predicted_x = ball.x + velocity.x * t;
    if !predicted_x.is_finite() {
        return None;
    }

    let will_miss = dice.chance(1.0 - skill);
    let spread = if will_miss {
        tuning.miss_error
    } else {
        tuning.aim_error
    };
    let offset = dice.between(-spread, spread);
    let target_x = goal.clamp_x(predicted_x + offset);

    let mut duration_ms =
        (t * 1000.0 * tuning.lead_factor).clamp(tuning.min_duration_ms, tuning.max_duration_ms);
    if will_miss {
        duration_ms = (duration_ms * tuning.miss_slowdown).min(tuning.miss_max_duration_ms);
    }

    Some(InterceptPlan {
        predicted_x,
        target_x,
        duration_ms,
        will_miss,
    })
}

#[derive(Debug, Clone)]
pub struct Keeper {
    pub body: BodyId,
    pub skill: f64,
    pub save_half_width: f64,
    /// Rest position, center of the goal
    pub home: Vec2,
    /// Whether the last intercept was a deliberate misread
    pub last_aim_miss: bool,
    motion: Option<TweenHandle>,
}

impl Keeper {
    pub fn new(body: BodyId, home: Vec2, cfg: &KeeperConfig) -> Self {
        Self {
            body,
            skill: cfg.skill,
            save_half_width: save_half_width(cfg),
            home,
            last_aim_miss: false,
            motion: None,
        }
    }

    pub fn motion(&self) -> Option<TweenHandle> {
        self.motion
    }

    /// Glide to `x`, replacing whatever motion is running.
    pub fn drive_to<S: Substrate>(&mut self, substrate: &mut S, x: f64, duration_ms: f64) {
        if let Some(handle) = self.motion.take() {
            substrate.cancel(handle);
        }
        self.motion = Some(substrate.tween(
            self.body,
            TweenProperty::X,
            x,
            duration_ms,
            Easing::SineInOut,
        ));
    }

    /// Coarse random dive, issued on every launch.
    pub fn dive<S: Substrate>(
        &mut self,
        substrate: &mut S,
        goal: &GoalGeometry,
        tuning: &KeeperTuning,
        dice: &mut impl Dice,
    ) -> f64 {
        let x = goal.clamp_x(goal.center_x + dice.between(-tuning.dive_spread, tuning.dive_spread));
        self.drive_to(substrate, x, tuning.dive_duration_ms);
        x
    }

    /// Dive, then retarget onto the predicted crossing when there is one.
    pub fn react_to_launch<S: Substrate>(
        &mut self,
        substrate: &mut S,
        velocity: Vec2,
        ball: Vec2,
        goal: &GoalGeometry,
        tuning: &KeeperTuning,
        dice: &mut impl Dice,
    ) -> Option<InterceptPlan> {
        self.dive(substrate, goal, tuning, dice);

        let plan = plan_intercept(ball, velocity, goal, self.skill, tuning, dice);
        match plan {
            Some(plan) => {
                self.last_aim_miss = plan.will_miss;
                self.drive_to(substrate, plan.target_x, plan.duration_ms);
                tracing::debug!(
                    predicted_x = plan.predicted_x,
                    target_x = plan.target_x,
                    duration_ms = plan.duration_ms,
                    will_miss = plan.will_miss,
                    "keeper intercept"
                );
            }
            None => {
                self.last_aim_miss = false;
                tracing::debug!("no intercept, keeper stays on its dive");
            }
        }
        plan
    }

    /// Stop moving and return to the center of the goal.
    pub fn reset<S: Substrate>(&mut self, substrate: &mut S) {
        if let Some(handle) = self.motion.take() {
            substrate.cancel(handle);
        }
        substrate.set_position(self.body, self.home);
        substrate.set_velocity(self.body, Vec2::ZERO);
        self.last_aim_miss = false;
    }
}
