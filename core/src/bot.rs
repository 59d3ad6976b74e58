//! Autoplay shooter that drives a round through pointer events.
//!
//! The bot is a small state machine that:
//! - Picks a spot in the goal mouth and a power when a shot is ready
//! - Aims the slingshot, holds the pointer until the charge reaches that power
//! - Clicks to restart once the result has been on screen for a moment

use crate::dice::Dice;
use crate::geometry::GoalGeometry;
use crate::round::{PointerAction, RoundController, ShotState};
use crate::substrate::Substrate;
use crate::vec2::Vec2;
use rand::Rng;

/// How far behind the ball the bot pulls the pointer
const AIM_PULL: f64 = 80.0;

/// Shooter personality affects placement and power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterPersonality {
    /// Goes for the corners at moderate power
    Placer,
    /// Hits it hard and roughly central
    Blaster,
    /// Anywhere, any power
    Chaotic,
}

impl ShooterPersonality {
    /// Power range as fractions of max power
    fn power_range(&self) -> (f64, f64) {
        match self {
            ShooterPersonality::Placer => (0.55, 0.75),
            ShooterPersonality::Blaster => (0.9, 1.0),
            ShooterPersonality::Chaotic => (0.3, 1.0),
        }
    }

    /// Seconds spent lining up the shot before pressing
    fn aim_delay(&self, rng: &mut impl Rng) -> f64 {
        match self {
            ShooterPersonality::Placer => rng.gen_range(0.4..1.0),
            ShooterPersonality::Blaster => rng.gen_range(0.1..0.3),
            ShooterPersonality::Chaotic => rng.gen_range(0.05..1.5),
        }
    }

    /// Where along the goal line to aim
    fn target_x(&self, goal: &GoalGeometry, rng: &mut impl Rng) -> f64 {
        let half = goal.width * 0.5;
        match self {
            ShooterPersonality::Placer => {
                let inset = rng.gen_range(20.0..60.0);
                if rng.gen_bool(0.5) {
                    goal.left() + inset
                } else {
                    goal.right() - inset
                }
            }
            ShooterPersonality::Blaster => goal.center_x + rng.gen_range(-0.3..0.3) * half,
            ShooterPersonality::Chaotic => goal.center_x + rng.gen_range(-1.2..1.2) * half,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => ShooterPersonality::Placer,
            1 => ShooterPersonality::Blaster,
            _ => ShooterPersonality::Chaotic,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "placer" => Some(ShooterPersonality::Placer),
            "blaster" => Some(ShooterPersonality::Blaster),
            "chaotic" => Some(ShooterPersonality::Chaotic),
            _ => None,
        }
    }
}

/// One shot the bot has decided on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    /// Point on the goal line the ball should cross
    pub target: Vec2,
    /// Pointer position that aims the slingshot at `target`
    pub pointer: Vec2,
    pub power: f64,
}

/// Choose a target and power, and work out where to hold the pointer.
pub fn plan_shot(
    personality: ShooterPersonality,
    ball: Vec2,
    goal: &GoalGeometry,
    max_power: f64,
    rng: &mut impl Rng,
) -> ShotPlan {
    let target = Vec2::new(personality.target_x(goal, rng), goal.line_y);
    let (lo, hi) = personality.power_range();
    let power = (rng.gen_range(lo..=hi) * max_power).min(max_power);

    // The ball flies away from the pointer, so pull it back along the line.
    let dir = target - ball;
    let len = dir.length();
    let pointer = if len > 0.0 {
        ball - dir * (AIM_PULL / len)
    } else {
        ball + Vec2::new(0.0, AIM_PULL)
    };

    ShotPlan {
        target,
        pointer,
        power,
    }
}

/// What the bot can see of the round
#[derive(Debug, Clone, Copy)]
pub struct BotView {
    pub shot: ShotState,
    pub ball: Vec2,
    pub power: f64,
    pub max_power: f64,
    pub goal: GoalGeometry,
}

impl BotView {
    pub fn of<S: Substrate, D: Dice>(round: &RoundController<S, D>) -> Self {
        Self {
            shot: round.shot_state(),
            ball: round.ball_position(),
            power: round.charge().power,
            max_power: round.charge().max_power(),
            goal: *round.goal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BotPhase {
    Idle,
    Aiming { plan: ShotPlan, delay: f64 },
    Charging { plan: ShotPlan },
    Watching,
    Restarting { delay: f64 },
}

/// A bot that plays the round on its own
#[derive(Debug, Clone)]
pub struct ShooterBot {
    pub personality: ShooterPersonality,
    phase: BotPhase,
    /// Seconds the result stays up before the bot clicks again
    pub restart_delay: f64,
    shots_fired: u32,
}

impl ShooterBot {
    pub fn new(personality: ShooterPersonality) -> Self {
        Self {
            personality,
            phase: BotPhase::Idle,
            restart_delay: 0.8,
            shots_fired: 0,
        }
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Forget any shot in progress, e.g. after the player took over.
    pub fn reset(&mut self) {
        self.phase = BotPhase::Idle;
    }

    /// Tick the bot. Returns the pointer events to feed the round this tick.
    pub fn tick(&mut self, dt: f64, view: &BotView, rng: &mut impl Rng) -> Vec<PointerAction> {
        let mut actions = Vec::new();

        match (view.shot, self.phase) {
            (ShotState::Ready, BotPhase::Idle | BotPhase::Watching | BotPhase::Restarting { .. }) => {
                let plan = plan_shot(self.personality, view.ball, &view.goal, view.max_power, rng);
                let delay = self.personality.aim_delay(rng);
                actions.push(PointerAction::Move(plan.pointer));
                self.phase = BotPhase::Aiming { plan, delay };
            }
            (ShotState::Ready, BotPhase::Aiming { plan, delay }) => {
                let delay = delay - dt;
                if delay <= 0.0 {
                    actions.push(PointerAction::Move(plan.pointer));
                    actions.push(PointerAction::Down);
                    self.phase = BotPhase::Charging { plan };
                } else {
                    self.phase = BotPhase::Aiming { plan, delay };
                }
            }
            (ShotState::Ready, BotPhase::Charging { plan }) => {
                if view.power >= plan.power {
                    actions.push(PointerAction::Up);
                    self.shots_fired += 1;
                    self.phase = BotPhase::Watching;
                    tracing::debug!(
                        personality = ?self.personality,
                        target_x = plan.target.x,
                        power = view.power,
                        "bot shot"
                    );
                }
            }
            (ShotState::InFlight, _) => {
                self.phase = BotPhase::Watching;
            }
            (ShotState::Resolved(_), BotPhase::Restarting { delay }) => {
                let delay = delay - dt;
                if delay <= 0.0 {
                    actions.push(PointerAction::Down);
                    actions.push(PointerAction::Up);
                    self.phase = BotPhase::Idle;
                } else {
                    self.phase = BotPhase::Restarting { delay };
                }
            }
            (ShotState::Resolved(_), _) => {
                self.phase = BotPhase::Restarting {
                    delay: self.restart_delay,
                };
            }
        }

        actions
    }
}
