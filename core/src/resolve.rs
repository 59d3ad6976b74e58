//! Shot adjudication.
//!
//! Evaluated every tick while a shot is in flight, in priority order:
//! contact with the keeper, goal-line crossing (box overlap, then the
//! probabilistic proximity save), then the dead-ball checks. The first verdict
//! sticks until the resolver is re-armed for the next shot.

use crate::config::ResolveTuning;
use crate::dice::Dice;
use crate::geometry::Aabb;
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Goal,
    Saved,
    /// The shot died (stopped or left the pitch) before reaching the line.
    NoGoal,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Goal => "goal",
            Outcome::Saved => "saved",
            Outcome::NoGoal => "no-goal",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the resolver looks at on one tick.
#[derive(Debug, Clone, Copy)]
pub struct FlightSnapshot {
    pub ball: Vec2,
    pub ball_bounds: Aabb,
    pub ball_speed: f64,
    pub keeper: Vec2,
    pub keeper_bounds: Aabb,
    /// The substrate reported a ball/keeper overlap this tick.
    pub touched: bool,
}

/// The keeper attributes that weigh on a proximity save.
#[derive(Debug, Clone, Copy)]
pub struct SaveProfile {
    pub skill: f64,
    pub half_width: f64,
    pub last_aim_miss: bool,
}

/// Probability that a near (non-contact) ball is saved.
pub fn save_threshold(profile: &SaveProfile, tuning: &ResolveTuning) -> f64 {
    let base = tuning.save_chance * profile.skill;
    if profile.last_aim_miss {
        base * tuning.miss_penalty
    } else {
        base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Idle,
    Pending,
    Decided(Outcome),
}

#[derive(Debug, Clone)]
pub struct OutcomeResolver {
    goal_line_y: f64,
    world_height: f64,
    tuning: ResolveTuning,
    verdict: Verdict,
}

impl OutcomeResolver {
    pub fn new(goal_line_y: f64, world_height: f64, tuning: ResolveTuning) -> Self {
        Self {
            goal_line_y,
            world_height,
            tuning,
            verdict: Verdict::Idle,
        }
    }

    /// Start watching a new shot.
    pub fn arm(&mut self) {
        self.verdict = Verdict::Pending;
    }

    /// Stop watching without a verdict (round reset).
    pub fn disarm(&mut self) {
        self.verdict = Verdict::Idle;
    }

    pub fn is_pending(&self) -> bool {
        self.verdict == Verdict::Pending
    }

    /// Returns the verdict on the tick it is reached, `None` on every other tick.
    pub fn evaluate(
        &mut self,
        snap: &FlightSnapshot,
        keeper: &SaveProfile,
        dice: &mut impl Dice,
    ) -> Option<Outcome> {
        if self.verdict != Verdict::Pending {
            return None;
        }

        let outcome = self.judge(snap, keeper, dice)?;
        self.verdict = Verdict::Decided(outcome);
        Some(outcome)
    }

    fn judge(
        &self,
        snap: &FlightSnapshot,
        keeper: &SaveProfile,
        dice: &mut impl Dice,
    ) -> Option<Outcome> {
        if snap.touched {
            return Some(Outcome::Saved);
        }

        if snap.ball.y <= self.goal_line_y {
            if snap.ball_bounds.intersects(&snap.keeper_bounds) {
                return Some(Outcome::Saved);
            }
            if (snap.ball.x - snap.keeper.x).abs() <= keeper.half_width {
                let threshold = save_threshold(keeper, &self.tuning);
                let draw = dice.roll();
                tracing::debug!(threshold, draw, "proximity save attempt");
                return Some(if draw < threshold {
                    Outcome::Saved
                } else {
                    Outcome::Goal
                });
            }
            return Some(Outcome::Goal);
        }

        if snap.ball.y > self.world_height + self.tuning.escape_margin
            || snap.ball_speed < self.tuning.stall_speed
        {
            return Some(Outcome::NoGoal);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::vec2::vec2;

    const LINE_Y: f64 = 160.0;
    const BALL_HALF: f64 = 16.0;
    const KEEPER_HALF: f64 = 40.0;

    fn armed() -> OutcomeResolver {
        let mut r = OutcomeResolver::new(LINE_Y, 600.0, ResolveTuning::default());
        r.arm();
        r
    }

    fn snap(ball: Vec2, keeper: Vec2, speed: f64) -> FlightSnapshot {
        FlightSnapshot {
            ball,
            ball_bounds: Aabb::from_center(ball, vec2(BALL_HALF, BALL_HALF)),
            ball_speed: speed,
            keeper,
            keeper_bounds: Aabb::from_center(keeper, vec2(KEEPER_HALF, KEEPER_HALF)),
            touched: false,
        }
    }

    fn profile(skill: f64, half_width: f64, last_aim_miss: bool) -> SaveProfile {
        SaveProfile {
            skill,
            half_width,
            last_aim_miss,
        }
    }

    #[test]
    fn outcome_wire_names() {
        assert_eq!(Outcome::Goal.to_string(), "goal");
        assert_eq!(Outcome::Saved.as_str(), "saved");
        assert_eq!(
            serde_json::to_string(&Outcome::NoGoal).unwrap(),
            "\"no-goal\""
        );
    }

    #[test]
    fn nothing_before_the_line() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(450.0, 300.0), vec2(450.0, 140.0), 500.0);
        assert_eq!(r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice), None);
        assert!(r.is_pending());
    }

    #[test]
    fn idle_resolver_never_judges() {
        let mut r = OutcomeResolver::new(LINE_Y, 600.0, ResolveTuning::default());
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(450.0, 150.0), vec2(450.0, 140.0), 500.0);
        assert_eq!(r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice), None);
    }

    #[test]
    fn box_overlap_at_line_is_saved_regardless_of_draw() {
        for skill in [0.0, 0.3, 1.0] {
            let mut r = armed();
            let mut dice = ScriptedDice::constant(0.99);
            let s = snap(vec2(470.0, 158.0), vec2(450.0, 140.0), 500.0);
            assert_eq!(
                r.evaluate(&s, &profile(skill, 1.0, true), &mut dice),
                Some(Outcome::Saved)
            );
            assert_eq!(dice.remaining(), 0);
        }
    }

    #[test]
    fn contact_before_line_is_saved() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.99);
        let mut s = snap(vec2(450.0, 190.0), vec2(450.0, 140.0), 500.0);
        s.touched = true;
        assert_eq!(
            r.evaluate(&s, &profile(0.0, 10.0, false), &mut dice),
            Some(Outcome::Saved)
        );
    }

    #[test]
    fn near_ball_saved_when_draw_under_threshold() {
        let mut r = armed();
        // threshold 0.6 * 1.0 = 0.6
        let mut dice = ScriptedDice::new([0.59]);
        let s = snap(vec2(510.0, 158.0), vec2(450.0, 140.0), 500.0);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 60.0, false), &mut dice),
            Some(Outcome::Saved)
        );
    }

    #[test]
    fn near_ball_scores_when_draw_over_threshold() {
        let mut r = armed();
        let mut dice = ScriptedDice::new([0.61]);
        let s = snap(vec2(510.0, 158.0), vec2(450.0, 140.0), 500.0);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 60.0, false), &mut dice),
            Some(Outcome::Goal)
        );
    }

    #[test]
    fn misread_halves_threshold() {
        let tuning = ResolveTuning::default();
        assert!((save_threshold(&profile(0.8, 50.0, false), &tuning) - 0.48).abs() < 1e-12);
        assert!((save_threshold(&profile(0.8, 50.0, true), &tuning) - 0.24).abs() < 1e-12);

        let mut r = armed();
        let mut dice = ScriptedDice::new([0.4]);
        let s = snap(vec2(510.0, 158.0), vec2(450.0, 140.0), 500.0);
        assert_eq!(
            r.evaluate(&s, &profile(0.8, 60.0, true), &mut dice),
            Some(Outcome::Goal)
        );
    }

    #[test]
    fn far_ball_is_goal_without_a_draw() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(250.0, 150.0), vec2(450.0, 140.0), 800.0);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::Goal)
        );
    }

    #[test]
    fn stalled_ball_is_no_goal() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(450.0, 500.0), vec2(450.0, 140.0), 4.9);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::NoGoal)
        );
    }

    #[test]
    fn escaped_ball_is_no_goal() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(450.0, 801.0), vec2(450.0, 140.0), 600.0);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::NoGoal)
        );
    }

    #[test]
    fn crossing_wins_over_stall_on_the_same_tick() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.0);
        let s = snap(vec2(250.0, 150.0), vec2(450.0, 140.0), 0.0);
        assert_eq!(
            r.evaluate(&s, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::Goal)
        );
    }

    #[test]
    fn verdict_is_final_until_rearmed() {
        let mut r = armed();
        let mut dice = ScriptedDice::constant(0.99);
        let goal = snap(vec2(250.0, 150.0), vec2(450.0, 140.0), 800.0);
        assert_eq!(
            r.evaluate(&goal, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::Goal)
        );

        let mut touched = snap(vec2(450.0, 150.0), vec2(450.0, 140.0), 800.0);
        touched.touched = true;
        for _ in 0..10 {
            assert_eq!(r.evaluate(&touched, &profile(1.0, 55.0, false), &mut dice), None);
        }
        assert!(!r.is_pending());

        r.arm();
        assert_eq!(
            r.evaluate(&touched, &profile(1.0, 55.0, false), &mut dice),
            Some(Outcome::Saved)
        );
    }
}
