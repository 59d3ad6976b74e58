//! Headless bot sessions over the arcade world.

use crate::arcade::ArcadeWorld;
use crate::bot::{BotView, ShooterBot, ShooterPersonality};
use crate::config::{ConfigError, GameConfig};
use crate::resolve::Outcome;
use crate::round::{RoundController, RoundEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Give up on a session after this many seconds of simulated time per shot.
const MAX_SECONDS_PER_SHOT: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub shots: u32,
    pub goals: u32,
    pub saves: u32,
    pub no_goals: u32,
    pub ticks: u64,
}

impl SessionReport {
    fn record(&mut self, outcome: Outcome) {
        self.shots += 1;
        match outcome {
            Outcome::Goal => self.goals += 1,
            Outcome::Saved => self.saves += 1,
            Outcome::NoGoal => self.no_goals += 1,
        }
    }

    /// Saves over shots that reached the goal line.
    pub fn save_rate(&self) -> f64 {
        let on_target = self.goals + self.saves;
        if on_target == 0 {
            0.0
        } else {
            self.saves as f64 / on_target as f64
        }
    }
}

/// Let a bot take `shots` shots against the keeper described by `config`.
///
/// The keeper draws from a ChaCha stream seeded with `config.rng_seed`, the
/// bot from one seeded with `bot_seed`, so a session is fully reproducible.
pub fn run_bot_session(
    config: GameConfig,
    shots: u32,
    personality: ShooterPersonality,
    bot_seed: u64,
) -> Result<SessionReport, ConfigError> {
    config.validate()?;

    let world = ArcadeWorld::new(config.world.width, config.world.height);
    let keeper_rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
    let mut round = RoundController::new(config, world, keeper_rng);
    let mut bot = ShooterBot::new(personality);
    let mut bot_rng = ChaCha8Rng::seed_from_u64(bot_seed);

    let dt = config.world.dt();
    let max_ticks =
        u64::from(shots.max(1)) * MAX_SECONDS_PER_SHOT * u64::from(config.world.tick_rate_hz);
    let mut report = SessionReport::default();

    while report.shots < shots {
        if round.ticks() >= max_ticks {
            tracing::warn!(
                resolved = report.shots,
                requested = shots,
                "session stopped at the tick limit"
            );
            break;
        }

        let view = BotView::of(&round);
        for action in bot.tick(dt, &view, &mut bot_rng) {
            round.pointer(action);
        }
        round.tick();

        for event in round.drain_events() {
            if let RoundEvent::Resolved { outcome, .. } = event {
                report.record(outcome);
            }
        }
    }

    report.ticks = round.ticks();
    tracing::info!(
        ?personality,
        skill = config.keeper.skill,
        shots = report.shots,
        goals = report.goals,
        saves = report.saves,
        no_goals = report.no_goals,
        "session finished"
    );
    Ok(report)
}

/// One row of a skill sweep.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSample {
    pub skill: f64,
    pub report: SessionReport,
}

/// Replay the same bot session against keepers of different skill.
pub fn sweep_skill(
    config: GameConfig,
    skills: &[f64],
    shots: u32,
    personality: ShooterPersonality,
    bot_seed: u64,
) -> Result<Vec<SkillSample>, ConfigError> {
    skills
        .iter()
        .map(|&skill| {
            let mut config = config;
            config.keeper.skill = skill;
            let report = run_bot_session(config, shots, personality, bot_seed)?;
            Ok(SkillSample { skill, report })
        })
        .collect()
}
