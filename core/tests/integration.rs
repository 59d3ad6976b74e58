//! Integration tests for the penalty core.
//!
//! These drive a full `RoundController` over `ArcadeWorld`, feeding pointer
//! events and fixed ticks the way the client and the headless runner do.

use penalty_core::arcade::ArcadeWorld;
use penalty_core::bot::ShooterPersonality;
use penalty_core::config::GameConfig;
use penalty_core::dice::{Dice, ScriptedDice};
use penalty_core::resolve::Outcome;
use penalty_core::round::{PointerAction, RoundController, RoundEvent, ShotState};
use penalty_core::session::sweep_skill;
use penalty_core::vec2::{vec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn config_with_skill(skill: f64) -> GameConfig {
    let mut config = GameConfig::default();
    config.keeper.skill = skill;
    config
}

fn round_with<D: Dice>(config: GameConfig, dice: D) -> RoundController<ArcadeWorld, D> {
    let world = ArcadeWorld::new(config.world.width, config.world.height);
    RoundController::new(config, world, dice)
}

/// Aim, hold for `hold_ticks` ticks, release.
fn shoot<D: Dice>(round: &mut RoundController<ArcadeWorld, D>, aim: Vec2, hold_ticks: u32) {
    round.pointer(PointerAction::Move(aim));
    round.pointer(PointerAction::Down);
    for _ in 0..hold_ticks {
        round.tick();
    }
    round.pointer(PointerAction::Up);
}

/// Tick until the shot resolves. Panics if it never does.
fn run_to_outcome<D: Dice>(round: &mut RoundController<ArcadeWorld, D>) -> Outcome {
    for _ in 0..1200 {
        round.tick();
        if let ShotState::Resolved(outcome) = round.shot_state() {
            return outcome;
        }
    }
    panic!("shot never resolved");
}

fn resolved_events(events: &[RoundEvent]) -> Vec<Outcome> {
    events
        .iter()
        .filter_map(|e| match e {
            RoundEvent::Resolved { outcome, .. } => Some(*outcome),
            _ => None,
        })
        .collect()
}

mod scenarios {
    use super::*;

    #[test]
    fn central_shot_at_perfect_keeper_is_saved() {
        // No misread, zero aim error, dive to the middle
        let mut round = round_with(config_with_skill(1.0), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(450.0, 560.0), 50);

        let v = round.ball_velocity();
        assert!((v.length() - 500.0).abs() < 1e-9);
        assert!(v.y < 0.0);

        assert_eq!(run_to_outcome(&mut round), Outcome::Saved);
    }

    #[test]
    fn pointer_above_ball_rebounds_into_keeper() {
        // Shot goes down, bounces off the bottom edge and creeps up the middle
        let mut round = round_with(config_with_skill(1.0), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(450.0, 440.0), 50);
        assert!(round.ball_velocity().y > 0.0);

        assert_eq!(run_to_outcome(&mut round), Outcome::Saved);
        assert!(round.ball_velocity().y < 0.0);
    }

    #[test]
    fn wide_shot_past_weak_keeper_is_goal() {
        // dive to the middle, misread, aim error pushed to the far side
        let dice = ScriptedDice::new([0.5, 0.0, 0.999_999]);
        let mut round = round_with(config_with_skill(0.2), dice);
        shoot(&mut round, vec2(482.5, 550.0), 200);

        assert!((round.ball_velocity().length() - 900.0).abs() < 1e-9);
        assert_eq!(run_to_outcome(&mut round), Outcome::Goal);

        let ball = round.ball_position();
        let keeper = round.keeper_position();
        assert!((ball.x - keeper.x).abs() > round.keeper().save_half_width);
    }

    #[test]
    fn zero_power_release_dies_after_one_tick() {
        let mut round = round_with(GameConfig::default(), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(450.0, 560.0), 0);

        assert_eq!(round.ball_velocity(), Vec2::ZERO);
        assert_eq!(round.shot_state(), ShotState::InFlight);
        round.tick();
        assert_eq!(round.shot_state(), ShotState::Resolved(Outcome::NoGoal));
    }

    #[test]
    fn pointer_down_twice_in_flight_changes_nothing() {
        let mut round = round_with(GameConfig::default(), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(450.0, 560.0), 30);
        round.drain_events();

        round.pointer(PointerAction::Down);
        round.pointer(PointerAction::Down);

        assert_eq!(round.shot_state(), ShotState::InFlight);
        assert!(!round.charge().is_charging());
        assert_eq!(round.tally().shots_taken, 1);
        assert!(round.drain_events().is_empty());
    }

    #[test]
    fn goal_adds_one_to_score_only() {
        let dice = ScriptedDice::new([0.5, 0.0, 0.999_999]);
        let mut round = round_with(config_with_skill(0.2), dice);
        shoot(&mut round, vec2(482.5, 550.0), 200);

        let before = round.tally();
        assert_eq!(before.score, 0);
        assert_eq!(before.shots_taken, 1);

        assert_eq!(run_to_outcome(&mut round), Outcome::Goal);
        let after = round.tally();
        assert_eq!(after.score, 1);
        assert_eq!(after.shots_taken, 1);
    }
}

mod invariants {
    use super::*;

    #[test]
    fn held_charge_launches_at_max_power() {
        let mut round = round_with(GameConfig::default(), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(400.0, 580.0), 1000);
        let speed = round.ball_velocity().length();
        assert!((speed - 900.0).abs() < 1e-9);
    }

    #[test]
    fn each_shot_resolves_exactly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut round = round_with(GameConfig::default(), ChaCha8Rng::seed_from_u64(12));

        for _ in 0..40 {
            let aim = vec2(rng.gen_range(350.0..550.0), rng.gen_range(520.0..600.0));
            shoot(&mut round, aim, rng.gen_range(30..90));
            run_to_outcome(&mut round);
            for _ in 0..60 {
                round.tick();
            }

            let events = round.drain_events();
            assert_eq!(resolved_events(&events).len(), 1);

            round.pointer(PointerAction::Down);
            assert_eq!(round.shot_state(), ShotState::Ready);
            round.pointer(PointerAction::Up);
            round.drain_events();
        }
        assert_eq!(round.tally().shots_taken, 40);
    }

    #[test]
    fn keeper_never_leaves_the_goal_mouth() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut round = round_with(config_with_skill(0.4), ChaCha8Rng::seed_from_u64(22));
        let goal = *round.goal();

        for _ in 0..60 {
            let aim = vec2(rng.gen_range(200.0..700.0), rng.gen_range(505.0..600.0));
            shoot(&mut round, aim, rng.gen_range(20..90));
            for _ in 0..120 {
                round.tick();
                let x = round.keeper_position().x;
                assert!(x >= goal.left() - 1e-9 && x <= goal.right() + 1e-9, "keeper at {x}");
            }
            round.pointer(PointerAction::Down);
            round.pointer(PointerAction::Up);
        }
    }

    #[test]
    fn restart_puts_everything_back() {
        let mut round = round_with(GameConfig::default(), ScriptedDice::constant(0.5));
        shoot(&mut round, vec2(300.0, 560.0), 60);
        run_to_outcome(&mut round);

        round.pointer(PointerAction::Down);
        assert_eq!(round.shot_state(), ShotState::Ready);
        assert_eq!(round.ball_position(), vec2(450.0, 500.0));
        assert_eq!(round.ball_velocity(), Vec2::ZERO);
        assert_eq!(round.keeper_position(), vec2(450.0, 140.0));
        assert!(round.aim_indicator().is_none());
        assert!(!round.charge().is_charging());
    }

    #[test]
    fn tally_never_decreases() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut round = round_with(config_with_skill(0.5), ChaCha8Rng::seed_from_u64(32));
        let mut last = round.tally();

        for _ in 0..30 {
            let aim = vec2(rng.gen_range(300.0..600.0), rng.gen_range(540.0..600.0));
            shoot(&mut round, aim, rng.gen_range(30..90));
            run_to_outcome(&mut round);
            let now = round.tally();
            assert!(now.score >= last.score);
            assert_eq!(now.shots_taken, last.shots_taken + 1);
            last = now;
            round.pointer(PointerAction::Down);
            round.pointer(PointerAction::Up);
        }
    }
}

/// Near-miss crossings: the keeper is past body contact but inside its save
/// reach, so the skill-weighted draw decides.
mod proximity {
    use super::*;

    // skill 0.9: save reach 80, save chance 0.54 (0.27 after a misread)
    const SKILL: f64 = 0.9;

    fn assert_near_miss<D: Dice>(round: &RoundController<ArcadeWorld, D>) {
        let dx = (round.ball_position().x - round.keeper_position().x).abs();
        let config = round.config();
        assert!(dx > config.contact_reach(), "ball touched the keeper, dx {dx}");
        assert!(dx <= round.keeper().save_half_width, "ball out of reach, dx {dx}");
    }

    /// Shot down into the bottom edge: no intercept, so the keeper stays on a
    /// dive 70 px right of the rebound.
    fn rebound_past_dive(draw: f64) -> (Outcome, RoundController<ArcadeWorld, ScriptedDice>) {
        let dice = ScriptedDice::new([0.675, draw]);
        let mut round = round_with(config_with_skill(SKILL), dice);
        shoot(&mut round, vec2(450.0, 440.0), 90);
        let outcome = run_to_outcome(&mut round);
        (outcome, round)
    }

    /// Straight shot the keeper misreads, ending up about 70 px to the right.
    fn misread_straight_shot(draw: f64) -> (Outcome, RoundController<ArcadeWorld, ScriptedDice>) {
        let dice = ScriptedDice::new([0.5, 0.0, 0.9375, draw]);
        let mut round = round_with(config_with_skill(SKILL), dice);
        shoot(&mut round, vec2(450.0, 560.0), 50);
        let outcome = run_to_outcome(&mut round);
        (outcome, round)
    }

    #[test]
    fn draw_under_save_chance_is_saved() {
        let (outcome, round) = rebound_past_dive(0.4);
        assert_near_miss(&round);
        assert!(!round.keeper().last_aim_miss);
        assert_eq!(outcome, Outcome::Saved);
        assert_eq!(round.tally().score, 0);
    }

    #[test]
    fn draw_over_save_chance_is_goal() {
        let (outcome, round) = rebound_past_dive(0.6);
        assert_near_miss(&round);
        assert_eq!(outcome, Outcome::Goal);
        assert_eq!(round.tally().score, 1);
    }

    #[test]
    fn misread_halves_save_chance() {
        let (outcome, round) = misread_straight_shot(0.4);
        assert_near_miss(&round);
        assert!(round.keeper().last_aim_miss);
        assert_eq!(outcome, Outcome::Goal);

        let (outcome, round) = misread_straight_shot(0.2);
        assert_near_miss(&round);
        assert_eq!(outcome, Outcome::Saved);
    }

    #[test]
    fn default_keeper_reaches_past_contact() {
        let round = round_with(GameConfig::default(), ScriptedDice::constant(0.5));
        assert!(round.keeper().save_half_width > round.config().contact_reach());
    }
}

mod skill {
    use super::*;

    #[test]
    fn better_keeper_saves_more_of_the_same_shots() {
        let samples = sweep_skill(
            GameConfig::default(),
            &[0.2, 0.9],
            400,
            ShooterPersonality::Placer,
            17,
        )
        .unwrap();

        let weak = samples[0].report;
        let strong = samples[1].report;
        assert_eq!(weak.shots, 400);
        assert_eq!(strong.shots, 400);
        assert!(
            strong.saves > weak.saves,
            "skill 0.9 saved {} vs skill 0.2 saved {}",
            strong.saves,
            weak.saves
        );
        assert!(strong.save_rate() > weak.save_rate());
    }
}
