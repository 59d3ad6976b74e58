use crate::charge::{ChargeController, Release};
use crate::config::GameConfig;
use crate::dice::Dice;
use crate::geometry::GoalGeometry;
use crate::keeper::{InterceptPlan, Keeper};
use crate::launch::launch;
use crate::resolve::{FlightSnapshot, Outcome, OutcomeResolver, SaveProfile};
use crate::substrate::{BodyId, BodySpec, Substrate};
use crate::vec2::Vec2;

/// Where the current shot is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotState {
    /// Aiming and charging allowed
    #[default]
    Ready,
    InFlight,
    /// Result shown, waiting for a click to restart
    Resolved(Outcome),
}

/// Session score. Never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct RoundTally {
    /// Goals scored by the player
    pub score: u32,
    pub shots_taken: u32,
}

/// Pointer input, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Move(Vec2),
    Down,
    Up,
    /// Drop a held charge without shooting.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    Launched {
        velocity: Vec2,
        shots_taken: u32,
        intercept: Option<InterceptPlan>,
    },
    Resolved {
        outcome: Outcome,
        score: u32,
        shots_taken: u32,
    },
    Reset,
}

/// Aim line from the ball to the pointer, plus charge progress while charging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimIndicator {
    pub from: Vec2,
    pub to: Vec2,
    pub power_fraction: Option<f64>,
}

/// Owns one session: ball, keeper, charge, shot state and tally.
pub struct RoundController<S: Substrate, D: Dice> {
    config: GameConfig,
    goal: GoalGeometry,
    substrate: S,
    dice: D,
    ball: BodyId,
    ball_start: Vec2,
    keeper: Keeper,
    charge: ChargeController,
    shot: ShotState,
    resolver: OutcomeResolver,
    tally: RoundTally,
    restart_armed: bool,
    aim: Option<AimIndicator>,
    events: Vec<RoundEvent>,
    ticks: u64,
}

impl<S: Substrate, D: Dice> RoundController<S, D> {
    pub fn new(config: GameConfig, mut substrate: S, dice: D) -> Self {
        let goal = GoalGeometry::from_config(&config.goal);

        let ball_start = Vec2::new(config.ball.start_x, config.ball.start_y);
        let ball = substrate.spawn(BodySpec {
            position: ball_start,
            half_extents: Vec2::new(config.ball.radius, config.ball.radius),
            bounce: config.ball.bounce,
            collide_world_bounds: true,
        });

        let keeper_home = Vec2::new(goal.center_x, config.goal.top_y + config.keeper.y_offset);
        let keeper_body = substrate.spawn(BodySpec {
            position: keeper_home,
            half_extents: Vec2::new(config.keeper.body_width * 0.5, config.keeper.body_height * 0.5),
            bounce: 0.0,
            collide_world_bounds: false,
        });
        substrate.watch_overlap(ball, keeper_body);

        let keeper = Keeper::new(keeper_body, keeper_home, &config.keeper);
        tracing::info!(
            skill = keeper.skill,
            save_half_width = keeper.save_half_width,
            "keeper ready"
        );

        let mut round = Self {
            config,
            goal,
            substrate,
            dice,
            ball,
            ball_start,
            keeper,
            charge: ChargeController::new(config.charge),
            shot: ShotState::Ready,
            resolver: OutcomeResolver::new(goal.line_y, config.world.height, config.resolve),
            tally: RoundTally::default(),
            restart_armed: false,
            aim: None,
            events: Vec::new(),
            ticks: 0,
        };
        round.reset();
        round.events.clear();
        round
    }

    pub fn pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::Move(p) => self.pointer_move(p),
            PointerAction::Down => self.pointer_down(),
            PointerAction::Up => self.pointer_up(),
            PointerAction::Cancel => self.cancel_charge(),
        }
    }

    /// Ready: start charging. Resolved: restart the round (and nothing else).
    /// In flight: ignored.
    pub fn pointer_down(&mut self) {
        match self.shot {
            ShotState::Ready => {
                self.charge.pointer_down(self.shot);
            }
            ShotState::InFlight => {}
            ShotState::Resolved(_) => {
                if self.restart_armed {
                    self.restart_armed = false;
                    self.reset();
                }
            }
        }
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        self.charge.pointer_move(p);
        if self.shot == ShotState::Ready {
            self.refresh_aim();
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(release) = self.charge.pointer_up(self.shot) {
            self.fire(release);
        }
    }

    pub fn cancel_charge(&mut self) {
        if !self.charge.is_charging() {
            return;
        }
        self.charge.reset();
        if self.shot == ShotState::Ready {
            self.refresh_aim();
        }
        tracing::debug!("charge cancelled");
    }

    /// One fixed step: physics, charge, aim, then adjudication.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let overlaps = self.substrate.step(self.config.world.dt());
        let touched = overlaps
            .iter()
            .any(|o| o.involves(self.ball, self.keeper.body));

        self.charge.tick();

        if self.shot == ShotState::Ready {
            self.refresh_aim();
        }

        if self.shot == ShotState::InFlight {
            let snap = self.snapshot(touched);
            let profile = self.save_profile();
            if let Some(outcome) = self.resolver.evaluate(&snap, &profile, &mut self.dice) {
                self.finish(outcome);
            }
        }
    }

    fn fire(&mut self, release: Release) {
        self.shot = ShotState::InFlight;
        self.resolver.arm();

        let ball_pos = self.substrate.position(self.ball);
        let velocity = launch(&mut self.substrate, self.ball, release, &mut self.tally);
        let intercept = self.keeper.react_to_launch(
            &mut self.substrate,
            velocity,
            ball_pos,
            &self.goal,
            &self.config.intercept,
            &mut self.dice,
        );

        tracing::info!(
            power = release.power,
            vx = velocity.x,
            vy = velocity.y,
            shots_taken = self.tally.shots_taken,
            "shot launched"
        );
        self.events.push(RoundEvent::Launched {
            velocity,
            shots_taken: self.tally.shots_taken,
            intercept,
        });
    }

    fn finish(&mut self, outcome: Outcome) {
        self.shot = ShotState::Resolved(outcome);
        if outcome == Outcome::Goal {
            self.tally.score += 1;
        }
        self.restart_armed = true;

        tracing::info!(
            %outcome,
            score = self.tally.score,
            shots_taken = self.tally.shots_taken,
            "shot resolved"
        );
        self.events.push(RoundEvent::Resolved {
            outcome,
            score: self.tally.score,
            shots_taken: self.tally.shots_taken,
        });
    }

    fn reset(&mut self) {
        self.shot = ShotState::Ready;
        self.restart_armed = false;
        self.resolver.disarm();
        self.charge.reset();
        self.substrate.set_position(self.ball, self.ball_start);
        self.substrate.set_velocity(self.ball, Vec2::ZERO);
        self.keeper.reset(&mut self.substrate);
        self.aim = None;

        tracing::debug!("round reset");
        self.events.push(RoundEvent::Reset);
    }

    fn refresh_aim(&mut self) {
        self.aim = self.charge.aim_target.map(|to| AimIndicator {
            from: self.substrate.position(self.ball),
            to,
            power_fraction: self.charge.is_charging().then(|| self.charge.fraction()),
        });
    }

    fn snapshot(&self, touched: bool) -> FlightSnapshot {
        FlightSnapshot {
            ball: self.substrate.position(self.ball),
            ball_bounds: self.substrate.bounds(self.ball),
            ball_speed: self.substrate.speed(self.ball),
            keeper: self.substrate.position(self.keeper.body),
            keeper_bounds: self.substrate.bounds(self.keeper.body),
            touched,
        }
    }

    fn save_profile(&self) -> SaveProfile {
        SaveProfile {
            skill: self.keeper.skill,
            half_width: self.keeper.save_half_width,
            last_aim_miss: self.keeper.last_aim_miss,
        }
    }

    /// Events produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a pointer-down starts a charge (true) or restarts the round.
    pub fn accepting_input(&self) -> bool {
        self.shot == ShotState::Ready
    }

    pub fn shot_state(&self) -> ShotState {
        self.shot
    }

    pub fn tally(&self) -> RoundTally {
        self.tally
    }

    pub fn charge(&self) -> &ChargeController {
        &self.charge
    }

    pub fn aim_indicator(&self) -> Option<AimIndicator> {
        self.aim
    }

    pub fn ball_position(&self) -> Vec2 {
        self.substrate.position(self.ball)
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.substrate.velocity(self.ball)
    }

    pub fn keeper_position(&self) -> Vec2 {
        self.substrate.position(self.keeper.body)
    }

    pub fn keeper(&self) -> &Keeper {
        &self.keeper
    }

    pub fn goal(&self) -> &GoalGeometry {
        &self.goal
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
