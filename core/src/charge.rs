use crate::config::ChargeConfig;
use crate::round::ShotState;
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePhase {
    #[default]
    Idle,
    Charging,
}

/// What the pointer left behind when the charge was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub power: f64,
    pub aim_target: Option<Vec2>,
}

/// Pointer-driven power accumulation.
#[derive(Debug, Clone, Copy)]
pub struct ChargeController {
    pub phase: ChargePhase,
    pub power: f64,
    /// Last known pointer position
    pub aim_target: Option<Vec2>,
    config: ChargeConfig,
}

impl ChargeController {
    pub fn new(config: ChargeConfig) -> Self {
        Self {
            phase: ChargePhase::Idle,
            power: 0.0,
            aim_target: None,
            config,
        }
    }

    pub fn max_power(&self) -> f64 {
        self.config.max_power
    }

    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }

    /// Charge progress in [0, 1].
    pub fn fraction(&self) -> f64 {
        (self.power / self.config.max_power).clamp(0.0, 1.0)
    }

    /// Start charging from zero. Ignored unless the shot is ready.
    pub fn pointer_down(&mut self, shot: ShotState) -> bool {
        if shot != ShotState::Ready {
            return false;
        }
        self.phase = ChargePhase::Charging;
        self.power = 0.0;
        true
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        self.aim_target = Some(p);
    }

    /// Add one tick's worth of power. The increment is per tick, not per second.
    pub fn tick(&mut self) {
        if self.phase == ChargePhase::Charging {
            self.power = (self.power + self.config.charge_rate).clamp(0.0, self.config.max_power);
        }
    }

    /// Finish the charge. Only a charge started while the shot is ready fires.
    pub fn pointer_up(&mut self, shot: ShotState) -> Option<Release> {
        if self.phase != ChargePhase::Charging || shot != ShotState::Ready {
            return None;
        }
        self.phase = ChargePhase::Idle;
        Some(Release {
            power: self.power,
            aim_target: self.aim_target,
        })
    }

    /// Back to idle for a new round. The pointer position is kept.
    pub fn reset(&mut self) {
        self.phase = ChargePhase::Idle;
        self.power = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Outcome;
    use crate::vec2::vec2;

    fn charger() -> ChargeController {
        ChargeController::new(ChargeConfig::default())
    }

    #[test]
    fn idle_does_not_charge() {
        let mut c = charger();
        for _ in 0..10 {
            c.tick();
        }
        assert_eq!(c.power, 0.0);
        assert_eq!(c.phase, ChargePhase::Idle);
    }

    #[test]
    fn charges_fixed_amount_per_tick() {
        let mut c = charger();
        assert!(c.pointer_down(ShotState::Ready));
        for _ in 0..7 {
            c.tick();
        }
        assert_eq!(c.power, 70.0);
    }

    #[test]
    fn power_caps_at_max() {
        let mut c = charger();
        c.pointer_down(ShotState::Ready);
        for _ in 0..1000 {
            c.tick();
            assert!(c.power <= c.max_power());
            assert!(c.power >= 0.0);
        }
        assert_eq!(c.power, 900.0);
        assert_eq!(c.fraction(), 1.0);
    }

    #[test]
    fn odd_rate_still_clamps_exactly() {
        let mut c = ChargeController::new(ChargeConfig {
            max_power: 100.0,
            charge_rate: 33.0,
        });
        c.pointer_down(ShotState::Ready);
        for _ in 0..4 {
            c.tick();
        }
        assert_eq!(c.power, 100.0);
    }

    #[test]
    fn pointer_down_restarts_from_zero() {
        let mut c = charger();
        c.pointer_down(ShotState::Ready);
        c.tick();
        c.tick();
        c.pointer_down(ShotState::Ready);
        assert_eq!(c.power, 0.0);
        assert!(c.is_charging());
    }

    #[test]
    fn pointer_down_ignored_unless_ready() {
        let mut c = charger();
        assert!(!c.pointer_down(ShotState::InFlight));
        assert!(!c.pointer_down(ShotState::Resolved(Outcome::Goal)));
        assert_eq!(c.phase, ChargePhase::Idle);
    }

    #[test]
    fn release_reports_power_and_aim() {
        let mut c = charger();
        c.pointer_move(vec2(400.0, 560.0));
        c.pointer_down(ShotState::Ready);
        for _ in 0..50 {
            c.tick();
        }
        let release = c.pointer_up(ShotState::Ready).unwrap();
        assert_eq!(release.power, 500.0);
        assert_eq!(release.aim_target, Some(vec2(400.0, 560.0)));
        assert_eq!(c.phase, ChargePhase::Idle);
    }

    #[test]
    fn release_without_charge_is_noop() {
        let mut c = charger();
        assert!(c.pointer_up(ShotState::Ready).is_none());
    }

    #[test]
    fn release_while_in_flight_is_noop() {
        let mut c = charger();
        c.pointer_down(ShotState::Ready);
        assert!(c.pointer_up(ShotState::InFlight).is_none());
        assert!(c.is_charging());
    }

    #[test]
    fn reset_keeps_pointer() {
        let mut c = charger();
        c.pointer_move(vec2(1.0, 2.0));
        c.pointer_down(ShotState::Ready);
        c.tick();
        c.reset();
        assert_eq!(c.power, 0.0);
        assert_eq!(c.phase, ChargePhase::Idle);
        assert_eq!(c.aim_target, Some(vec2(1.0, 2.0)));
    }
}
