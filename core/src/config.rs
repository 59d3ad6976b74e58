use std::path::{Path, PathBuf};

use crate::keeper::save_half_width;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "PENALTY_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// World dimensions and simulation rate
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Fixed ticks per second. Charging is per tick, so this sets the charge feel.
    pub tick_rate_hz: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            tick_rate_hz: 60,
        }
    }
}

impl WorldConfig {
    /// Seconds per tick
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalConfig {
    pub center_x: f64,
    pub top_y: f64,
    pub width: f64,
    pub height: f64,
    /// Distance from `top_y` down to the scoring line.
    pub line_offset: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            center_x: 450.0,
            top_y: 120.0,
            width: 520.0,
            height: 120.0,
            line_offset: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BallConfig {
    pub start_x: f64,
    pub start_y: f64,
    pub radius: f64,
    /// Velocity retained after hitting a world bound.
    pub bounce: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            start_x: 450.0,
            start_y: 500.0,
            radius: 16.0,
            bounce: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct KeeperConfig {
    /// Keeper y is fixed at goal top + this offset.
    pub y_offset: f64,
    pub body_width: f64,
    pub body_height: f64,
    /// 0 = hopeless, 1 = never misreads a shot
    pub skill: f64,
    /// How much the save reach widens from skill 0 to skill 1.
    pub reach_spread: f64,
    pub min_half_width: f64,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            y_offset: 20.0,
            body_width: 80.0,
            body_height: 80.0,
            skill: 0.7,
            reach_spread: 200.0,
            min_half_width: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargeConfig {
    /// Launch speed at full charge (pixels/sec)
    pub max_power: f64,
    /// Power added per tick while the pointer is held
    pub charge_rate: f64,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            max_power: 900.0,
            charge_rate: 10.0,
        }
    }
}

/// Intercept AI and reaction dive tuning
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct KeeperTuning {
    /// Max aiming error on a normal read (pixels)
    pub aim_error: f64,
    /// Max aiming error when the keeper misreads the shot (pixels)
    pub miss_error: f64,
    /// Fraction of the ball's flight time the keeper takes to get there
    pub lead_factor: f64,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    /// Duration multiplier on a misread
    pub miss_slowdown: f64,
    pub miss_max_duration_ms: f64,
    /// Reaction dive lands within goal center +/- this
    pub dive_spread: f64,
    pub dive_duration_ms: f64,
}

impl Default for KeeperTuning {
    fn default() -> Self {
        Self {
            aim_error: 18.0,
            miss_error: 80.0,
            lead_factor: 0.9,
            min_duration_ms: 120.0,
            max_duration_ms: 700.0,
            miss_slowdown: 1.2,
            miss_max_duration_ms: 900.0,
            dive_spread: 200.0,
            dive_duration_ms: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveTuning {
    /// Proximity save chance at skill 1.0
    pub save_chance: f64,
    /// Multiplier on the save chance when the keeper misread the shot
    pub miss_penalty: f64,
    /// Below this speed a shot counts as dead
    pub stall_speed: f64,
    /// How far past the bottom of the world a ball may fly before it's dead
    pub escape_margin: f64,
}

impl Default for ResolveTuning {
    fn default() -> Self {
        Self {
            save_chance: 0.6,
            miss_penalty: 0.5,
            stall_speed: 5.0,
            escape_margin: 200.0,
        }
    }
}

/// Full game configuration. Defaults reproduce the reference pitch.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub world: WorldConfig,
    pub goal: GoalConfig,
    pub ball: BallConfig,
    pub keeper: KeeperConfig,
    pub charge: ChargeConfig,
    pub intercept: KeeperTuning,
    pub resolve: ResolveTuning,
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            goal: GoalConfig::default(),
            ball: BallConfig::default(),
            keeper: KeeperConfig::default(),
            charge: ChargeConfig::default(),
            intercept: KeeperTuning::default(),
            resolve: ResolveTuning::default(),
            rng_seed: 42,
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be > 0".to_string()));
        }
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;

        positive("goal.width", self.goal.width)?;
        positive("goal.height", self.goal.height)?;
        non_negative("goal.top_y", self.goal.top_y)?;
        if !self.goal.center_x.is_finite() || !self.goal.line_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "goal.center_x and goal.line_offset must be finite".to_string(),
            ));
        }

        positive("ball.radius", self.ball.radius)?;
        if !self.ball.start_x.is_finite() || !self.ball.start_y.is_finite() {
            return Err(ConfigError::Invalid("ball start must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.ball.bounce) {
            return Err(ConfigError::Invalid("ball.bounce must be in [0, 1]".to_string()));
        }

        if !(0.0..=1.0).contains(&self.keeper.skill) {
            return Err(ConfigError::Invalid("keeper.skill must be in [0, 1]".to_string()));
        }
        positive("keeper.body_width", self.keeper.body_width)?;
        positive("keeper.body_height", self.keeper.body_height)?;
        non_negative("keeper.reach_spread", self.keeper.reach_spread)?;
        positive("keeper.min_half_width", self.keeper.min_half_width)?;
        if !self.proximity_saves_reachable() {
            tracing::warn!(
                reach_spread = self.keeper.reach_spread,
                "keeper save reach never extends past body contact, proximity saves are disabled"
            );
        }
        if !self.keeper.y_offset.is_finite() {
            return Err(ConfigError::Invalid("keeper.y_offset must be finite".to_string()));
        }

        positive("charge.max_power", self.charge.max_power)?;
        positive("charge.charge_rate", self.charge.charge_rate)?;

        let t = &self.intercept;
        non_negative("intercept.aim_error", t.aim_error)?;
        non_negative("intercept.miss_error", t.miss_error)?;
        positive("intercept.lead_factor", t.lead_factor)?;
        non_negative("intercept.min_duration_ms", t.min_duration_ms)?;
        if !t.max_duration_ms.is_finite() || t.max_duration_ms < t.min_duration_ms {
            return Err(ConfigError::Invalid(
                "intercept.max_duration_ms must be finite and >= min_duration_ms".to_string(),
            ));
        }
        positive("intercept.miss_slowdown", t.miss_slowdown)?;
        if !t.miss_max_duration_ms.is_finite() || t.miss_max_duration_ms < t.min_duration_ms {
            return Err(ConfigError::Invalid(
                "intercept.miss_max_duration_ms must be finite and >= min_duration_ms"
                    .to_string(),
            ));
        }
        non_negative("intercept.dive_spread", t.dive_spread)?;
        non_negative("intercept.dive_duration_ms", t.dive_duration_ms)?;

        let r = &self.resolve;
        if !(0.0..=1.0).contains(&r.save_chance) {
            return Err(ConfigError::Invalid("resolve.save_chance must be in [0, 1]".to_string()));
        }
        if !(0.0..=1.0).contains(&r.miss_penalty) {
            return Err(ConfigError::Invalid("resolve.miss_penalty must be in [0, 1]".to_string()));
        }
        non_negative("resolve.stall_speed", r.stall_speed)?;
        non_negative("resolve.escape_margin", r.escape_margin)?;
        Ok(())
    }

    /// Distance between ball and keeper centers at which their boxes touch.
    pub fn contact_reach(&self) -> f64 {
        self.ball.radius + self.keeper.body_width * 0.5
    }

    /// Whether a perfect keeper's save reach goes past body contact, leaving
    /// room for the probabilistic save.
    pub fn proximity_saves_reachable(&self) -> bool {
        let best = KeeperConfig {
            skill: 1.0,
            ..self.keeper
        };
        save_half_width(&best) > self.contact_reach()
    }

    /// Parse and validate a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load the file named by `PENALTY_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                tracing::info!("Loading configuration from {}", path.display());
                Self::load(&path).map_err(|e| {
                    tracing::warn!("Rejected configuration {}: {}", path.display(), e);
                    e
                })
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn default_reach_leaves_room_for_proximity_saves() {
        let config = GameConfig::default();
        assert_eq!(config.contact_reach(), 56.0);
        assert!(config.proximity_saves_reachable());
    }

    #[test]
    fn narrow_reach_is_flagged_but_still_valid() {
        let mut config = GameConfig::default();
        config.keeper.reach_spread = 60.0;
        assert!(!config.proximity_saves_reachable());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_dt_is_sixtieth_of_a_second() {
        let dt = WorldConfig::default().dt();
        assert!((dt - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn skill_outside_unit_range_invalid() {
        let mut config = GameConfig::default();
        config.keeper.skill = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.keeper.skill = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tick_rate_invalid() {
        let mut config = GameConfig::default();
        config.world.tick_rate_hz = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn max_duration_below_min_invalid() {
        let mut config = GameConfig::default();
        config.intercept.min_duration_ms = 500.0;
        config.intercept.max_duration_ms = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_power_invalid() {
        let mut config = GameConfig::default();
        config.charge.max_power = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "keeper": { "skill": 0.25 }, "rngSeed": 7 }"#)
            .unwrap();
        assert_eq!(config.keeper.skill, 0.25);
        assert_eq!(config.keeper.body_width, 80.0);
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.charge, ChargeConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_values_in_json_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "charge": { "maxPower": -1 } }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
