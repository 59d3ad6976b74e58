//! Random draws used by the keeper.
//!
//! Every random decision in a round goes through [`Dice`], so a session can be
//! driven by a seeded `ChaCha8Rng` or by a fixed list of rolls.

use std::collections::VecDeque;

use rand::Rng;

/// Largest f64 below 1.0
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

pub trait Dice {
    /// Uniform draw in [0, 1).
    fn roll(&mut self) -> f64;

    /// Uniform draw in [min, max).
    fn between(&mut self, min: f64, max: f64) -> f64 {
        min + self.roll() * (max - min)
    }

    /// Bernoulli trial with success probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Plays back a fixed sequence of rolls, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Every roll returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([]).with_fallback(value)
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }

    /// Rolls still queued before the fallback kicks in.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        self.rolls
            .pop_front()
            .unwrap_or(self.fallback)
            .clamp(0.0, BELOW_ONE)
    }
}
