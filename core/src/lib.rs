//! Penalty shootout simulation core.
//!
//! Everything that decides a shot lives here: charging, launching, the
//! keeper's intercept AI and outcome adjudication, driven tick by tick by the
//! [`round::RoundController`] over any [`substrate::Substrate`].

pub mod arcade;
pub mod bot;
pub mod charge;
pub mod config;
pub mod dice;
pub mod geometry;
pub mod keeper;
pub mod launch;
pub mod resolve;
pub mod round;
pub mod session;
pub mod substrate;
pub mod vec2;
