//! World Generator

pub mod generator;
pub mod names;

pub use generator::{empty_standings, first_round_date, generate, youth_player};
