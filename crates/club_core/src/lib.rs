//! # club_core - Football Club Management Season Engine
//!
//! Owns the authoritative game world of a single-player club management
//! game and advances it one intent at a time.
//!
//! ## Features
//! - Deterministic world generation and match simulation (same seed = same season)
//! - Day-by-day season state machine with transient UI slots
//! - League tables, promotion/relegation, awards and prize money
//! - Transfers, training, finances and player condition tracking
//!
//! The presentation layer is an external collaborator: it reads
//! [`GameState`] snapshots and dispatches [`Intent`]s through [`Game`].

// Simulation APIs carry many scalar knobs
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod engine;
pub mod error;
pub mod finance;
pub mod league;
pub mod models;
pub mod rng;
pub mod season;
pub mod tactics;
pub mod training;
pub mod transfer;
pub mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, CoreError, IllegalIntent, Result};
pub use models::{Club, ClubId, Match, MatchId, Player, PlayerId, Position, PositionCategory};
pub use season::{Game, GameState, Intent, SeasonPhase};
pub use transfer::{TransferOffer, TransferResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
