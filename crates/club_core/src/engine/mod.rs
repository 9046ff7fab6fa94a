//! Match engine
//!
//! Resolves a fixture from two lineups and their tactics into a full
//! [`MatchReport`]: score, team and player statistics, an ordered event
//! log, and the updated players.

pub mod cards;
pub mod ratings;
pub mod simulate;
pub mod strength;

pub use simulate::{expected_goals, simulate, FormStrengths, MatchContext, MatchReport};
pub use strength::{team_strength, TeamStrength};
