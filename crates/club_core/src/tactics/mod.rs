//! Tactics: formations, team instructions and squad selection

pub mod formation;
pub mod instructions;
pub mod lineup;

pub use formation::{Formation, FormationSlot};
pub use instructions::{Mentality, Tactics, TeamPressing, TeamTempo};
pub use lineup::{
    assign_slots, pick_lineup, validate_lineup, BestAvailable, Lineup, LineupError, LineupPlayer,
    LineupStrategy,
};
