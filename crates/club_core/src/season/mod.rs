//! Season state machine
//!
//! [`GameState`] is the whole world; [`reduce`] maps a state and an
//! [`Intent`] to the next state. [`Game`] holds the live state and hands
//! out snapshots.

mod daily;
pub mod game;
pub mod intent;
mod matchday;
mod newseason;
pub mod reducer;
pub mod review;
pub mod state;

pub use game::Game;
pub use intent::{authorize, Actor, Intent};
pub use reducer::reduce;
pub use review::{Award, DivisionOutcome, SeasonAwards, SeasonReviewData};
pub use state::{GameState, MatchDay, SeasonPhase};
