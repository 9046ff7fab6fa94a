use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::error::IllegalIntent;
use crate::models::{ClubId, PlayerId};
use crate::tactics::Tactics;
use crate::training::{TrainingFocus, TrainingIntensity};
use crate::transfer::TransferOffer;

/// A discrete request to change the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    AdvanceDay,
    SimulateMatchDay,
    SelectClub { club: ClubId },
    MakeTransferOffer(TransferOffer),
    SetTactics {
        club: ClubId,
        tactics: Tactics,
        lineup: Option<Vec<PlayerId>>,
    },
    SetTraining {
        club: ClubId,
        focus: TrainingFocus,
        intensity: TrainingIntensity,
    },
    StartNewSeason,
    ClearMatchDayFixtures,
    ClearMatchResults,
    ClearTransferResult,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AdvanceDay => "ADVANCE_DAY",
            Intent::SimulateMatchDay => "SIMULATE_MATCH_DAY",
            Intent::SelectClub { .. } => "SELECT_CLUB",
            Intent::MakeTransferOffer(_) => "MAKE_TRANSFER_OFFER",
            Intent::SetTactics { .. } => "SET_TACTICS",
            Intent::SetTraining { .. } => "SET_TRAINING",
            Intent::StartNewSeason => "START_NEW_SEASON",
            Intent::ClearMatchDayFixtures => "CLEAR_MATCH_DAY_FIXTURES",
            Intent::ClearMatchResults => "CLEAR_MATCH_RESULTS",
            Intent::ClearTransferResult => "CLEAR_TRANSFER_RESULT",
        }
    }
}

/// Who is acting on a club's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The human manager of the user's club
    Manager,
    /// The computer running an AI club
    Ai(ClubId),
}

/// Check that `actor` may act for `club`.
///
/// The manager may only act for the user's club; an AI club only for
/// itself and never for the user's club.
pub fn authorize(
    state: &GameState,
    actor: Actor,
    club: ClubId,
    intent: &'static str,
) -> Result<(), IllegalIntent> {
    if state.club(club).is_none() {
        return Err(IllegalIntent::new(intent, format!("{} does not exist", club)));
    }
    match actor {
        Actor::Manager => match state.user_club {
            Some(user) if user == club => Ok(()),
            Some(_) => {
                let reason = format!("{} is not managed by the user", club);
                Err(IllegalIntent::new(intent, reason))
            }
            None => Err(IllegalIntent::new(intent, "no club has been selected")),
        },
        Actor::Ai(acting) if acting != club => {
            Err(IllegalIntent::new(intent, format!("{} cannot act for {}", acting, club)))
        }
        Actor::Ai(acting) if state.is_user_club(acting) => {
            Err(IllegalIntent::new(intent, format!("{} is controlled by the user", acting)))
        }
        Actor::Ai(_) => Ok(()),
    }
}
