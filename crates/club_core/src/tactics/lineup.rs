//! Squad selection
//!
//! A [`LineupStrategy`] decides who starts; [`pick_lineup`] turns that
//! choice (or the manager's own pick) into slot assignments.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::formation::{Formation, FormationSlot};
use crate::models::{Club, ClubId, PitchPosition, Player, PlayerId, Position};

/// Eleven (or fewer, for a depleted squad) players in formation slot order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lineup {
    pub club: ClubId,
    pub players: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupPlayer {
    pub slot: Position,
    pub pitch_position: PitchPosition,
    pub player: Player,
}

impl LineupPlayer {
    /// Role-weighted ability in the assigned slot, with the out-of-position penalty
    pub fn slot_rating(&self) -> f32 {
        self.player.attributes.rating_for(self.slot) * self.player.position.familiarity(self.slot)
    }
}

impl Lineup {
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.player.id).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Pluggable squad selection for computer-controlled clubs
pub trait LineupStrategy: Send + Sync + Debug {
    /// Up to eleven players from `candidates`, best first. Candidates are
    /// all available.
    fn select(&self, formation: Formation, candidates: &[&Player]) -> Vec<PlayerId>;
}

/// Fills each slot with the best available player for it, exact role
/// first, then same category, then anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestAvailable;

impl LineupStrategy for BestAvailable {
    fn select(&self, formation: Formation, candidates: &[&Player]) -> Vec<PlayerId> {
        assign_slots(formation, candidates)
            .into_iter()
            .map(|(_, player)| player.id)
            .collect()
    }
}

fn slot_score(player: &Player, slot: &FormationSlot) -> f32 {
    player.attributes.rating_for(slot.role) * player.position.familiarity(slot.role)
}

/// Greedy slot assignment in formation order. Ties go to the lower id.
pub fn assign_slots<'a>(
    formation: Formation,
    candidates: &[&'a Player],
) -> Vec<(FormationSlot, &'a Player)> {
    let mut taken = BTreeSet::new();
    let mut assigned = Vec::with_capacity(11);

    for slot in formation.slots() {
        let best = candidates
            .iter()
            .filter(|p| !taken.contains(&p.id))
            .max_by(|a, b| {
                slot_score(a, slot)
                    .total_cmp(&slot_score(b, slot))
                    .then_with(|| b.id.cmp(&a.id))
            });
        if let Some(player) = best {
            taken.insert(player.id);
            assigned.push((*slot, *player));
        }
    }
    assigned
}

/// Build the starting lineup of `club`.
///
/// The manager's pick is honoured for every player still available; gaps
/// are filled by `strategy`.
pub fn pick_lineup(club: &Club, squad: &[&Player], strategy: &dyn LineupStrategy) -> Lineup {
    let available: Vec<&Player> = squad
        .iter()
        .copied()
        .filter(|p| p.club == Some(club.id) && p.is_available())
        .collect();
    let formation = club.tactics.formation;

    let mut chosen: Vec<&Player> = Vec::with_capacity(11);
    if let Some(manual) = &club.manual_lineup {
        for id in manual {
            if let Some(player) = available.iter().find(|p| p.id == *id) {
                if !chosen.iter().any(|c| c.id == *id) {
                    chosen.push(*player);
                }
            }
        }
    }

    if chosen.len() < 11 {
        let rest: Vec<&Player> = available
            .iter()
            .copied()
            .filter(|p| !chosen.iter().any(|c| c.id == p.id))
            .collect();
        let keepers: BTreeSet<PlayerId> = rest
            .iter()
            .filter(|p| p.position.is_goalkeeper())
            .map(|p| p.id)
            .collect();
        let picks = strategy.select(formation, &rest);

        // Exactly one natural keeper: the manager's if picked, else the strategy's first
        let mut ordered: Vec<PlayerId> = Vec::with_capacity(picks.len());
        if !chosen.iter().any(|p| p.position.is_goalkeeper()) {
            if let Some(gk) = picks.iter().find(|id| keepers.contains(*id)) {
                ordered.push(*gk);
            }
        }
        ordered.extend(picks.iter().filter(|id| !keepers.contains(*id)));

        for id in ordered {
            if chosen.len() >= 11 {
                break;
            }
            if let Some(player) = rest.iter().find(|p| p.id == id) {
                chosen.push(*player);
            }
        }

        // Strategy came up short: best remaining outfielders
        if chosen.len() < 11 {
            let mut spare: Vec<&Player> = rest
                .iter()
                .copied()
                .filter(|p| {
                    let taken = chosen.iter().any(|c| c.id == p.id);
                    !p.position.is_goalkeeper() && !taken
                })
                .collect();
            spare.sort_by_key(|p| (Reverse(p.overall()), p.id));
            let missing = 11 - chosen.len();
            chosen.extend(spare.into_iter().take(missing));
        }
    }

    let players = assign_slots(formation, &chosen)
        .into_iter()
        .map(|(slot, player)| LineupPlayer {
            slot: slot.role,
            pitch_position: slot.pitch_position,
            player: player.clone(),
        })
        .collect();

    Lineup {
        club: club.id,
        players,
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error("a lineup needs 11 players, got {0}")]
    WrongSize(usize),

    #[error("{0} is listed twice")]
    Duplicate(PlayerId),

    #[error("{0} does not exist")]
    UnknownPlayer(PlayerId),

    #[error("{0} does not play for the club")]
    NotInClub(PlayerId),

    #[error("{0} is injured or suspended")]
    Unavailable(PlayerId),

    #[error("a lineup needs exactly one goalkeeper, got {0}")]
    GoalkeeperCount(usize),
}

/// Eleven distinct available players of `club` with exactly one goalkeeper.
///
/// `players` is the world's player table, indexed by id.
pub fn validate_lineup(
    club: ClubId,
    ids: &[PlayerId],
    players: &[Player],
) -> Result<(), LineupError> {
    if ids.len() != 11 {
        return Err(LineupError::WrongSize(ids.len()));
    }

    let mut seen = BTreeSet::new();
    let mut keepers = 0;
    for id in ids {
        if !seen.insert(*id) {
            return Err(LineupError::Duplicate(*id));
        }
        let player = players
            .get(id.index())
            .ok_or(LineupError::UnknownPlayer(*id))?;
        if player.club != Some(club) {
            return Err(LineupError::NotInClub(*id));
        }
        if !player.is_available() {
            return Err(LineupError::Unavailable(*id));
        }
        if player.position.is_goalkeeper() {
            keepers += 1;
        }
    }

    if keepers != 1 {
        return Err(LineupError::GoalkeeperCount(keepers));
    }
    Ok(())
}
