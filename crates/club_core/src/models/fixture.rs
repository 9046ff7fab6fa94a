use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ClubId, MatchId, PlayerId};
use super::position::Position;
use crate::error::CoreError;

/// Aggregated statistics for one side of a played match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamStats {
    /// Percentage of the ball, both sides sum to 100
    pub possession: f32,
    pub shots: u16,
    pub shots_on_target: u16,
    pub xg: f32,
    pub passes: u16,
    pub pass_accuracy: f32,
    pub tackles: u16,
    pub fouls: u16,
    pub corners: u16,
    pub yellow_cards: u8,
    pub red_cards: u8,
}

/// Normalized pitch coordinates: x across (0 = left touchline), y along
/// (0 = own goal line).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PitchPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupSlot {
    pub player: PlayerId,
    pub role: Position,
    pub pitch_position: PitchPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerMatchStats {
    pub club: Option<ClubId>,
    pub minutes: u8,
    pub goals: u8,
    pub assists: u8,
    pub shots: u8,
    pub tackles: u8,
    /// 1.0..=10.0
    pub rating: f32,
    pub yellow_cards: u8,
    pub red_card: bool,
    pub injured: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    KickOff,
    Goal,
    ShotSaved,
    ShotMissed,
    YellowCard,
    SecondYellow,
    RedCard,
    Injury,
    HalfTime,
    FullTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    pub description: String,
}

/// Everything a played fixture produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    pub home_goals: u8,
    pub away_goals: u8,
    pub home_stats: TeamStats,
    pub away_stats: TeamStats,
    pub home_lineup: Vec<LineupSlot>,
    pub away_lineup: Vec<LineupSlot>,
    pub player_stats: BTreeMap<PlayerId, PlayerMatchStats>,
    /// Ordered by minute; same-minute events keep insertion order
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchResultKind {
    HomeWin,
    Draw,
    AwayWin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub season: u16,
    pub division: u8,
    /// Zero-based round of the double round robin
    pub round: u16,
    pub date: NaiveDate,
    pub home: ClubId,
    pub away: ClubId,
    pub outcome: Option<MatchOutcome>,
}

impl Match {
    pub fn is_played(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn involves(&self, club: ClubId) -> bool {
        self.home == club || self.away == club
    }

    pub fn opponent_of(&self, club: ClubId) -> Option<ClubId> {
        if self.home == club {
            Some(self.away)
        } else if self.away == club {
            Some(self.home)
        } else {
            None
        }
    }

    pub fn score(&self) -> Option<(u8, u8)> {
        self.outcome.as_ref().map(|o| (o.home_goals, o.away_goals))
    }

    pub fn result_kind(&self) -> Option<MatchResultKind> {
        self.score().map(|(h, a)| match h.cmp(&a) {
            std::cmp::Ordering::Greater => MatchResultKind::HomeWin,
            std::cmp::Ordering::Equal => MatchResultKind::Draw,
            std::cmp::Ordering::Less => MatchResultKind::AwayWin,
        })
    }

    /// League points `club` took from this match
    pub fn points_for(&self, club: ClubId) -> Option<u8> {
        let kind = self.result_kind()?;
        let points = match (kind, club == self.home) {
            (MatchResultKind::Draw, _) => 1,
            (MatchResultKind::HomeWin, true) | (MatchResultKind::AwayWin, false) => 3,
            _ => 0,
        };
        self.involves(club).then_some(points)
    }

    /// Store the outcome. A fixture is played exactly once.
    pub fn record(&mut self, outcome: MatchOutcome) -> crate::Result<()> {
        if self.is_played() {
            return Err(CoreError::Invariant(format!("{} was already played", self.id)));
        }
        self.outcome = Some(outcome);
        Ok(())
    }
}

/// A season's fixture list across all divisions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Schedule {
    pub season: u16,
    /// Indexed by `MatchId`
    pub matches: Vec<Match>,
}

impl Schedule {
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.index())
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id.index())
    }

    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.date == date)
    }

    /// Unplayed fixtures scheduled for `date`, in id order
    pub fn unplayed_on(&self, date: NaiveDate) -> Vec<MatchId> {
        self.on_date(date)
            .filter(|m| !m.is_played())
            .map(|m| m.id)
            .collect()
    }

    pub fn played(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_played())
    }

    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(Match::is_played)
    }

    pub fn in_division(&self, division: u8) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.division == division)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.matches.iter().map(|m| m.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.matches.iter().map(|m| m.date).max()
    }

    /// Next unplayed fixture of `club` on or after `date`
    pub fn next_fixture(&self, club: ClubId, date: NaiveDate) -> Option<&Match> {
        self.matches
            .iter()
            .filter(|m| m.involves(club) && !m.is_played() && m.date >= date)
            .min_by_key(|m| (m.date, m.id))
    }
}
