//! The aggregate root of a running game

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::review::SeasonReviewData;
use crate::config::WorldConfig;
use crate::league::LeagueEntry;
use crate::models::{
    Club, ClubId, Match, MatchId, NewsCategory, NewsFeed, Player, PlayerId, Schedule,
};
use crate::transfer::TransferResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeasonPhase {
    /// World generated, no club bound yet
    PreSeason,
    InSeason,
    /// Every fixture played; waiting for the next season to start
    SeasonComplete,
}

/// Fixtures of one match day, the user's own game split out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchDay {
    pub date: NaiveDate,
    pub user_match: Option<Match>,
    pub other_matches: Vec<Match>,
}

impl MatchDay {
    pub fn from_matches<'a>(
        date: NaiveDate,
        matches: impl IntoIterator<Item = &'a Match>,
        user: Option<ClubId>,
    ) -> Self {
        let mut user_match = None;
        let mut other_matches = Vec::new();
        for m in matches {
            if user.is_some_and(|club| m.involves(club)) {
                user_match = Some(m.clone());
            } else {
                other_matches.push(m.clone());
            }
        }
        Self {
            date,
            user_match,
            other_matches,
        }
    }

    pub fn len(&self) -> usize {
        self.other_matches.len() + self.user_match.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> impl Iterator<Item = &Match> {
        self.user_match.iter().chain(self.other_matches.iter())
    }
}

/// Complete world state, replaced wholesale on every accepted intent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub season: u16,
    pub date: NaiveDate,
    pub phase: SeasonPhase,
    pub config: WorldConfig,
    /// Indexed by `ClubId`
    pub clubs: Vec<Club>,
    /// Indexed by `PlayerId`; retired players stay for their history
    pub players: Vec<Player>,
    pub schedule: Schedule,
    /// One sorted table per division
    pub standings: Vec<Vec<LeagueEntry>>,
    pub user_club: Option<ClubId>,

    // Transient slots, cleared by the presentation layer
    pub match_day_fixtures: Option<MatchDay>,
    pub match_results: Option<MatchDay>,
    pub transfer_result: Option<TransferResult>,
    pub season_review: Option<SeasonReviewData>,

    pub news: NewsFeed,
}

impl GameState {
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.get(id.index())
    }

    pub fn club_mut(&mut self, id: ClubId) -> Option<&mut Club> {
        self.clubs.get_mut(id.index())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn fixture(&self, id: MatchId) -> Option<&Match> {
        self.schedule.get(id)
    }

    pub fn is_user_club(&self, club: ClubId) -> bool {
        self.user_club == Some(club)
    }

    /// Current players of `club`, in id order
    pub fn squad(&self, club: ClubId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.club == Some(club))
            .collect()
    }

    pub fn squad_size(&self, club: ClubId) -> usize {
        self.players.iter().filter(|p| p.club == Some(club)).count()
    }

    pub fn division_count(&self) -> usize {
        self.config.league.divisions as usize
    }

    /// Clubs currently in `division`, in id order
    pub fn division_clubs(&self, division: u8) -> Vec<ClubId> {
        self.clubs
            .iter()
            .filter(|c| c.division == division)
            .map(|c| c.id)
            .collect()
    }

    pub fn divisions(&self) -> Vec<Vec<ClubId>> {
        (0..self.config.league.divisions)
            .map(|d| self.division_clubs(d))
            .collect()
    }

    /// Table of `division`, if it exists
    pub fn table(&self, division: u8) -> Option<&[LeagueEntry]> {
        self.standings.get(division as usize).map(Vec::as_slice)
    }

    /// 1-based league position of `club` in its division
    pub fn position_of(&self, club: ClubId) -> Option<usize> {
        let division = self.club(club)?.division;
        self.table(division)?
            .iter()
            .position(|e| e.club == club)
            .map(|p| p + 1)
    }

    pub fn has_fixtures_today(&self) -> bool {
        self.schedule.on_date(self.date).any(|m| !m.is_played())
    }

    /// Post a story dated today
    pub fn post_news(
        &mut self,
        category: NewsCategory,
        headline: impl Into<String>,
        clubs: Vec<ClubId>,
    ) {
        self.news.post(self.date, category, headline, clubs);
    }

    /// Next unplayed match of the user's club
    pub fn next_user_fixture(&self) -> Option<&Match> {
        self.schedule.next_fixture(self.user_club?, self.date)
    }
}
