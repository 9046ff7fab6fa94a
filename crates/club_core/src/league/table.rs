//! League standings
//!
//! The table is a projection of played matches: it is recomputed from
//! scratch, never patched.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ClubId, Match};

pub const POINTS_WIN: u16 = 3;
pub const POINTS_DRAW: u16 = 1;
/// Results kept in an entry's form guide
pub const FORM_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormResult {
    W,
    D,
    L,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueEntry {
    pub club: ClubId,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub points: u16,
    /// Most recent last
    pub form: Vec<FormResult>,
}

impl LeagueEntry {
    pub fn new(club: ClubId) -> Self {
        Self {
            club,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
            form: Vec::new(),
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += scored as u16;
        self.goals_against += conceded as u16;
        let result = match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_WIN;
                FormResult::W
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += POINTS_DRAW;
                FormResult::D
            }
            Ordering::Less => {
                self.lost += 1;
                FormResult::L
            }
        };
        self.form.push(result);
        if self.form.len() > FORM_LENGTH {
            self.form.remove(0);
        }
    }
}

/// Table order: points, goal difference, goals for (all descending), then club id.
pub fn compare_entries(a: &LeagueEntry, b: &LeagueEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.club.cmp(&b.club))
}

/// Standings of `clubs` from the played matches among `matches`.
///
/// Matches involving clubs outside the list are ignored; clubs without a
/// played match still get a (zeroed) entry.
pub fn compute_table<'a>(
    clubs: &[ClubId],
    matches: impl IntoIterator<Item = &'a Match>,
) -> Vec<LeagueEntry> {
    let mut entries: BTreeMap<ClubId, LeagueEntry> = clubs
        .iter()
        .map(|c| (*c, LeagueEntry::new(*c)))
        .collect();

    // Form needs chronological order regardless of how the caller stores fixtures
    let mut played: Vec<&Match> = matches
        .into_iter()
        .filter(|m| m.is_played())
        .filter(|m| entries.contains_key(&m.home) && entries.contains_key(&m.away))
        .collect();
    played.sort_by_key(|m| (m.date, m.id));

    for m in played {
        let Some((home_goals, away_goals)) = m.score() else {
            continue;
        };
        if let Some(entry) = entries.get_mut(&m.home) {
            entry.record(home_goals, away_goals);
        }
        if let Some(entry) = entries.get_mut(&m.away) {
            entry.record(away_goals, home_goals);
        }
    }

    let mut table: Vec<LeagueEntry> = entries.into_values().collect();
    table.sort_by(compare_entries);
    table
}

/// How many places move up and down at season end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionWindow {
    pub promoted: usize,
    pub relegated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonEnd {
    pub champion: Option<ClubId>,
    pub promoted: Vec<ClubId>,
    pub relegated: Vec<ClubId>,
}

/// Champion plus the clubs in the promotion and relegation windows.
///
/// A window wider than the table takes as many clubs as exist; promotion
/// is filled first and the two sets never overlap.
pub fn resolve_season_end(table: &[LeagueEntry], window: PromotionWindow) -> SeasonEnd {
    let promoted_count = window.promoted.min(table.len());
    let relegated_count = window.relegated.min(table.len() - promoted_count);

    let bottom = &table[table.len() - relegated_count..];
    SeasonEnd {
        champion: table.first().map(|e| e.club),
        promoted: table[..promoted_count].iter().map(|e| e.club).collect(),
        relegated: bottom.iter().map(|e| e.club).collect(),
    }
}

/// Points share over the club's last five played matches (0.0..=1.0).
///
/// A club with no played match is neutral (0.5).
pub fn form_strength<'a>(club: ClubId, matches: impl IntoIterator<Item = &'a Match>) -> f32 {
    let mut recent: Vec<&Match> = matches
        .into_iter()
        .filter(|m| m.is_played() && m.involves(club))
        .collect();
    if recent.is_empty() {
        return 0.5;
    }
    recent.sort_by_key(|m| (m.date, m.id));
    let last = &recent[recent.len().saturating_sub(FORM_LENGTH)..];

    let points: u16 = last
        .iter()
        .filter_map(|m| m.points_for(club))
        .map(u16::from)
        .sum();
    points as f32 / (last.len() as u16 * POINTS_WIN) as f32
}
