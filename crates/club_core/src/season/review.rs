//! End-of-season outcomes: champions, promotion windows, awards, prize money

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::state::{GameState, SeasonPhase};
use crate::config::LeagueRules;
use crate::finance::prize_money;
use crate::league::{resolve_season_end, LeagueEntry, PromotionWindow};
use crate::models::{ClubId, NewsCategory, Player, PlayerId};
use crate::training::{apply_morale_shift, MoraleCause};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DivisionOutcome {
    pub division: u8,
    pub table: Vec<LeagueEntry>,
    pub champion: Option<ClubId>,
    pub promoted: Vec<ClubId>,
    pub relegated: Vec<ClubId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Award {
    pub player: PlayerId,
    pub club: Option<ClubId>,
    /// Average rating or goal count, depending on the award
    pub value: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SeasonAwards {
    pub best_player: Option<Award>,
    pub top_scorer: Option<Award>,
    pub best_young_player: Option<Award>,
}

impl SeasonAwards {
    pub fn winners(&self) -> impl Iterator<Item = &Award> {
        self.best_player
            .iter()
            .chain(&self.top_scorer)
            .chain(&self.best_young_player)
    }
}

/// One-shot season summary for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonReviewData {
    pub season: u16,
    pub divisions: Vec<DivisionOutcome>,
    /// Winner of the top division
    pub champion: Option<ClubId>,
    pub awards: SeasonAwards,
    pub prize_money: Vec<(ClubId, i64)>,
}

/// Promotion/relegation window of `division` in a league of `divisions`
pub fn window_for(division: u8, divisions: u8, rules: &LeagueRules) -> PromotionWindow {
    let top = division == 0;
    let bottom = division + 1 >= divisions;
    PromotionWindow {
        promoted: if top { 0 } else { rules.promotion_places },
        relegated: if bottom { 0 } else { rules.relegation_places },
    }
}

pub fn division_outcomes(state: &GameState) -> Vec<DivisionOutcome> {
    let rules = &state.config.league;
    (0..rules.divisions)
        .map(|division| {
            let table = state
                .table(division)
                .map(<[LeagueEntry]>::to_vec)
                .unwrap_or_default();
            let end = resolve_season_end(&table, window_for(division, rules.divisions, rules));
            DivisionOutcome {
                division,
                table,
                champion: end.champion,
                promoted: end.promoted,
                relegated: end.relegated,
            }
        })
        .collect()
}

struct Candidate<'a> {
    player: &'a Player,
    appearances: u16,
    goals: u16,
    average: f32,
}

impl Candidate<'_> {
    fn award(&self, value: f32) -> Award {
        Award {
            player: self.player.id,
            club: self.player.club,
            value,
        }
    }
}

fn by_rating(a: &&Candidate<'_>, b: &&Candidate<'_>) -> Ordering {
    a.average
        .total_cmp(&b.average)
        .then_with(|| b.player.id.cmp(&a.player.id))
}

fn by_goals(a: &&Candidate<'_>, b: &&Candidate<'_>) -> Ordering {
    a.goals
        .cmp(&b.goals)
        .then_with(|| b.player.id.cmp(&a.player.id))
}

/// Best player, top scorer and best young player of `season`.
///
/// Rating awards need `award_min_appearances`; ties go to the lower id.
pub fn compute_awards(players: &[Player], season: u16, rules: &LeagueRules) -> SeasonAwards {
    let candidates: Vec<Candidate<'_>> = players
        .iter()
        .filter_map(|player| {
            let record = player
                .history
                .last()
                .filter(|r| r.season == season && r.appearances > 0)?;
            Some(Candidate {
                player,
                appearances: record.appearances,
                goals: record.goals,
                average: record.average_rating(),
            })
        })
        .collect();
    let qualified: Vec<&Candidate<'_>> = candidates
        .iter()
        .filter(|c| c.appearances >= rules.award_min_appearances)
        .collect();

    let best_player = qualified
        .iter()
        .copied()
        .max_by(by_rating)
        .map(|c| c.award(c.average));
    let best_young_player = qualified
        .iter()
        .copied()
        .filter(|c| c.player.age <= rules.young_player_max_age)
        .max_by(by_rating)
        .map(|c| c.award(c.average));
    let top_scorer = candidates
        .iter()
        .filter(|c| c.goals > 0)
        .max_by(by_goals)
        .map(|c| c.award(c.goals as f32));

    SeasonAwards {
        best_player,
        top_scorer,
        best_young_player,
    }
}

/// Close the season: pay prize money, hand out awards and fill the review slot.
pub fn complete_season(state: &mut GameState) {
    let divisions = division_outcomes(state);
    let awards = compute_awards(&state.players, state.season, &state.config.league);

    let mut prizes = Vec::new();
    for outcome in &divisions {
        for (place, entry) in outcome.table.iter().enumerate() {
            let prize = prize_money(place + 1, outcome.division, &state.config.league);
            if let Some(club) = state.club_mut(entry.club) {
                club.balance += prize;
            }
            prizes.push((entry.club, prize));
        }
    }

    for winner in awards.winners() {
        if let Some(player) = state.player_mut(winner.player) {
            *player = apply_morale_shift(player.clone(), MoraleCause::AwardWon);
        }
    }

    let champion = divisions.first().and_then(|d| d.champion);
    if let Some(club) = champion.and_then(|id| state.club(id)) {
        let headline = format!("{} are champions of season {}", club.name, state.season);
        let id = club.id;
        log::info!("{}", headline);
        state.post_news(NewsCategory::Season, headline, vec![id]);
    }
    for outcome in &divisions {
        for club in &outcome.promoted {
            if let Some(name) = state.club(*club).map(|c| c.name.clone()) {
                let headline = format!("{} win promotion", name);
                state.post_news(NewsCategory::Season, headline, vec![*club]);
            }
        }
        for club in &outcome.relegated {
            if let Some(name) = state.club(*club).map(|c| c.name.clone()) {
                let headline = format!("{} are relegated", name);
                state.post_news(NewsCategory::Season, headline, vec![*club]);
            }
        }
    }

    state.season_review = Some(SeasonReviewData {
        season: state.season,
        divisions,
        champion,
        awards,
        prize_money: prizes,
    });
    state.phase = SeasonPhase::SeasonComplete;
    log::info!("season {} complete", state.season);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Contract, PlayerAttributes, SeasonRecord};
    use crate::models::Position;

    fn player(id: u32, age: u8, appearances: u16, goals: u16, average: f32) -> Player {
        Player {
            id: PlayerId(id),
            name: format!("P{id}"),
            age,
            position: Position::CM,
            attributes: PlayerAttributes::from_array([60; 7]),
            club: Some(ClubId(id % 2)),
            market_value: 500_000,
            contract: Contract {
                weekly_wage: 2_000,
                expires_season: 2,
            },
            morale: 65,
            fitness: 100,
            injury: None,
            suspension: None,
            season_yellow_cards: 0,
            history: vec![SeasonRecord {
                season: 1,
                appearances,
                goals,
                rating_points: average * appearances as f32,
                ..SeasonRecord::open(1)
            }],
            retired: false,
        }
    }

    #[test]
    fn test_windows_at_the_edges() {
        let rules = LeagueRules::default();
        let places = |division, divisions| {
            let window = window_for(division, divisions, &rules);
            (window.promoted, window.relegated)
        };
        assert_eq!(places(0, 3), (0, 2));
        assert_eq!(places(1, 3), (2, 2));
        assert_eq!(places(2, 3), (2, 0));
        assert_eq!(places(0, 1), (0, 0));
    }

    #[test]
    fn test_awards() {
        let rules = LeagueRules::default();
        let players = vec![
            player(0, 28, 18, 2, 7.4),
            player(1, 20, 18, 1, 7.1),
            player(2, 30, 3, 9, 9.5), // too few appearances for rating awards
            player(3, 25, 18, 14, 6.9),
            player(4, 19, 10, 14, 6.5),
        ];
        let awards = compute_awards(&players, 1, &rules);

        let winner = |award: &Option<Award>| award.as_ref().map(|a| a.player);
        assert_eq!(winner(&awards.best_player), Some(PlayerId(0)));
        assert_eq!(winner(&awards.best_young_player), Some(PlayerId(1)));
        // Tied on goals: lower id wins
        let top = awards.top_scorer.as_ref().unwrap();
        assert_eq!((top.player, top.value), (PlayerId(3), 14.0));
        assert_eq!(awards.winners().count(), 3);
    }

    #[test]
    fn test_no_awards_for_other_seasons() {
        let players = vec![player(0, 28, 18, 5, 7.0)];
        let awards = compute_awards(&players, 2, &LeagueRules::default());
        assert_eq!(awards, SeasonAwards::default());
    }
}
