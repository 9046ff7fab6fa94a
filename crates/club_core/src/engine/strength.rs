//! Team strength from a lineup

use serde::{Deserialize, Serialize};

use crate::models::{Player, PositionCategory};
use crate::tactics::{Lineup, LineupPlayer};

/// Ratings on the 1..=99 attribute scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub attack: f32,
    pub midfield: f32,
    pub defence: f32,
    pub goalkeeping: f32,
}

/// Weight of each slot category in (attack, midfield, defence)
fn unit_weights(category: PositionCategory) -> (f32, f32, f32) {
    match category {
        PositionCategory::Goalkeeper => (0.0, 0.05, 0.2),
        PositionCategory::Defender => (0.15, 0.3, 1.0),
        PositionCategory::Midfielder => (0.5, 1.0, 0.45),
        PositionCategory::Forward => (1.0, 0.3, 0.1),
    }
}

/// Fitness and morale multiplier (0.69..=1.08)
pub fn condition_factor(player: &Player) -> f32 {
    let fitness = player.fitness.min(100) as f32 / 100.0;
    let morale = player.morale.min(100) as f32 / 100.0;
    (0.75 + 0.25 * fitness) * (0.92 + 0.16 * morale)
}

/// What a player brings to the slot today
pub fn effective_rating(lp: &LineupPlayer) -> f32 {
    lp.slot_rating() * condition_factor(&lp.player)
}

const FLOOR: f32 = 5.0;

pub fn team_strength(lineup: &Lineup) -> TeamStrength {
    let mut sums = [0.0f32; 3];
    let mut weights = [0.0f32; 3];
    let mut goalkeeping = None;

    for lp in &lineup.players {
        let rating = effective_rating(lp);
        let category = lp.slot.category();
        if category == PositionCategory::Goalkeeper && goalkeeping.is_none() {
            goalkeeping = Some(rating);
        }
        let (a, m, d) = unit_weights(category);
        for (i, w) in [a, m, d].into_iter().enumerate() {
            sums[i] += rating * w;
            weights[i] += w;
        }
    }

    // A side reduced below eleven loses strength in proportion
    let numbers = (lineup.len().min(11) as f32 / 11.0).max(0.1);
    let average = |i: usize| {
        if weights[i] > 0.0 {
            (sums[i] / weights[i] * numbers).max(FLOOR)
        } else {
            FLOOR
        }
    };

    TeamStrength {
        attack: average(0),
        midfield: average(1),
        defence: average(2),
        goalkeeping: goalkeeping.unwrap_or(FLOOR).max(FLOOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Contract, PlayerAttributes, SeasonRecord};
    use crate::models::{ClubId, PlayerId, Position};
    use crate::tactics::Formation;

    fn lineup(level: u8, fitness: u8) -> Lineup {
        let players = Formation::F442
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| LineupPlayer {
                slot: slot.role,
                pitch_position: slot.pitch_position,
                player: Player {
                    id: PlayerId(i as u32),
                    name: format!("P{i}"),
                    age: 25,
                    position: slot.role,
                    attributes: PlayerAttributes::from_array([level; 7]),
                    club: Some(ClubId(0)),
                    market_value: 100_000,
                    contract: Contract {
                        weekly_wage: 1_000,
                        expires_season: 1,
                    },
                    morale: 65,
                    fitness,
                    injury: None,
                    suspension: None,
                    season_yellow_cards: 0,
                    history: vec![SeasonRecord::open(1)],
                    retired: false,
                },
            })
            .collect();
        Lineup {
            club: ClubId(0),
            players,
        }
    }

    #[test]
    fn test_better_players_are_stronger() {
        let strong = team_strength(&lineup(80, 100));
        let weak = team_strength(&lineup(50, 100));
        assert!(strong.attack > weak.attack);
        assert!(strong.defence > weak.defence);
        assert!(strong.goalkeeping > weak.goalkeeping);
    }

    #[test]
    fn test_tired_side_is_weaker() {
        let fresh = team_strength(&lineup(70, 100));
        let tired = team_strength(&lineup(70, 40));
        assert!(tired.midfield < fresh.midfield);
    }

    #[test]
    fn test_short_side_is_weaker() {
        let full = lineup(70, 100);
        let mut short = full.clone();
        short.players.truncate(9);
        let (short, full) = (team_strength(&short), team_strength(&full));
        assert!(short.defence < full.defence);
    }

    #[test]
    fn test_out_of_position_penalty() {
        let natural = lineup(70, 100);
        let mut shuffled = natural.clone();
        shuffled.players[10].player.position = Position::CB;
        let (shuffled, natural) = (team_strength(&shuffled), team_strength(&natural));
        assert!(shuffled.attack < natural.attack);
    }
}
