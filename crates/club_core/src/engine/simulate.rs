//! Statistical match simulation
//!
//! A match is resolved from expected goals rather than ball physics:
//! strengths give each side an xG, shots are drawn around it, and every
//! incident (shot, foul, injury) is replayed in minute order so players
//! who leave the pitch take no further part.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

use super::cards::{CardResult, CardSystem, CardType};
use super::ratings::{player_rating, RatingContext};
use super::strength::{effective_rating, team_strength, TeamStrength};
use crate::config::ConditionRules;
use crate::models::{
    EventKind, InjuryKind, LineupSlot, MatchEvent, MatchOutcome, Player, PlayerId,
    PlayerMatchStats, PositionCategory, TeamStats,
};
use crate::tactics::{Lineup, LineupPlayer, Tactics};
use crate::training::{apply_match_load, MatchLoad};

/// Goals expected from an even contest before venue and tactics
pub const BASE_XG: f32 = 1.35;
/// Average xG of a single shot
pub const MEAN_SHOT_XG: f32 = 0.11;
pub const HOME_ADVANTAGE: f32 = 1.08;
pub const AWAY_FACTOR: f32 = 0.95;
pub const XG_FLOOR: f32 = 0.15;
pub const XG_CEILING: f32 = 4.5;

const MAX_SHOT_XG: f32 = 0.8;
const YELLOW_PER_FOUL: f64 = 0.14;
const RED_PER_FOUL: f64 = 0.006;
const ASSIST_SHARE: f64 = 0.7;
const SAVED_SHARE: f64 = 0.3;

/// Recent form of both sides (0.0..=1.0, 0.5 = neutral)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormStrengths {
    pub home: f32,
    pub away: f32,
}

impl Default for FormStrengths {
    fn default() -> Self {
        Self {
            home: 0.5,
            away: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub season: u16,
    pub date: NaiveDate,
    pub rules: &'a ConditionRules,
}

/// Outcome plus the updated values of every player who featured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub players: Vec<Player>,
}

/// Expected goals for `attacking` against `defending`.
pub fn expected_goals(
    attacking: &TeamStrength,
    defending: &TeamStrength,
    attacking_tactics: &Tactics,
    defending_tactics: &Tactics,
    at_home: bool,
    form: f32,
) -> f32 {
    let resistance = (defending.defence * 0.75 + defending.goalkeeping * 0.25).max(1.0);
    let ratio = (attacking.attack / resistance).clamp(0.4, 2.5);
    let control = attacking.midfield / (attacking.midfield + defending.midfield).max(1.0);
    let venue = if at_home { HOME_ADVANTAGE } else { AWAY_FACTOR };

    let xg = BASE_XG
        * ratio
        * ratio
        * (0.6 + 0.8 * control)
        * attacking_tactics.attack_modifier()
        * defending_tactics.exposure_modifier()
        * venue
        * (0.9 + 0.2 * form.clamp(0.0, 1.0));
    xg.clamp(XG_FLOOR, XG_CEILING)
}

fn poisson(lambda: f64, rng: &mut impl Rng) -> u16 {
    Poisson::new(lambda.max(0.01))
        .map(|d| d.sample(rng) as u16)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
enum Incident {
    Shot { side: usize, quality: f32 },
    Foul { side: usize },
    Injury { side: usize, player: PlayerId },
}

fn shot_weight(lp: &LineupPlayer) -> f64 {
    let role = match lp.slot.category() {
        PositionCategory::Forward => 5.0,
        PositionCategory::Midfielder => {
            if lp.slot == crate::models::Position::CAM {
                3.5
            } else {
                2.5
            }
        }
        PositionCategory::Defender => 0.7,
        PositionCategory::Goalkeeper => 0.0,
    };
    role * (lp.player.attributes.shooting as f64 / 50.0 + 0.2)
}

fn assist_weight(lp: &LineupPlayer) -> f64 {
    let role = match lp.slot.category() {
        PositionCategory::Midfielder => 3.0,
        PositionCategory::Forward => 2.0,
        PositionCategory::Defender => 1.0,
        PositionCategory::Goalkeeper => 0.05,
    };
    role * (lp.player.attributes.passing as f64 / 50.0 + 0.2)
}

fn foul_weight(lp: &LineupPlayer) -> f64 {
    if lp.slot.is_goalkeeper() {
        return 0.05;
    }
    (lp.player.attributes.defending as f64 + lp.player.attributes.physical as f64) / 100.0 + 0.3
}

fn tackle_weight(lp: &LineupPlayer) -> f64 {
    if lp.slot.is_goalkeeper() {
        return 0.0;
    }
    lp.player.attributes.defending as f64 / 50.0 + 0.1
}

/// Mutable bookkeeping for one side during the replay
struct Side<'a> {
    lineup: &'a Lineup,
    tactics: &'a Tactics,
    stats: TeamStats,
    goals: u8,
    saves: u8,
}

impl<'a> Side<'a> {
    fn new(lineup: &'a Lineup, tactics: &'a Tactics) -> Self {
        Self {
            lineup,
            tactics,
            stats: TeamStats::default(),
            goals: 0,
            saves: 0,
        }
    }

    fn player(&self, id: PlayerId) -> Option<&'a LineupPlayer> {
        let lineup: &'a Lineup = self.lineup;
        lineup.players.iter().find(|lp| lp.player.id == id)
    }

    /// Starters neither sent off nor injured
    fn on_pitch(&self, cards: &CardSystem, injured: &BTreeSet<PlayerId>) -> Vec<&'a LineupPlayer> {
        let lineup: &'a Lineup = self.lineup;
        lineup
            .players
            .iter()
            .filter(|lp| {
                let id = lp.player.id;
                !cards.is_dismissed(id) && !injured.contains(&id)
            })
            .collect()
    }
}

/// Simulate one fixture.
///
/// Pure in its inputs: the same lineups, tactics, form, context and RNG
/// state always produce the same report.
pub fn simulate(
    home: &Lineup,
    away: &Lineup,
    home_tactics: &Tactics,
    away_tactics: &Tactics,
    form: FormStrengths,
    ctx: &MatchContext<'_>,
    rng: &mut impl Rng,
) -> MatchReport {
    let strengths = [team_strength(home), team_strength(away)];
    let xg = [
        expected_goals(
            &strengths[0],
            &strengths[1],
            home_tactics,
            away_tactics,
            true,
            form.home,
        ),
        expected_goals(
            &strengths[1],
            &strengths[0],
            away_tactics,
            home_tactics,
            false,
            form.away,
        ),
    ];
    let mut sides = [Side::new(home, home_tactics), Side::new(away, away_tactics)];

    let mut player_stats: BTreeMap<PlayerId, PlayerMatchStats> = BTreeMap::new();
    for side in &sides {
        for lp in &side.lineup.players {
            let stats = PlayerMatchStats {
                club: Some(side.lineup.club),
                minutes: 90,
                ..Default::default()
            };
            player_stats.insert(lp.player.id, stats);
        }
    }

    // Draw every incident up front, then replay them in minute order
    let mut incidents: Vec<(u8, Incident)> = Vec::new();
    for (index, side) in sides.iter().enumerate() {
        let shots = poisson((xg[index] / MEAN_SHOT_XG) as f64, rng);
        for _ in 0..shots {
            let quality = (rng.gen_range(0.4f32..1.6) * MEAN_SHOT_XG).min(MAX_SHOT_XG);
            let shot = Incident::Shot {
                side: index,
                quality,
            };
            incidents.push((rng.gen_range(1..=90), shot));
        }

        let fouls = poisson(9.0 + 6.0 * side.tactics.get_pressing_factor() as f64, rng);
        for _ in 0..fouls {
            incidents.push((rng.gen_range(1..=90), Incident::Foul { side: index }));
        }

        for lp in &side.lineup.players {
            let tiredness = 1.5 - lp.player.fitness.min(100) as f64 / 100.0;
            let risk = ctx.rules.match_injury_chance * tiredness;
            if rng.gen_bool(risk.clamp(0.0, 1.0)) {
                let injury = Incident::Injury {
                    side: index,
                    player: lp.player.id,
                };
                incidents.push((rng.gen_range(1..=89), injury));
            }
        }
    }
    // Stable: same-minute incidents keep their draw order
    incidents.sort_by_key(|(minute, _)| *minute);

    let mut events = vec![MatchEvent {
        minute: 0,
        kind: EventKind::KickOff,
        club: None,
        player: None,
        description: "Kick-off".to_string(),
    }];
    let mut injured: BTreeSet<PlayerId> = BTreeSet::new();
    let mut cards = CardSystem::new();
    let mut injuries: BTreeMap<PlayerId, InjuryKind> = BTreeMap::new();
    let mut half_time = false;

    for (minute, incident) in incidents {
        if !half_time && minute > 45 {
            events.push(MatchEvent {
                minute: 45,
                kind: EventKind::HalfTime,
                club: None,
                player: None,
                description: format!("Half-time {}-{}", sides[0].goals, sides[1].goals),
            });
            half_time = true;
        }

        match incident {
            Incident::Shot { side, quality } => {
                let attackers = sides[side].on_pitch(&cards, &injured);
                let Ok(shooter) = attackers.choose_weighted(rng, |lp| shot_weight(lp)) else {
                    continue;
                };
                let shooter = *shooter;
                let club = sides[side].lineup.club;
                sides[side].stats.shots += 1;
                sides[side].stats.xg += quality;
                if let Some(s) = player_stats.get_mut(&shooter.player.id) {
                    s.shots += 1;
                }

                if rng.gen_bool(quality as f64) {
                    sides[side].goals += 1;
                    sides[side].stats.shots_on_target += 1;
                    if let Some(s) = player_stats.get_mut(&shooter.player.id) {
                        s.goals += 1;
                    }

                    let mut description = format!(
                        "GOAL! {} scores ({}-{})",
                        shooter.player.name, sides[0].goals, sides[1].goals
                    );
                    if rng.gen_bool(ASSIST_SHARE) {
                        let teammates: Vec<&LineupPlayer> = attackers
                            .iter()
                            .copied()
                            .filter(|lp| lp.player.id != shooter.player.id)
                            .collect();
                        let picked = teammates.choose_weighted(rng, |lp| assist_weight(lp));
                        if let Ok(assister) = picked {
                            if let Some(s) = player_stats.get_mut(&assister.player.id) {
                                s.assists += 1;
                            }
                            let name = &assister.player.name;
                            description.push_str(&format!(", assisted by {}", name));
                        }
                    }
                    events.push(MatchEvent {
                        minute,
                        kind: EventKind::Goal,
                        club: Some(club),
                        player: Some(shooter.player.id),
                        description,
                    });
                } else if rng.gen_bool(SAVED_SHARE) {
                    sides[side].stats.shots_on_target += 1;
                    sides[1 - side].saves += 1;
                    events.push(MatchEvent {
                        minute,
                        kind: EventKind::ShotSaved,
                        club: Some(club),
                        player: Some(shooter.player.id),
                        description: format!("{} forces a save", shooter.player.name),
                    });
                } else {
                    events.push(MatchEvent {
                        minute,
                        kind: EventKind::ShotMissed,
                        club: Some(club),
                        player: Some(shooter.player.id),
                        description: format!("{} shoots wide", shooter.player.name),
                    });
                }
            }
            Incident::Foul { side } => {
                let on_pitch = sides[side].on_pitch(&cards, &injured);
                let Ok(fouler) = on_pitch.choose_weighted(rng, |lp| foul_weight(lp)) else {
                    continue;
                };
                let fouler = *fouler;
                let club = sides[side].lineup.club;
                sides[side].stats.fouls += 1;

                let roll: f64 = rng.gen();
                let card = if roll < RED_PER_FOUL {
                    CardType::Red
                } else if roll < RED_PER_FOUL + YELLOW_PER_FOUL {
                    CardType::Yellow
                } else {
                    continue;
                };

                let id = fouler.player.id;
                let (result, _) = cards.issue_card(id, card);
                let kind = match (card, result) {
                    (CardType::Yellow, CardResult::Warning) => EventKind::YellowCard,
                    (CardType::Yellow, CardResult::Dismissal) => EventKind::SecondYellow,
                    (CardType::Red, _) => EventKind::RedCard,
                };
                if let Some(s) = player_stats.get_mut(&id) {
                    if card == CardType::Yellow {
                        s.yellow_cards += 1;
                    }
                    if result == CardResult::Dismissal {
                        s.red_card = true;
                        s.minutes = minute;
                    }
                }
                if card == CardType::Yellow {
                    sides[side].stats.yellow_cards += 1;
                }
                if result == CardResult::Dismissal {
                    sides[side].stats.red_cards += 1;
                }

                let name = &fouler.player.name;
                let description = match kind {
                    EventKind::YellowCard => format!("{} is booked", name),
                    EventKind::SecondYellow => {
                        format!("{} sees a second yellow and is sent off", name)
                    }
                    _ => format!("{} is sent off", name),
                };
                events.push(MatchEvent {
                    minute,
                    kind,
                    club: Some(club),
                    player: Some(id),
                    description,
                });
            }
            Incident::Injury { side, player } => {
                if cards.is_dismissed(player) || injured.contains(&player) {
                    continue;
                }
                let Some(lp) = sides[side].player(player) else {
                    continue;
                };
                let kind = InjuryKind::sample(rng);
                injuries.insert(player, kind);
                injured.insert(player);
                if let Some(s) = player_stats.get_mut(&player) {
                    s.injured = true;
                    s.minutes = minute;
                }
                let name = &lp.player.name;
                let description = format!("{} is forced off with a {}", name, kind.label());
                events.push(MatchEvent {
                    minute,
                    kind: EventKind::Injury,
                    club: Some(sides[side].lineup.club),
                    player: Some(player),
                    description,
                });
            }
        }
    }

    if !half_time {
        events.push(MatchEvent {
            minute: 45,
            kind: EventKind::HalfTime,
            club: None,
            player: None,
            description: format!("Half-time {}-{}", sides[0].goals, sides[1].goals),
        });
    }
    events.push(MatchEvent {
        minute: 90,
        kind: EventKind::FullTime,
        club: None,
        player: None,
        description: format!("Full-time {}-{}", sides[0].goals, sides[1].goals),
    });
    events.sort_by_key(|e| e.minute);

    fill_team_stats(&mut sides, &strengths, &xg, &mut player_stats, rng);

    // Ratings, then season records and condition for everyone who featured
    let goals = [sides[0].goals, sides[1].goals];
    let mut players = Vec::with_capacity(home.len() + away.len());
    for (index, side) in sides.iter().enumerate() {
        let result = (goals[index] as i16 - goals[1 - index] as i16).signum() as i8;
        for lp in &side.lineup.players {
            let Some(stats) = player_stats.get_mut(&lp.player.id) else {
                continue;
            };
            let keeper = lp.slot.is_goalkeeper();
            let rating_ctx = RatingContext {
                category: lp.slot.category(),
                slot_rating: effective_rating(lp),
                result,
                goals_conceded: goals[1 - index],
                saves: if keeper { side.saves } else { 0 },
            };
            stats.rating = player_rating(stats, &rating_ctx, rng);

            let mut player = lp.player.clone();
            match player.season_record_mut(ctx.season) {
                Some(record) => {
                    record.appearances += 1;
                    record.goals += stats.goals as u16;
                    record.assists += stats.assists as u16;
                    record.rating_points += stats.rating;
                    record.yellow_cards += stats.yellow_cards as u16;
                    record.red_cards += stats.red_card as u16;
                }
                None => {
                    debug_assert!(false, "{} has no open record", player.id);
                    log::warn!("{} has no record for season {}", player.id, ctx.season);
                }
            }

            let load = MatchLoad {
                minutes: stats.minutes,
                pressing: side.tactics.get_pressing_factor(),
                yellow_cards: stats.yellow_cards,
                red_card: stats.red_card,
                injury: injuries.get(&lp.player.id).copied(),
            };
            players.push(apply_match_load(player, &load, ctx.date, ctx.rules, rng));
        }
    }

    let lineup_slots = |lineup: &Lineup| -> Vec<LineupSlot> {
        lineup
            .players
            .iter()
            .map(|lp| LineupSlot {
                player: lp.player.id,
                role: lp.slot,
                pitch_position: lp.pitch_position,
            })
            .collect()
    };

    let [home_side, away_side] = sides;
    MatchReport {
        outcome: MatchOutcome {
            home_goals: home_side.goals,
            away_goals: away_side.goals,
            home_stats: home_side.stats,
            away_stats: away_side.stats,
            home_lineup: lineup_slots(home),
            away_lineup: lineup_slots(away),
            player_stats,
            events,
        },
        players,
    }
}

/// Possession, passing, corners and tackles: volume stats with no events
fn fill_team_stats(
    sides: &mut [Side<'_>; 2],
    strengths: &[TeamStrength; 2],
    xg: &[f32; 2],
    player_stats: &mut BTreeMap<PlayerId, PlayerMatchStats>,
    rng: &mut impl Rng,
) {
    let weight = |i: usize| strengths[i].midfield * sides[i].tactics.possession_bias();
    let home_share = (weight(0) / (weight(0) + weight(1)).max(1.0) * 100.0).clamp(25.0, 75.0);
    let tenths = |share: f32| (share * 10.0).round() / 10.0;
    let possession = [tenths(home_share), tenths(100.0 - home_share)];

    for index in 0..2 {
        let tempo = sides[index].tactics.get_tempo_factor();
        let pressing = sides[index].tactics.get_pressing_factor();
        let stats = &mut sides[index].stats;
        stats.possession = possession[index];
        stats.passes = (9.0 * possession[index] * (1.1 - 0.2 * tempo)).round() as u16;
        stats.pass_accuracy = (65.0 + (strengths[index].midfield - 40.0) * 0.6).clamp(55.0, 92.0);
        stats.corners = poisson(2.0 + 2.5 * xg[index] as f64, rng);

        let tackles = poisson(14.0 + 8.0 * pressing as f64, rng);
        let lineup: &Lineup = sides[index].lineup;
        let tacklers: Vec<&LineupPlayer> = lineup
            .players
            .iter()
            .filter(|lp| tackle_weight(lp) > 0.0)
            .collect();
        for _ in 0..tackles {
            let Ok(tackler) = tacklers.choose_weighted(rng, |lp| {
                let minutes = player_stats.get(&lp.player.id).map_or(90, |s| s.minutes);
                tackle_weight(lp) * minutes as f64 / 90.0
            }) else {
                break;
            };
            if let Some(s) = player_stats.get_mut(&tackler.player.id) {
                s.tackles = s.tackles.saturating_add(1);
            }
            sides[index].stats.tackles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Contract, PlayerAttributes, SeasonRecord};
    use crate::models::ClubId;
    use crate::tactics::{Formation, Mentality};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sha2::{Digest, Sha256};

    const SHOTS: [EventKind; 3] = [EventKind::Goal, EventKind::ShotSaved, EventKind::ShotMissed];

    fn lineup(club: u32, level: u8, formation: Formation) -> Lineup {
        let players = formation
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| LineupPlayer {
                slot: slot.role,
                pitch_position: slot.pitch_position,
                player: Player {
                    id: PlayerId(club * 100 + i as u32),
                    name: format!("Player {}-{}", club, i),
                    age: 26,
                    position: slot.role,
                    attributes: PlayerAttributes::from_array([level; 7]),
                    club: Some(ClubId(club)),
                    market_value: 1_000_000,
                    contract: Contract {
                        weekly_wage: 4_000,
                        expires_season: 3,
                    },
                    morale: 65,
                    fitness: 100,
                    injury: None,
                    suspension: None,
                    season_yellow_cards: 0,
                    history: vec![SeasonRecord::open(1)],
                    retired: false,
                },
            })
            .collect();
        Lineup {
            club: ClubId(club),
            players,
        }
    }

    fn context(rules: &ConditionRules) -> MatchContext<'_> {
        MatchContext {
            season: 1,
            date: NaiveDate::from_ymd_opt(2025, 8, 9).unwrap(),
            rules,
        }
    }

    fn digest(report: &MatchReport) -> String {
        let bytes = serde_json::to_vec(report).unwrap();
        format!("{:x}", Sha256::digest(&bytes))
    }

    fn run(seed: u64) -> MatchReport {
        let rules = ConditionRules::default();
        let home = lineup(0, 70, Formation::F442);
        let away = lineup(1, 68, Formation::F433);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        simulate(
            &home,
            &away,
            &Tactics::default(),
            &Tactics::new(Formation::F433),
            FormStrengths::default(),
            &context(&rules),
            &mut rng,
        )
    }

    #[test]
    fn test_same_seed_same_report_bytes() {
        assert_eq!(digest(&run(99)), digest(&run(99)));
        assert_ne!(digest(&run(99)), digest(&run(100)));
    }

    #[test]
    fn test_report_is_consistent() {
        for seed in 0..50 {
            let report = run(seed);
            let outcome = &report.outcome;
            let total = (outcome.home_goals + outcome.away_goals) as usize;

            let goal_events = outcome
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Goal)
                .count();
            assert_eq!(goal_events, total);

            let scored: u32 = outcome.player_stats.values().map(|s| s.goals as u32).sum();
            assert_eq!(scored as usize, total);

            let events = &outcome.events;
            assert!(events.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert_eq!(events.first().unwrap().kind, EventKind::KickOff);
            assert_eq!(events.last().unwrap().kind, EventKind::FullTime);
            let possession = outcome.home_stats.possession + outcome.away_stats.possession;
            assert!((possession - 100.0).abs() < 0.2);
            for stats in outcome.player_stats.values() {
                assert!((1.0..=10.0).contains(&stats.rating));
            }
            assert_eq!(outcome.home_lineup.len(), 11);

            // Every featured player's season record moved exactly once
            assert_eq!(report.players.len(), 22);
            for player in &report.players {
                let record = player.current_season().unwrap();
                assert_eq!(record.appearances, 1);
                assert_eq!(record.goals, outcome.player_stats[&player.id].goals as u16);
            }
        }
    }

    #[test]
    fn test_no_goals_after_leaving_the_pitch() {
        for seed in 0..200 {
            let report = run(seed);
            let outcome = &report.outcome;
            for event in &outcome.events {
                let Some(player) = event.player else {
                    continue;
                };
                let stats = &outcome.player_stats[&player];
                if (stats.red_card || stats.injured) && SHOTS.contains(&event.kind) {
                    assert!(
                        event.minute <= stats.minutes,
                        "seed {seed}: {player} shot after leaving"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sent_off_and_injured_players_leave_the_pitch() {
        let home = lineup(0, 70, Formation::F442);
        let tactics = Tactics::default();
        let side = Side::new(&home, &tactics);
        let mut cards = CardSystem::new();
        let mut injured = BTreeSet::new();
        assert_eq!(side.on_pitch(&cards, &injured).len(), 11);

        cards.issue_card(PlayerId(4), CardType::Yellow);
        assert_eq!(side.on_pitch(&cards, &injured).len(), 11);
        cards.issue_card(PlayerId(4), CardType::Yellow);
        cards.issue_card(PlayerId(9), CardType::Red);
        injured.insert(PlayerId(2));

        let remaining: Vec<PlayerId> = side
            .on_pitch(&cards, &injured)
            .iter()
            .map(|lp| lp.player.id)
            .collect();
        assert_eq!(remaining.len(), 8);
        for gone in [PlayerId(2), PlayerId(4), PlayerId(9)] {
            assert!(!remaining.contains(&gone));
        }
    }

    #[test]
    fn test_goals_track_expected_goals_in_aggregate() {
        let rules = ConditionRules::default();
        let home = lineup(0, 70, Formation::F442);
        let away = lineup(1, 70, Formation::F442);
        let tactics = Tactics::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let (mut goals, mut xg) = (0.0f64, 0.0f64);
        let matches = 400;
        for _ in 0..matches {
            let form = FormStrengths::default();
            let ctx = context(&rules);
            let report = simulate(&home, &away, &tactics, &tactics, form, &ctx, &mut rng);
            let outcome = &report.outcome;
            goals += (outcome.home_goals + outcome.away_goals) as f64;
            xg += (outcome.home_stats.xg + outcome.away_stats.xg) as f64;
        }

        assert!((goals - xg).abs() / xg < 0.12, "goals {goals} vs xg {xg}");
        let per_match = goals / matches as f64;
        assert!(
            (1.5..4.5).contains(&per_match),
            "{per_match} goals per match"
        );
    }

    #[test]
    fn test_stronger_side_creates_more() {
        let weak = team_strength(&lineup(0, 50, Formation::F442));
        let strong = team_strength(&lineup(1, 80, Formation::F442));
        let tactics = Tactics::default();
        let strong_away = expected_goals(&strong, &weak, &tactics, &tactics, false, 0.5);
        let weak_home = expected_goals(&weak, &strong, &tactics, &tactics, true, 0.5);
        assert!(strong_away > weak_home);

        let bold = Tactics {
            mentality: Mentality::VeryAttacking,
            ..Default::default()
        };
        let attacking = expected_goals(&weak, &weak, &bold, &tactics, true, 0.5);
        let balanced = expected_goals(&weak, &weak, &tactics, &tactics, true, 0.5);
        assert!(attacking > balanced);
    }
}
