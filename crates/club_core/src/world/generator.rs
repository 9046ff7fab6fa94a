//! Initial world construction

use chrono::{Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::StandardNormal;

use super::names;
use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::league::{build_schedule, compute_table, LeagueEntry};
use crate::models::player::{
    expected_wage, market_value, Contract, PlayerAttributes, SeasonRecord,
};
use crate::models::{
    Club, ClubId, Match, NewsCategory, NewsFeed, Player, PlayerId, Position, PositionCategory,
    Schedule, Staff, StaffId, StaffRole, CATEGORY_MINIMUMS,
};
use crate::rng::{self, WORLD_STREAM};
use crate::season::{GameState, SeasonPhase};
use crate::tactics::Tactics;
use crate::training::TrainingPlan;

/// Natural roles drawn for each category, weighted toward the common ones
fn role_pool(category: PositionCategory) -> &'static [(Position, u16)] {
    use Position::*;
    match category {
        PositionCategory::Goalkeeper => &[(GK, 1)],
        PositionCategory::Defender => &[
            (CB, 6),
            (LCB, 1),
            (RCB, 1),
            (LB, 3),
            (RB, 3),
            (LWB, 1),
            (RWB, 1),
            (SW, 0),
        ],
        PositionCategory::Midfielder => &[
            (CM, 5),
            (CDM, 3),
            (LCM, 1),
            (RCM, 1),
            (LDM, 1),
            (RDM, 1),
            (LM, 2),
            (RM, 2),
            (CAM, 3),
        ],
        PositionCategory::Forward => &[
            (ST, 6),
            (CF, 2),
            (LW, 2),
            (RW, 2),
            (SS, 1),
            (LF, 1),
            (RF, 1),
        ],
    }
}

/// Roles every squad starts with, so each formation has a natural fit
fn core_roles(category: PositionCategory) -> &'static [Position] {
    use Position::*;
    match category {
        PositionCategory::Goalkeeper => &[GK, GK],
        PositionCategory::Defender => &[CB, CB, LB, RB, CB, RB],
        PositionCategory::Midfielder => &[CM, CM, CDM, LM, RM, CAM],
        PositionCategory::Forward => &[ST, ST, LW, RW],
    }
}

fn draw_role(category: PositionCategory, rng: &mut impl Rng) -> Position {
    let pool = role_pool(category);
    match WeightedIndex::new(pool.iter().map(|(_, w)| *w)) {
        Ok(index) => pool[index.sample(rng)].0,
        Err(_) => category.roles()[0],
    }
}

fn gaussian(rng: &mut impl Rng, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * sd
}

/// Ages 17..=35, peaking around 26
fn draw_age(rng: &mut impl Rng) -> u8 {
    17 + rng.gen_range(0..=9) + rng.gen_range(0..=9)
}

/// Attributes around `level`, shaped by the role's weights
fn draw_attributes(role: Position, level: f64, rng: &mut impl Rng) -> PlayerAttributes {
    let weights = role.attribute_weights();
    let mut values = [0u8; 7];
    for (value, weight) in values.iter_mut().zip(weights) {
        let bias = match weight {
            w if w >= 0.3 => 6.0,
            w if w >= 0.15 => 2.0,
            w if w >= 0.05 => -4.0,
            _ => -14.0,
        };
        *value = (level + bias + gaussian(rng, 5.0)).round().clamp(1.0, 99.0) as u8;
    }
    if !role.is_goalkeeper() {
        values[6] = rng.gen_range(3..=15);
    }
    PlayerAttributes::from_array(values)
}

/// Ability level of a club at `reputation`
fn club_level(reputation: u8) -> f64 {
    45.0 + reputation as f64 * 0.4
}

fn build_player(
    id: PlayerId,
    club: ClubId,
    role: Position,
    age: u8,
    level: f64,
    season: u16,
    rng: &mut impl Rng,
) -> Player {
    let attributes = draw_attributes(role, level, rng);
    let overall = attributes.rating_for(role).round() as u8;
    let value = market_value(overall, age);
    let name = names::person_name(rng);
    let expires_season = season + rng.gen_range(0..=3);

    Player {
        id,
        name,
        age,
        position: role,
        attributes,
        club: Some(club),
        market_value: value,
        contract: Contract {
            weekly_wage: expected_wage(value),
            expires_season,
        },
        morale: rng.gen_range(55..=75),
        fitness: rng.gen_range(85..=100),
        injury: None,
        suspension: None,
        season_yellow_cards: 0,
        history: vec![SeasonRecord::open(season)],
        retired: false,
    }
}

/// A 16 to 18 year old academy graduate for `club`
pub fn youth_player(
    id: PlayerId,
    club: ClubId,
    role: Position,
    reputation: u8,
    season: u16,
    rng: &mut impl Rng,
) -> Player {
    let age = rng.gen_range(16..=18);
    let level = club_level(reputation) - 12.0 + gaussian(rng, 4.0);
    build_player(id, club, role, age, level, season, rng)
}

fn squad_layout(size: usize, rng: &mut impl Rng) -> Vec<Position> {
    let mut roles: Vec<Position> = CATEGORY_MINIMUMS
        .iter()
        .flat_map(|(category, _)| core_roles(*category).iter().copied())
        .collect();

    // Third keeper first, then outfield cover
    if roles.len() < size {
        roles.push(Position::GK);
    }
    let outfield = [
        (PositionCategory::Defender, 4u16),
        (PositionCategory::Midfielder, 4),
        (PositionCategory::Forward, 3),
    ];
    let categories = WeightedIndex::new(outfield.iter().map(|(_, w)| *w)).ok();
    while roles.len() < size {
        let category = match &categories {
            Some(index) => outfield[index.sample(rng)].0,
            None => PositionCategory::Midfielder,
        };
        roles.push(draw_role(category, rng));
    }
    roles
}

fn build_staff(next_id: &mut u32, reputation: u8, rng: &mut impl Rng) -> Vec<Staff> {
    StaffRole::ALL
        .iter()
        .map(|role| {
            let id = StaffId(*next_id);
            *next_id += 1;
            let quality = (reputation as i32 / 6 + rng.gen_range(-3..=3)).clamp(1, 20) as u8;
            Staff {
                id,
                name: names::person_name(rng),
                role: *role,
                quality,
            }
        })
        .collect()
}

/// First round date of a season starting on `season_start`
pub fn first_round_date(season_start: NaiveDate, config: &WorldConfig) -> NaiveDate {
    season_start + Duration::days(config.calendar.preseason_days as i64)
}

/// Zeroed tables for every division
pub fn empty_standings(divisions: &[Vec<ClubId>]) -> Vec<Vec<LeagueEntry>> {
    let none: [Match; 0] = [];
    divisions
        .iter()
        .map(|clubs| compute_table(clubs, &none))
        .collect()
}

/// Build a new world from `config`.
///
/// The same config (seed included) always produces the same world.
pub fn generate(config: &WorldConfig) -> Result<GameState, ConfigError> {
    config.validate()?;
    let mut rng = rng::stream(config.seed, WORLD_STREAM, &[]);
    let season = 1;

    let league = &config.league;
    let club_names = names::club_names(config.total_clubs(), &mut rng);
    let mut clubs = Vec::with_capacity(config.total_clubs());
    let mut players = Vec::new();
    let mut staff_id = 0;

    for (index, name) in club_names.into_iter().enumerate() {
        let id = ClubId(index as u32);
        let division = (index / league.clubs_per_division) as u8;
        let reputation = (85 - 18 * division as i32 + rng.gen_range(-8..=8)).clamp(5, 99) as u8;
        let balance = (reputation as i64).pow(2) * 4_000 + rng.gen_range(0..2_000_000);

        let size = rng.gen_range(config.squad.min_size..=config.squad.max_size) as usize;
        let level = club_level(reputation);
        for role in squad_layout(size, &mut rng) {
            let player_id = PlayerId(players.len() as u32);
            let age = draw_age(&mut rng);
            // Youngsters have not reached their level yet
            let age_gap = 24.0 - age.min(24) as f64;
            let player_level = level + gaussian(&mut rng, 4.0) - age_gap * 1.2;
            let player = build_player(player_id, id, role, age, player_level, season, &mut rng);
            players.push(player);
        }

        clubs.push(Club {
            id,
            name,
            reputation,
            balance,
            division,
            tactics: Tactics::default(),
            training: TrainingPlan::default(),
            staff: build_staff(&mut staff_id, reputation, &mut rng),
            last_lineup: Vec::new(),
            manual_lineup: None,
        });
    }

    let divisions: Vec<Vec<ClubId>> = (0..league.divisions)
        .map(|d| {
            clubs
                .iter()
                .filter(|c| c.division == d)
                .map(|c| c.id)
                .collect()
        })
        .collect();
    let start = config.calendar.season_start;
    let first_round = first_round_date(start, config);
    let interval = config.calendar.days_between_rounds;
    let schedule: Schedule = build_schedule(season, &divisions, first_round, interval)?;

    log::info!(
        "generated world: {} clubs in {} divisions, {} players, {} fixtures (seed {})",
        clubs.len(),
        league.divisions,
        players.len(),
        schedule.matches.len(),
        config.seed
    );

    let mut news = NewsFeed::default();
    let headline = format!("Season {} fixtures announced", season);
    news.post(start, NewsCategory::Season, headline, Vec::new());

    Ok(GameState {
        season,
        date: start,
        phase: SeasonPhase::PreSeason,
        config: config.clone(),
        clubs,
        players,
        schedule,
        standings: empty_standings(&divisions),
        user_club: None,
        match_day_fixtures: None,
        match_results: None,
        transfer_result: None,
        season_review: None,
        news,
    })
}
