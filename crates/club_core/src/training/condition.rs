//! Player condition: fitness, morale, injuries, suspensions and aging.
//!
//! Every function takes a player by value and hands back the updated one,
//! so callers working on a snapshot never mutate shared state.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rand::Rng;

use crate::config::ConditionRules;
use crate::models::player::{
    attr, expected_wage, market_value, Injury, InjuryKind, Player, Suspension,
};

/// What one match took out of a player
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchLoad {
    pub minutes: u8,
    /// Team pressing factor the player worked under (0.2..=1.0)
    pub pressing: f32,
    pub yellow_cards: u8,
    pub red_card: bool,
    /// Injury suffered on the pitch
    pub injury: Option<InjuryKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoraleCause {
    Win,
    Draw,
    Loss,
    /// Started the previous match, left out of this one
    Dropped,
    Injured,
    Suspended,
    Transferred,
    ContractRenewed,
    AwardWon,
}

impl MoraleCause {
    pub fn delta(self) -> i16 {
        match self {
            MoraleCause::Win => 5,
            MoraleCause::Draw => 1,
            MoraleCause::Loss => -4,
            MoraleCause::Dropped => -6,
            MoraleCause::Injured => -5,
            MoraleCause::Suspended => -3,
            MoraleCause::Transferred => 8,
            MoraleCause::ContractRenewed => 4,
            MoraleCause::AwardWon => 10,
        }
    }
}

fn clamp_percent(value: f32) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Post-match strain risk multiplier by remaining fitness
fn strain_multiplier(fitness: u8) -> f64 {
    match fitness {
        70..=100 => 0.5,
        50..=69 => 1.0,
        30..=49 => 2.5,
        _ => 5.0,
    }
}

fn start_injury(mut player: Player, kind: InjuryKind, days: u16, date: NaiveDate) -> Player {
    let longer = match &player.injury {
        Some(current) => current.days_remaining < days,
        None => true,
    };
    if longer {
        player.injury = Some(Injury::new(kind, days, date));
    }
    apply_morale_shift(player, MoraleCause::Injured)
}

fn start_suspension(mut player: Player, days: u16, date: NaiveDate) -> Player {
    let days = match &player.suspension {
        Some(current) => current.days_remaining.max(days),
        None => days,
    };
    player.suspension = Some(Suspension::new(days, date));
    apply_morale_shift(player, MoraleCause::Suspended)
}

/// Apply the physical and disciplinary cost of a match.
pub fn apply_match_load(
    mut player: Player,
    load: &MatchLoad,
    date: NaiveDate,
    rules: &ConditionRules,
    rng: &mut impl Rng,
) -> Player {
    if load.minutes == 0 {
        return player;
    }

    let pressing = if load.pressing > 0.0 {
        load.pressing
    } else {
        0.6
    };
    let drain = load.minutes as f32 * rules.fitness_load_per_minute * (0.7 + 0.5 * pressing);
    player.fitness = clamp_percent(player.fitness as f32 - drain);

    let strain = rules.match_injury_chance * 0.5 * strain_multiplier(player.fitness);
    if let Some(kind) = load.injury {
        let days = kind.sample_days(rng);
        player = start_injury(player, kind, days, date);
    } else if rng.gen_bool(strain.min(1.0)) {
        let kind = if rng.gen_bool(0.7) {
            InjuryKind::Knock
        } else {
            InjuryKind::HamstringStrain
        };
        let days = kind.sample_days(rng);
        player = start_injury(player, kind, days, date);
    }

    if load.red_card {
        player = start_suspension(player, rules.red_card_ban_days, date);
    } else if load.yellow_cards > 0 {
        let threshold = rules.yellow_card_threshold.max(1);
        let before = player.season_yellow_cards;
        player.season_yellow_cards += load.yellow_cards as u16;
        if player.season_yellow_cards / threshold > before / threshold {
            player = start_suspension(player, rules.yellow_ban_days, date);
        }
    }

    player
}

/// One rest day: fitness and morale drift back, countdowns tick.
pub fn apply_daily_recovery(
    mut player: Player,
    physio_quality: u8,
    rules: &ConditionRules,
    date: NaiveDate,
) -> Player {
    let physio = 0.8 + physio_quality.min(20) as f32 / 50.0;
    let mut recovery = rules.daily_fitness_recovery * physio;
    if player.is_injured() {
        recovery *= 0.5;
    }
    player.fitness = clamp_percent(player.fitness as f32 + recovery);

    let baseline = rules.morale_baseline.min(100);
    let (morale, drift) = (player.morale, rules.morale_drift);
    player.morale = match morale.cmp(&baseline) {
        Ordering::Less => morale.saturating_add(drift).min(baseline),
        Ordering::Greater => morale.saturating_sub(drift).max(baseline),
        Ordering::Equal => morale,
    };

    // A top physio shortens every lay-off
    let healed = if physio_quality >= 16 { 2 } else { 1 };
    player.injury = player.injury.take().and_then(|mut injury| {
        injury.days_remaining = injury.days_remaining.saturating_sub(healed);
        (injury.days_remaining > 0).then(|| {
            injury.expected_return = date + chrono::Duration::days(injury.days_remaining as i64);
            injury
        })
    });
    player.suspension = player.suspension.take().and_then(|mut suspension| {
        suspension.days_remaining = suspension.days_remaining.saturating_sub(1);
        (suspension.days_remaining > 0).then_some(suspension)
    });

    player
}

pub fn apply_morale_shift(mut player: Player, cause: MoraleCause) -> Player {
    player.morale = (player.morale as i16 + cause.delta()).clamp(0, 100) as u8;
    player
}

/// Age a player by one season: young players grow, veterans decline.
///
/// Market value follows the new ability; the wage is only renegotiated
/// when the contract is renewed.
pub fn age_one_season(mut player: Player, rng: &mut impl Rng) -> Player {
    player.age = player.age.saturating_add(1);
    let weights = player.position.attribute_weights();

    for (index, weight) in weights.iter().enumerate() {
        let delta: i16 = match player.age {
            0..=21 => rng.gen_range(0..=4),
            22..=24 => rng.gen_range(0..=2),
            25..=29 => rng.gen_range(-1..=1),
            30..=32 => rng.gen_range(-2..=0),
            _ => rng.gen_range(-4..=-1),
        };
        // Physical decline hits pace and strength first; growth follows the role
        let delta = if delta < 0 && (index == attr::PACE || index == attr::PHYSICAL) {
            delta * 2
        } else if delta > 0 && *weight < 0.05 {
            0
        } else {
            delta
        };
        player.attributes.adjust(index, delta);
    }

    player.market_value = market_value(player.overall(), player.age);
    player
}

/// Renew an expiring contract at the wage the player now expects.
pub fn renew_contract(mut player: Player, current_season: u16, seasons: u16) -> Player {
    player.contract.weekly_wage = expected_wage(player.market_value);
    player.contract.expires_season = current_season + seasons.max(1) - 1;
    apply_morale_shift(player, MoraleCause::ContractRenewed)
}

pub fn should_retire(player: &Player, rng: &mut impl Rng) -> bool {
    match player.age {
        0..=33 => false,
        34..=35 => rng.gen_bool(0.35),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Contract, PlayerAttributes, SeasonRecord};
    use crate::models::{ClubId, PlayerId, Position};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()
    }

    fn player() -> Player {
        Player {
            id: PlayerId(3),
            name: "Condition Test".to_string(),
            age: 27,
            position: Position::CM,
            attributes: PlayerAttributes::from_array([60; 7]),
            club: Some(ClubId(0)),
            market_value: 800_000,
            contract: Contract {
                weekly_wage: 3_000,
                expires_season: 2,
            },
            morale: 65,
            fitness: 100,
            injury: None,
            suspension: None,
            season_yellow_cards: 0,
            history: vec![SeasonRecord::open(1)],
            retired: false,
        }
    }

    fn no_strain_rules() -> ConditionRules {
        ConditionRules {
            match_injury_chance: 0.0,
            ..Default::default()
        }
    }

    fn played(minutes: u8) -> MatchLoad {
        MatchLoad {
            minutes,
            pressing: 0.6,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_match_drains_fitness() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let load = played(90);
        let after = apply_match_load(player(), &load, today(), &no_strain_rules(), &mut rng);
        // 90 * 0.28 * 1.0
        assert_eq!(after.fitness, 75);
        assert!(after.is_available());
    }

    #[test]
    fn test_in_match_injury_becomes_active() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let load = MatchLoad {
            injury: Some(InjuryKind::AnkleSprain),
            ..played(30)
        };
        let after = apply_match_load(player(), &load, today(), &no_strain_rules(), &mut rng);

        let injury = after.injury.as_ref().unwrap();
        assert_eq!(injury.kind, InjuryKind::AnkleSprain);
        assert!((7..=21).contains(&injury.days_remaining));
        assert_eq!(after.morale, 60);
    }

    #[test]
    fn test_yellow_accumulation_triggers_ban_on_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let rules = no_strain_rules();
        let mut p = player();
        p.season_yellow_cards = 3;

        let mut booked = played(90);
        booked.yellow_cards = 1;
        p = apply_match_load(p, &booked, today(), &rules, &mut rng);
        assert!(!p.is_suspended());

        p = apply_match_load(p, &booked, today(), &rules, &mut rng);
        assert_eq!(p.season_yellow_cards, 5);
        let ban = p.suspension.as_ref().unwrap();
        assert_eq!(ban.days_remaining, rules.yellow_ban_days);
    }

    #[test]
    fn test_red_card_bans() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let rules = no_strain_rules();
        let mut load = played(40);
        load.red_card = true;
        let after = apply_match_load(player(), &load, today(), &rules, &mut rng);
        let ban = after.suspension.as_ref().unwrap();
        assert_eq!(ban.days_remaining, rules.red_card_ban_days);
    }

    #[test]
    fn test_recovery_counts_down_and_clears() {
        let rules = ConditionRules::default();
        let mut p = player();
        p.fitness = 60;
        p.morale = 80;
        p.injury = Some(Injury::new(InjuryKind::Knock, 2, today()));
        p.suspension = Some(Suspension::new(1, today()));

        p = apply_daily_recovery(p, 10, &rules, today());
        assert!(p.suspension.is_none());
        assert_eq!(p.injury.as_ref().unwrap().days_remaining, 1);
        // Injured players recover at half rate
        assert_eq!(p.fitness, 64);
        assert_eq!(p.morale, 79);

        p = apply_daily_recovery(p, 10, &rules, today());
        assert!(p.injury.is_none());
        assert_eq!(p.fitness, 68);
    }

    #[test]
    fn test_retirement_age() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut p = player();
        p.age = 36;
        assert!(should_retire(&p, &mut rng));
        p.age = 30;
        assert!(!should_retire(&p, &mut rng));
    }

    #[test]
    fn test_aging_moves_ability_in_the_expected_direction() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut young = player();
        young.age = 18;
        let grown = age_one_season(young.clone(), &mut rng);
        assert_eq!(grown.age, 19);
        assert!(grown.overall() >= young.overall());

        let mut veteran = player();
        veteran.age = 34;
        let declined = age_one_season(veteran.clone(), &mut rng);
        assert!(declined.overall() < veteran.overall());
        assert!(declined.market_value < market_value(veteran.overall(), 34));
    }

    #[test]
    fn test_contract_renewal() {
        let renewed = renew_contract(player(), 3, 3);
        assert_eq!(renewed.contract.expires_season, 5);
        assert_eq!(renewed.contract.weekly_wage, expected_wage(800_000));
        assert_eq!(renewed.morale, 69);
    }

    proptest! {
        #[test]
        fn prop_condition_stays_in_range(
            fitness in 0u8..=100,
            morale in 0u8..=100,
            minutes in 0u8..=90,
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut p = player();
            p.fitness = fitness;
            p.morale = morale;
            let mut load = played(minutes);
            load.pressing = 1.0;
            load.yellow_cards = 1;

            let p = apply_match_load(p, &load, today(), &ConditionRules::default(), &mut rng);
            let p = apply_morale_shift(p, MoraleCause::Loss);
            let p = apply_daily_recovery(p, 20, &ConditionRules::default(), today());
            prop_assert!(p.fitness <= 100);
            prop_assert!(p.morale <= 100);
        }
    }
}
