//! Daily world processing: recovery, training, wages and the AI transfer market

use std::collections::BTreeSet;

use chrono::Datelike;
use rand::seq::SliceRandom;
use rand::Rng;

use super::intent::{authorize, Actor};
use super::state::{GameState, MatchDay, SeasonPhase};
use crate::finance::{is_wage_day, pay_weekly_wages};
use crate::models::{ClubId, Player, PlayerId, PositionCategory, StaffRole};
use crate::rng::{self, DAY_STREAM};
use crate::training::{apply_daily_recovery, apply_training_day};
use crate::transfer::{asking_price, resolve, TransferOffer};

/// Recovery (and training on rest days) for everyone outside `featured`,
/// then wages and the AI market.
pub(crate) fn process_day(state: &mut GameState, featured: &BTreeSet<PlayerId>, match_day: bool) {
    let key = [state.date.num_days_from_ce() as u64];
    let mut rng = rng::stream(state.seed(), DAY_STREAM, &key);
    let date = state.date;
    let rules = state.config.condition.clone();

    for index in 0..state.players.len() {
        let player = &state.players[index];
        let Some(club) = player.club.and_then(|id| state.club(id)) else {
            continue;
        };
        if featured.contains(&player.id) {
            continue;
        }
        let physio = club.staff_quality(StaffRole::Physio);
        let coach = club.staff_quality(StaffRole::FitnessCoach);
        let plan = club.training;

        let mut updated = apply_daily_recovery(player.clone(), physio, &rules, date);
        if !match_day {
            updated = apply_training_day(updated, &plan, coach, &mut rng);
        }
        state.players[index] = updated;
    }

    if is_wage_day(date, &state.config.calendar) {
        pay_weekly_wages(state);
    }

    let chance = state.config.transfers.ai_daily_transfer_chance;
    if state.phase == SeasonPhase::InSeason && rng.gen_bool(chance) {
        ai_transfer_attempt(state, &mut rng);
    }
}

/// Move to tomorrow and announce its fixtures, if any.
pub(crate) fn advance_date(state: &mut GameState) {
    state.date = state.date.succ_opt().unwrap_or(state.date);
    if state.phase == SeasonPhase::InSeason && state.has_fixtures_today() {
        let today = state.schedule.on_date(state.date);
        state.match_day_fixtures = Some(MatchDay::from_matches(state.date, today, state.user_club));
    }
}

/// Category where `club` is thinnest relative to the legal minimum
fn weakest_category(state: &GameState, club: ClubId) -> PositionCategory {
    let squad = state.squad(club);
    PositionCategory::ALL
        .into_iter()
        .min_by_key(|category| {
            let held = squad
                .iter()
                .filter(|p| p.position.category() == *category)
                .count() as i32;
            // Keepers are rarely needed beyond three
            let target = if *category == PositionCategory::Goalkeeper {
                3
            } else {
                category.minimum() as i32 + 3
            };
            held - target
        })
        .unwrap_or(PositionCategory::Midfielder)
}

fn average_overall(players: &[&Player]) -> f32 {
    if players.is_empty() {
        return 0.0;
    }
    players.iter().map(|p| p.overall() as f32).sum::<f32>() / players.len() as f32
}

/// One AI club tries to sign a player who improves its thinnest category.
///
/// AI clubs never buy from the user's club.
fn ai_transfer_attempt(state: &mut GameState, rng: &mut impl Rng) {
    let max_size = state.config.squad.max_size as usize;
    let buyers: Vec<ClubId> = state
        .clubs
        .iter()
        .filter(|c| !state.is_user_club(c.id) && state.squad_size(c.id) < max_size)
        .map(|c| c.id)
        .collect();
    let Some(buyer) = buyers.choose(rng).copied() else {
        return;
    };
    if authorize(state, Actor::Ai(buyer), buyer, "AI_TRANSFER").is_err() {
        return;
    }

    let category = weakest_category(state, buyer);
    let buyer_squad = state.squad(buyer);
    let in_category: Vec<&Player> = buyer_squad
        .iter()
        .copied()
        .filter(|p| p.position.category() == category)
        .collect();
    let bar = average_overall(&in_category);
    let Some(buying) = state.club(buyer) else {
        return;
    };
    let budget = buying.balance / 2;

    let mut targets: Vec<(PlayerId, i64)> = state
        .players
        .iter()
        .filter(|p| p.is_available() && p.position.category() == category)
        .filter(|p| p.overall() as f32 > bar)
        .filter_map(|p| {
            let seller = p.club.filter(|c| *c != buyer && !state.is_user_club(*c))?;
            let selling = state.club(seller)?;
            let price = asking_price(p, selling, buying, &state.squad(seller));
            (price <= budget).then_some((p.id, price))
        })
        .collect();
    if targets.is_empty() {
        return;
    }
    // Cheapest few first, then pick one
    targets.sort_by_key(|(id, price)| (*price, *id));
    targets.truncate(5);
    let Some((player, price)) = targets.choose(rng).copied() else {
        return;
    };

    let offer = TransferOffer {
        buyer,
        player,
        amount: price,
    };
    let result = resolve(state, offer);
    log::debug!("AI offer by {} for {}: {}", buyer, player, result.message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::world::generate;
    use chrono::Duration;

    fn in_season(chance: f64) -> GameState {
        let mut config = WorldConfig::default();
        config.transfers.ai_daily_transfer_chance = chance;
        let mut state = generate(&config).unwrap();
        state.phase = SeasonPhase::InSeason;
        state.user_club = Some(ClubId(0));
        state
    }

    #[test]
    fn test_rest_day_only_touches_players() {
        let mut state = in_season(0.0);
        // Pick a day that is neither a match day nor a wage day
        while is_wage_day(state.date, &state.config.calendar) || state.has_fixtures_today() {
            state.date += Duration::days(1);
        }
        for player in state.players.iter_mut() {
            player.fitness = 50;
        }
        let before = state.clone();
        process_day(&mut state, &BTreeSet::new(), false);

        assert_eq!(state.schedule, before.schedule);
        assert_eq!(state.standings, before.standings);
        assert_eq!(state.clubs, before.clubs);
        assert!(state.players.iter().all(|p| p.fitness > 50));
    }

    #[test]
    fn test_featured_players_skip_recovery() {
        let mut state = in_season(0.0);
        state.players[0].fitness = 40;
        state.players[1].fitness = 40;
        process_day(&mut state, &BTreeSet::from([PlayerId(0)]), true);
        assert_eq!(state.players[0].fitness, 40);
        assert!(state.players[1].fitness > 40);
    }

    #[test]
    fn test_wages_paid_on_wage_day() {
        let mut state = in_season(0.0);
        while !is_wage_day(state.date, &state.config.calendar) {
            state.date += Duration::days(1);
        }
        let before = state.clubs[3].balance;
        process_day(&mut state, &BTreeSet::new(), false);
        assert!(state.clubs[3].balance < before);
    }

    #[test]
    fn test_ai_market_never_touches_the_user_club() {
        let mut state = in_season(1.0);
        let user_squad: Vec<PlayerId> = state.squad(ClubId(0)).iter().map(|p| p.id).collect();
        for _ in 0..40 {
            let date = state.date;
            process_day(&mut state, &BTreeSet::new(), false);
            state.date = date + Duration::days(1);
        }
        let after: Vec<PlayerId> = state.squad(ClubId(0)).iter().map(|p| p.id).collect();
        assert_eq!(after, user_squad);
        // Squads stay legal
        let rules = &state.config.squad;
        let legal = rules.min_size as usize..=rules.max_size as usize;
        for club in &state.clubs {
            assert!(legal.contains(&state.squad_size(club.id)));
        }
    }
}
