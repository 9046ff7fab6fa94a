//! Season rollover: promotion and relegation, aging, retirements, new fixtures

use chrono::{Duration, Months};

use super::review::division_outcomes;
use super::state::{GameState, MatchDay, SeasonPhase};
use crate::error::ConfigError;
use crate::league::build_schedule;
use crate::models::{ClubId, NewsCategory, PlayerId, Position};
use crate::rng::{self, SEASON_STREAM};
use crate::training::{age_one_season, renew_contract, should_retire};
use crate::world::{empty_standings, first_round_date, youth_player};

/// Roll the world over into the next season.
///
/// Career fields carry over: every player keeps their history, the finished
/// season's record is sealed and a new one opened.
pub(crate) fn start_new_season(state: &mut GameState) -> Result<(), ConfigError> {
    let finished = state.season;
    let next = finished + 1;
    let mut rng = rng::stream(state.seed(), SEASON_STREAM, &[next as u64]);

    for outcome in division_outcomes(state) {
        for club in outcome.promoted {
            if let Some(club) = state.club_mut(club) {
                club.division = club.division.saturating_sub(1);
            }
        }
        for club in outcome.relegated {
            if let Some(club) = state.club_mut(club) {
                club.division += 1;
            }
        }
    }

    // Age everyone, then retire the veterans
    let mut retirees: Vec<(ClubId, Position)> = Vec::new();
    for index in 0..state.players.len() {
        let Some(club) = state.players[index].club else {
            continue;
        };
        let mut player = state.players[index].clone();
        player.seal_season();
        player = age_one_season(player, &mut rng);

        if should_retire(&player, &mut rng) {
            log::debug!("{} retires at {}", player.name, player.age);
            if state.is_user_club(club) {
                let apps = player.career_appearances();
                let headline = format!("{} retires after {} appearances", player.name, apps);
                state.post_news(NewsCategory::Season, headline, vec![club]);
            }
            if let Some(owner) = state.club_mut(club) {
                owner.release_from_lineups(player.id);
            }
            retirees.push((club, player.position));
            player.retired = true;
            player.club = None;
        } else {
            if player.contract.expires_season < next {
                player = renew_contract(player, next, state.config.transfers.contract_seasons);
            }
            player.open_season(next);
            player.season_yellow_cards = 0;
        }
        state.players[index] = player;
    }

    for (club, position) in retirees {
        let reputation = state.club(club).map_or(50, |c| c.reputation);
        let id = PlayerId(state.players.len() as u32);
        let youth = youth_player(id, club, position, reputation, next, &mut rng);
        state.players.push(youth);
    }

    for club in state.clubs.iter_mut() {
        club.last_lineup.clear();
    }

    let calendar = &state.config.calendar;
    let months = Months::new(12 * finished as u32);
    let anniversary = calendar.season_start.checked_add_months(months);
    let tomorrow = state.date + Duration::days(1);
    let start = anniversary.map_or(tomorrow, |date| date.max(tomorrow));

    let divisions = state.divisions();
    let first_round = first_round_date(start, &state.config);
    let interval = calendar.days_between_rounds;
    state.schedule = build_schedule(next, &divisions, first_round, interval)?;
    state.standings = empty_standings(&divisions);
    state.season = next;
    state.date = start;
    state.season_review = None;
    state.phase = SeasonPhase::InSeason;
    state.match_day_fixtures = None;
    if state.has_fixtures_today() {
        let today = state.schedule.on_date(start);
        let fixtures = MatchDay::from_matches(start, today, state.user_club);
        state.match_day_fixtures = Some(fixtures);
    }

    let headline = format!("Season {} fixtures announced", next);
    state.post_news(NewsCategory::Season, headline, Vec::new());
    let count = state.schedule.matches.len();
    log::info!("season {} opens on {}: {} fixtures", next, start, count);
    Ok(())
}
