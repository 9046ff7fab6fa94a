//! Match-day processing: every fixture of the current date

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use super::daily;
use super::review::complete_season;
use super::state::{GameState, MatchDay};
use crate::engine::{simulate, FormStrengths, MatchContext, MatchReport};
use crate::error::CoreError;
use crate::finance::gate_receipts;
use crate::league::{compute_table, form_strength};
use crate::models::{ClubId, MatchId, MatchResultKind, NewsCategory, PlayerId, PlayerMatchStats};
use crate::rng::{self, MATCH_STREAM};
use crate::tactics::{pick_lineup, Lineup, LineupStrategy, Tactics};
use crate::training::{apply_morale_shift, MoraleCause};

/// Everything one simulation needs, detached from the live state
struct Fixture {
    id: MatchId,
    home: Lineup,
    away: Lineup,
    home_tactics: Tactics,
    away_tactics: Tactics,
    form: FormStrengths,
}

fn prepare(state: &GameState, id: MatchId, strategy: &dyn LineupStrategy) -> Option<Fixture> {
    let fixture = state.fixture(id)?;
    let home = state.club(fixture.home)?;
    let away = state.club(fixture.away)?;

    Some(Fixture {
        id,
        home: pick_lineup(home, &state.squad(home.id), strategy),
        away: pick_lineup(away, &state.squad(away.id), strategy),
        home_tactics: home.tactics.clone(),
        away_tactics: away.tactics.clone(),
        form: FormStrengths {
            home: form_strength(home.id, state.schedule.played()),
            away: form_strength(away.id, state.schedule.played()),
        },
    })
}

fn result_cause(result: MatchResultKind, home: bool) -> MoraleCause {
    match (result, home) {
        (MatchResultKind::Draw, _) => MoraleCause::Draw,
        (MatchResultKind::HomeWin, true) | (MatchResultKind::AwayWin, false) => MoraleCause::Win,
        _ => MoraleCause::Loss,
    }
}

/// Merge one simulated fixture into the world.
///
/// The outcome is recorded first. A fixture that cannot take it, because it
/// is missing or was already played, leaves the state untouched.
fn merge_fixture(
    state: &mut GameState,
    fixture: &Fixture,
    report: MatchReport,
) -> crate::Result<()> {
    let MatchReport { outcome, players } = report;
    let result = match outcome.home_goals.cmp(&outcome.away_goals) {
        Ordering::Greater => MatchResultKind::HomeWin,
        Ordering::Equal => MatchResultKind::Draw,
        Ordering::Less => MatchResultKind::AwayWin,
    };
    let score = (outcome.home_goals, outcome.away_goals);
    let stats = outcome.player_stats.clone();

    let Some(scheduled) = state.schedule.get_mut(fixture.id) else {
        return Err(CoreError::Invariant(format!("{} is not scheduled", fixture.id)));
    };
    scheduled.record(outcome)?;

    for player in players {
        let home = player.club == Some(fixture.home.club);
        let cause = result_cause(result, home);
        if let Some(slot) = state.player_mut(player.id) {
            *slot = apply_morale_shift(player, cause);
        }
    }

    // Regular starters who were left out
    for lineup in [&fixture.home, &fixture.away] {
        let started = lineup.ids();
        let previous = state
            .club(lineup.club)
            .map(|c| c.last_lineup.clone())
            .unwrap_or_default();
        for id in previous.into_iter().filter(|id| !started.contains(id)) {
            if let Some(player) = state.player_mut(id) {
                if player.club == Some(lineup.club) && player.is_available() {
                    *player = apply_morale_shift(player.clone(), MoraleCause::Dropped);
                }
            }
        }
        if let Some(club) = state.club_mut(lineup.club) {
            club.last_lineup = started;
        }
    }

    let receipts = match (state.club(fixture.home.club), state.club(fixture.away.club)) {
        (Some(home), Some(away)) => {
            let key = [state.season as u64, fixture.id.0 as u64, 1];
            let mut rng = rng::stream(state.seed(), MATCH_STREAM, &key);
            gate_receipts(home, away, &mut rng)
        }
        _ => 0,
    };
    if let Some(home) = state.club_mut(fixture.home.club) {
        home.balance += receipts;
    }

    post_match_news(state, fixture, &stats, score);
    Ok(())
}

fn club_name(state: &GameState, club: ClubId) -> String {
    state
        .club(club)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| club.to_string())
}

fn post_match_news(
    state: &mut GameState,
    fixture: &Fixture,
    stats: &BTreeMap<PlayerId, PlayerMatchStats>,
    score: (u8, u8),
) {
    let (home, away) = (fixture.home.club, fixture.away.club);
    let (home_name, away_name) = (club_name(state, home), club_name(state, away));
    let headline = format!("{} {}-{} {}", home_name, score.0, score.1, away_name);
    let user_involved = state.is_user_club(home) || state.is_user_club(away);
    let top_flight = state.club(home).is_some_and(|c| c.division == 0);

    if user_involved {
        log::info!("{}", headline);
    } else {
        log::debug!("{}", headline);
    }
    if user_involved || top_flight {
        state.post_news(NewsCategory::Result, headline, vec![home, away]);
    }

    for (id, player_stats) in stats {
        let Some(club) = player_stats.club.filter(|c| state.is_user_club(*c)) else {
            continue;
        };
        let name = state
            .player(*id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        if player_stats.injured {
            let headline = format!("{} injured", name);
            state.post_news(NewsCategory::Injury, headline, vec![club]);
        }
        if player_stats.red_card {
            let headline = format!("{} sent off", name);
            state.post_news(NewsCategory::Suspension, headline, vec![club]);
        }
    }
}

fn recompute_standings(state: &mut GameState) {
    state.standings = (0..state.config.league.divisions)
        .map(|division| {
            let clubs = state.division_clubs(division);
            compute_table(&clubs, state.schedule.in_division(division))
        })
        .collect();
}

fn context(state: &GameState) -> MatchContext<'_> {
    MatchContext {
        season: state.season,
        date: state.date,
        rules: &state.config.condition,
    }
}

/// Simulate `fixture` on its own RNG stream
fn simulate_fixture(fixture: &Fixture, ctx: &MatchContext<'_>, seed: u64) -> MatchReport {
    let key = [ctx.season as u64, fixture.id.0 as u64];
    let mut rng = rng::stream(seed, MATCH_STREAM, &key);
    simulate(
        &fixture.home,
        &fixture.away,
        &fixture.home_tactics,
        &fixture.away_tactics,
        fixture.form,
        ctx,
        &mut rng,
    )
}

/// Resolve every unplayed fixture of today, then advance to tomorrow.
///
/// Fixtures are simulated in parallel over a snapshot; results are merged
/// in fixture id order before the tables are recomputed.
pub(crate) fn play_match_day(state: &mut GameState, strategy: &dyn LineupStrategy) {
    let today = state.date;
    let ids = state.schedule.unplayed_on(today);
    let fixtures: Vec<Fixture> = ids
        .iter()
        .filter_map(|id| prepare(state, *id, strategy))
        .collect();

    let ctx = context(state);
    let seed = state.seed();
    let mut reports: Vec<(usize, MatchReport)> = fixtures
        .par_iter()
        .enumerate()
        .map(|(index, f)| (index, simulate_fixture(f, &ctx, seed)))
        .collect();
    reports.sort_by_key(|(index, _)| fixtures[*index].id);

    let mut featured: BTreeSet<PlayerId> = BTreeSet::new();
    for (index, report) in reports {
        let appeared: Vec<PlayerId> = report.players.iter().map(|p| p.id).collect();
        let merged = merge_fixture(state, &fixtures[index], report);
        debug_assert!(merged.is_ok(), "{:?}", merged);
        match merged {
            Ok(()) => featured.extend(appeared),
            Err(err) => log::error!("{}", err),
        }
    }

    recompute_standings(state);
    let played = ids.iter().filter_map(|id| state.fixture(*id));
    state.match_results = Some(MatchDay::from_matches(today, played, state.user_club));
    state.match_day_fixtures = None;
    log::debug!("{}: {} fixtures played", today, fixtures.len());

    daily::process_day(state, &featured, true);

    if state.schedule.is_complete() {
        complete_season(state);
    }
    daily::advance_date(state);
}
