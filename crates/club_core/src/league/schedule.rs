//! Fixture generation (double round robin, circle method)

use chrono::{Duration, NaiveDate};

use crate::error::ConfigError;
use crate::models::{ClubId, Match, MatchId, Schedule};

/// Pairings (home, away) per round.
///
/// The first half is a single round robin by the circle method; the second
/// half mirrors it with venues swapped, so every pair meets twice and every
/// club hosts each opponent once.
pub fn double_round_robin(clubs: &[ClubId]) -> Result<Vec<Vec<(ClubId, ClubId)>>, ConfigError> {
    let n = clubs.len();
    if n < 2 {
        return Err(ConfigError::TooFewClubs(n));
    }
    if n % 2 != 0 {
        return Err(ConfigError::OddClubCount(n));
    }

    let mut ring: Vec<ClubId> = clubs.to_vec();
    let mut first_half = Vec::with_capacity(n - 1);
    for round in 0..n - 1 {
        let pairs = (0..n / 2)
            .map(|i| {
                let (a, b) = (ring[i], ring[n - 1 - i]);
                // Alternate venues so no club sits at home for long runs
                let swap = if i == 0 { round % 2 == 1 } else { i % 2 == 1 };
                if swap {
                    (b, a)
                } else {
                    (a, b)
                }
            })
            .collect::<Vec<_>>();
        first_half.push(pairs);

        // Keep the first club fixed, rotate the rest clockwise
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }
    }

    let second_half: Vec<Vec<(ClubId, ClubId)>> = first_half
        .iter()
        .map(|round| round.iter().map(|(home, away)| (*away, *home)).collect())
        .collect();

    first_half.extend(second_half);
    Ok(first_half)
}

/// Full season schedule for every division; all divisions share round dates.
///
/// Match ids are dense and follow (round, division, pairing) order, so id
/// order is also date order.
pub fn build_schedule(
    season: u16,
    divisions: &[Vec<ClubId>],
    first_round: NaiveDate,
    days_between_rounds: u16,
) -> Result<Schedule, ConfigError> {
    if divisions.is_empty() {
        return Err(ConfigError::NoDivisions);
    }
    if days_between_rounds == 0 {
        return Err(ConfigError::ZeroRoundInterval);
    }

    let rounds: Vec<Vec<Vec<(ClubId, ClubId)>>> = divisions
        .iter()
        .map(|clubs| double_round_robin(clubs))
        .collect::<Result<_, _>>()?;
    let round_count = rounds.iter().map(Vec::len).max().unwrap_or(0);

    let mut matches = Vec::new();
    for round in 0..round_count {
        let date = first_round + Duration::days(round as i64 * days_between_rounds as i64);
        for (division, division_rounds) in rounds.iter().enumerate() {
            let Some(pairs) = division_rounds.get(round) else {
                continue;
            };
            for (home, away) in pairs {
                matches.push(Match {
                    id: MatchId(matches.len() as u32),
                    season,
                    division: division as u8,
                    round: round as u16,
                    date,
                    home: *home,
                    away: *away,
                    outcome: None,
                });
            }
        }
    }

    Ok(Schedule { season, matches })
}
