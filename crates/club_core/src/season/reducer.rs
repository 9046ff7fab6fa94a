//! The season state machine's transition function

use std::collections::BTreeSet;

use super::daily;
use super::intent::{authorize, Actor, Intent};
use super::matchday::play_match_day;
use super::newseason::start_new_season;
use super::state::{GameState, MatchDay, SeasonPhase};
use crate::error::IllegalIntent;
use crate::models::NewsCategory;
use crate::tactics::{validate_lineup, LineupStrategy};
use crate::training::TrainingPlan;
use crate::transfer::resolve;

fn require_phase(
    state: &GameState,
    intent: &'static str,
    allowed: &[SeasonPhase],
) -> Result<(), IllegalIntent> {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(IllegalIntent::new(intent, format!("not allowed during {:?}", state.phase)))
    }
}

/// Compute the state that follows `intent`.
///
/// Pure: `state` is never modified. A rejected intent returns
/// `IllegalIntent` and the caller keeps the state it had.
pub fn reduce(
    state: &GameState,
    intent: Intent,
    strategy: &dyn LineupStrategy,
) -> Result<GameState, IllegalIntent> {
    use SeasonPhase::*;
    let name = intent.name();

    match intent {
        Intent::AdvanceDay => {
            require_phase(state, name, &[InSeason])?;
            let mut next = state.clone();
            if next.has_fixtures_today() {
                play_match_day(&mut next, strategy);
            } else {
                daily::process_day(&mut next, &BTreeSet::new(), false);
                daily::advance_date(&mut next);
            }
            Ok(next)
        }

        Intent::SimulateMatchDay => {
            require_phase(state, name, &[InSeason])?;
            if !state.has_fixtures_today() {
                return Err(IllegalIntent::new(name, format!("no fixtures on {}", state.date)));
            }
            let mut next = state.clone();
            play_match_day(&mut next, strategy);
            Ok(next)
        }

        Intent::SelectClub { club } => {
            if let Some(bound) = state.user_club {
                return Err(IllegalIntent::new(name, format!("{} is already bound", bound)));
            }
            require_phase(state, name, &[PreSeason])?;
            let Some(selected) = state.club(club) else {
                return Err(IllegalIntent::new(name, format!("{} does not exist", club)));
            };
            log::info!("manager takes charge of {}", selected.name);

            let mut next = state.clone();
            next.user_club = Some(club);
            next.phase = InSeason;
            if next.has_fixtures_today() {
                let today = next.schedule.on_date(next.date);
                let fixtures = MatchDay::from_matches(next.date, today, Some(club));
                next.match_day_fixtures = Some(fixtures);
            }
            Ok(next)
        }

        Intent::MakeTransferOffer(offer) => {
            require_phase(state, name, &[InSeason])?;
            authorize(state, Actor::Manager, offer.buyer, name)?;
            let mut next = state.clone();
            let result = resolve(&mut next, offer);
            if !result.success {
                let headline = format!("Bid rejected: {}", result.message);
                next.post_news(NewsCategory::Transfer, headline, vec![offer.buyer]);
            }
            next.transfer_result = Some(result);
            Ok(next)
        }

        Intent::SetTactics {
            club,
            tactics,
            lineup,
        } => {
            require_phase(state, name, &[InSeason, SeasonComplete])?;
            authorize(state, Actor::Manager, club, name)?;
            if let Some(ids) = &lineup {
                if let Err(err) = validate_lineup(club, ids, &state.players) {
                    return Err(IllegalIntent::new(name, err.to_string()));
                }
            }
            let mut next = state.clone();
            if let Some(target) = next.club_mut(club) {
                target.tactics = tactics;
                target.manual_lineup = lineup;
            }
            Ok(next)
        }

        Intent::SetTraining {
            club,
            focus,
            intensity,
        } => {
            require_phase(state, name, &[InSeason, SeasonComplete])?;
            authorize(state, Actor::Manager, club, name)?;
            let mut next = state.clone();
            if let Some(target) = next.club_mut(club) {
                target.training = TrainingPlan {
                    focus,
                    intensity,
                };
            }
            Ok(next)
        }

        Intent::StartNewSeason => {
            require_phase(state, name, &[SeasonComplete])?;
            let mut next = state.clone();
            if let Err(err) = start_new_season(&mut next) {
                return Err(IllegalIntent::new(name, err.to_string()));
            }
            Ok(next)
        }

        Intent::ClearMatchDayFixtures => {
            let mut next = state.clone();
            next.match_day_fixtures = None;
            Ok(next)
        }

        Intent::ClearMatchResults => {
            let mut next = state.clone();
            next.match_results = None;
            Ok(next)
        }

        Intent::ClearTransferResult => {
            let mut next = state.clone();
            next.transfer_result = None;
            Ok(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::models::ClubId;
    use crate::tactics::{BestAvailable, Formation, Tactics};
    use crate::training::{TrainingFocus, TrainingIntensity};
    use crate::transfer::TransferOffer;
    use crate::world::generate;

    fn fresh() -> GameState {
        generate(&WorldConfig::default()).unwrap()
    }

    fn selected() -> GameState {
        let select = Intent::SelectClub { club: ClubId(4) };
        reduce(&fresh(), select, &BestAvailable).unwrap()
    }

    #[test]
    fn test_select_club_once() {
        let state = selected();
        assert_eq!(state.user_club, Some(ClubId(4)));
        assert_eq!(state.phase, SeasonPhase::InSeason);

        let again = Intent::SelectClub { club: ClubId(5) };
        let err = reduce(&state, again, &BestAvailable).unwrap_err();
        assert_eq!(err.intent, "SELECT_CLUB");

        let missing = Intent::SelectClub { club: ClubId(999) };
        assert!(reduce(&fresh(), missing, &BestAvailable).is_err());
    }

    #[test]
    fn test_pre_season_rejects_play() {
        let state = fresh();
        let offer = TransferOffer {
            buyer: ClubId(0),
            player: state.squad(ClubId(1))[0].id,
            amount: 1_000_000,
        };
        let intents = [
            Intent::AdvanceDay,
            Intent::SimulateMatchDay,
            Intent::StartNewSeason,
            Intent::MakeTransferOffer(offer),
        ];
        for intent in intents {
            let name = intent.name();
            let err = reduce(&state, intent, &BestAvailable).unwrap_err();
            assert_eq!(err.intent, name);
            assert!(err.reason.contains("PreSeason"), "{}", err.reason);
        }
        assert!(reduce(&state, Intent::ClearMatchResults, &BestAvailable).is_ok());
    }

    #[test]
    fn test_simulate_match_day_needs_fixtures() {
        let state = selected();
        assert!(!state.has_fixtures_today());
        let err = reduce(&state, Intent::SimulateMatchDay, &BestAvailable).unwrap_err();
        assert!(err.reason.contains("no fixtures"));
    }

    #[test]
    fn test_only_the_user_club_can_be_managed() {
        let state = selected();
        let tactics = Tactics::new(Formation::F433);

        let other = Intent::SetTactics {
            club: ClubId(1),
            tactics: tactics.clone(),
            lineup: None,
        };
        assert!(reduce(&state, other, &BestAvailable).is_err());

        let own = Intent::SetTactics {
            club: ClubId(4),
            tactics: tactics.clone(),
            lineup: None,
        };
        let next = reduce(&state, own, &BestAvailable).unwrap();
        assert_eq!(next.clubs[4].tactics, tactics);

        let training = Intent::SetTraining {
            club: ClubId(4),
            focus: TrainingFocus::Defending,
            intensity: TrainingIntensity::Intensive,
        };
        let next = reduce(&next, training, &BestAvailable).unwrap();
        assert_eq!(next.clubs[4].training.focus, TrainingFocus::Defending);
    }

    #[test]
    fn test_invalid_lineup_rejected() {
        let state = selected();
        let short: Vec<_> = state
            .squad(ClubId(4))
            .iter()
            .take(10)
            .map(|p| p.id)
            .collect();
        let intent = Intent::SetTactics {
            club: ClubId(4),
            tactics: Tactics::default(),
            lineup: Some(short),
        };
        let err = reduce(&state, intent, &BestAvailable).unwrap_err();
        assert!(err.reason.contains("11 players"));
    }

    #[test]
    fn test_transfer_offer_fills_the_slot() {
        let state = selected();
        let target = state.squad(ClubId(1))[0].id;
        let offer = TransferOffer {
            buyer: ClubId(4),
            player: target,
            amount: 1,
        };
        let next = reduce(&state, Intent::MakeTransferOffer(offer), &BestAvailable).unwrap();
        let result = next.transfer_result.as_ref().unwrap();
        assert!(!result.success);

        let cleared = reduce(&next, Intent::ClearTransferResult, &BestAvailable).unwrap();
        assert!(cleared.transfer_result.is_none());

        // Bids on behalf of another club are not the manager's to make
        let foreign = TransferOffer {
            buyer: ClubId(2),
            player: target,
            amount: 1,
        };
        assert!(reduce(&state, Intent::MakeTransferOffer(foreign), &BestAvailable).is_err());
    }
}
