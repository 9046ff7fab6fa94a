use std::sync::Arc;

use super::intent::Intent;
use super::reducer::reduce;
use super::state::GameState;
use crate::config::WorldConfig;
use crate::error::{ConfigError, IllegalIntent};
use crate::tactics::{BestAvailable, LineupStrategy};
use crate::world::generate;

/// Owner of the live world.
///
/// Readers take cheap [`Arc`] snapshots; every accepted intent swaps in a
/// whole new state, so a snapshot never changes under its holder.
#[derive(Debug)]
pub struct Game {
    state: Arc<GameState>,
    strategy: Box<dyn LineupStrategy>,
}

impl Game {
    /// Generate a fresh world from `config`.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_state(generate(config)?))
    }

    /// Resume from a previously saved state.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state: Arc::new(state),
            strategy: Box::new(BestAvailable),
        }
    }

    /// Use `strategy` for every lineup the engine picks itself.
    pub fn with_strategy(mut self, strategy: Box<dyn LineupStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Apply `intent`. On rejection the current state stays in place.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), IllegalIntent> {
        match reduce(&self.state, intent, self.strategy.as_ref()) {
            Ok(next) => {
                self.state = Arc::new(next);
                Ok(())
            }
            Err(err) => {
                log::warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClubId;
    use crate::season::SeasonPhase;

    #[test]
    fn test_snapshot_survives_dispatch() {
        let mut game = Game::new(&WorldConfig::default()).unwrap();
        let before = game.snapshot();

        let select = Intent::SelectClub { club: ClubId(0) };
        game.dispatch(select).unwrap();
        assert_eq!(before.phase, SeasonPhase::PreSeason);
        assert_eq!(game.state().phase, SeasonPhase::InSeason);
    }

    #[test]
    fn test_rejected_intent_keeps_state() {
        let mut game = Game::new(&WorldConfig::default()).unwrap();
        let before = game.snapshot();
        assert!(game.dispatch(Intent::StartNewSeason).is_err());
        assert!(Arc::ptr_eq(&before, &game.snapshot()));
    }
}
