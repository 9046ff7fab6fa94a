//! World configuration
//!
//! Every tunable of the season engine lives here. All structs are
//! `#[serde(default)]`, so a config file only needs the fields it changes.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::position::CATEGORY_MINIMUMS;

/// Top-level generation and simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Master seed; every random stream is derived from it
    pub seed: u64,
    pub league: LeagueRules,
    pub squad: SquadRules,
    pub calendar: CalendarRules,
    pub condition: ConditionRules,
    pub transfers: TransferRules,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 20_250_802,
            league: LeagueRules::default(),
            squad: SquadRules::default(),
            calendar: CalendarRules::default(),
            condition: ConditionRules::default(),
            transfers: TransferRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueRules {
    /// Number of divisions (0 = top flight)
    pub divisions: u8,
    /// Clubs in every division (must be even)
    pub clubs_per_division: usize,
    /// Top places of a lower division that move up
    pub promotion_places: usize,
    /// Bottom places of a higher division that move down
    pub relegation_places: usize,
    /// Prize for finishing first in the top division
    pub first_place_prize: i64,
    /// Prize reduction per place below first
    pub prize_step: i64,
    /// Minimum appearances to qualify for individual awards
    pub award_min_appearances: u16,
    /// Oldest age eligible for best young player
    pub young_player_max_age: u8,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            divisions: 2,
            clubs_per_division: 10,
            promotion_places: 2,
            relegation_places: 2,
            first_place_prize: 12_000_000,
            prize_step: 900_000,
            award_min_appearances: 6,
            young_player_max_age: 21,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadRules {
    pub min_size: u8,
    pub max_size: u8,
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            min_size: 22,
            max_size: 28,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarRules {
    /// First day of the first season
    pub season_start: NaiveDate,
    /// Days between the season start and round one
    pub preseason_days: u16,
    pub days_between_rounds: u16,
    /// Weekday on which clubs pay wages
    pub wage_day: Weekday,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self {
            season_start: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap_or(NaiveDate::MIN),
            preseason_days: 7,
            days_between_rounds: 7,
            wage_day: Weekday::Mon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRules {
    /// Fitness lost per minute played at normal pressing
    pub fitness_load_per_minute: f32,
    /// Fitness regained per rest day with an average physio
    pub daily_fitness_recovery: f32,
    /// Morale level players drift back to
    pub morale_baseline: u8,
    /// Morale points moved toward the baseline per day
    pub morale_drift: u8,
    /// Every n-th yellow card of a season triggers a ban
    pub yellow_card_threshold: u16,
    pub yellow_ban_days: u16,
    pub red_card_ban_days: u16,
    /// Base probability that a player gets injured during a match
    pub match_injury_chance: f64,
}

impl Default for ConditionRules {
    fn default() -> Self {
        Self {
            fitness_load_per_minute: 0.28,
            daily_fitness_recovery: 7.0,
            morale_baseline: 65,
            morale_drift: 1,
            yellow_card_threshold: 5,
            yellow_ban_days: 8,
            red_card_ban_days: 15,
            match_injury_chance: 0.012,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferRules {
    /// Chance per day that some AI club attempts a signing
    pub ai_daily_transfer_chance: f64,
    /// Contract length handed out on signing, in seasons
    pub contract_seasons: u16,
}

impl Default for TransferRules {
    fn default() -> Self {
        Self {
            ai_daily_transfer_chance: 0.12,
            contract_seasons: 3,
        }
    }
}

impl WorldConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config file, picking the format from its extension (`.json` or YAML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_yaml_str(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Total number of clubs in the world
    pub fn total_clubs(&self) -> usize {
        self.league.divisions as usize * self.league.clubs_per_division
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let league = &self.league;
        if league.divisions == 0 {
            return Err(ConfigError::NoDivisions);
        }
        if league.clubs_per_division < 2 {
            return Err(ConfigError::TooFewClubs(league.clubs_per_division));
        }
        if league.clubs_per_division % 2 != 0 {
            return Err(ConfigError::OddClubCount(league.clubs_per_division));
        }
        if league.divisions > 1 {
            if league.promotion_places != league.relegation_places {
                return Err(ConfigError::UnbalancedExchange {
                    promotion: league.promotion_places,
                    relegation: league.relegation_places,
                });
            }
            if league.promotion_places * 2 > league.clubs_per_division {
                return Err(ConfigError::ExchangeTooWide {
                    places: league.promotion_places,
                    clubs: league.clubs_per_division,
                });
            }
        }

        let legal_min: u8 = CATEGORY_MINIMUMS.iter().map(|(_, n)| *n).sum();
        if self.squad.min_size < legal_min || self.squad.max_size < self.squad.min_size {
            return Err(ConfigError::SquadBounds {
                min: self.squad.min_size,
                max: self.squad.max_size,
                legal_min,
            });
        }

        if self.calendar.days_between_rounds == 0 {
            return Err(ConfigError::ZeroRoundInterval);
        }

        let condition = &self.condition;
        if !(0.0..=1.0).contains(&condition.match_injury_chance) {
            return Err(ConfigError::InvalidValue {
                field: "condition.match_injury_chance",
                reason: format!("{} is not a probability", condition.match_injury_chance),
            });
        }
        if condition.yellow_card_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "condition.yellow_card_threshold",
                reason: "must be at least 1".to_string(),
            });
        }
        if condition.morale_baseline > 100 {
            return Err(ConfigError::InvalidValue {
                field: "condition.morale_baseline",
                reason: format!("{} is above 100", condition.morale_baseline),
            });
        }
        let chance = self.transfers.ai_daily_transfer_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::InvalidValue {
                field: "transfers.ai_daily_transfer_chance",
                reason: format!("{} is not a probability", chance),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
        assert_eq!(WorldConfig::default().total_clubs(), 20);
    }

    #[test]
    fn test_odd_club_count_rejected() {
        let mut config = WorldConfig::default();
        config.league.clubs_per_division = 7;
        assert_eq!(config.validate(), Err(ConfigError::OddClubCount(7)));
    }

    #[test]
    fn test_squad_below_legal_minimum_rejected() {
        let mut config = WorldConfig::default();
        config.squad.min_size = 11;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::SquadBounds { .. }));
    }

    #[test]
    fn test_exchange_must_balance_with_several_divisions() {
        let mut config = WorldConfig::default();
        config.league.relegation_places = 3;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnbalancedExchange { .. }));

        // A single division has nowhere to exchange with, so the places are irrelevant
        config.league.divisions = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "seed: 7\nleague:\n  divisions: 1\n  clubs_per_division: 4\n";
        let config = WorldConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.league.clubs_per_division, 4);
        assert_eq!(config.league.promotion_places, 2);
        assert_eq!(config.squad, SquadRules::default());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = r#"{"seed": 99, "calendar": {"season_start": "2030-07-01", "wage_day": "Fri"}}"#;
        file.write_all(json.as_bytes()).unwrap();

        let config = WorldConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 99);
        let start = NaiveDate::from_ymd_opt(2030, 7, 1).unwrap();
        assert_eq!(config.calendar.season_start, start);
        assert_eq!(config.calendar.wage_day, Weekday::Fri);
    }

    #[test]
    fn test_load_missing_file() {
        let err = WorldConfig::load("/nonexistent/club.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
