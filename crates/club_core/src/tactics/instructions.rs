//! Team-wide tactical instructions
//!
//! Each setting is a five-step scale with a numeric factor the match
//! engine consumes.

use serde::{Deserialize, Serialize};

use super::formation::Formation;

/// Full tactical setup of a club
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Tactics {
    pub formation: Formation,
    pub mentality: Mentality,
    #[serde(alias = "pressing_intensity")]
    pub pressing: TeamPressing,
    #[serde(alias = "team_tempo")]
    pub tempo: TeamTempo,
}

impl Tactics {
    pub fn new(formation: Formation) -> Self {
        Self {
            formation,
            ..Default::default()
        }
    }

    /// Pressing intensity as a factor (0.2 = very low, 1.0 = very high)
    ///
    /// Drives fouls, tackles and the fitness cost of a match.
    pub fn get_pressing_factor(&self) -> f32 {
        match self.pressing {
            TeamPressing::VeryLow => 0.2,
            TeamPressing::Low => 0.4,
            TeamPressing::Medium => 0.6,
            TeamPressing::High => 0.8,
            TeamPressing::VeryHigh => 1.0,
        }
    }

    /// Tempo as a factor (0.2 = very slow, 1.0 = very fast)
    pub fn get_tempo_factor(&self) -> f32 {
        match self.tempo {
            TeamTempo::VerySlow => 0.2,
            TeamTempo::Slow => 0.4,
            TeamTempo::Normal => 0.6,
            TeamTempo::Fast => 0.8,
            TeamTempo::VeryFast => 1.0,
        }
    }

    /// Multiplier on the team's own chance creation
    pub fn attack_modifier(&self) -> f32 {
        let mentality = match self.mentality {
            Mentality::VeryDefensive => 0.8,
            Mentality::Defensive => 0.9,
            Mentality::Balanced => 1.0,
            Mentality::Attacking => 1.1,
            Mentality::VeryAttacking => 1.2,
        };
        // Faster play creates more, slower play keeps the ball
        mentality * (0.94 + 0.1 * self.get_tempo_factor())
    }

    /// Multiplier on the chances the team concedes
    pub fn exposure_modifier(&self) -> f32 {
        let mentality = match self.mentality {
            Mentality::VeryDefensive => 0.85,
            Mentality::Defensive => 0.92,
            Mentality::Balanced => 1.0,
            Mentality::Attacking => 1.08,
            Mentality::VeryAttacking => 1.15,
        };
        mentality * (1.03 - 0.05 * self.get_pressing_factor())
    }

    /// Fitness cost multiplier of a match played with these instructions
    pub fn fitness_load_modifier(&self) -> f32 {
        0.7 + 0.5 * self.get_pressing_factor()
    }

    /// Weight of this side's share of the ball
    pub fn possession_bias(&self) -> f32 {
        // Slow tempo keeps the ball, very attacking sides push long
        let tempo = 1.1 - 0.2 * self.get_tempo_factor();
        let mentality = match self.mentality {
            Mentality::VeryDefensive => 0.85,
            Mentality::Defensive => 0.93,
            Mentality::Balanced | Mentality::VeryAttacking => 1.0,
            Mentality::Attacking => 1.04,
        };
        tempo * mentality
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    #[default]
    Balanced,
    Attacking,
    VeryAttacking,
}

/// Team-wide pressing intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TeamPressing {
    VeryLow,
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

/// Speed of build-up play
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TeamTempo {
    VerySlow,
    Slow,
    #[default]
    Normal,
    Fast,
    VeryFast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tactics_are_neutral() {
        let tactics = Tactics::default();
        assert_eq!(tactics.formation, Formation::F442);
        assert!((tactics.fitness_load_modifier() - 1.0).abs() < 1e-6);
        assert!((tactics.attack_modifier() - 1.0).abs() < 1e-6);
        assert!((tactics.exposure_modifier() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_attacking_trades_exposure_for_chances() {
        let balanced = Tactics::default();
        let attacking = Tactics {
            mentality: Mentality::VeryAttacking,
            ..Default::default()
        };
        assert!(attacking.attack_modifier() > balanced.attack_modifier());
        assert!(attacking.exposure_modifier() > balanced.exposure_modifier());
    }

    #[test]
    fn test_pressing_costs_fitness() {
        let low = Tactics {
            pressing: TeamPressing::VeryLow,
            ..Default::default()
        };
        let high = Tactics {
            pressing: TeamPressing::VeryHigh,
            ..Default::default()
        };
        assert!(high.fitness_load_modifier() > low.fitness_load_modifier());
        assert!(high.exposure_modifier() < low.exposure_modifier());
    }

    #[test]
    fn test_alias_fields_deserialize() {
        let json = r#"{
            "formation": "4-3-3",
            "mentality": "Attacking",
            "pressing_intensity": "High",
            "team_tempo": "Fast"
        }"#;
        let tactics: Tactics = serde_json::from_str(json).unwrap();
        assert_eq!(tactics.pressing, TeamPressing::High);
        assert_eq!(tactics.tempo, TeamTempo::Fast);
    }
}
