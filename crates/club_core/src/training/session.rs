// Daily training sessions
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::player::{attr, Player};

/// Which attributes a club's sessions develop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrainingFocus {
    #[default]
    Balanced,
    Attacking,
    Defending,
    Possession,
    Fitness,
    Goalkeeping,
}

impl TrainingFocus {
    /// Attribute indices the focus can improve
    pub fn attributes(self) -> &'static [usize] {
        match self {
            TrainingFocus::Balanced => &[
                attr::PACE,
                attr::SHOOTING,
                attr::PASSING,
                attr::DRIBBLING,
                attr::DEFENDING,
                attr::PHYSICAL,
            ],
            TrainingFocus::Attacking => &[attr::SHOOTING, attr::DRIBBLING, attr::PACE],
            TrainingFocus::Defending => &[attr::DEFENDING, attr::PHYSICAL],
            TrainingFocus::Possession => &[attr::PASSING, attr::DRIBBLING],
            TrainingFocus::Fitness => &[attr::PHYSICAL, attr::PACE],
            TrainingFocus::Goalkeeping => &[attr::GOALKEEPING],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrainingIntensity {
    Rest,
    Light,
    #[default]
    Normal,
    Intensive,
}

impl TrainingIntensity {
    /// Fitness spent by a session
    pub fn fitness_cost(&self) -> u8 {
        match self {
            TrainingIntensity::Rest => 0,
            TrainingIntensity::Light => 2,
            TrainingIntensity::Normal => 4,
            TrainingIntensity::Intensive => 7,
        }
    }

    pub fn effect_multiplier(&self) -> f32 {
        match self {
            TrainingIntensity::Rest => 0.0,
            TrainingIntensity::Light => 0.6,
            TrainingIntensity::Normal => 1.0,
            TrainingIntensity::Intensive => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrainingPlan {
    pub focus: TrainingFocus,
    pub intensity: TrainingIntensity,
}

/// Base chance per session that a focused attribute gains a point
const BASE_GAIN_CHANCE: f64 = 0.02;

fn age_factor(age: u8) -> f64 {
    match age {
        0..=21 => 1.5,
        22..=25 => 1.0,
        26..=29 => 0.6,
        _ => 0.3,
    }
}

/// Run one day of training for an available player.
///
/// `coach_quality` (1..=20) is the fitness coach's; 10 is an average coach.
pub fn apply_training_day(
    mut player: Player,
    plan: &TrainingPlan,
    coach_quality: u8,
    rng: &mut impl Rng,
) -> Player {
    if !player.is_available() {
        return player;
    }

    player.fitness = player.fitness.saturating_sub(plan.intensity.fitness_cost());
    if plan.intensity == TrainingIntensity::Rest {
        return player;
    }

    // Keepers only sharpen goalkeeping; outfielders never do
    let targets: Vec<usize> = plan
        .focus
        .attributes()
        .iter()
        .copied()
        .filter(|i| (*i == attr::GOALKEEPING) == player.position.is_goalkeeper())
        .collect();
    if targets.is_empty() {
        return player;
    }
    let target = targets[rng.gen_range(0..targets.len())];

    let coach = 0.6 + coach_quality.min(20) as f64 / 25.0;
    let intensity = plan.intensity.effect_multiplier() as f64;
    let chance = BASE_GAIN_CHANCE * intensity * coach * age_factor(player.age);
    if rng.gen_bool(chance.clamp(0.0, 1.0)) {
        player.attributes.adjust(target, 1);
    }

    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Contract, PlayerAttributes, SeasonRecord};
    use crate::models::{ClubId, PlayerId, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(position: Position, age: u8) -> Player {
        Player {
            id: PlayerId(9),
            name: "Trainee".to_string(),
            age,
            position,
            attributes: PlayerAttributes::from_array([50; 7]),
            club: Some(ClubId(0)),
            market_value: 300_000,
            contract: Contract {
                weekly_wage: 1_200,
                expires_season: 2,
            },
            morale: 65,
            fitness: 90,
            injury: None,
            suspension: None,
            season_yellow_cards: 0,
            history: vec![SeasonRecord::open(1)],
            retired: false,
        }
    }

    fn plan(focus: TrainingFocus, intensity: TrainingIntensity) -> TrainingPlan {
        TrainingPlan { focus, intensity }
    }

    #[test]
    fn test_rest_day_costs_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let plan = plan(TrainingFocus::Attacking, TrainingIntensity::Rest);
        let before = player(Position::ST, 20);
        let after = apply_training_day(before.clone(), &plan, 20, &mut rng);
        assert_eq!(after, before);
    }

    #[test]
    fn test_intensive_training_improves_young_players_over_time() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let plan = plan(TrainingFocus::Attacking, TrainingIntensity::Intensive);
        let mut p = player(Position::ST, 19);
        let start = p.attributes;
        for _ in 0..200 {
            p.fitness = 100;
            p = apply_training_day(p, &plan, 18, &mut rng);
        }
        let gained: i32 = p
            .attributes
            .as_array()
            .iter()
            .zip(start.as_array())
            .map(|(a, b)| *a as i32 - b as i32)
            .sum();
        assert!(gained > 0);
        // Outfielders never train goalkeeping
        assert_eq!(p.attributes.goalkeeping, start.goalkeeping);
    }

    #[test]
    fn test_goalkeeping_focus_is_keeper_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let plan = plan(TrainingFocus::Goalkeeping, TrainingIntensity::Intensive);
        let before = player(Position::CB, 20);
        let after = apply_training_day(before.clone(), &plan, 20, &mut rng);
        assert_eq!(after.attributes, before.attributes);
        assert_eq!(after.fitness, 83);
    }
}
