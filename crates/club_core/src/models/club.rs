use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PlayerId, StaffId};
use crate::tactics::Tactics;
use crate::training::TrainingPlan;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Manager,
    AssistantManager,
    FitnessCoach,
    Physio,
    Scout,
}

impl StaffRole {
    pub const ALL: [StaffRole; 5] = [
        StaffRole::Manager,
        StaffRole::AssistantManager,
        StaffRole::FitnessCoach,
        StaffRole::Physio,
        StaffRole::Scout,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    /// 1..=20
    pub quality: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    /// 1..=100
    pub reputation: u8,
    /// Whole currency units, may go negative
    pub balance: i64,
    /// 0 = top division
    pub division: u8,
    pub tactics: Tactics,
    pub training: TrainingPlan,
    pub staff: Vec<Staff>,
    /// Starting XI of the previous match
    #[serde(default)]
    pub last_lineup: Vec<PlayerId>,
    /// Starting XI picked by the manager, if any
    #[serde(default)]
    pub manual_lineup: Option<Vec<PlayerId>>,
}

impl Club {
    /// Quality of the staff member in `role`; an empty post counts as average.
    pub fn staff_quality(&self, role: StaffRole) -> u8 {
        self.staff
            .iter()
            .filter(|s| s.role == role)
            .map(|s| s.quality)
            .max()
            .unwrap_or(10)
    }

    /// Forget a player who left the club
    pub fn release_from_lineups(&mut self, player: PlayerId) {
        self.last_lineup.retain(|id| *id != player);
        if let Some(lineup) = self.manual_lineup.as_mut() {
            lineup.retain(|id| *id != player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club() -> Club {
        Club {
            id: ClubId(0),
            name: "Harbor City".to_string(),
            reputation: 60,
            balance: 1_000_000,
            division: 0,
            tactics: Tactics::default(),
            training: TrainingPlan::default(),
            staff: vec![Staff {
                id: StaffId(0),
                name: "Doc".to_string(),
                role: StaffRole::Physio,
                quality: 17,
            }],
            last_lineup: vec![PlayerId(1), PlayerId(2)],
            manual_lineup: Some(vec![PlayerId(2), PlayerId(3)]),
        }
    }

    #[test]
    fn test_staff_quality_defaults_to_average() {
        let club = club();
        assert_eq!(club.staff_quality(StaffRole::Physio), 17);
        assert_eq!(club.staff_quality(StaffRole::FitnessCoach), 10);
    }

    #[test]
    fn test_release_from_lineups() {
        let mut club = club();
        club.release_from_lineups(PlayerId(2));
        assert_eq!(club.last_lineup, vec![PlayerId(1)]);
        assert_eq!(club.manual_lineup, Some(vec![PlayerId(3)]));
    }
}
