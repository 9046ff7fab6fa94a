use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PlayerId};
use super::position::Position;

/// Core footballing attributes (1..=99)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlayerAttributes {
    pub pace: u8,
    pub shooting: u8,
    pub passing: u8,
    pub dribbling: u8,
    pub defending: u8,
    pub physical: u8,
    pub goalkeeping: u8,
}

impl PlayerAttributes {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    pub fn as_array(&self) -> [u8; 7] {
        [
            self.pace,
            self.shooting,
            self.passing,
            self.dribbling,
            self.defending,
            self.physical,
            self.goalkeeping,
        ]
    }

    pub fn from_array(values: [u8; 7]) -> Self {
        let c = |v: u8| v.clamp(Self::MIN, Self::MAX);
        Self {
            pace: c(values[0]),
            shooting: c(values[1]),
            passing: c(values[2]),
            dribbling: c(values[3]),
            defending: c(values[4]),
            physical: c(values[5]),
            goalkeeping: c(values[6]),
        }
    }

    /// Role-weighted ability in `role` (1.0..=99.0)
    pub fn rating_for(&self, role: Position) -> f32 {
        self.as_array()
            .iter()
            .zip(role.attribute_weights())
            .map(|(value, weight)| *value as f32 * weight)
            .sum()
    }

    /// Apply a signed change to the attribute at `index`, clamped to the legal range.
    pub fn adjust(&mut self, index: usize, delta: i16) {
        let mut values = self.as_array();
        if let Some(value) = values.get_mut(index) {
            *value = (*value as i16 + delta).clamp(Self::MIN as i16, Self::MAX as i16) as u8;
        }
        *self = Self::from_array(values);
    }
}

/// Attribute indices in `PlayerAttributes::as_array` order
pub mod attr {
    pub const PACE: usize = 0;
    pub const SHOOTING: usize = 1;
    pub const PASSING: usize = 2;
    pub const DRIBBLING: usize = 3;
    pub const DEFENDING: usize = 4;
    pub const PHYSICAL: usize = 5;
    pub const GOALKEEPING: usize = 6;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjuryKind {
    Knock,
    HamstringStrain,
    GroinStrain,
    AnkleSprain,
    BrokenBone,
    KneeLigament,
}

impl InjuryKind {
    /// Inclusive range of days out
    pub fn days_out_range(self) -> (u16, u16) {
        match self {
            InjuryKind::Knock => (2, 6),
            InjuryKind::HamstringStrain => (10, 28),
            InjuryKind::GroinStrain => (7, 18),
            InjuryKind::AnkleSprain => (7, 21),
            InjuryKind::BrokenBone => (45, 90),
            InjuryKind::KneeLigament => (60, 150),
        }
    }

    /// Draw an injury kind, minor ones far more likely
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..100) {
            0..=44 => InjuryKind::Knock,
            45..=64 => InjuryKind::HamstringStrain,
            65..=77 => InjuryKind::GroinStrain,
            78..=93 => InjuryKind::AnkleSprain,
            94..=97 => InjuryKind::BrokenBone,
            _ => InjuryKind::KneeLigament,
        }
    }

    pub fn sample_days<R: Rng + ?Sized>(self, rng: &mut R) -> u16 {
        let (lo, hi) = self.days_out_range();
        rng.gen_range(lo..=hi)
    }

    pub fn label(self) -> &'static str {
        match self {
            InjuryKind::Knock => "knock",
            InjuryKind::HamstringStrain => "hamstring strain",
            InjuryKind::GroinStrain => "groin strain",
            InjuryKind::AnkleSprain => "ankle sprain",
            InjuryKind::BrokenBone => "broken bone",
            InjuryKind::KneeLigament => "knee ligament damage",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Injury {
    pub kind: InjuryKind,
    /// Days left on the countdown; cleared when it reaches zero
    pub days_remaining: u16,
    pub expected_return: NaiveDate,
}

impl Injury {
    pub fn new(kind: InjuryKind, days: u16, today: NaiveDate) -> Self {
        let expected_return = today + chrono::Duration::days(days as i64);
        Self {
            kind,
            days_remaining: days,
            expected_return,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suspension {
    pub days_remaining: u16,
    pub return_date: NaiveDate,
}

impl Suspension {
    pub fn new(days: u16, today: NaiveDate) -> Self {
        let return_date = today + chrono::Duration::days(days as i64);
        Self {
            days_remaining: days,
            return_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    pub weekly_wage: i64,
    /// Last season covered by the contract
    pub expires_season: u16,
}

/// Aggregated on-pitch statistics for one season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SeasonRecord {
    pub season: u16,
    pub appearances: u16,
    pub goals: u16,
    pub assists: u16,
    /// Sum of match ratings; divide by appearances for the average
    pub rating_points: f32,
    pub yellow_cards: u16,
    pub red_cards: u16,
    /// Sealed records belong to a finished season and never change again
    pub sealed: bool,
}

impl SeasonRecord {
    pub fn open(season: u16) -> Self {
        Self {
            season,
            ..Default::default()
        }
    }

    pub fn average_rating(&self) -> f32 {
        if self.appearances == 0 {
            0.0
        } else {
            self.rating_points / self.appearances as f32
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: u8,
    pub position: Position,
    pub attributes: PlayerAttributes,
    /// Back-reference to the owning club; `None` once retired
    pub club: Option<ClubId>,
    pub market_value: i64,
    pub contract: Contract,
    /// 0..=100
    pub morale: u8,
    /// Match fitness 0..=100
    pub fitness: u8,
    pub injury: Option<Injury>,
    pub suspension: Option<Suspension>,
    pub season_yellow_cards: u16,
    /// One record per season played, append-only
    pub history: Vec<SeasonRecord>,
    #[serde(default)]
    pub retired: bool,
}

impl Player {
    /// Ability in the player's natural role
    pub fn overall(&self) -> u8 {
        self.attributes.rating_for(self.position).round() as u8
    }

    pub fn is_injured(&self) -> bool {
        self.injury.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspension.is_some()
    }

    /// Selectable for a lineup
    pub fn is_available(&self) -> bool {
        !self.retired && !self.is_injured() && !self.is_suspended()
    }

    pub fn current_season(&self) -> Option<&SeasonRecord> {
        self.history.last().filter(|r| !r.sealed)
    }

    /// The open record for `season`, if the player has one.
    ///
    /// Only the last, unsealed entry can be mutated.
    pub fn season_record_mut(&mut self, season: u16) -> Option<&mut SeasonRecord> {
        self.history
            .last_mut()
            .filter(|r| !r.sealed && r.season == season)
    }

    pub fn open_season(&mut self, season: u16) {
        let last = self.history.last();
        let fresh = last.map_or(true, |r| r.sealed && r.season < season);
        debug_assert!(fresh, "{} reopened season {}", self.id, season);
        self.history.push(SeasonRecord::open(season));
    }

    pub fn seal_season(&mut self) {
        if let Some(record) = self.history.last_mut() {
            record.sealed = true;
        }
    }

    pub fn career_goals(&self) -> u32 {
        self.history.iter().map(|r| r.goals as u32).sum()
    }

    pub fn career_appearances(&self) -> u32 {
        self.history.iter().map(|r| r.appearances as u32).sum()
    }
}

/// Transfer value from ability and age, rounded to the nearest thousand.
pub fn market_value(overall: u8, age: u8) -> i64 {
    let age_factor = match age {
        0..=21 => 1.3,
        22..=24 => 1.15,
        25..=28 => 1.0,
        29..=31 => 0.75,
        32..=33 => 0.5,
        _ => 0.3,
    };
    let base = 50_000.0 * 1.12_f64.powi(overall as i32 - 45);
    ((base * age_factor / 1_000.0).round() as i64).max(5) * 1_000
}

/// Weekly wage a player of this value expects
pub fn expected_wage(value: i64) -> i64 {
    ((value / 250) / 100 * 100).max(500)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> Player {
        Player {
            id: PlayerId(1),
            name: "Test Player".to_string(),
            age: 24,
            position: Position::ST,
            attributes: PlayerAttributes::from_array([70, 80, 60, 70, 30, 65, 10]),
            club: Some(ClubId(0)),
            market_value: 1_000_000,
            contract: Contract {
                weekly_wage: 4_000,
                expires_season: 3,
            },
            morale: 70,
            fitness: 100,
            injury: None,
            suspension: None,
            season_yellow_cards: 0,
            history: vec![SeasonRecord::open(1)],
            retired: false,
        }
    }

    #[test]
    fn test_overall_uses_role_weights() {
        let player = sample_player();
        // 70*0.2 + 80*0.45 + 60*0.05 + 70*0.15 + 65*0.15 = 73.25
        assert_eq!(player.overall(), 73);
        assert!(player.attributes.rating_for(Position::GK) < 20.0);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut attrs = PlayerAttributes::from_array([98, 2, 50, 50, 50, 50, 50]);
        attrs.adjust(attr::PACE, 5);
        attrs.adjust(attr::SHOOTING, -5);
        assert_eq!(attrs.pace, 99);
        assert_eq!(attrs.shooting, 1);
    }

    #[test]
    fn test_season_record_only_open_entry_is_mutable() {
        let mut player = sample_player();
        assert!(player.season_record_mut(2).is_none());

        player.season_record_mut(1).unwrap().goals += 2;
        player.seal_season();
        assert!(player.season_record_mut(1).is_none());
        assert!(player.current_season().is_none());

        player.open_season(2);
        assert_eq!(player.history.len(), 2);
        assert_eq!(player.career_goals(), 2);
    }

    #[test]
    fn test_availability_flags() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut player = sample_player();
        assert!(player.is_available());

        player.injury = Some(Injury::new(InjuryKind::Knock, 3, today));
        assert!(!player.is_available());
        let back = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
        assert_eq!(player.injury.as_ref().unwrap().expected_return, back);

        player.injury = None;
        player.suspension = Some(Suspension::new(7, today));
        assert!(!player.is_available());
    }

    #[test]
    fn test_market_value_rises_with_ability_and_falls_with_age() {
        assert!(market_value(80, 25) > market_value(70, 25));
        assert!(market_value(75, 22) > market_value(75, 33));
        assert_eq!(market_value(75, 25) % 1_000, 0);
        assert!(expected_wage(market_value(40, 30)) >= 500);
    }
}
