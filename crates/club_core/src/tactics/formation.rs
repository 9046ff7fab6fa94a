use serde::{Deserialize, Serialize};

use crate::models::{PitchPosition, Position};

/// One of the eleven places in a formation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub role: Position,
    pub pitch_position: PitchPosition,
}

const fn slot(role: Position, x: f32, y: f32) -> FormationSlot {
    FormationSlot {
        role,
        pitch_position: PitchPosition { x, y },
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Formation {
    #[default]
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "4-5-1")]
    F451,
    #[serde(rename = "3-4-3")]
    F343,
}

use Position::*;

const GOALKEEPER: FormationSlot = slot(GK, 0.5, 0.04);

const F442_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LB, 0.15, 0.25),
    slot(LCB, 0.38, 0.2),
    slot(RCB, 0.62, 0.2),
    slot(RB, 0.85, 0.25),
    slot(LM, 0.15, 0.52),
    slot(LCM, 0.4, 0.48),
    slot(RCM, 0.6, 0.48),
    slot(RM, 0.85, 0.52),
    slot(ST, 0.4, 0.8),
    slot(ST, 0.6, 0.8),
];

const F433_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LB, 0.15, 0.25),
    slot(LCB, 0.38, 0.2),
    slot(RCB, 0.62, 0.2),
    slot(RB, 0.85, 0.25),
    slot(CDM, 0.5, 0.38),
    slot(LCM, 0.33, 0.5),
    slot(RCM, 0.67, 0.5),
    slot(LW, 0.18, 0.76),
    slot(ST, 0.5, 0.84),
    slot(RW, 0.82, 0.76),
];

const F4231_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LB, 0.15, 0.25),
    slot(LCB, 0.38, 0.2),
    slot(RCB, 0.62, 0.2),
    slot(RB, 0.85, 0.25),
    slot(LDM, 0.4, 0.4),
    slot(RDM, 0.6, 0.4),
    slot(LM, 0.18, 0.62),
    slot(CAM, 0.5, 0.64),
    slot(RM, 0.82, 0.62),
    slot(ST, 0.5, 0.84),
];

const F352_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LCB, 0.3, 0.2),
    slot(CB, 0.5, 0.18),
    slot(RCB, 0.7, 0.2),
    slot(LWB, 0.1, 0.45),
    slot(CDM, 0.5, 0.4),
    slot(LCM, 0.35, 0.52),
    slot(RCM, 0.65, 0.52),
    slot(RWB, 0.9, 0.45),
    slot(CF, 0.4, 0.8),
    slot(ST, 0.6, 0.82),
];

const F532_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LWB, 0.1, 0.3),
    slot(LCB, 0.3, 0.2),
    slot(CB, 0.5, 0.18),
    slot(RCB, 0.7, 0.2),
    slot(RWB, 0.9, 0.3),
    slot(LCM, 0.32, 0.5),
    slot(CM, 0.5, 0.46),
    slot(RCM, 0.68, 0.5),
    slot(ST, 0.4, 0.8),
    slot(ST, 0.6, 0.8),
];

const F451_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LB, 0.15, 0.25),
    slot(LCB, 0.38, 0.2),
    slot(RCB, 0.62, 0.2),
    slot(RB, 0.85, 0.25),
    slot(LM, 0.15, 0.55),
    slot(LCM, 0.35, 0.5),
    slot(CDM, 0.5, 0.4),
    slot(RCM, 0.65, 0.5),
    slot(RM, 0.85, 0.55),
    slot(ST, 0.5, 0.82),
];

const F343_SLOTS: [FormationSlot; 11] = [
    GOALKEEPER,
    slot(LCB, 0.3, 0.2),
    slot(CB, 0.5, 0.18),
    slot(RCB, 0.7, 0.2),
    slot(LM, 0.12, 0.5),
    slot(LCM, 0.4, 0.48),
    slot(RCM, 0.6, 0.48),
    slot(RM, 0.88, 0.5),
    slot(LW, 0.2, 0.76),
    slot(ST, 0.5, 0.84),
    slot(RW, 0.8, 0.76),
];

impl Formation {
    pub const ALL: [Formation; 7] = [
        Formation::F442,
        Formation::F433,
        Formation::F4231,
        Formation::F352,
        Formation::F532,
        Formation::F451,
        Formation::F343,
    ];

    /// Slots in selection order; the goalkeeper always comes first.
    pub fn slots(self) -> &'static [FormationSlot; 11] {
        match self {
            Formation::F442 => &F442_SLOTS,
            Formation::F433 => &F433_SLOTS,
            Formation::F4231 => &F4231_SLOTS,
            Formation::F352 => &F352_SLOTS,
            Formation::F532 => &F532_SLOTS,
            Formation::F451 => &F451_SLOTS,
            Formation::F343 => &F343_SLOTS,
        }
    }

    /// (defenders, midfielders, forwards) by role category
    pub fn shape(self) -> (u8, u8, u8) {
        self.slots().iter().fold((0, 0, 0), |(d, m, f), s| {
            if s.role.is_defender() {
                (d + 1, m, f)
            } else if s.role.is_midfielder() {
                (d, m + 1, f)
            } else if s.role.is_forward() {
                (d, m, f + 1)
            } else {
                (d, m, f)
            }
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F4231 => "4-2-3-1",
            Formation::F352 => "3-5-2",
            Formation::F532 => "5-3-2",
            Formation::F451 => "4-5-1",
            Formation::F343 => "3-4-3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PositionCategory;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_formation_has_one_keeper_first() {
        for formation in Formation::iter() {
            let slots = formation.slots();
            assert!(slots[0].role.is_goalkeeper(), "{}", formation.name());
            assert_eq!(slots.iter().filter(|s| s.role.is_goalkeeper()).count(), 1);
        }
    }

    #[test]
    fn test_formations_fit_the_squad_minimums() {
        // Every formation must be fieldable with one absentee per category
        for formation in Formation::iter() {
            let (d, m, f) = formation.shape();
            assert_eq!(d + m + f, 10);
            assert!(d < PositionCategory::Defender.minimum());
            assert!(m < PositionCategory::Midfielder.minimum());
            assert!(f < PositionCategory::Forward.minimum());
        }
    }

    #[test]
    fn test_pitch_positions_are_normalized() {
        for formation in Formation::ALL {
            for s in formation.slots() {
                assert!((0.0..=1.0).contains(&s.pitch_position.x));
                assert!((0.0..=1.0).contains(&s.pitch_position.y));
            }
        }
    }

    #[test]
    fn test_serde_uses_dash_names() {
        let json = serde_json::to_string(&Formation::F4231).unwrap();
        assert_eq!(json, "\"4-2-3-1\"");
        let parsed: Formation = serde_json::from_str("\"3-4-3\"").unwrap();
        assert_eq!(parsed, Formation::F343);
    }
}
