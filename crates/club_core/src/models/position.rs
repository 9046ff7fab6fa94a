use serde::{Deserialize, Serialize};

/// Natural playing role. 25 roles grouped into four categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    // Defenders
    SW,
    LB,
    LCB,
    CB,
    RCB,
    RB,
    LWB,
    RWB,
    // Midfielders
    CDM,
    LDM,
    RDM,
    LCM,
    CM,
    RCM,
    LM,
    RM,
    CAM,
    // Forwards
    LW,
    RW,
    LF,
    RF,
    SS,
    CF,
    ST,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PositionCategory {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

/// Smallest squad share per category that still fields every formation
/// with cover for one absentee.
pub const CATEGORY_MINIMUMS: [(PositionCategory, u8); 4] = [
    (PositionCategory::Goalkeeper, 2),
    (PositionCategory::Defender, 6),
    (PositionCategory::Midfielder, 6),
    (PositionCategory::Forward, 4),
];

impl PositionCategory {
    pub const ALL: [PositionCategory; 4] = [
        PositionCategory::Goalkeeper,
        PositionCategory::Defender,
        PositionCategory::Midfielder,
        PositionCategory::Forward,
    ];

    pub fn minimum(self) -> u8 {
        CATEGORY_MINIMUMS
            .iter()
            .find(|(cat, _)| *cat == self)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Roles that belong to the category
    pub fn roles(self) -> &'static [Position] {
        use Position::*;
        match self {
            PositionCategory::Goalkeeper => &[GK],
            PositionCategory::Defender => &[SW, LB, LCB, CB, RCB, RB, LWB, RWB],
            PositionCategory::Midfielder => &[CDM, LDM, RDM, LCM, CM, RCM, LM, RM, CAM],
            PositionCategory::Forward => &[LW, RW, LF, RF, SS, CF, ST],
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "GK",
            PositionCategory::Defender => "DEF",
            PositionCategory::Midfielder => "MID",
            PositionCategory::Forward => "FWD",
        }
    }

    /// Categories one line apart on the pitch
    fn is_adjacent(self, other: PositionCategory) -> bool {
        use PositionCategory::*;
        matches!(
            (self, other),
            (Defender | Forward, Midfielder) | (Midfielder, Defender | Forward)
        )
    }
}

/// Roles that are interchangeable for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleGroup {
    Keeper,
    CentreBack,
    LeftBack,
    RightBack,
    Holding,
    Central,
    LeftMid,
    RightMid,
    Playmaker,
    LeftWing,
    RightWing,
    Striker,
}

/// Attribute weights in `PlayerAttributes` order:
/// pace, shooting, passing, dribbling, defending, physical, goalkeeping.
pub type AttributeWeights = [f32; 7];

impl Position {
    pub fn category(self) -> PositionCategory {
        use Position::*;
        match self {
            GK => PositionCategory::Goalkeeper,
            SW | LB | LCB | CB | RCB | RB | LWB | RWB => PositionCategory::Defender,
            CDM | LDM | RDM | LCM | CM | RCM | LM | RM | CAM => PositionCategory::Midfielder,
            LW | RW | LF | RF | SS | CF | ST => PositionCategory::Forward,
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(self) -> bool {
        self.category() == PositionCategory::Defender
    }

    pub fn is_midfielder(self) -> bool {
        self.category() == PositionCategory::Midfielder
    }

    pub fn is_forward(self) -> bool {
        self.category() == PositionCategory::Forward
    }

    fn group(self) -> RoleGroup {
        use Position::*;
        match self {
            GK => RoleGroup::Keeper,
            SW | LCB | CB | RCB => RoleGroup::CentreBack,
            LB | LWB => RoleGroup::LeftBack,
            RB | RWB => RoleGroup::RightBack,
            CDM | LDM | RDM => RoleGroup::Holding,
            LCM | CM | RCM => RoleGroup::Central,
            LM => RoleGroup::LeftMid,
            RM => RoleGroup::RightMid,
            CAM => RoleGroup::Playmaker,
            LW | LF => RoleGroup::LeftWing,
            RW | RF => RoleGroup::RightWing,
            SS | CF | ST => RoleGroup::Striker,
        }
    }

    /// How comfortable a player of this natural role is in `slot` (0.0..=1.0).
    pub fn familiarity(self, slot: Position) -> f32 {
        if self == slot {
            return 1.0;
        }
        // Keepers and outfielders do not swap
        if self.is_goalkeeper() != slot.is_goalkeeper() {
            return 0.25;
        }

        let (a, b) = (self.group(), slot.group());
        if a == b {
            return 0.95;
        }

        use RoleGroup::*;
        let neighbours = matches!(
            (a, b),
            (CentreBack, Holding)
                | (Holding, CentreBack)
                | (LeftBack, LeftMid)
                | (LeftMid, LeftBack)
                | (RightBack, RightMid)
                | (RightMid, RightBack)
                | (Holding, Central)
                | (Central, Holding)
                | (Central, Playmaker)
                | (Playmaker, Central)
                | (Playmaker, Striker)
                | (Striker, Playmaker)
                | (LeftMid, LeftWing)
                | (LeftWing, LeftMid)
                | (RightMid, RightWing)
                | (RightWing, RightMid)
        );
        if neighbours {
            return 0.85;
        }

        let (ca, cb) = (self.category(), slot.category());
        if ca == cb {
            0.8
        } else if ca.is_adjacent(cb) {
            0.6
        } else {
            0.45
        }
    }

    /// Importance of each attribute for the role
    pub fn attribute_weights(self) -> AttributeWeights {
        use RoleGroup::*;
        match self.group() {
            Keeper => [0.02, 0.0, 0.08, 0.0, 0.05, 0.05, 0.80],
            CentreBack => [0.10, 0.02, 0.10, 0.03, 0.50, 0.25, 0.0],
            LeftBack | RightBack => [0.25, 0.02, 0.15, 0.10, 0.35, 0.13, 0.0],
            Holding => [0.08, 0.05, 0.25, 0.07, 0.35, 0.20, 0.0],
            Central => [0.08, 0.12, 0.35, 0.15, 0.15, 0.15, 0.0],
            LeftMid | RightMid => [0.25, 0.10, 0.25, 0.25, 0.05, 0.10, 0.0],
            Playmaker => [0.10, 0.25, 0.30, 0.25, 0.02, 0.08, 0.0],
            LeftWing | RightWing => [0.30, 0.25, 0.15, 0.25, 0.0, 0.05, 0.0],
            Striker => match self {
                Position::ST => [0.20, 0.45, 0.05, 0.15, 0.0, 0.15, 0.0],
                _ => [0.15, 0.35, 0.20, 0.20, 0.0, 0.10, 0.0],
            },
        }
    }

    pub fn code(self) -> &'static str {
        use Position::*;
        match self {
            GK => "GK",
            SW => "SW",
            LB => "LB",
            LCB => "LCB",
            CB => "CB",
            RCB => "RCB",
            RB => "RB",
            LWB => "LWB",
            RWB => "RWB",
            CDM => "CDM",
            LDM => "LDM",
            RDM => "RDM",
            LCM => "LCM",
            CM => "CM",
            RCM => "RCM",
            LM => "LM",
            RM => "RM",
            CAM => "CAM",
            LW => "LW",
            RW => "RW",
            LF => "LF",
            RF => "RF",
            SS => "SS",
            CF => "CF",
            ST => "ST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_taxonomy_has_25_roles_in_four_categories() {
        assert_eq!(Position::iter().count(), 25);
        let listed: usize = PositionCategory::ALL.iter().map(|c| c.roles().len()).sum();
        assert_eq!(listed, 25);

        for cat in PositionCategory::ALL {
            for role in cat.roles() {
                assert_eq!(role.category(), cat, "{role:?} under {cat:?}");
            }
        }
    }

    #[test]
    fn test_attribute_weights_sum_to_one() {
        for role in Position::iter() {
            let sum: f32 = role.attribute_weights().iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "{role:?} weights sum to {sum}");
        }
    }

    #[test]
    fn test_familiarity_ordering() {
        let cb = |other| Position::CB.familiarity(other);
        assert_eq!(cb(Position::CB), 1.0);
        assert!(cb(Position::LCB) > cb(Position::CDM));
        assert!(cb(Position::CDM) > cb(Position::LB));
        assert!(cb(Position::CM) > cb(Position::ST));
        assert_eq!(Position::GK.familiarity(Position::ST), 0.25);
        assert_eq!(Position::ST.familiarity(Position::GK), 0.25);
    }

    #[test]
    fn test_category_serde_codes() {
        let category = serde_json::to_string(&PositionCategory::Defender).unwrap();
        assert_eq!(category, "\"DEF\"");
        let role = serde_json::to_string(&Position::CAM).unwrap();
        assert_eq!(role, "\"CAM\"");
    }
}
