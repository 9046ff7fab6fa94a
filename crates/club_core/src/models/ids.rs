use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of the entity in its owning table
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Club identifier, dense index into `GameState::clubs`
    ClubId,
    "club#"
);
entity_id!(
    /// Player identifier, dense index into `GameState::players`
    PlayerId,
    "player#"
);
entity_id!(
    /// Fixture identifier, dense index into the current season's schedule
    MatchId,
    "match#"
);
entity_id!(StaffId, "staff#");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&ClubId(4)).unwrap(), "4");
        let parsed: PlayerId = serde_json::from_str("17").unwrap();
        assert_eq!(parsed, PlayerId(17));
        assert_eq!(MatchId(3).to_string(), "match#3");
        assert_eq!(ClubId(9).index(), 9);
    }
}
