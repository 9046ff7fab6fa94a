pub mod club;
pub mod fixture;
pub mod ids;
pub mod news;
pub mod player;
pub mod position;

pub use club::{Club, Staff, StaffRole};
pub use fixture::{
    EventKind, LineupSlot, Match, MatchEvent, MatchOutcome, MatchResultKind, PitchPosition,
    PlayerMatchStats, Schedule, TeamStats,
};
pub use ids::{ClubId, MatchId, PlayerId, StaffId};
pub use news::{NewsCategory, NewsFeed, NewsItem};
pub use player::{
    Contract, Injury, InjuryKind, Player, PlayerAttributes, SeasonRecord, Suspension,
};
pub use position::{Position, PositionCategory, CATEGORY_MINIMUMS};
