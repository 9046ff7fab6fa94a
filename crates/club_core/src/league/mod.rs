pub mod schedule;
pub mod table;

pub use schedule::{build_schedule, double_round_robin};
pub use table::{
    compare_entries, compute_table, form_strength, resolve_season_end, FormResult, LeagueEntry,
    PromotionWindow, SeasonEnd,
};
