//! Post-match player ratings (1.0..=10.0)

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::models::{PlayerMatchStats, PositionCategory};

pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 10.0;

/// Everything besides the player's own stat line that moves a rating
#[derive(Debug, Clone, Copy)]
pub struct RatingContext {
    pub category: PositionCategory,
    /// Effective ability in the slot played
    pub slot_rating: f32,
    /// +1 win, 0 draw, -1 loss
    pub result: i8,
    pub goals_conceded: u8,
    pub saves: u8,
}

pub fn player_rating(stats: &PlayerMatchStats, ctx: &RatingContext, rng: &mut impl Rng) -> f32 {
    let mut rating = 6.0 + (ctx.slot_rating - 60.0) / 40.0;

    rating += stats.goals as f32 * 1.0 + stats.assists as f32 * 0.6;
    rating += stats.tackles as f32 * 0.08;
    rating += match ctx.result {
        1 => 0.5,
        -1 => -0.4,
        _ => 0.0,
    };
    rating -= stats.yellow_cards.min(1) as f32 * 0.4;
    if stats.red_card {
        rating -= 1.5;
    }

    match ctx.category {
        PositionCategory::Goalkeeper => {
            rating += ctx.saves as f32 * 0.3 - ctx.goals_conceded as f32 * 0.35;
        }
        PositionCategory::Defender => rating -= ctx.goals_conceded as f32 * 0.15,
        _ => {}
    }

    let noise = Normal::new(0.0f32, 0.35).map(|n| n.sample(rng));
    rating += noise.unwrap_or(0.0);

    // A cameo says little either way
    if stats.minutes < 30 {
        let weight = stats.minutes as f32 / 30.0;
        rating = 6.0 + (rating - 6.0) * weight;
    }

    ((rating * 10.0).round() / 10.0).clamp(MIN_RATING, MAX_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(category: PositionCategory) -> RatingContext {
        RatingContext {
            category,
            slot_rating: 60.0,
            result: 0,
            goals_conceded: 0,
            saves: 0,
        }
    }

    #[test]
    fn test_hat_trick_beats_anonymous_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let quiet = PlayerMatchStats {
            minutes: 90,
            ..Default::default()
        };
        let hat_trick = PlayerMatchStats {
            goals: 3,
            ..quiet.clone()
        };
        let forward = ctx(PositionCategory::Forward);
        let scored = player_rating(&hat_trick, &forward, &mut rng);
        let anonymous = player_rating(&quiet, &forward, &mut rng);
        assert!(scored > anonymous + 1.5);
    }

    #[test]
    fn test_keeper_punished_for_goals() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let stats = PlayerMatchStats {
            minutes: 90,
            ..Default::default()
        };
        let mut shelled = ctx(PositionCategory::Goalkeeper);
        shelled.goals_conceded = 6;
        shelled.result = -1;
        assert!(player_rating(&stats, &shelled, &mut rng) < 5.0);
    }

    proptest! {
        #[test]
        fn prop_rating_in_range(
            goals in 0u8..8,
            assists in 0u8..5,
            minutes in 0u8..=90,
            conceded in 0u8..10,
            red in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let stats = PlayerMatchStats {
                minutes,
                goals,
                assists,
                red_card: red,
                ..Default::default()
            };
            let mut c = ctx(PositionCategory::Defender);
            c.goals_conceded = conceded;
            let rating = player_rating(&stats, &c, &mut rng);
            prop_assert!((MIN_RATING..=MAX_RATING).contains(&rating));
        }
    }
}
