//! Card tracking with dismissal support (two yellows or a straight red).

use std::collections::{BTreeMap, BTreeSet};

use crate::models::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardResult {
    Warning,
    Dismissal,
}

#[derive(Debug, Default)]
pub struct CardSystem {
    yellow_cards: BTreeMap<PlayerId, u8>,
    dismissed: BTreeSet<PlayerId>,
}

impl CardSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_card(&mut self, player: PlayerId, card_type: CardType) -> (CardResult, u8) {
        match card_type {
            CardType::Yellow => {
                let count = {
                    let entry = self.yellow_cards.entry(player).or_insert(0);
                    *entry = entry.saturating_add(1);
                    *entry
                };
                if count >= 2 {
                    self.dismissed.insert(player);
                    (CardResult::Dismissal, count)
                } else {
                    (CardResult::Warning, count)
                }
            }
            CardType::Red => {
                self.dismissed.insert(player);
                (CardResult::Dismissal, self.yellow_count(player))
            }
        }
    }

    pub fn is_dismissed(&self, player: PlayerId) -> bool {
        self.dismissed.contains(&player)
    }

    pub fn yellow_count(&self, player: PlayerId) -> u8 {
        self.yellow_cards.get(&player).copied().unwrap_or(0)
    }
}
