//! Pure transfer decision: asking price and acceptance rules

use serde::{Deserialize, Serialize};

use crate::config::SquadRules;
use crate::models::{Club, ClubId, Player, PlayerId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferOffer {
    pub buyer: ClubId,
    pub player: PlayerId,
    /// Fee in whole currency units
    pub amount: i64,
}

/// Outcome of an offer; domain rejections are results, not errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferResult {
    pub success: bool,
    pub message: String,
    pub offer: TransferOffer,
}

impl TransferResult {
    pub fn accepted(offer: TransferOffer, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            offer,
        }
    }

    pub fn rejected(offer: TransferOffer, reason: &RejectReason) -> Self {
        Self {
            success: false,
            message: reason.message(),
            offer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownPlayer,
    UnknownClub,
    NotForSale,
    AlreadyAtClub,
    InvalidAmount,
    SellerWouldBeShort { category: &'static str },
    SellerSquadTooSmall,
    BuyerSquadFull,
    InsufficientFunds { balance: i64 },
    OfferTooLow { asking: i64 },
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            RejectReason::UnknownPlayer => "No such player".to_string(),
            RejectReason::UnknownClub => "No such club".to_string(),
            RejectReason::NotForSale => {
                "The player is not under contract with any club".to_string()
            }
            RejectReason::AlreadyAtClub => "The player already plays for your club".to_string(),
            RejectReason::InvalidAmount => "The offer must be a positive amount".to_string(),
            RejectReason::SellerWouldBeShort { category } => {
                format!("The selling club cannot spare another {} player", category)
            }
            RejectReason::SellerSquadTooSmall => {
                "The selling club's squad is already at its minimum".to_string()
            }
            RejectReason::BuyerSquadFull => "Your squad is full".to_string(),
            RejectReason::InsufficientFunds { balance } => {
                format!("Insufficient funds: the club only has {}", balance)
            }
            RejectReason::OfferTooLow { asking } => {
                format!("Offer rejected: the asking price is {}", asking)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferDecision {
    Accept { asking_price: i64 },
    Reject(RejectReason),
}

/// Players the seller holds in the player's category beyond the legal minimum
fn spare_in_category(player: &Player, seller_squad: &[&Player]) -> i32 {
    let category = player.position.category();
    let held = seller_squad
        .iter()
        .filter(|p| p.position.category() == category)
        .count() as i32;
    held - category.minimum() as i32
}

/// Price the selling club will accept.
///
/// Market value times one plus a scarcity premium (few spares in the
/// category), a key-player premium (top three of the squad) and the
/// reputation gap between the clubs.
pub fn asking_price(
    player: &Player,
    seller: &Club,
    buyer: &Club,
    seller_squad: &[&Player],
) -> i64 {
    let scarcity = match spare_in_category(player, seller_squad) {
        i32::MIN..=1 => 0.25,
        2 => 0.1,
        _ => 0.0,
    };

    let better = seller_squad
        .iter()
        .filter(|p| p.id != player.id && p.overall() > player.overall())
        .count();
    let key_player = if better < 3 { 0.2 } else { 0.0 };

    let gap = (seller.reputation as f64 - buyer.reputation as f64) / 100.0;
    let reputation = gap.clamp(-0.1, 0.5);

    let price = player.market_value as f64 * (1.0 + scarcity + key_player + reputation);
    ((price / 1_000.0).round() as i64 * 1_000).max(1_000)
}

/// Decide an offer without touching any state.
pub fn evaluate(
    offer: &TransferOffer,
    player: &Player,
    buyer: &Club,
    seller: Option<&Club>,
    seller_squad: &[&Player],
    buyer_squad_len: usize,
    rules: &SquadRules,
) -> TransferDecision {
    use TransferDecision::Reject;

    if player.retired {
        return Reject(RejectReason::NotForSale);
    }
    if player.club == Some(buyer.id) {
        return Reject(RejectReason::AlreadyAtClub);
    }
    let Some(seller) = seller else {
        return Reject(RejectReason::NotForSale);
    };
    if offer.amount <= 0 {
        return Reject(RejectReason::InvalidAmount);
    }
    if spare_in_category(player, seller_squad) <= 0 {
        let category = player.position.category().code();
        return Reject(RejectReason::SellerWouldBeShort { category });
    }
    if seller_squad.len() <= rules.min_size as usize {
        return Reject(RejectReason::SellerSquadTooSmall);
    }
    if buyer_squad_len >= rules.max_size as usize {
        return Reject(RejectReason::BuyerSquadFull);
    }
    if buyer.balance < offer.amount {
        let balance = buyer.balance;
        return Reject(RejectReason::InsufficientFunds { balance });
    }

    let asking = asking_price(player, seller, buyer, seller_squad);
    if offer.amount < asking {
        return Reject(RejectReason::OfferTooLow { asking });
    }
    TransferDecision::Accept {
        asking_price: asking,
    }
}
