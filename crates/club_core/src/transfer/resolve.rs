use super::evaluate::{evaluate, RejectReason, TransferDecision, TransferOffer, TransferResult};
use crate::models::player::expected_wage;
use crate::models::NewsCategory;
use crate::season::GameState;
use crate::training::{apply_morale_shift, MoraleCause};

/// Evaluate `offer` against the live world and, if accepted, apply it.
///
/// Every check happens before the first write; once the offer is accepted
/// the balances, the player's club and the contract change together.
pub fn resolve(state: &mut GameState, offer: TransferOffer) -> TransferResult {
    let Some(player) = state.player(offer.player) else {
        return TransferResult::rejected(offer, &RejectReason::UnknownPlayer);
    };
    let Some(buyer) = state.club(offer.buyer) else {
        return TransferResult::rejected(offer, &RejectReason::UnknownClub);
    };
    let seller = player.club.and_then(|id| state.club(id));
    let seller_squad = player.club.map(|id| state.squad(id)).unwrap_or_default();
    let buyer_squad_len = state.squad_size(buyer.id);

    let decision = evaluate(
        &offer,
        player,
        buyer,
        seller,
        &seller_squad,
        buyer_squad_len,
        &state.config.squad,
    );
    let (seller_id, asking) = match (decision, player.club) {
        (TransferDecision::Accept { asking_price }, Some(seller_id)) => (seller_id, asking_price),
        (TransferDecision::Reject(reason), _) => {
            let why = reason.message();
            log::debug!("offer for {} rejected: {}", offer.player, why);
            return TransferResult::rejected(offer, &reason);
        }
        (TransferDecision::Accept { .. }, None) => {
            return TransferResult::rejected(offer, &RejectReason::NotForSale);
        }
    };

    let name = player.name.clone();
    let buying = buyer.name.clone();
    let selling = seller.map(|c| c.name.clone()).unwrap_or_default();
    let season = state.season;
    let contract_seasons = state.config.transfers.contract_seasons.max(1);

    // Apply
    if let Some(buyer) = state.club_mut(offer.buyer) {
        buyer.balance -= offer.amount;
    }
    if let Some(seller) = state.club_mut(seller_id) {
        seller.balance += offer.amount;
        seller.release_from_lineups(offer.player);
    }
    if let Some(player) = state.player_mut(offer.player) {
        let mut moved = player.clone();
        moved.club = Some(offer.buyer);
        let wage = expected_wage(moved.market_value);
        moved.contract.weekly_wage = wage.max(moved.contract.weekly_wage);
        moved.contract.expires_season = season + contract_seasons - 1;
        *player = apply_morale_shift(moved, MoraleCause::Transferred);
    }

    let fee = offer.amount;
    let headline = format!("{} joins {} from {} for {}", name, buying, selling, fee);
    log::info!("{} (asking {})", headline, asking);
    let clubs = vec![offer.buyer, seller_id];
    state.post_news(NewsCategory::Transfer, headline.clone(), clubs);

    TransferResult::accepted(offer, headline)
}
