/// 입찰 수락 규칙
/// 저장소와 무관한 순수 함수. 검사 순서는 다음과 같으며 처음 실패한 검사가 결과가 된다.
/// 1. 상품 존재 여부
/// 2. 경매 진행 중(active) 여부
/// 3. 입찰 금액 > 현재 가격
// region:    --- Imports
use super::error::BidError;
use super::model::{Item, NewBid};
// endregion: --- Imports

// region:    --- Bid Rule
/// 규칙을 통과한 입찰과 그 결과로 바뀔 상품 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidAcceptance {
    pub bid: NewBid,
    pub updated_item: Item,
}

pub fn evaluate_bid(
    item_id: i64,
    item: Option<Item>,
    bidder_id: i64,
    amount: i64,
) -> Result<BidAcceptance, BidError> {
    let mut item = item.ok_or(BidError::ItemNotFound(item_id))?;

    if !item.is_active() {
        return Err(BidError::AuctionEnded);
    }

    if amount <= item.current_price {
        return Err(BidError::BidTooLow {
            amount,
            current_price: item.current_price,
        });
    }

    item.current_price = amount;
    Ok(BidAcceptance {
        bid: NewBid {
            item_id: item.id,
            bidder_id,
            amount,
        },
        updated_item: item,
    })
}
// endregion: --- Bid Rule
