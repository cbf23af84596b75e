use crate::store::StoreError;
use thiserror::Error;

/// 입찰 거절 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("상품을 찾을 수 없습니다. (item_id: {0})")]
    ItemNotFound(i64),

    #[error("경매가 이미 종료되었습니다.")]
    AuctionEnded,

    #[error("입찰 금액이 현재 가격보다 높아야 합니다. (입찰: {amount}, 현재: {current_price})")]
    BidTooLow { amount: i64, current_price: i64 },

    #[error("인증되지 않은 요청입니다.")]
    Unauthorized,

    #[error("저장소 오류: {0}")]
    StoreFailure(String),
}

impl BidError {
    /// 응답 본문에 포함되는 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            BidError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            BidError::AuctionEnded => "ALREADY_ENDED",
            BidError::BidTooLow { .. } => "LOW_BID",
            BidError::Unauthorized => "UNAUTHORIZED",
            BidError::StoreFailure(_) => "STORE_FAILURE",
        }
    }
}

impl From<StoreError> for BidError {
    fn from(e: StoreError) -> Self {
        BidError::StoreFailure(e.to_string())
    }
}
