/// 상품/입찰 저장소
/// 입찰 반영(apply_bid)은 상품 가격 갱신과 입찰 기록 추가를 하나의 원자적 조건부 쓰기로 수행한다.
// region:    --- Imports
use crate::bidding::model::{Bid, BidReceipt, Item, ItemStatus, NewBid};
use crate::catalog::model::{ItemUpdate, NewItem};
use async_trait::async_trait;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
mod queries;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
// endregion: --- Modules

// region:    --- Store Error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),

    #[error("저장된 데이터가 올바르지 않습니다: {0}")]
    Corrupt(String),

    #[error("저장소를 일시적으로 사용할 수 없습니다: {0}")]
    Unavailable(String),
}
// endregion: --- Store Error

// region:    --- Outcomes
/// 조건부 입찰 반영 결과
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    /// 가격 갱신과 입찰 기록이 함께 커밋됨
    Applied(BidReceipt),
    /// 읽은 시점 이후 상품 상태가 바뀌어 조건을 만족하지 못함 (아무것도 쓰지 않음)
    Conflict,
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(Item),
    NotFound,
    /// 입찰이 있는 상품의 시작 가격은 바꿀 수 없다
    HasBids,
    /// 잠금 시점의 상태에서 요청된 상태로 바꿀 수 없음 (active에서만 전이 가능)
    InvalidTransition { from: ItemStatus, to: ItemStatus },
}

/// 상태 전이 규칙: active에서만 다른 상태로 나갈 수 있고, 같은 상태는 변경 없음
pub fn status_transition_allowed(from: ItemStatus, to: ItemStatus) -> bool {
    from == to || from == ItemStatus::Active
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    HasBids,
}
// endregion: --- Outcomes

// region:    --- Auction Store Trait
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError>;

    /// 최근 등록 순
    async fn list_items(&self) -> Result<Vec<Item>, StoreError>;

    async fn insert_item(&self, item: NewItem) -> Result<Item, StoreError>;

    /// 상태 변경은 잠금 구간 안에서 현재 상태를 다시 확인한다.
    async fn update_item(
        &self,
        item_id: i64,
        update: &ItemUpdate,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_item(&self, item_id: i64) -> Result<DeleteOutcome, StoreError>;

    /// 상품이 active이고 현재 가격 < 입찰 금액일 때만 가격을 갱신하고 입찰을 기록한다.
    /// 둘 다 쓰이거나 둘 다 쓰이지 않는다.
    async fn apply_bid(&self, bid: &NewBid) -> Result<ApplyOutcome, StoreError>;

    /// 입찰 금액 내림차순
    async fn bids_for_item(&self, item_id: i64) -> Result<Vec<Bid>, StoreError>;

    /// 입찰 시각 내림차순
    async fn bids_for_bidder(&self, bidder_id: i64) -> Result<Vec<Bid>, StoreError>;
}
// endregion: --- Auction Store Trait
