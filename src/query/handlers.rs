// region:    --- Imports
use crate::bidding::error::BidError;
use crate::bidding::model::{Bid, Item};
use crate::store::{AuctionStore, StoreError};
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 상품 조회
pub async fn list_items(store: &dyn AuctionStore) -> Result<Vec<Item>, StoreError> {
    info!("{:<12} --> 모든 상품 조회", "Query");
    store.list_items().await
}

/// 상품 조회
pub async fn get_item(store: &dyn AuctionStore, item_id: i64) -> Result<Item, BidError> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", item_id);
    store
        .find_item(item_id)
        .await?
        .ok_or(BidError::ItemNotFound(item_id))
}

/// 상품 입찰 이력 조회 (금액 내림차순)
pub async fn bids_for_item(store: &dyn AuctionStore, item_id: i64) -> Result<Vec<Bid>, StoreError> {
    info!("{:<12} --> 상품 입찰 이력 조회 id: {}", "Query", item_id);
    store.bids_for_item(item_id).await
}

/// 사용자 입찰 이력 조회 (최근 순)
pub async fn bids_for_user(store: &dyn AuctionStore, user_id: i64) -> Result<Vec<Bid>, StoreError> {
    info!("{:<12} --> 사용자 입찰 이력 조회 id: {}", "Query", user_id);
    store.bids_for_bidder(user_id).await
}

// endregion: --- Query Handlers
