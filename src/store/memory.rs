/// 메모리 저장소
/// 상품마다 Mutex를 두고, 가격 비교/갱신과 입찰 추가를 같은 임계 구역 안에서 처리한다.
/// 잠금 순서는 항상 items -> 상품 슬롯 -> bids.
// region:    --- Imports
use super::{
    status_transition_allowed, ApplyOutcome, AuctionStore, DeleteOutcome, StoreError,
    UpdateOutcome,
};
use crate::bidding::model::{Bid, BidReceipt, Item, ItemStatus, NewBid};
use crate::catalog::model::{ItemUpdate, NewItem};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
// endregion: --- Imports

// region:    --- Memory Store
pub struct MemoryStore {
    items: RwLock<BTreeMap<i64, Arc<Mutex<Item>>>>,
    bids: Mutex<Vec<Bid>>,
    next_item_id: AtomicI64,
    next_bid_id: AtomicI64,
    pending_apply_failures: AtomicUsize,
    pending_read_failures: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            bids: Mutex::new(Vec::new()),
            next_item_id: AtomicI64::new(1),
            next_bid_id: AtomicI64::new(1),
            pending_apply_failures: AtomicUsize::new(0),
            pending_read_failures: AtomicUsize::new(0),
        }
    }

    /// 테스트용 오류 주입: 다음 `count`번의 입찰 반영을 아무것도 쓰지 않고 실패시킨다.
    /// 재시도 경로 검증에만 쓰며, 서비스 코드는 호출하지 않는다.
    pub fn fail_next_applies(&self, count: usize) {
        self.pending_apply_failures.store(count, Ordering::SeqCst);
    }

    /// 테스트용 오류 주입: 다음 `count`번의 상품 조회(find_item)를 실패시킨다.
    pub fn fail_next_reads(&self, count: usize) {
        self.pending_read_failures.store(count, Ordering::SeqCst);
    }

    fn take_injected_failure(counter: &AtomicUsize, operation: &str) -> Result<(), StoreError> {
        let injected = counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            warn!("{:<12} --> 주입된 저장소 오류 발생: {}", "Store", operation);
            return Err(StoreError::Unavailable(format!("injected {} failure", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        Self::take_injected_failure(&self.pending_read_failures, "find_item")?;
        let items = self.items.read().await;
        match items.get(&item_id) {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().await;
        let mut list = Vec::with_capacity(items.len());
        for slot in items.values() {
            list.push(slot.lock().await.clone());
        }
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn insert_item(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
        let item = Item {
            id,
            title: item.title,
            description: item.description,
            image_url: item.image_url,
            starting_price: item.starting_price,
            current_price: item.starting_price,
            end_date: item.end_date,
            status: ItemStatus::Active,
            seller_id: item.seller_id,
            created_at: Utc::now(),
        };
        items.insert(id, Arc::new(Mutex::new(item.clone())));
        Ok(item)
    }

    async fn update_item(
        &self,
        item_id: i64,
        update: &ItemUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        let items = self.items.read().await;
        let Some(slot) = items.get(&item_id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        let mut item = slot.lock().await;

        if let Some(status) = update.status {
            if !status_transition_allowed(item.status, status) {
                return Ok(UpdateOutcome::InvalidTransition {
                    from: item.status,
                    to: status,
                });
            }
        }
        if let Some(starting_price) = update.starting_price {
            let has_bids = self.bids.lock().await.iter().any(|b| b.item_id == item_id);
            if has_bids {
                return Ok(UpdateOutcome::HasBids);
            }
            item.starting_price = starting_price;
            item.current_price = starting_price;
        }
        if let Some(title) = &update.title {
            item.title = title.clone();
        }
        if let Some(description) = &update.description {
            item.description = description.clone();
        }
        if let Some(image_url) = &update.image_url {
            item.image_url = image_url.clone();
        }
        if let Some(end_date) = update.end_date {
            item.end_date = end_date;
        }
        if let Some(status) = update.status {
            item.status = status;
        }
        Ok(UpdateOutcome::Updated(item.clone()))
    }

    async fn delete_item(&self, item_id: i64) -> Result<DeleteOutcome, StoreError> {
        let mut items = self.items.write().await;
        if !items.contains_key(&item_id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if self.bids.lock().await.iter().any(|b| b.item_id == item_id) {
            return Ok(DeleteOutcome::HasBids);
        }
        items.remove(&item_id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn apply_bid(&self, bid: &NewBid) -> Result<ApplyOutcome, StoreError> {
        Self::take_injected_failure(&self.pending_apply_failures, "apply_bid")?;

        let items = self.items.read().await;
        let Some(slot) = items.get(&bid.item_id) else {
            return Ok(ApplyOutcome::Conflict);
        };

        // 상품 임계 구역: 비교, 가격 갱신, 입찰 추가
        let mut item = slot.lock().await;
        if item.status != ItemStatus::Active || item.current_price >= bid.amount {
            debug!(
                "{:<12} --> 조건부 갱신 실패: item_id={}, 현재 가격={}, 입찰={}",
                "Store", item.id, item.current_price, bid.amount
            );
            return Ok(ApplyOutcome::Conflict);
        }

        let record = Bid {
            id: self.next_bid_id.fetch_add(1, Ordering::SeqCst),
            item_id: bid.item_id,
            bidder_id: bid.bidder_id,
            amount: bid.amount,
            placed_at: Utc::now(),
        };
        item.current_price = bid.amount;
        self.bids.lock().await.push(record.clone());

        Ok(ApplyOutcome::Applied(BidReceipt {
            bid: record,
            item: item.clone(),
        }))
    }

    async fn bids_for_item(&self, item_id: i64) -> Result<Vec<Bid>, StoreError> {
        let mut bids: Vec<Bid> = self
            .bids
            .lock()
            .await
            .iter()
            .filter(|b| b.item_id == item_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.amount.cmp(&a.amount).then(b.id.cmp(&a.id)));
        Ok(bids)
    }

    async fn bids_for_bidder(&self, bidder_id: i64) -> Result<Vec<Bid>, StoreError> {
        let mut bids: Vec<Bid> = self
            .bids
            .lock()
            .await
            .iter()
            .filter(|b| b.bidder_id == bidder_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.placed_at.cmp(&a.placed_at).then(b.id.cmp(&a.id)));
        Ok(bids)
    }
}
// endregion: --- Memory Store
