// region:    --- Imports
use super::queries;
use super::{
    status_transition_allowed, ApplyOutcome, AuctionStore, DeleteOutcome, StoreError,
    UpdateOutcome,
};
use crate::bidding::model::{Bid, BidReceipt, Item, NewBid};
use crate::catalog::model::{ItemUpdate, NewItem};
use crate::database::DatabaseManager;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Item Row
/// items 테이블 행. status는 TEXT로 저장된다.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    title: String,
    description: String,
    image_url: String,
    starting_price: i64,
    current_price: i64,
    end_date: DateTime<Utc>,
    status: String,
    seller_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            starting_price: row.starting_price,
            current_price: row.current_price,
            end_date: row.end_date,
            status: row.status.parse().map_err(StoreError::Corrupt)?,
            seller_id: row.seller_id,
            created_at: row.created_at,
        })
    }
}
// endregion: --- Item Row

// region:    --- Postgres Store
pub struct PostgresStore {
    db: Arc<DatabaseManager>,
}

impl PostgresStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuctionStore for PostgresStore {
    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        sqlx::query_as::<_, ItemRow>(queries::GET_ITEM)
            .bind(item_id)
            .fetch_optional(self.db.pool())
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        sqlx::query_as::<_, ItemRow>(queries::GET_ALL_ITEMS)
            .fetch_all(self.db.pool())
            .await?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    async fn insert_item(&self, item: NewItem) -> Result<Item, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::INSERT_ITEM)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.image_url)
            .bind(item.starting_price)
            .bind(item.end_date)
            .bind(item.seller_id)
            .fetch_one(self.db.pool())
            .await?;
        Item::try_from(row)
    }

    async fn update_item(
        &self,
        item_id: i64,
        update: &ItemUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        let update = update.clone();
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    // 행 잠금으로 동시 입찰과 직렬화
                    let locked = sqlx::query_as::<_, ItemRow>(queries::GET_ITEM_FOR_UPDATE)
                        .bind(item_id)
                        .fetch_optional(&mut **tx)
                        .await?;
                    let Some(locked) = locked else {
                        return Ok(UpdateOutcome::NotFound);
                    };
                    let locked = Item::try_from(locked)?;

                    if let Some(status) = update.status {
                        if !status_transition_allowed(locked.status, status) {
                            return Ok(UpdateOutcome::InvalidTransition {
                                from: locked.status,
                                to: status,
                            });
                        }
                    }

                    if update.starting_price.is_some() {
                        let has_bids: bool = sqlx::query_scalar(queries::ITEM_HAS_BIDS)
                            .bind(item_id)
                            .fetch_one(&mut **tx)
                            .await?;
                        if has_bids {
                            return Ok(UpdateOutcome::HasBids);
                        }
                    }

                    let row = sqlx::query_as::<_, ItemRow>(queries::UPDATE_ITEM)
                        .bind(item_id)
                        .bind(update.title.as_deref())
                        .bind(update.description.as_deref())
                        .bind(update.image_url.as_deref())
                        .bind(update.end_date)
                        .bind(update.status.map(|s| s.as_str()))
                        .bind(update.starting_price)
                        .fetch_one(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(UpdateOutcome::Updated(Item::try_from(row)?))
                })
            })
            .await
    }

    async fn delete_item(&self, item_id: i64) -> Result<DeleteOutcome, StoreError> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let locked = sqlx::query_as::<_, ItemRow>(queries::GET_ITEM_FOR_UPDATE)
                        .bind(item_id)
                        .fetch_optional(&mut **tx)
                        .await?;
                    if locked.is_none() {
                        return Ok(DeleteOutcome::NotFound);
                    }

                    let has_bids: bool = sqlx::query_scalar(queries::ITEM_HAS_BIDS)
                        .bind(item_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    if has_bids {
                        return Ok(DeleteOutcome::HasBids);
                    }

                    sqlx::query(queries::DELETE_ITEM)
                        .bind(item_id)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(DeleteOutcome::Deleted)
                })
            })
            .await
    }

    async fn apply_bid(&self, bid: &NewBid) -> Result<ApplyOutcome, StoreError> {
        // 트랜잭션 시작
        let mut tx = self.db.pool().begin().await?;

        // 현재 가격 확인 및 업데이트
        let updated = sqlx::query_as::<_, ItemRow>(queries::RAISE_CURRENT_PRICE)
            .bind(bid.amount)
            .bind(bid.item_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = updated else {
            // 롤백
            tx.rollback().await?;
            info!(
                "{:<12} --> 조건부 갱신 실패: item_id={}, 입찰={}",
                "Store", bid.item_id, bid.amount
            );
            return Ok(ApplyOutcome::Conflict);
        };

        // 입찰 기록 추가
        let record = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
            .bind(bid.item_id)
            .bind(bid.bidder_id)
            .bind(bid.amount)
            .fetch_one(&mut *tx)
            .await?;

        // 트랜잭션 커밋
        tx.commit().await?;
        info!(
            "{:<12} --> 입찰 반영: item_id={}, 현재 가격 {}",
            "Store", row.id, row.current_price
        );

        Ok(ApplyOutcome::Applied(BidReceipt {
            bid: record,
            item: Item::try_from(row)?,
        }))
    }

    async fn bids_for_item(&self, item_id: i64) -> Result<Vec<Bid>, StoreError> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_ITEM_BIDS)
            .bind(item_id)
            .fetch_all(self.db.pool())
            .await?)
    }

    async fn bids_for_bidder(&self, bidder_id: i64) -> Result<Vec<Bid>, StoreError> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_BIDDER_BIDS)
            .bind(bidder_id)
            .fetch_all(self.db.pool())
            .await?)
    }
}
// endregion: --- Postgres Store
