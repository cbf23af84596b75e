use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// 경매 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Ended,
    Cancelled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Ended => "ended",
            ItemStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::Active),
            "ended" => Ok(ItemStatus::Ended),
            "cancelled" => Ok(ItemStatus::Cancelled),
            other => Err(format!("알 수 없는 경매 상태: {}", other)),
        }
    }
}

// 상품 모델
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub starting_price: i64,
    pub current_price: i64,
    pub end_date: DateTime<Utc>,
    pub status: ItemStatus,
    pub seller_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

// 입찰 모델 (생성 이후 변경 불가)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub item_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
    pub placed_at: DateTime<Utc>,
}

/// 저장 전 입찰. id와 입찰 시각은 저장소가 반영 시점에 부여한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub item_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
}

/// 입찰 성공 결과
#[derive(Debug, Clone, Serialize)]
pub struct BidReceipt {
    pub bid: Bid,
    pub item: Item,
}
