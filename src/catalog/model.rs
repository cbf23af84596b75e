use crate::bidding::model::ItemStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 상품 등록 요청
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemCommand {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub starting_price: i64,
    pub end_date: DateTime<Utc>,
}

/// 상품 수정 요청. 빈 문자열은 값이 없는 것으로 본다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub starting_price: Option<i64>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ItemStatus>,
}

/// 검증된 신규 상품
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub starting_price: i64,
    pub end_date: DateTime<Utc>,
    pub seller_id: i64,
}

/// 검증된 부분 수정
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub starting_price: Option<i64>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ItemStatus>,
}
