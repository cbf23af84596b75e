#![allow(dead_code)]

use auction_bid_service::bidding::model::{Item, ItemStatus};
use auction_bid_service::catalog::commands::{handle_create_item, handle_update_item};
use auction_bid_service::catalog::model::{CreateItemCommand, UpdateItemCommand};
use auction_bid_service::identity::Caller;
use auction_bid_service::store::AuctionStore;
use chrono::{Duration, Utc};

/// 트레이싱 초기화 (여러 테스트에서 호출해도 안전)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub const ADMIN: Caller = Caller {
    user_id: 1,
    is_admin: true,
};

pub fn create_command(title: &str, starting_price: i64) -> CreateItemCommand {
    CreateItemCommand {
        title: title.to_string(),
        description: format!("{} 테스트를 위한 아이템입니다.", title),
        image_url: "https://example.com/item.jpg".to_string(),
        starting_price,
        end_date: Utc::now() + Duration::days(7),
    }
}

/// 테스트용 아이템 생성
pub async fn create_test_item(store: &dyn AuctionStore, title: &str, starting_price: i64) -> Item {
    handle_create_item(store, &ADMIN, create_command(title, starting_price))
        .await
        .unwrap()
}

/// 테스트용 아이템 상태 변경
pub async fn set_status(store: &dyn AuctionStore, item_id: i64, status: ItemStatus) -> Item {
    handle_update_item(
        store,
        &ADMIN,
        item_id,
        UpdateItemCommand {
            status: Some(status),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}
