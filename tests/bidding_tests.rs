mod common;

use auction_bid_service::bidding::commands::{handle_place_bid, PlaceBidCommand};
use auction_bid_service::bidding::error::BidError;
use auction_bid_service::bidding::model::ItemStatus;
use auction_bid_service::query;
use auction_bid_service::store::{AuctionStore, MemoryStore};
use common::{create_test_item, init_tracing, set_status};
use std::sync::Arc;

const RETRIES: u32 = 3;

async fn bid(
    store: &dyn AuctionStore,
    item_id: i64,
    bidder_id: i64,
    amount: i64,
) -> Result<i64, BidError> {
    handle_place_bid(store, bidder_id, PlaceBidCommand { item_id, amount }, RETRIES)
        .await
        .map(|receipt| receipt.item.current_price)
}

/// 현재 가격 이하 입찰은 거절, 1 높은 입찰은 수락
#[tokio::test]
async fn test_bid_must_exceed_current_price() {
    init_tracing();
    let store = MemoryStore::new();
    let item = create_test_item(&store, "가격 경계 테스트 아이템", 500).await;

    for amount in [1, 499, 500] {
        assert_eq!(
            bid(&store, item.id, 2, amount).await,
            Err(BidError::BidTooLow {
                amount,
                current_price: 500
            })
        );
    }
    assert_eq!(bid(&store, item.id, 2, 501).await, Ok(501));
    assert_eq!(
        bid(&store, item.id, 3, 501).await,
        Err(BidError::BidTooLow {
            amount: 501,
            current_price: 501
        })
    );

    let history = query::handlers::bids_for_item(&store, item.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 501);
    assert_eq!(history[0].bidder_id, 2);
}

/// 종료/취소된 경매는 금액과 무관하게 거절
#[tokio::test]
async fn test_bid_on_closed_auction_is_rejected() {
    let store = MemoryStore::new();
    for status in [ItemStatus::Ended, ItemStatus::Cancelled] {
        let item = create_test_item(&store, "종료 테스트 아이템", 100).await;
        set_status(&store, item.id, status).await;

        for amount in [1, 100, 101, i64::MAX] {
            assert_eq!(
                bid(&store, item.id, 2, amount).await,
                Err(BidError::AuctionEnded)
            );
        }
        let unchanged = query::handlers::get_item(&store, item.id).await.unwrap();
        assert_eq!(unchanged.current_price, 100);
        assert!(query::handlers::bids_for_item(&store, item.id)
            .await
            .unwrap()
            .is_empty());
    }
}

#[tokio::test]
async fn test_bid_on_missing_item_is_not_found() {
    let store = MemoryStore::new();
    assert_eq!(
        bid(&store, 404, 2, 1000).await,
        Err(BidError::ItemNotFound(404))
    );
}

/// 빈티지 그림: 1000000 -> 999999 거절, 1000001 수락
#[tokio::test]
async fn test_vintage_painting_scenario() {
    let store = MemoryStore::new();
    let item = create_test_item(&store, "빈티지 그림", 1_000_000).await;

    assert_eq!(
        bid(&store, item.id, 2, 999_999).await,
        Err(BidError::BidTooLow {
            amount: 999_999,
            current_price: 1_000_000
        })
    );
    assert_eq!(bid(&store, item.id, 2, 1_000_001).await, Ok(1_000_001));

    let updated = query::handlers::get_item(&store, item.id).await.unwrap();
    assert_eq!(updated.current_price, 1_000_001);
    assert_eq!(updated.starting_price, 1_000_000);
}

/// 증가하는 입찰 N개 -> 최종 가격은 마지막 금액, 이력은 정확히 N개
#[tokio::test]
async fn test_increasing_bids_build_full_history() {
    let store = MemoryStore::new();
    let item = create_test_item(&store, "입찰 이력 테스트 아이템", 1000).await;
    let amounts = [1100, 1250, 1300, 2000, 5000];

    for (i, amount) in amounts.iter().enumerate() {
        assert_eq!(bid(&store, item.id, i as i64 + 2, *amount).await, Ok(*amount));
    }

    let updated = query::handlers::get_item(&store, item.id).await.unwrap();
    assert_eq!(updated.current_price, 5000);

    // 금액 내림차순
    let history = query::handlers::bids_for_item(&store, item.id).await.unwrap();
    let recorded: Vec<i64> = history.iter().map(|b| b.amount).collect();
    let mut expected = amounts.to_vec();
    expected.reverse();
    assert_eq!(recorded, expected);

    // 시각 순으로 정렬해도 금액이 증가
    let mut by_time = history.clone();
    by_time.sort_by(|a, b| a.placed_at.cmp(&b.placed_at).then(a.id.cmp(&b.id)));
    assert!(by_time.windows(2).all(|w| w[0].amount < w[1].amount));
}

/// 100, 101 동시 입찰 -> 최종 가격 101, 수락된 입찰은 정확히 한 번씩 기록
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_simultaneous_bids_keep_highest() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    for round in 0..20 {
        let item = create_test_item(store.as_ref(), &format!("동시 입찰 {}", round), 50).await;
        let item_id = item.id;

        let low = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { bid(store.as_ref(), item_id, 2, 100).await })
        };
        let high = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { bid(store.as_ref(), item_id, 3, 101).await })
        };
        let low = low.await.unwrap();
        let high = high.await.unwrap();

        assert!(high.is_ok());
        match &low {
            Ok(price) => assert_eq!(*price, 100),
            Err(e) => assert_eq!(
                *e,
                BidError::BidTooLow {
                    amount: 100,
                    current_price: 101
                }
            ),
        }

        let updated = query::handlers::get_item(store.as_ref(), item.id).await.unwrap();
        assert_eq!(updated.current_price, 101);

        let history = query::handlers::bids_for_item(store.as_ref(), item.id)
            .await
            .unwrap();
        let recorded: Vec<i64> = history.iter().map(|b| b.amount).collect();
        if low.is_ok() {
            assert_eq!(recorded, vec![101, 100]);
        } else {
            assert_eq!(recorded, vec![101]);
        }
    }
}

/// 50명 동시 입찰 -> 최고가가 최종 가격, 시각 순 금액 증가 유지
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_bidding() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let item = create_test_item(store.as_ref(), "동시성 입찰 테스트 아이템", 10_000).await;

    let item_id = item.id;
    let mut handles = vec![];
    for i in 1..=50 {
        let store = Arc::clone(&store);
        let amount = item.current_price + i * 1000;
        handles.push(tokio::spawn(async move {
            bid(store.as_ref(), item_id, i, amount).await
        }));
    }

    let mut successful_bids = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successful_bids += 1,
            Err(BidError::BidTooLow { .. }) => {}
            Err(e) => panic!("예상하지 못한 입찰 오류: {:?}", e),
        }
    }

    let updated = query::handlers::get_item(store.as_ref(), item.id).await.unwrap();
    assert_eq!(updated.current_price, item.current_price + 50_000);

    let mut history = query::handlers::bids_for_item(store.as_ref(), item.id)
        .await
        .unwrap();
    assert_eq!(history.len(), successful_bids);
    assert_eq!(history[0].amount, updated.current_price);

    history.sort_by(|a, b| a.placed_at.cmp(&b.placed_at).then(a.id.cmp(&b.id)));
    assert!(history.windows(2).all(|w| w[0].amount < w[1].amount));
}

/// 일시적 저장소 오류는 재시도, 기록은 한 번만
#[tokio::test]
async fn test_store_failure_is_retried_without_duplicates() {
    let store = MemoryStore::new();
    let item = create_test_item(&store, "재시도 테스트 아이템", 100).await;

    store.fail_next_applies(2);
    assert_eq!(bid(&store, item.id, 2, 150).await, Ok(150));

    let history = query::handlers::bids_for_item(&store, item.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 150);

    // 재조회해도 같은 결과
    let again = query::handlers::bids_for_item(&store, item.id).await.unwrap();
    assert_eq!(again, history);
}

/// 상품 조회 실패도 재시도
#[tokio::test]
async fn test_item_read_failure_is_retried() {
    let store = MemoryStore::new();
    let item = create_test_item(&store, "조회 재시도 테스트 아이템", 100).await;

    store.fail_next_reads(RETRIES as usize - 1);
    assert_eq!(bid(&store, item.id, 2, 150).await, Ok(150));

    store.fail_next_reads(RETRIES as usize);
    assert!(matches!(
        bid(&store, item.id, 3, 200).await,
        Err(BidError::StoreFailure(_))
    ));

    let history = query::handlers::bids_for_item(&store, item.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 150);
}

/// 재시도 횟수를 넘으면 StoreFailure, 아무것도 쓰이지 않음
#[tokio::test]
async fn test_store_failure_surfaces_after_retries() {
    let store = MemoryStore::new();
    let item = create_test_item(&store, "저장소 오류 테스트 아이템", 100).await;

    store.fail_next_applies(RETRIES as usize);
    assert!(matches!(
        bid(&store, item.id, 2, 150).await,
        Err(BidError::StoreFailure(_))
    ));

    let unchanged = query::handlers::get_item(&store, item.id).await.unwrap();
    assert_eq!(unchanged.current_price, 100);
    assert!(query::handlers::bids_for_item(&store, item.id)
        .await
        .unwrap()
        .is_empty());

    // 저장소가 회복되면 정상 처리
    assert_eq!(bid(&store, item.id, 2, 150).await, Ok(150));
}

/// 사용자 입찰 이력은 최근 순
#[tokio::test]
async fn test_bids_for_user_most_recent_first() {
    let store = MemoryStore::new();
    let first = create_test_item(&store, "첫 번째 아이템", 10).await;
    let second = create_test_item(&store, "두 번째 아이템", 10).await;

    bid(&store, first.id, 7, 20).await.unwrap();
    bid(&store, second.id, 8, 30).await.unwrap();
    bid(&store, second.id, 7, 40).await.unwrap();

    let mine = query::handlers::bids_for_user(&store, 7).await.unwrap();
    let items: Vec<(i64, i64)> = mine.iter().map(|b| (b.item_id, b.amount)).collect();
    assert_eq!(items, vec![(second.id, 40), (first.id, 20)]);
}
