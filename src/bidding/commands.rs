/// 입찰 관련 커맨드 처리
/// 상품을 읽고 입찰 규칙을 적용한 뒤, 저장소의 조건부 갱신으로 반영한다.
/// 조건부 갱신이 충돌하면(읽은 이후 가격/상태가 바뀜) 다시 읽어서 규칙을 재적용한다.
// region:    --- Imports
use super::error::BidError;
use super::model::BidReceipt;
use super::rule;
use crate::store::{ApplyOutcome, AuctionStore};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령. 입찰자는 인증된 호출자에서 가져온다.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub item_id: i64,
    pub amount: i64,
}

// 조건부 갱신 충돌 시 최대 재시도 횟수
const MAX_CONFLICT_RETRIES: u32 = 100;

/// 입찰
/// `max_store_retries`: 저장소 오류에 대한 시도 횟수 (1 이상)
pub async fn handle_place_bid(
    store: &dyn AuctionStore,
    bidder_id: i64,
    cmd: PlaceBidCommand,
    max_store_retries: u32,
) -> Result<BidReceipt, BidError> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: {:?}, bidder_id={}",
        "Command", cmd, bidder_id
    );
    let mut store_failures = 0;
    let mut conflicts = 0;

    loop {
        let item = match store.find_item(cmd.item_id).await {
            Ok(item) => item,
            Err(e) => {
                store_failures += 1;
                if store_failures >= max_store_retries {
                    error!("{:<12} --> 상품 조회 실패: {}", "Command", e);
                    return Err(e.into());
                }
                warn!("{:<12} --> 상품 조회 실패, 재시도: {}", "Command", e);
                continue;
            }
        };

        let acceptance = rule::evaluate_bid(cmd.item_id, item, bidder_id, cmd.amount)
            .map_err(|e| {
                info!("{:<12} --> 입찰 거절: {} ({})", "Command", e, e.code());
                e
            })?;

        match store.apply_bid(&acceptance.bid).await {
            Ok(ApplyOutcome::Applied(receipt)) => {
                info!(
                    "{:<12} --> 입찰 성공: bid_id={}, 현재 가격 {}",
                    "Command", receipt.bid.id, receipt.item.current_price
                );
                return Ok(receipt);
            }
            Ok(ApplyOutcome::Conflict) => {
                conflicts += 1;
                if conflicts >= MAX_CONFLICT_RETRIES {
                    error!("{:<12} --> 최대 재시도 횟수 초과", "Command");
                    return Err(BidError::StoreFailure("최대 재시도 횟수 초과".to_string()));
                }
                warn!(
                    "{:<12} --> 조건부 갱신 충돌: 다시 읽고 재시도",
                    "Command"
                );
            }
            Err(e) => {
                // 실패한 반영은 아무것도 쓰지 않았으므로 재시도해도 중복 기록이 생기지 않는다
                store_failures += 1;
                if store_failures >= max_store_retries {
                    error!("{:<12} --> 입찰 반영 실패: {}", "Command", e);
                    return Err(e.into());
                }
                warn!("{:<12} --> 입찰 반영 실패, 재시도: {}", "Command", e);
            }
        }
    }
}
// endregion: --- Commands
