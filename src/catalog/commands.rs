/// 상품 관리 커맨드 처리 (관리자 전용)
/// 1. 상품 등록
/// 2. 상품 수정
/// 3. 상품 삭제
// region:    --- Imports
use super::error::CatalogError;
use super::model::{CreateItemCommand, ItemUpdate, NewItem, UpdateItemCommand};
use crate::bidding::model::Item;
use crate::identity::Caller;
use crate::store::{status_transition_allowed, AuctionStore, DeleteOutcome, UpdateOutcome};
use tracing::info;
// endregion: --- Imports

// region:    --- Validation
fn require_admin(caller: &Caller) -> Result<(), CatalogError> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(CatalogError::Forbidden)
    }
}

fn required_text(field: &str, value: String) -> Result<String, CatalogError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(CatalogError::InvalidItem(format!("{}은(는) 필수입니다.", field)));
    }
    Ok(value)
}

/// 빈 문자열은 "변경 없음"
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_price(price: i64) -> Result<i64, CatalogError> {
    if price < 0 {
        return Err(CatalogError::InvalidItem(
            "시작 가격은 0 이상이어야 합니다.".to_string(),
        ));
    }
    Ok(price)
}

pub fn validate_new_item(cmd: CreateItemCommand, seller_id: i64) -> Result<NewItem, CatalogError> {
    Ok(NewItem {
        title: required_text("title", cmd.title)?,
        description: required_text("description", cmd.description)?,
        image_url: required_text("image_url", cmd.image_url)?,
        starting_price: check_price(cmd.starting_price)?,
        end_date: cmd.end_date,
        seller_id,
    })
}

/// 현재 상품 상태를 기준으로 수정 요청을 검증한다.
/// 값이 그대로인 필드는 수정 대상에서 뺀다.
pub fn validate_update(current: &Item, cmd: UpdateItemCommand) -> Result<ItemUpdate, CatalogError> {
    let starting_price = match cmd.starting_price {
        Some(price) if price != current.starting_price => Some(check_price(price)?),
        _ => None,
    };

    let status = match cmd.status {
        Some(next) if next != current.status => {
            if !status_transition_allowed(current.status, next) {
                return Err(CatalogError::InvalidTransition {
                    from: current.status.to_string(),
                    to: next.to_string(),
                });
            }
            Some(next)
        }
        _ => None,
    };

    Ok(ItemUpdate {
        title: optional_text(cmd.title),
        description: optional_text(cmd.description),
        image_url: optional_text(cmd.image_url),
        starting_price,
        end_date: cmd.end_date,
        status,
    })
}
// endregion: --- Validation

// region:    --- Commands
/// 1. 상품 등록
pub async fn handle_create_item(
    store: &dyn AuctionStore,
    caller: &Caller,
    cmd: CreateItemCommand,
) -> Result<Item, CatalogError> {
    require_admin(caller)?;
    let new_item = validate_new_item(cmd, caller.user_id)?;
    let item = store.insert_item(new_item).await?;
    info!(
        "{:<12} --> 상품 등록: id={}, 시작 가격={}",
        "Catalog", item.id, item.starting_price
    );
    Ok(item)
}

/// 2. 상품 수정
pub async fn handle_update_item(
    store: &dyn AuctionStore,
    caller: &Caller,
    item_id: i64,
    cmd: UpdateItemCommand,
) -> Result<Item, CatalogError> {
    require_admin(caller)?;
    let current = store
        .find_item(item_id)
        .await?
        .ok_or(CatalogError::ItemNotFound(item_id))?;
    let update = validate_update(&current, cmd)?;

    match store.update_item(item_id, &update).await? {
        UpdateOutcome::Updated(item) => {
            info!("{:<12} --> 상품 수정: id={}", "Catalog", item_id);
            Ok(item)
        }
        UpdateOutcome::NotFound => Err(CatalogError::ItemNotFound(item_id)),
        UpdateOutcome::HasBids => Err(CatalogError::HasBids),
        // 읽은 이후 다른 수정으로 상태가 바뀐 경우
        UpdateOutcome::InvalidTransition { from, to } => Err(CatalogError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

/// 3. 상품 삭제 (입찰 기록이 없는 상품만)
pub async fn handle_delete_item(
    store: &dyn AuctionStore,
    caller: &Caller,
    item_id: i64,
) -> Result<(), CatalogError> {
    require_admin(caller)?;
    match store.delete_item(item_id).await? {
        DeleteOutcome::Deleted => {
            info!("{:<12} --> 상품 삭제: id={}", "Catalog", item_id);
            Ok(())
        }
        DeleteOutcome::NotFound => Err(CatalogError::ItemNotFound(item_id)),
        DeleteOutcome::HasBids => Err(CatalogError::HasBids),
    }
}
// endregion: --- Commands
