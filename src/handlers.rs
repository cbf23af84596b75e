// region:    --- Imports
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::bidding::error::BidError;
use crate::catalog::commands as catalog;
use crate::catalog::error::CatalogError;
use crate::catalog::model::{CreateItemCommand, UpdateItemCommand};
use crate::identity::AuthenticatedCaller;
use crate::query;
use crate::store::AuctionStore;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AuctionStore>,
    pub bid_max_retries: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn AuctionStore>, bid_max_retries: u32) -> Self {
        Self {
            store,
            bid_max_retries,
        }
    }
}
// endregion: --- App State

// region:    --- Routes
pub fn routes(state: AppState) -> Router {
    // 프론트엔드 개발 서버를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/api/items", get(handle_get_items).post(handle_create_item))
        .route(
            "/api/items/:id",
            get(handle_get_item)
                .put(handle_update_item)
                .delete(handle_delete_item),
        )
        .route("/api/bids", post(handle_bid))
        .route("/api/bids/item/:item_id", get(handle_get_item_bids))
        .route("/api/bids/user", get(handle_get_user_bids))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
// endregion: --- Routes

// region:    --- Error Responses
fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}

impl IntoResponse for BidError {
    fn into_response(self) -> Response {
        let status = match &self {
            BidError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            BidError::AuctionEnded | BidError::BidTooLow { .. } => StatusCode::BAD_REQUEST,
            BidError::Unauthorized => StatusCode::UNAUTHORIZED,
            BidError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let BidError::BidTooLow {
            amount,
            current_price,
        } = &self
        {
            return (
                status,
                Json(json!({
                    "error": self.to_string(),
                    "code": self.code(),
                    "bid_amount": amount,
                    "current_price": current_price,
                })),
            )
                .into_response();
        }
        error_response(status, self.code(), self.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::Forbidden => StatusCode::FORBIDDEN,
            CatalogError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidItem(_) | CatalogError::InvalidTransition { .. } => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::HasBids => StatusCode::CONFLICT,
            CatalogError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.code(), self.to_string())
    }
}
// endregion: --- Error Responses

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_bid(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<impl IntoResponse, BidError> {
    info!("{:<12} --> 입찰 요청: {:?}", "Handler", cmd);
    let receipt =
        handle_place_bid(state.store.as_ref(), caller.user_id, cmd, state.bid_max_retries).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// 상품 등록
pub async fn handle_create_item(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Json(cmd): Json<CreateItemCommand>,
) -> Result<impl IntoResponse, CatalogError> {
    info!("{:<12} --> 상품 등록 요청: {}", "Handler", cmd.title);
    let item = catalog::handle_create_item(state.store.as_ref(), &caller, cmd).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// 상품 수정
pub async fn handle_update_item(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(item_id): Path<i64>,
    Json(cmd): Json<UpdateItemCommand>,
) -> Result<impl IntoResponse, CatalogError> {
    info!("{:<12} --> 상품 수정 요청 id: {}", "Handler", item_id);
    let item = catalog::handle_update_item(state.store.as_ref(), &caller, item_id, cmd).await?;
    Ok(Json(item))
}

/// 상품 삭제
pub async fn handle_delete_item(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, CatalogError> {
    info!("{:<12} --> 상품 삭제 요청 id: {}", "Handler", item_id);
    catalog::handle_delete_item(state.store.as_ref(), &caller, item_id).await?;
    Ok(Json(json!({ "message": "상품이 삭제되었습니다." })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

pub async fn handle_root() -> &'static str {
    "Auction Bid Service API"
}

/// 모든 상품 조회
pub async fn handle_get_items(State(state): State<AppState>) -> Result<impl IntoResponse, BidError> {
    info!("{:<12} --> 모든 상품 조회", "HandlerQuery");
    let items = query::handlers::list_items(state.store.as_ref()).await?;
    Ok(Json(items))
}

/// 상품 조회
pub async fn handle_get_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, BidError> {
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", item_id);
    let item = query::handlers::get_item(state.store.as_ref(), item_id).await?;
    Ok(Json(item))
}

/// 상품 입찰 이력 조회
pub async fn handle_get_item_bids(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, BidError> {
    info!(
        "{:<12} --> 상품 입찰 이력 조회 id: {}",
        "HandlerQuery", item_id
    );
    let bids = query::handlers::bids_for_item(state.store.as_ref(), item_id).await?;
    Ok(Json(bids))
}

/// 내 입찰 이력 조회
pub async fn handle_get_user_bids(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
) -> Result<impl IntoResponse, BidError> {
    info!(
        "{:<12} --> 사용자 입찰 이력 조회 id: {}",
        "HandlerQuery", caller.user_id
    );
    let bids = query::handlers::bids_for_user(state.store.as_ref(), caller.user_id).await?;
    Ok(Json(bids))
}

// endregion: --- Query Handlers
