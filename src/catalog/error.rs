use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("관리자 권한이 필요합니다.")]
    Forbidden,

    #[error("상품을 찾을 수 없습니다. (item_id: {0})")]
    ItemNotFound(i64),

    #[error("상품 정보가 올바르지 않습니다: {0}")]
    InvalidItem(String),

    #[error("입찰이 있는 상품입니다.")]
    HasBids,

    #[error("경매 상태를 {from}에서 {to}(으)로 바꿀 수 없습니다.")]
    InvalidTransition { from: String, to: String },

    #[error("저장소 오류: {0}")]
    StoreFailure(String),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Forbidden => "FORBIDDEN",
            CatalogError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            CatalogError::InvalidItem(_) => "INVALID_ITEM",
            CatalogError::HasBids => "HAS_BIDS",
            CatalogError::InvalidTransition { .. } => "INVALID_STATUS",
            CatalogError::StoreFailure(_) => "STORE_FAILURE",
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        CatalogError::StoreFailure(e.to_string())
    }
}
