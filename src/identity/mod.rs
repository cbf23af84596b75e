/// 호출자 식별
/// 인증 자체는 앞단(게이트웨이)이 담당하고, 검증된 사용자 정보를 헤더로 전달한다고 가정한다.
// region:    --- Imports
use crate::bidding::error::BidError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
// endregion: --- Imports

// region:    --- Caller
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub is_admin: bool,
}

/// 헤더에서 호출자를 찾는다. 사용자 id가 없거나 숫자가 아니면 None.
pub fn resolve_caller(headers: &HeaderMap) -> Option<Caller> {
    let user_id = headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()?;
    let is_admin = headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|role| role.trim().eq_ignore_ascii_case("admin"))
        .unwrap_or(false);

    Some(Caller { user_id, is_admin })
}

/// 인증된 호출자 추출기. 없으면 401.
pub struct AuthenticatedCaller(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = BidError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_caller(&parts.headers)
            .map(AuthenticatedCaller)
            .ok_or(BidError::Unauthorized)
    }
}
// endregion: --- Caller

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn resolves_user_and_role() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("42"));
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("Admin"));
        assert_eq!(
            resolve_caller(&headers),
            Some(Caller {
                user_id: 42,
                is_admin: true
            })
        );
    }

    #[test]
    fn missing_or_malformed_id_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(resolve_caller(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(resolve_caller(&headers), None);
    }

    #[test]
    fn role_defaults_to_regular_user() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("7"));
        assert_eq!(resolve_caller(&headers).map(|c| c.is_admin), Some(false));
    }
}
