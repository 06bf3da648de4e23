use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

/// 검증된 토큰에서 추출된 요청 주체
///
/// 접근 게이트가 토큰을 검증한 뒤 request extensions에 삽입하며,
/// 다운스트림 인가 판단은 이 값만을 근거로 수행됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 관리자 권한 여부
    pub is_admin: bool,
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Principal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Access Denied, No Token Provided",
            ))),
        }
    }
}

/// 선택적 인증 주체 추출자
///
/// 게이트가 Optional 모드로 동작하는 라우트에서 사용합니다.
/// 토큰이 없거나 검증에 실패한 요청은 `None`으로 전달됩니다.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<Principal>);

impl FromRequest for OptionalPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(Ok(OptionalPrincipal(principal)))
    }
}
