//! JWT 베어러 토큰 클레임 구조체
//!
//! RFC 7519 표준 클레임과 애플리케이션 특화 클레임을 포함합니다.
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::principal::Principal;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 주체 식별자와 권한 플래그만 담습니다.
/// 토큰 자체가 서명으로 무결성을 보장하므로 서버 측 세션은 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 관리자 권한 여부
    pub is_admin: bool,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Principal {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        }
    }
}
