//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명 JWT의 발급과 검증을 담당합니다.
//! 토큰은 자기완결적이며 서버 측 세션 저장소 없이 검증됩니다.
//! 만료 전 무효화는 지원하지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::{config::AuthConfig, domain::models::auth::token::TokenClaims, errors::AppError};

/// 토큰 검증 실패 분류
///
/// 게이트 미들웨어가 실패 원인별로 응답을 구성할 수 있도록
/// 서명/만료/형식 오류를 구분합니다.
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    /// 구조가 깨졌거나 디코딩할 수 없는 토큰
    #[error("Malformed token")]
    Malformed,
    /// 서명이 서버 비밀키와 일치하지 않는 토큰 (위변조 감지)
    #[error("Invalid token signature")]
    SignatureInvalid,
    /// 유효 기간이 지난 토큰
    #[error("Token expired")]
    Expired,
}

/// JWT 토큰 관리 서비스
///
/// 서명 비밀키와 유효 시간은 생성 시점에 `AuthConfig`에서 주입되며
/// 이후 변경되지 않습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// 발급 토큰의 유효 시간
    ttl: Duration,
}

impl TokenService {
    /// 인증 설정으로부터 토큰 서비스를 생성합니다.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// 사용자를 위한 베어러 토큰을 발급합니다.
    ///
    /// 클레임에는 주체 ID와 권한 플래그, 발급/만료 시각만 담습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    pub fn issue(&self, subject_id: &str, is_admin: bool) -> Result<String, AppError> {
        self.issue_with_ttl(subject_id, is_admin, self.ttl)
    }

    fn issue_with_ttl(
        &self,
        subject_id: &str,
        is_admin: bool,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = TokenClaims {
            sub: subject_id.to_string(),
            is_admin,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Token encoding failed: {}", e)))
    }

    /// 베어러 토큰을 검증하고 클레임을 추출합니다.
    ///
    /// 서명 무결성과 만료를 검사하며, 실패 원인을 분류해 반환합니다.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let validation = Validation::default();

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })
    }

    /// Authorization 헤더 값에서 토큰 부분을 추출합니다.
    ///
    /// `Bearer ` 접두사가 있으면 제거하고, 없으면 값 전체를
    /// 토큰으로 취급합니다. 두 형태 모두 유효한 전달 방식입니다.
    pub fn extract_token<'a>(&self, auth_header: &'a str) -> &'a str {
        auth_header
            .strip_prefix("Bearer ")
            .unwrap_or(auth_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_secret(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: 4,
        })
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = service_with_secret("test-secret");

        let token = service.issue("user-1", true).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert!(claims.is_admin);
        // 만료 시각은 발급 시각 + 24시간
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_classified() {
        let service = service_with_secret("test-secret");

        let token = service
            .issue_with_ttl("user-1", false, Duration::hours(-1))
            .unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_foreign_signature_is_classified() {
        let issuer = service_with_secret("secret-a");
        let verifier = service_with_secret("secret-b");

        let token = issuer.issue("user-1", false).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = service_with_secret("test-secret");

        assert_eq!(service.verify("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
        assert_eq!(service.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_extract_token_accepts_both_header_forms() {
        let service = service_with_secret("test-secret");

        assert_eq!(service.extract_token("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(service.extract_token("abc.def.ghi"), "abc.def.ghi");
    }
}
