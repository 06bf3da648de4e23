//! 인증 및 보안 서비스 모듈
//!
//! 비밀번호 해싱, JWT 토큰 발급/검증, 외부 프로바이더 OAuth 핸드셰이크를
//! 담당하는 서비스들을 제공합니다.
//!
//! # Security
//!
//! - bcrypt 솔트 해싱 (환경별 cost)
//! - HMAC-SHA256 토큰 서명, 만료 시간 관리
//! - CSRF 방지 (OAuth state 매개변수)

pub mod oauth_service;
pub mod password_service;
pub mod token_service;

pub use oauth_service::OAuthClient;
pub use password_service::PasswordHasher;
pub use token_service::{TokenError, TokenService};
