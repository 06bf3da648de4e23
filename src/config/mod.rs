//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하되,
//! 설정값은 기동 시점에 한 번 로드되어 값 구조체로 각 컴포넌트에
//! 주입됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 해싱 강도 설정
//! - [`auth_config`] - JWT, OAuth 프로바이더, 리다이렉트 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 기동 시 1회 로드
//!
//! 환경 변수는 `main`에서 `AuthConfig::from_env()` 등으로 한 번만
//! 읽습니다. 요청 처리 경로에서는 어떤 컴포넌트도 환경 변수를
//! 직접 조회하지 않습니다.
//!
//! ### 2. 보안 우선
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전하며, 사용 시 경고 로그 출력
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//!
//! # OAuth 설정 (프로바이더별 선택)
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export FACEBOOK_CLIENT_ID="..."
//! export FACEBOOK_CLIENT_SECRET="..."
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
