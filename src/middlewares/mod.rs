//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 접근 게이트 (AccessGate)
//! - 베어러 토큰 추출 (Bearer 접두사 유무 모두 허용) 및 검증
//! - 요청 주체(`Principal`)를 request extension에 저장
//! - 인증/관리자 정책, 선택적 인증 모드 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AccessGate;
//!
//! cfg.service(
//!     web::scope("/profile")
//!         .wrap(AccessGate::authenticated())
//!         .service(handlers::users::get_profile)
//! );
//! ```

pub mod access_gate;
mod gate_inner;

// 미들웨어 재export
pub use access_gate::AccessGate;
