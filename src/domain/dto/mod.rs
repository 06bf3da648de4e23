//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! Spring Framework의 `@RequestBody`/`@ResponseBody`와 동일한 역할을
//! 수행하며, 클라이언트와 서버 간의 데이터 계약을 명확히 정의합니다.
//!
//! ## 설계 원칙
//!
//! - **API 계약 우선**: 엔드포인트별 입력과 출력은 명시적 구조체로 표현
//! - **유효성 검증 내장**: `validator` crate를 통한 필드 수준 검증
//! - **도메인 분리**: 엔티티와 DTO를 분리하여 민감 정보(해시 등) 노출 방지

pub mod users;

pub use users::*;
