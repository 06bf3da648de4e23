//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행하며,
//! 요청 역직렬화/검증과 응답 구성만 담당하고 비즈니스 규칙은
//! 서비스 계층에 위임합니다.

pub mod auth;
pub mod users;
