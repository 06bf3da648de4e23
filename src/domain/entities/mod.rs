//! # Domain Entities Module
//!
//! 저장소에 영속되는 핵심 도메인 객체들입니다.

pub mod users;
