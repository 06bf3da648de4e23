//! 공통 유틸리티 함수 모듈

pub mod string_utils;
