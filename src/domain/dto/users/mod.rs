//! # User Data Transfer Objects Module
//!
//! 계정/인증 API의 요청·응답 데이터 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/     # 클라이언트 → 서버 (회원가입, 로그인, 프로필 수정, OAuth 콜백)
//! └── response/    # 서버 → 클라이언트 (토큰, 프로필)
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
