//! # 계정/인증 요청 DTO
//!
//! 클라이언트 → 서버 방향의 요청 본문을 매핑합니다.
//! Spring Boot의 `@Valid @RequestBody` 패턴처럼 역직렬화와 동시에
//! `validator`로 형식 검증을 수행하며, 중복 여부 같은 비즈니스 규칙은
//! 서비스 계층에서 별도로 검증합니다.

use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청 구조체
///
/// `isAdmin`은 선택 필드이며, true 요청은 이미 관리자인 주체만
/// 허용됩니다 (그 외에는 403으로 거부).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// 관리자 계정 생성 요청 여부 (기본값: false)
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 프로필 수정 요청 구조체
///
/// 두 필드 모두 선택이며, 제공된 필드만 변경됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 프로바이더가 되돌아올 때 붙여주는 쿼리입니다. 사용자가 인증을
/// 거부한 경우 `code` 없이 `error`만 전달되므로 모든 필드가 선택값입니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
