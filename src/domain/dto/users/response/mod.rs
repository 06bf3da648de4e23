//! # 계정/인증 응답 DTO
//!
//! 서버 → 클라이언트 방향의 응답 본문을 매핑합니다.
//! 필드 이름은 기존 프런트엔드가 의존하는 camelCase 계약을 그대로
//! 따릅니다 (`userId`, `isAdmin`).

use serde::Serialize;

use crate::domain::entities::users::user::User;

/// 회원가입 성공 응답
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

impl RegisterResponse {
    pub fn created() -> Self {
        Self {
            message: "User registered successfully".to_string(),
        }
    }
}

/// 로그인 성공 응답 (JWT 토큰 포함)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// 프로필 조회 응답
///
/// 미설정 avatar/email은 빈 문자열로 내려보냅니다.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub avatar: String,
    pub email: String,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            email: user.email.clone().unwrap_or_default(),
        }
    }
}

/// 프로필 수정 응답에 포함되는 변경 결과
#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub name: String,
    pub avatar: String,
}

/// 프로필 수정 성공 응답
#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: ProfileBody,
}

impl ProfileUpdateResponse {
    pub fn updated(user: &User) -> Self {
        Self {
            message: "Profile updated successfully".to_string(),
            user: ProfileBody {
                name: user.name.clone(),
                avatar: user.avatar.clone(),
            },
        }
    }
}
