//! 사용자 레코드 저장소 어댑터
//!
//! 사용자 컬렉션에 대한 좁은 타입 인터페이스를 정의합니다.
//! 비즈니스 로직 없이 타입이 있는 접근자만 제공하며, 계정 해석
//! 로직은 이 trait 위에서 동작합니다.
//!
//! 중복 차단은 저장소 쓰기 경로의 책임입니다. `create`는 조건부
//! 삽입으로 동작해야 하며, 동시에 들어온 동일 키 생성 요청 중
//! 하나만 성공하고 나머지는 `ConflictError`를 받아야 합니다.

use async_trait::async_trait;

use crate::config::Provider;
use crate::domain::entities::users::user::{ProfileUpdate, User};
use crate::errors::AppError;

pub mod user_repo;

#[cfg(test)]
pub mod memory;

/// 사용자 레코드 저장소 인터페이스
///
/// 구현체: MongoDB(`UserRepository`), 테스트용 인메모리(`MemoryUserStore`)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 새 사용자를 저장합니다. ID는 저장소가 할당합니다.
    ///
    /// 유니크 제약(로컬 계정 이메일, 외부 계정 식별자 쌍)은 이 호출
    /// 안에서 원자적으로 검사되며, 위반 시 `ConflictError`를 반환합니다.
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// ID로 사용자를 조회합니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 이메일로 사용자를 조회합니다. 계정 종류를 가리지 않습니다.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// `(provider, provider_user_id)` 쌍으로 사용자를 조회합니다.
    async fn find_by_provider_identity(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError>;

    /// 프로필 필드를 부분 수정하고 수정된 사용자를 반환합니다.
    ///
    /// 대상 ID의 사용자가 없으면 `Ok(None)`을 반환합니다.
    async fn update_profile(
        &self,
        id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<User>, AppError>;
}
