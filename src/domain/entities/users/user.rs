//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증(이메일/비밀번호)과 외부 프로바이더 인증을 모두 지원하는
//! 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::config::Provider;

/// 외부 프로바이더 계정 식별자
///
/// `(provider, provider_user_id)` 쌍은 전체 사용자 집합에서 유일합니다.
/// 사용자당 최대 하나의 외부 계정만 연결됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedIdentity {
    /// 인증을 수행한 프로바이더
    pub provider: Provider,
    /// 프로바이더가 부여한 사용자 고유 ID
    pub provider_user_id: String,
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 가입자는 `password_hash`를, 소셜 로그인 가입자는
/// `federated_identity`를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 사용자 이메일. 로컬 계정은 항상 존재하며 로컬 계정 간 유일합니다.
    /// 이메일을 제공하지 않는 프로바이더로 가입한 경우 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 해시된 비밀번호 (소셜 로그인 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 관리자 권한 여부
    pub is_admin: bool,
    /// 연결된 외부 계정 (로컬 가입자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federated_identity: Option<FederatedIdentity>,
    /// 프로필 이미지 URL (기본값: 빈 문자열)
    #[serde(default)]
    pub avatar: String,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호)
    pub fn new_local(name: String, email: String, password_hash: String, is_admin: bool) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email: Some(email),
            password_hash: Some(password_hash),
            is_admin,
            federated_identity: None,
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 소셜 로그인 사용자 생성
    ///
    /// 프로바이더가 확인해 준 프로필 정보로 사용자를 생성합니다.
    /// 비밀번호 없이 시작하며 관리자 권한은 부여되지 않습니다.
    pub fn new_federated(
        name: String,
        email: Option<String>,
        provider: Provider,
        provider_user_id: String,
        avatar: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash: None,
            is_admin: false,
            federated_identity: Some(FederatedIdentity {
                provider,
                provider_user_id,
            }),
            avatar: avatar.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로컬 가입 사용자인지 확인
    pub fn is_local(&self) -> bool {
        self.federated_identity.is_none()
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 연결된 외부 계정의 `(provider, provider_user_id)` 쌍
    pub fn federated_pair(&self) -> Option<(Provider, &str)> {
        self.federated_identity
            .as_ref()
            .map(|fi| (fi.provider, fi.provider_user_id.as_str()))
    }
}

/// 프로필 부분 수정 요청 값
///
/// 저장소 어댑터에 전달되는, 소유 주체가 변경할 수 있는 필드의
/// 부분 집합입니다. `None` 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// 변경할 필드가 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none()
    }
}
