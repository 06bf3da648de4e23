//! 테스트용 인메모리 사용자 저장소
//!
//! MongoDB 리포지토리와 동일한 제약을 단일 잠금 아래에서 흉내 냅니다.
//! 검사와 삽입이 하나의 잠금 구간에서 수행되므로 조건부 삽입의
//! 원자성이 그대로 재현됩니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::Provider;
use crate::domain::entities::users::user::{ProfileUpdate, User};
use crate::errors::AppError;
use crate::repositories::users::UserStore;

/// 잠금 보호되는 Vec 기반 저장소
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 레코드 수
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        // 로컬 계정 간 이메일 유일성 (partial unique index와 동일한 범위)
        if user.federated_identity.is_none() {
            let duplicate = users
                .iter()
                .any(|u| u.federated_identity.is_none() && u.email == user.email);
            if duplicate {
                return Err(AppError::ConflictError("User already exists".to_string()));
            }
        }

        // 외부 계정 식별자 쌍 유일성
        if let Some(pair) = user.federated_pair() {
            let duplicate = users
                .iter()
                .any(|u| u.federated_pair() == Some((pair.0, pair.1)));
            if duplicate {
                return Err(AppError::ConflictError("User already exists".to_string()));
            }
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id_string().as_deref() == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_provider_identity(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.federated_pair() == Some((provider, provider_user_id)))
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();

        let Some(user) = users
            .iter_mut()
            .find(|u| u.id_string().as_deref() == Some(id))
        else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = avatar;
        }
        user.updated_at = mongodb::bson::DateTime::now();

        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_conditional_insert_rejects_duplicate_local_email() {
        let store = MemoryUserStore::new();

        let first = User::new_local(
            "A".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
            false,
        );
        let second = User::new_local(
            "B".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
            false,
        );

        assert!(store.create(first).await.is_ok());
        let err = store.create(second).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_conditional_insert_rejects_duplicate_provider_pair() {
        let store = MemoryUserStore::new();

        let first = User::new_federated(
            "G".to_string(),
            Some("g@gmail.com".to_string()),
            Provider::Google,
            "g1".to_string(),
            None,
        );
        let second = User::new_federated(
            "G2".to_string(),
            Some("other@gmail.com".to_string()),
            Provider::Google,
            "g1".to_string(),
            None,
        );

        assert!(store.create(first).await.is_ok());
        let err = store.create(second).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_same_subject_id_on_other_provider_is_allowed() {
        let store = MemoryUserStore::new();

        let google = User::new_federated(
            "G".to_string(),
            None,
            Provider::Google,
            "shared-id".to_string(),
            None,
        );
        let facebook = User::new_federated(
            "F".to_string(),
            None,
            Provider::Facebook,
            "shared-id".to_string(),
            None,
        );

        assert!(store.create(google).await.is_ok());
        assert!(store.create(facebook).await.is_ok());
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_federated_create_keeps_duplicate_email_of_local_account() {
        // 외부 가입은 로컬 계정과 같은 이메일이라도 별도 레코드로 생성된다
        let store = MemoryUserStore::new();

        let local = User::new_local(
            "A".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
            false,
        );
        let federated = User::new_federated(
            "A-social".to_string(),
            Some("a@x.com".to_string()),
            Provider::Google,
            "g1".to_string(),
            None,
        );

        assert!(store.create(local).await.is_ok());
        assert!(store.create(federated).await.is_ok());
        assert_eq!(store.len(), 2);
    }
}
