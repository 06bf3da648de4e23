//! # 사용자 리포지토리 구현 (MongoDB)
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB `users` 컬렉션을 저장소로 사용합니다.
//!
//! ## 데이터 무결성
//!
//! 유니크 제약은 애플리케이션 검사만으로는 동시 요청 경쟁을 막을 수
//! 없으므로, 부분 유니크 인덱스로 쓰기 시점에 원자적으로 강제합니다:
//!
//! - `email` — 외부 계정이 연결되지 않은(로컬) 문서에 한해 유일.
//!   외부 프로바이더 가입은 기존 로컬 계정과 같은 이메일이라도 별도
//!   레코드로 생성되는 기존 동작을 유지합니다.
//! - `(federated_identity.provider, federated_identity.provider_user_id)`
//!   — 외부 계정이 연결된 문서에 한해 유일. 처음 보는 외부 계정에
//!   대한 동시 콜백이 두 레코드를 만들 수 없습니다.
//!
//! 인덱스 위반은 `ConflictError`로 변환됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};

use crate::{
    config::Provider,
    db::Database,
    domain::entities::users::user::{ProfileUpdate, User},
    errors::AppError,
    repositories::users::UserStore,
};

/// MongoDB 기반 사용자 저장소
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.db.get_database().collection::<User>("users")
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 서버 기동 시 한 번 호출되어 유니크 제약을 보장하는 인덱스를
    /// 만듭니다. 이미 존재하는 인덱스는 그대로 유지됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        // 로컬 계정 이메일 유니크 인덱스
        let local_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! {
                        "federated_identity": { "$exists": false }
                    })
                    .name("local_email_unique".to_string())
                    .build(),
            )
            .build();

        // 외부 계정 식별자 쌍 유니크 인덱스
        let federated_identity_index = IndexModel::builder()
            .keys(doc! {
                "federated_identity.provider": 1,
                "federated_identity.provider_user_id": 1,
            })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! {
                        "federated_identity": { "$exists": true }
                    })
                    .name("federated_identity_unique".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([local_email_index, federated_identity_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(id).map_err(|_| AppError::ValidationError("Invalid user id".to_string()))
    }

    /// MongoDB duplicate key(E11000) 에러 여부 확인
    fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
        matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
        )
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if Self::is_duplicate_key_error(&e) {
                AppError::ConflictError("User already exists".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_object_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_provider_identity(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! {
                "federated_identity.provider": provider.as_str(),
                "federated_identity.provider_user_id": provider_user_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update_profile(
        &self,
        id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_object_id(id)?;

        let mut set_doc = Document::new();
        if let Some(name) = update.name {
            set_doc.insert("name", name);
        }
        if let Some(avatar) = update.avatar {
            set_doc.insert("avatar", avatar);
        }
        set_doc.insert("updated_at", mongodb::bson::DateTime::now());

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
