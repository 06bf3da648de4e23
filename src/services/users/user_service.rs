//! # 계정 해석 서비스 구현
//!
//! 사용자 계정의 생성과 인증을 담당하는 핵심 비즈니스 로직입니다.
//! 두 개의 진입 경로가 하나의 사용자 집합으로 수렴합니다:
//!
//! - **로컬 경로**: 회원가입(비밀번호 해싱 + 중복 검사)과 로그인
//! - **외부 경로**: 프로바이더가 확인한 프로필의 find-or-create
//!
//! ## 보안 규칙
//!
//! - 관리자 계정은 기존 관리자만 만들 수 있습니다. 익명/일반 사용자의
//!   `isAdmin` 요청은 레코드 생성 전에 거부됩니다.
//! - 로그인 실패 사유(이메일 없음 / 비밀번호 불일치 / 비밀번호 없는
//!   외부 계정)는 단일 메시지로 통합되어 계정 존재 여부를 숨깁니다.
//! - 프로필 변경은 항상 호출 주체 자신의 레코드로 한정됩니다.

use std::sync::Arc;

use crate::{
    domain::{
        dto::users::request::RegisterRequest,
        entities::users::user::{ProfileUpdate, User},
        models::auth::principal::Principal,
        models::oauth::ProviderProfile,
    },
    errors::AppError,
    repositories::users::UserStore,
    services::auth::password_service::PasswordHasher,
};

/// 계정 해석 비즈니스 로직 서비스
///
/// 저장소 어댑터와 해셔는 생성 시점에 주입됩니다.
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// 새 로컬 계정을 등록합니다.
    ///
    /// # 인자
    ///
    /// * `request` - 회원가입 요청 (형식 검증은 핸들러에서 완료됨)
    /// * `requester` - 요청 주체. 익명 요청이면 `None`
    ///
    /// # Errors
    ///
    /// * `AppError::AuthorizationError` - 관리자가 아닌 주체의 관리자 계정 요청
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일
    ///
    /// 권한 검사가 가장 먼저 수행되므로 거부된 요청은 어떤 레코드도
    /// 남기지 않습니다. 가입 완료 후 토큰은 발급하지 않습니다
    /// (로그인은 별도 요청).
    pub async fn register(
        &self,
        request: RegisterRequest,
        requester: Option<&Principal>,
    ) -> Result<User, AppError> {
        if request.is_admin && !requester.map(|p| p.is_admin).unwrap_or(false) {
            log::warn!("blocked admin registration attempt for {}", request.email);
            return Err(AppError::AuthorizationError(
                "Only admins can create other admins".to_string(),
            ));
        }

        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError("User already exists".to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = self.hasher.hash(&request.password)?;
        log::debug!("password hashing took {:?}", hash_start.elapsed());

        let user = User::new_local(
            request.name,
            request.email,
            password_hash,
            request.is_admin,
        );

        self.store.create(user).await
    }

    /// 로컬 계정 로그인을 검증합니다.
    ///
    /// 이메일 미존재, 비밀번호 불일치, 비밀번호 없는 외부 가입 계정은
    /// 모두 동일한 `InvalidCredentials`로 귀결됩니다.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// 외부 프로바이더가 확인한 프로필을 사용자로 해석합니다.
    ///
    /// `(provider, provider_user_id)` 쌍으로 조회하고, 처음 보는
    /// 계정이면 비밀번호 없는 일반 사용자로 생성합니다. 동시 콜백
    /// 경쟁에서 삽입에 실패한 쪽은 승자의 레코드를 다시 읽어
    /// 돌려주므로 find-or-create는 호출자 입장에서 원자적입니다.
    ///
    /// 프로필 이메일이 기존 로컬 계정과 겹치더라도 별도 레코드를
    /// 생성합니다. 두 계정의 병합은 수행하지 않습니다.
    pub async fn resolve_federated(&self, profile: ProviderProfile) -> Result<User, AppError> {
        if let Some(existing) = self
            .store
            .find_by_provider_identity(profile.provider, &profile.provider_user_id)
            .await?
        {
            return Ok(existing);
        }

        log::info!(
            "registering new {} user {}",
            profile.provider.as_str(),
            profile.provider_user_id
        );

        let user = User::new_federated(
            profile.display_name,
            profile.email,
            profile.provider,
            profile.provider_user_id.clone(),
            profile.avatar,
        );

        match self.store.create(user).await {
            Ok(created) => Ok(created),
            Err(AppError::ConflictError(_)) => self
                .store
                .find_by_provider_identity(profile.provider, &profile.provider_user_id)
                .await?
                .ok_or_else(|| AppError::ConflictError("User already exists".to_string())),
            Err(e) => Err(e),
        }
    }

    /// 주체 자신의 프로필을 조회합니다.
    pub async fn get_profile(&self, user_id: &str) -> Result<User, AppError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 주체 자신의 프로필을 부분 수정합니다.
    ///
    /// 대상 ID는 호출 측에서 검증된 주체의 ID만 전달되므로 다른
    /// 사용자의 레코드는 변경될 수 없습니다.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        self.store
            .update_profile(user_id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use crate::domain::models::oauth::ProviderProfile;
    use crate::repositories::users::memory::MemoryUserStore;

    fn service() -> (UserService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        let service = UserService::new(store.clone(), Arc::new(PasswordHasher::new(4)));
        (service, store)
    }

    fn register_request(name: &str, email: &str, is_admin: bool) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            is_admin,
        }
    }

    fn google_profile(subject_id: &str, email: Option<&str>) -> ProviderProfile {
        ProviderProfile {
            provider: Provider::Google,
            provider_user_id: subject_id.to_string(),
            display_name: "G".to_string(),
            email: email.map(str::to_string),
            avatar: None,
        }
    }

    #[actix_web::test]
    async fn test_anonymous_cannot_register_admin() {
        let (service, store) = service();

        let err = service
            .register(register_request("A", "a@x.com", true), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AuthorizationError(_)));
        // 거부된 요청은 레코드를 남기지 않는다
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_non_admin_cannot_register_admin() {
        let (service, store) = service();
        let requester = Principal {
            user_id: "u1".to_string(),
            is_admin: false,
        };

        let err = service
            .register(register_request("A", "a@x.com", true), Some(&requester))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AuthorizationError(_)));
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_admin_can_register_admin() {
        let (service, _store) = service();
        let requester = Principal {
            user_id: "u1".to_string(),
            is_admin: true,
        };

        let created = service
            .register(register_request("A", "a@x.com", true), Some(&requester))
            .await
            .unwrap();

        assert!(created.is_admin);
    }

    #[actix_web::test]
    async fn test_duplicate_email_registration_conflicts() {
        let (service, store) = service();

        service
            .register(register_request("A", "a@x.com", false), None)
            .await
            .unwrap();

        let err = service
            .register(register_request("B", "a@x.com", false), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_register_then_login_roundtrip() {
        let (service, _store) = service();

        let created = service
            .register(register_request("A", "a@x.com", false), None)
            .await
            .unwrap();
        assert!(created.id.is_some());

        let user = service.login("a@x.com", "secret1").await.unwrap();
        assert_eq!(user.id_string(), created.id_string());
        assert!(!user.is_admin);
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _store) = service();

        service
            .register(register_request("A", "a@x.com", false), None)
            .await
            .unwrap();

        // 존재하지 않는 이메일
        let unknown = service.login("b@x.com", "secret1").await.unwrap_err();
        // 비밀번호 불일치
        let wrong = service.login("a@x.com", "wrong-password").await.unwrap_err();

        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[actix_web::test]
    async fn test_federated_account_cannot_login_locally() {
        let (service, _store) = service();

        service
            .resolve_federated(google_profile("g1", Some("g@gmail.com")))
            .await
            .unwrap();

        let err = service.login("g@gmail.com", "anything").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[actix_web::test]
    async fn test_first_federated_callback_creates_plain_user() {
        let (service, _store) = service();

        let user = service
            .resolve_federated(google_profile("g1", Some("g@gmail.com")))
            .await
            .unwrap();

        assert!(!user.is_admin);
        assert!(user.password_hash.is_none());
        assert_eq!(user.federated_pair(), Some((Provider::Google, "g1")));
    }

    #[actix_web::test]
    async fn test_repeat_federated_callback_resolves_same_user() {
        let (service, store) = service();

        let first = service
            .resolve_federated(google_profile("g1", Some("g@gmail.com")))
            .await
            .unwrap();
        let second = service
            .resolve_federated(google_profile("g1", Some("g@gmail.com")))
            .await
            .unwrap();

        assert_eq!(first.id_string(), second.id_string());
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_lost_insert_race_resolves_to_winner() {
        let (service, store) = service();

        // 다른 콜백이 먼저 레코드를 만든 상황을 저장소에 직접 재현
        store
            .create(User::new_federated(
                "G".to_string(),
                Some("g@gmail.com".to_string()),
                Provider::Google,
                "g1".to_string(),
                None,
            ))
            .await
            .unwrap();

        let resolved = service
            .resolve_federated(google_profile("g1", Some("g@gmail.com")))
            .await
            .unwrap();

        assert_eq!(resolved.federated_pair(), Some((Provider::Google, "g1")));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_federated_email_collision_creates_second_record() {
        let (service, store) = service();

        service
            .register(register_request("A", "a@x.com", false), None)
            .await
            .unwrap();

        // 같은 이메일의 외부 가입은 병합 없이 별도 레코드가 된다
        let federated = service
            .resolve_federated(google_profile("g1", Some("a@x.com")))
            .await
            .unwrap();

        assert!(federated.password_hash.is_none());
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_profile_read_and_update_flow() {
        let (service, _store) = service();

        let created = service
            .register(register_request("A", "a@x.com", false), None)
            .await
            .unwrap();
        let id = created.id_string().unwrap();

        let profile = service.get_profile(&id).await.unwrap();
        assert_eq!(profile.name, "A");
        assert_eq!(profile.avatar, "");

        let updated = service
            .update_profile(
                &id,
                ProfileUpdate {
                    name: Some("B".to_string()),
                    avatar: Some("https://cdn.example.com/b.png".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "B");
        assert_eq!(updated.avatar, "https://cdn.example.com/b.png");
        // 이메일과 권한은 프로필 수정으로 변하지 않는다
        assert_eq!(updated.email.as_deref(), Some("a@x.com"));
        assert!(!updated.is_admin);
    }

    #[actix_web::test]
    async fn test_profile_of_unknown_user_is_not_found() {
        let (service, _store) = service();

        let err = service.get_profile("000000000000000000000000").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
