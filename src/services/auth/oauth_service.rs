//! # 외부 프로바이더 OAuth 2.0 핸드셰이크 서비스
//!
//! RFC 6749 Authorization Code Grant 플로우의 프로바이더 측 통신을
//! 담당합니다. 프로바이더마다 엔드포인트와 프로필 필드 매핑만 다를 뿐
//! 플로우는 동일하므로, `ProviderConfig`로 파라미터화된 하나의
//! 클라이언트로 처리합니다.
//!
//! ## 플로우
//!
//! ```text
//! ┌──────────┐                ┌────────────┐              ┌────────────┐
//! │ 브라우저   │                │  이 서버    │              │ 프로바이더   │
//! └──────────┘                └────────────┘              └────────────┘
//!      │ 1. GET /oauth/{p}          │                           │
//!      ├───────────────────────────►│                           │
//!      │ 2. 302 authorize URL       │                           │
//!      │◄───────────────────────────┤                           │
//!      │ 3. 사용자 인증              │                           │
//!      ├───────────────────────────────────────────────────────►│
//!      │ 4. 302 callback?code=...   │                           │
//!      │◄───────────────────────────────────────────────────────┤
//!      │ 5. GET callback            │ 6. code → access token    │
//!      ├───────────────────────────►├──────────────────────────►│
//!      │                            │ 7. 프로필 조회             │
//!      │                            ├──────────────────────────►│
//!      │ 8. 302 프런트엔드 (token)   │                           │
//!      │◄───────────────────────────┤                           │
//! ```
//!
//! 서버는 1~5 사이에 아무 상태도 보관하지 않습니다. 프로바이더가
//! 발급한 단기 authorization code가 유일한 프로토콜 상태입니다.

use sha2::{Digest, Sha256};

use crate::{
    config::{FederationConfig, Provider, ProviderConfig},
    domain::models::oauth::{
        FacebookUserInfo, GoogleUserInfo, ProviderProfile, ProviderTokenResponse,
    },
    errors::AppError,
};

/// 프로바이더 핸드셰이크 클라이언트
///
/// 설정은 생성 시점에 주입되며, 요청 처리 중에는 읽기만 합니다.
pub struct OAuthClient {
    http: reqwest::Client,
    config: FederationConfig,
}

impl OAuthClient {
    pub fn new(config: FederationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// 핸드셰이크 종료 후 리다이렉트 URL 등 플로우 설정 접근자
    pub fn config(&self) -> &FederationConfig {
        &self.config
    }

    /// 프로바이더 인증 페이지로 보낼 authorize URL을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 비활성(미설정) 프로바이더
    pub fn authorize_url(&self, provider: Provider) -> Result<String, AppError> {
        let provider_config = self.provider_config(provider)?;
        let state = self.generate_state()?;

        let params = [
            ("client_id", provider_config.client_id.as_str()),
            ("redirect_uri", provider_config.redirect_uri.as_str()),
            ("scope", provider_config.scope.as_str()),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", provider_config.auth_uri, query_string))
    }

    /// authorization code를 프로필로 교환합니다.
    ///
    /// 토큰 교환과 프로필 조회를 연달아 수행하고, 프로바이더별 응답을
    /// 공통 `ProviderProfile`로 정규화해 반환합니다. 이메일이 없는
    /// 프로필도 실패 없이 그대로 반환됩니다.
    pub async fn fetch_profile(
        &self,
        provider: Provider,
        code: &str,
    ) -> Result<ProviderProfile, AppError> {
        let provider_config = self.provider_config(provider)?;

        let token_response = self.exchange_code_for_token(provider_config, code).await?;
        self.fetch_user_info(provider_config, &token_response.access_token)
            .await
    }

    /// 콜백에서 받은 state 값의 형식을 확인합니다.
    pub fn verify_state(&self, state: Option<&str>) -> Result<(), AppError> {
        match state {
            Some(value) if !value.is_empty() => Ok(()),
            _ => Err(AppError::AuthenticationError(
                "Missing OAuth state".to_string(),
            )),
        }
    }

    /// 로그인 성공 시 사용자 에이전트를 돌려보낼 URL
    pub fn success_redirect(&self, token: &str, user_id: &str) -> String {
        format!(
            "{}?token={}&userId={}",
            self.config.success_redirect_url,
            urlencoding::encode(token),
            urlencoding::encode(user_id)
        )
    }

    /// 핸드셰이크 실패 시 사용자 에이전트를 돌려보낼 URL
    ///
    /// 브라우저가 리다이렉트 중간에 있으므로 에러 본문 대신
    /// 쿼리 플래그로만 실패를 알립니다.
    pub fn failure_redirect(&self) -> String {
        format!("{}?error=OAuthLoginFailed", self.config.failure_redirect_url)
    }

    fn provider_config(&self, provider: Provider) -> Result<&ProviderConfig, AppError> {
        self.config.provider(provider).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Provider {} is not configured",
                provider.as_str()
            ))
        })
    }

    /// Authorization Code를 Access Token으로 교환
    async fn exchange_code_for_token(
        &self,
        provider_config: &ProviderConfig,
        code: &str,
    ) -> Result<ProviderTokenResponse, AppError> {
        let params = [
            ("code", code),
            ("client_id", &provider_config.client_id),
            ("client_secret", &provider_config.client_secret),
            ("redirect_uri", &provider_config.redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&provider_config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Token exchange request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Token exchange rejected: {}",
                error_text
            )));
        }

        response.json::<ProviderTokenResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Token response parsing failed: {}", e))
        })
    }

    /// Access Token으로 프로바이더 프로필 조회
    async fn fetch_user_info(
        &self,
        provider_config: &ProviderConfig,
        access_token: &str,
    ) -> Result<ProviderProfile, AppError> {
        let mut request = self
            .http
            .get(&provider_config.userinfo_uri)
            .bearer_auth(access_token);

        // Facebook Graph API는 원하는 필드를 명시해야 내려준다
        if provider_config.provider == Provider::Facebook {
            request = request.query(&[("fields", "id,name,email")]);
        }

        let response = request.send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Profile request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Profile request rejected: {}",
                error_text
            )));
        }

        match provider_config.provider {
            Provider::Google => response
                .json::<GoogleUserInfo>()
                .await
                .map(GoogleUserInfo::into_profile)
                .map_err(|e| {
                    AppError::ExternalServiceError(format!("Profile parsing failed: {}", e))
                }),
            Provider::Facebook => response
                .json::<FacebookUserInfo>()
                .await
                .map(FacebookUserInfo::into_profile)
                .map_err(|e| {
                    AppError::ExternalServiceError(format!("Profile parsing failed: {}", e))
                }),
        }
    }

    /// CSRF 방지용 state 값 생성
    ///
    /// 타임스탬프와 state 비밀키를 SHA-256으로 묶은 값입니다.
    /// 서버는 발급한 state를 보관하지 않습니다.
    fn generate_state(&self) -> Result<String, AppError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("Clock error: {}", e)))?
            .as_nanos();

        let state_data = format!("{}:{}", timestamp, self.config.state_secret);
        let digest = Sha256::digest(state_data.as_bytes());

        Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}
