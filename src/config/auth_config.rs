//! # Authentication Configuration Module
//!
//! JWT 토큰, 비밀번호 해싱, OAuth 프로바이더 관련 설정을 담당하는 모듈입니다.
//! Spring Security의 OAuth2/JWT 설정과 유사한 역할을 수행합니다.
//!
//! 모든 설정은 서버 기동 시점에 환경 변수에서 **한 번만** 읽혀
//! 값 구조체(`AuthConfig`, `FederationConfig`)로 고정되고, 이후
//! `TokenService`·`OAuthClient` 생성자에 명시적으로 전달됩니다.
//! 런타임 중 환경 변수를 다시 조회하는 컴포넌트는 없습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! ### OAuth 프로바이더 설정 (프로바이더별, 미설정 시 해당 프로바이더 비활성)
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/oauth/google/callback"
//!
//! export FACEBOOK_CLIENT_ID="your-facebook-app-id"
//! export FACEBOOK_CLIENT_SECRET="your-facebook-app-secret"
//! export FACEBOOK_REDIRECT_URI="http://localhost:8080/oauth/facebook/callback"
//! ```
//!
//! ### 리다이렉트 및 보안 설정
//! ```bash
//! export OAUTH_SUCCESS_REDIRECT_URL="http://localhost:3000/oauth-success"
//! export OAUTH_FAILURE_REDIRECT_URL="http://localhost:3000/login"
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! ```

use std::collections::HashMap;
use std::env;

use crate::config::data_config::PasswordConfig;

/// 토큰 서명과 비밀번호 해싱에 쓰이는 인증 핵심 설정 값
///
/// 서버 기동 시 `from_env()`로 한 번 만들어져 `TokenService`와
/// `PasswordHasher` 생성자에 주입됩니다.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT HMAC-SHA256 서명 비밀키
    pub jwt_secret: String,
    /// 액세스 토큰 유효 시간 (시간 단위)
    pub token_ttl_hours: i64,
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// 환경 변수에서 인증 설정을 로드합니다.
    ///
    /// `JWT_SECRET` 미설정 시 개발용 기본값을 사용하며 경고를 남깁니다.
    /// 토큰 유효 시간 기본값은 24시간입니다.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        });

        let token_ttl_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        Self {
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }
}

/// 지원하는 외부 인증 프로바이더
///
/// 사용자 레코드의 외부 계정 식별자와 `/oauth/{provider}` 경로 파라미터
/// 양쪽에서 쓰입니다. `serde`를 통해 소문자 문자열로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google OAuth 2.0
    Google,
    /// Facebook 로그인
    Facebook,
}

impl Provider {
    /// 문자열에서 Provider를 생성합니다.
    ///
    /// 경로 파라미터 처리용이며 대소문자를 구분하지 않습니다.
    /// 지원하지 않는 값은 `Err`를 반환합니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// Provider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }
}

/// 단일 OAuth 프로바이더의 핸드셰이크 설정
///
/// 프로바이더마다 인증/토큰/프로필 엔드포인트와 스코프, 클라이언트
/// 자격 증명이 다를 뿐 플로우 자체는 동일합니다.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub client_id: String,
    pub client_secret: String,
    /// 인증 완료 후 프로바이더가 되돌아올 콜백 URL
    pub redirect_uri: String,
    /// 사용자 에이전트를 보낼 인증 엔드포인트
    pub auth_uri: String,
    /// authorization code를 액세스 토큰으로 교환하는 엔드포인트
    pub token_uri: String,
    /// 프로필 조회 엔드포인트
    pub userinfo_uri: String,
    /// 요청할 스코프 (공백 구분)
    pub scope: String,
}

impl ProviderConfig {
    /// Google 설정을 환경 변수에서 로드합니다.
    ///
    /// `GOOGLE_CLIENT_ID`/`GOOGLE_CLIENT_SECRET`이 없으면 `None`을
    /// 반환하여 해당 프로바이더를 비활성 상태로 둡니다.
    fn google_from_env() -> Option<Self> {
        let client_id = env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET").ok()?;

        Some(Self {
            provider: Provider::Google,
            client_id,
            client_secret,
            redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/oauth/google/callback".to_string()),
            auth_uri: env::var("GOOGLE_AUTH_URI")
                .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string()),
            token_uri: env::var("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string()),
            userinfo_uri: env::var("GOOGLE_USERINFO_URI")
                .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
            scope: "openid email profile".to_string(),
        })
    }

    /// Facebook 설정을 환경 변수에서 로드합니다.
    fn facebook_from_env() -> Option<Self> {
        let client_id = env::var("FACEBOOK_CLIENT_ID").ok()?;
        let client_secret = env::var("FACEBOOK_CLIENT_SECRET").ok()?;

        Some(Self {
            provider: Provider::Facebook,
            client_id,
            client_secret,
            redirect_uri: env::var("FACEBOOK_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/oauth/facebook/callback".to_string()),
            auth_uri: env::var("FACEBOOK_AUTH_URI")
                .unwrap_or_else(|_| "https://www.facebook.com/v12.0/dialog/oauth".to_string()),
            token_uri: env::var("FACEBOOK_TOKEN_URI")
                .unwrap_or_else(|_| "https://graph.facebook.com/v12.0/oauth/access_token".to_string()),
            userinfo_uri: env::var("FACEBOOK_USERINFO_URI")
                .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string()),
            scope: "email".to_string(),
        })
    }
}

/// 외부 로그인 플로우 전체 설정
///
/// 활성화된 프로바이더 목록과 핸드셰이크 종료 후 사용자 에이전트를
/// 돌려보낼 프런트엔드 URL을 담습니다.
#[derive(Debug, Clone)]
pub struct FederationConfig {
    providers: HashMap<Provider, ProviderConfig>,
    /// CSRF 방지용 state 생성 비밀키
    pub state_secret: String,
    /// 로그인 성공 시 리다이렉트 기본 URL (token/userId 쿼리 부착)
    pub success_redirect_url: String,
    /// 실패 시 리다이렉트 기본 URL (error 플래그 부착)
    pub failure_redirect_url: String,
}

impl FederationConfig {
    /// 환경 변수에서 외부 로그인 설정을 로드합니다.
    ///
    /// 클라이언트 자격 증명이 설정된 프로바이더만 활성화됩니다.
    pub fn from_env() -> Self {
        let mut providers = HashMap::new();

        if let Some(google) = ProviderConfig::google_from_env() {
            providers.insert(Provider::Google, google);
        }
        if let Some(facebook) = ProviderConfig::facebook_from_env() {
            providers.insert(Provider::Facebook, facebook);
        }

        let state_secret = env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        });

        Self {
            providers,
            state_secret,
            success_redirect_url: env::var("OAUTH_SUCCESS_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:3000/oauth-success".to_string()),
            failure_redirect_url: env::var("OAUTH_FAILURE_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:3000/login".to_string()),
        }
    }

    /// 활성화된 프로바이더의 설정을 반환합니다.
    pub fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        self.providers.get(&provider)
    }

    #[cfg(test)]
    pub fn with_providers(
        providers: Vec<ProviderConfig>,
        state_secret: &str,
        success_redirect_url: &str,
        failure_redirect_url: &str,
    ) -> Self {
        Self {
            providers: providers.into_iter().map(|p| (p.provider, p)).collect(),
            state_secret: state_secret.to_string(),
            success_redirect_url: success_redirect_url.to_string(),
            failure_redirect_url: failure_redirect_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_string() {
        assert_eq!(Provider::from_str("google").unwrap(), Provider::Google);
        assert_eq!(Provider::from_str("facebook").unwrap(), Provider::Facebook);

        // 대소문자 무관 테스트
        assert_eq!(Provider::from_str("GOOGLE").unwrap(), Provider::Google);
        assert_eq!(Provider::from_str("Facebook").unwrap(), Provider::Facebook);

        // 지원하지 않는 프로바이더 테스트
        assert!(Provider::from_str("twitter").is_err());
        assert!(Provider::from_str("").is_err());
    }

    #[test]
    fn test_provider_as_string() {
        assert_eq!(Provider::Google.as_str(), "google");
        assert_eq!(Provider::Facebook.as_str(), "facebook");
    }

    #[test]
    fn test_provider_roundtrip() {
        for &name in &["google", "facebook"] {
            let provider = Provider::from_str(name).unwrap();
            assert_eq!(provider.as_str(), name);
        }
    }

    #[test]
    fn test_provider_serialization() {
        // 저장소에 소문자 문자열로 기록되는지 확인
        let json = serde_json::to_string(&Provider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let deserialized: Provider = serde_json::from_str("\"facebook\"").unwrap();
        assert_eq!(deserialized, Provider::Facebook);
    }

    #[test]
    fn test_federation_config_lookup() {
        let config = FederationConfig::with_providers(
            vec![ProviderConfig {
                provider: Provider::Google,
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                redirect_uri: "http://localhost:8080/oauth/google/callback".to_string(),
                auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
                token_uri: "https://oauth2.googleapis.com/token".to_string(),
                userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
                scope: "openid email profile".to_string(),
            }],
            "state-secret",
            "http://localhost:3000/oauth-success",
            "http://localhost:3000/login",
        );

        assert!(config.provider(Provider::Google).is_some());
        assert!(config.provider(Provider::Facebook).is_none());
    }
}
