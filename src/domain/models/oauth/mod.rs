//! # 외부 프로바이더 연동 모델
//!
//! OAuth 2.0 핸드셰이크 과정에서 프로바이더가 반환하는 데이터와,
//! 프로바이더별 프로필 응답을 내부 공통 형태로 정규화한 모델을
//! 정의합니다. 핸드셰이크 플로우 자체는 프로바이더와 무관하게 동일하고
//! 프로필 필드 매핑만 프로바이더마다 다릅니다.

use serde::Deserialize;

use crate::config::Provider;

/// 토큰 교환 엔드포인트 응답
///
/// authorization code를 액세스 토큰으로 교환할 때 프로바이더가
/// 반환하는 데이터입니다. `access_token` 외 필드는 프로바이더마다
/// 달라 선택값으로 둡니다.
#[derive(Debug, Deserialize)]
pub struct ProviderTokenResponse {
    /// 프로필 조회에 사용할 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (일반적으로 "Bearer")
    pub token_type: Option<String>,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: Option<i64>,
}

/// Google UserInfo API 응답
///
/// `https://www.googleapis.com/oauth2/v2/userinfo` 엔드포인트의
/// 응답 형식입니다. 이메일은 `email` 스코프가 거부된 경우 빠질 수 있습니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 ID
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// Google 프로필을 공통 프로필로 변환합니다.
    pub fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            provider: Provider::Google,
            provider_user_id: self.id,
            display_name: self.name.unwrap_or_default(),
            email: self.email,
            avatar: self.picture,
        }
    }
}

/// Facebook Graph API `/me` 응답
///
/// `fields=id,name,email` 쿼리로 조회한 형태입니다.
/// 이메일 없이 가입한 Facebook 계정은 `email` 필드가 빠집니다.
#[derive(Debug, Deserialize)]
pub struct FacebookUserInfo {
    /// Facebook 사용자 고유 ID
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FacebookUserInfo {
    /// Facebook 프로필을 공통 프로필로 변환합니다.
    pub fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            provider: Provider::Facebook,
            provider_user_id: self.id,
            display_name: self.name.unwrap_or_default(),
            email: self.email,
            avatar: None,
        }
    }
}

/// 프로바이더 공통 프로필
///
/// 계정 해석(find-or-create)에 필요한 최소 정보만 담습니다.
/// 이메일이 없는 프로필도 그대로 진행됩니다.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider: Provider,
    pub provider_user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_profile_mapping() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{
                "id": "1234567890",
                "email": "user@gmail.com",
                "verified_email": true,
                "name": "John Doe",
                "picture": "https://lh3.googleusercontent.com/photo.jpg"
            }"#,
        )
        .unwrap();

        let profile = info.into_profile();
        assert_eq!(profile.provider, Provider::Google);
        assert_eq!(profile.provider_user_id, "1234567890");
        assert_eq!(profile.display_name, "John Doe");
        assert_eq!(profile.email.as_deref(), Some("user@gmail.com"));
        assert_eq!(
            profile.avatar.as_deref(),
            Some("https://lh3.googleusercontent.com/photo.jpg")
        );
    }

    #[test]
    fn test_facebook_profile_mapping_without_email() {
        let info: FacebookUserInfo =
            serde_json::from_str(r#"{ "id": "fb-1", "name": "Jane" }"#).unwrap();

        let profile = info.into_profile();
        assert_eq!(profile.provider, Provider::Facebook);
        assert_eq!(profile.provider_user_id, "fb-1");
        assert!(profile.email.is_none());
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn test_token_response_optional_fields() {
        // Facebook 토큰 응답은 token_type 없이 내려올 수 있다
        let response: ProviderTokenResponse =
            serde_json::from_str(r#"{ "access_token": "at-1" }"#).unwrap();

        assert_eq!(response.access_token, "at-1");
        assert!(response.token_type.is_none());
        assert!(response.expires_in.is_none());
    }
}
