//! Authentication HTTP Handlers
//!
//! 계정 생성과 인증 관련 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 인증과 OAuth 2.0 리다이렉트 플로우를 모두 지원합니다.
//!
//! # Endpoints
//!
//! - **회원가입**: `POST /register` (isAdmin 요청 시 관리자 주체 필요)
//! - **로컬 로그인**: `POST /login`
//! - **OAuth 시작**: `GET /oauth/{provider}`
//! - **OAuth 콜백**: `GET /oauth/{provider}/callback`
use actix_web::{HttpResponse, get, post, web};
use validator::Validate;

use crate::{
    config::Provider,
    domain::dto::users::request::{LoginRequest, OAuthCallbackQuery, RegisterRequest},
    domain::dto::users::response::{LoginResponse, RegisterResponse},
    domain::models::auth::principal::OptionalPrincipal,
    errors::AppError,
    services::auth::{OAuthClient, TokenService},
    services::users::UserService,
};

/// 회원가입 핸들러
///
/// 라우트에 선택적 인증 게이트가 걸려 있어, 토큰을 가진 요청이면
/// 주체가 추출되어 들어옵니다. `isAdmin: true` 요청의 허용 여부는
/// 그 주체를 근거로 서비스 계층에서 판정됩니다.
/// 가입 성공 응답에는 토큰이 없습니다. 로그인은 별도 요청입니다.
///
/// # Endpoint
/// `POST /register`
#[post("")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    requester: OptionalPrincipal,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = user_service
        .register(payload.into_inner(), requester.0.as_ref())
        .await?;

    log::info!(
        "새 사용자 등록 완료: {}",
        created.id_string().unwrap_or_default()
    );

    Ok(HttpResponse::Created().json(RegisterResponse::created()))
}

/// 로컬 로그인 핸들러
///
/// 이메일과 비밀번호를 검증하고 베어러 토큰을 발급합니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = user_service
        .login(&payload.email, &payload.password)
        .await?;

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("User record has no id".to_string()))?;

    let token = token_service.issue(&user_id, user.is_admin)?;

    log::info!("로그인 성공: 사용자 ID {}", user_id);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user_id,
        is_admin: user.is_admin,
    }))
}

/// OAuth 로그인 시작 핸들러
///
/// 사용자 에이전트를 프로바이더 인증 페이지로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /oauth/{provider}`
#[get("/{provider}")]
pub async fn oauth_initiate(
    path: web::Path<String>,
    oauth_client: web::Data<OAuthClient>,
) -> Result<HttpResponse, AppError> {
    let provider = Provider::from_str(&path.into_inner()).map_err(AppError::ValidationError)?;

    let authorize_url = oauth_client.authorize_url(provider)?;

    Ok(HttpResponse::Found()
        .append_header(("Location", authorize_url))
        .finish())
}

/// OAuth 콜백 처리 핸들러
///
/// 프로바이더가 돌려준 authorization code를 프로필로 교환하고 계정을
/// 해석한 뒤, 토큰을 붙여 프런트엔드로 리다이렉트합니다.
///
/// 호출자는 리다이렉트 중간에 있는 브라우저이므로 어떤 실패도 JSON
/// 에러 본문으로 응답하지 않고 실패 URL로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /oauth/{provider}/callback?code={code}&state={state}`
#[get("/{provider}/callback")]
pub async fn oauth_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    oauth_client: web::Data<OAuthClient>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> HttpResponse {
    let redirect_url = match complete_callback(
        &path.into_inner(),
        query.into_inner(),
        &oauth_client,
        &user_service,
        &token_service,
    )
    .await
    {
        Ok(url) => url,
        Err(e) => {
            log::warn!("OAuth 콜백 처리 실패: {}", e);
            oauth_client.failure_redirect()
        }
    };

    HttpResponse::Found()
        .append_header(("Location", redirect_url))
        .finish()
}

/// 콜백 파라미터 확인부터 토큰 발급까지의 공통 경로
///
/// 반환값은 성공 리다이렉트 URL이며, 모든 에러는 호출부에서
/// 실패 리다이렉트로 변환됩니다.
async fn complete_callback(
    provider_name: &str,
    query: OAuthCallbackQuery,
    oauth_client: &OAuthClient,
    user_service: &UserService,
    token_service: &TokenService,
) -> Result<String, AppError> {
    let provider = Provider::from_str(provider_name).map_err(AppError::ValidationError)?;

    // 사용자가 프로바이더 쪽에서 인증을 거부한 경우
    if let Some(error) = query.error {
        let detail = query.error_description.unwrap_or(error);
        return Err(AppError::AuthenticationError(detail));
    }

    oauth_client.verify_state(query.state.as_deref())?;

    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Missing authorization code".to_string()))?;

    let profile = oauth_client.fetch_profile(provider, code).await?;
    let user = user_service.resolve_federated(profile).await?;

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("User record has no id".to_string()))?;
    let token = token_service.issue(&user_id, user.is_admin)?;

    log::info!(
        "{} 로그인 성공: 사용자 ID {}",
        provider.as_str(),
        user_id
    );

    Ok(oauth_client.success_redirect(&token, &user_id))
}
