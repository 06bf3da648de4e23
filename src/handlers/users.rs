//! # Profile HTTP Handlers
//!
//! 인증된 주체 자신의 프로필을 다루는 HTTP 엔드포인트입니다.
//! 라우트에 인증 게이트가 걸려 있어 핸들러는 항상 검증된 주체와 함께
//! 호출되며, 조회/수정 대상은 언제나 주체 자신의 레코드입니다.
use actix_web::{HttpResponse, get, put, web};
use validator::Validate;

use crate::{
    domain::dto::users::request::UpdateProfileRequest,
    domain::dto::users::response::{ProfileResponse, ProfileUpdateResponse},
    domain::entities::users::user::ProfileUpdate,
    domain::models::auth::principal::Principal,
    errors::AppError,
    services::users::UserService,
    utils::string_utils::clean_optional_string,
};

/// 프로필 조회 핸들러
///
/// # Endpoint
/// `GET /profile`
#[get("")]
pub async fn get_profile(
    principal: Principal,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_profile(&principal.user_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(&user)))
}

/// 프로필 수정 핸들러
///
/// `name`/`avatar` 중 제공된 필드만 변경합니다.
///
/// # Endpoint
/// `PUT /profile`
#[put("")]
pub async fn update_profile(
    principal: Principal,
    payload: web::Json<UpdateProfileRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let payload = payload.into_inner();
    let update = ProfileUpdate {
        name: clean_optional_string(payload.name),
        avatar: clean_optional_string(payload.avatar),
    };

    let user = user_service
        .update_profile(&principal.user_id, update)
        .await?;

    Ok(HttpResponse::Ok().json(ProfileUpdateResponse::updated(&user)))
}
