//! API 라우트 설정 모듈
//!
//! REST API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 계정, 인증, 프로필 관련 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Route Groups
//!
//! ## 계정 (선택적 인증 / Public)
//! - `POST /register` - 회원가입 (isAdmin 요청 시 관리자 토큰 필요)
//! - `POST /login` - 이메일/비밀번호 로그인
//!
//! ## OAuth (Public, 리다이렉트 플로우)
//! - `GET /oauth/{provider}` - 프로바이더 로그인 시작
//! - `GET /oauth/{provider}/callback` - 프로바이더 콜백
//!
//! ## 프로필 (인증 필요)
//! - `GET /profile` - 내 프로필 조회
//! - `PUT /profile` - 내 프로필 수정
//!
//! # Auth Middleware Usage
//!
//! ```rust,ignore
//! // 인증 필수 라우트
//! cfg.service(
//!     web::scope("/profile")
//!         .wrap(AccessGate::authenticated())
//!         .service(handlers::users::get_profile)
//! );
//!
//! // 관리자 전용 라우트 (상품 관리 등 별도 컴포넌트에서 사용)
//! web::scope("/admin").wrap(AccessGate::admin())
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AccessGate;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_account_routes(cfg);
    configure_oauth_routes(cfg);
    configure_profile_routes(cfg);
}

/// 회원가입/로그인 라우트를 설정합니다
///
/// 회원가입은 선택적 인증 게이트를 거칩니다. 익명 요청도 허용되지만,
/// 관리자 토큰이 실려 오면 주체로 추출되어 `isAdmin` 요청의 근거가
/// 됩니다.
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/register")
            .wrap(AccessGate::optional())
            .service(handlers::auth::register),
    );

    cfg.service(handlers::auth::login);
}

/// OAuth 리다이렉트 플로우 라우트를 설정합니다
///
/// 두 엔드포인트 모두 브라우저 리다이렉트로 응답하므로 게이트를
/// 걸지 않습니다.
fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/oauth")
            .service(handlers::auth::oauth_initiate)
            .service(handlers::auth::oauth_callback),
    );
}

/// 프로필 라우트를 설정합니다
fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .wrap(AccessGate::authenticated())
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "storefront_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "auth": "JWT + OAuth 2.0"
        }
    }))
}
