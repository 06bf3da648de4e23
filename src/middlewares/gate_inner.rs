//! AccessGate 검증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage, HttpResponse, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::principal::Principal;
use crate::middlewares::access_gate::{AuthMode, GatePolicy};
use crate::services::auth::TokenService;

/// 실제 토큰 검증을 수행하는 서비스
pub struct AccessGateService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub policy: GatePolicy,
}

/// 게이트 거부 결과
///
/// 정책과 실패 원인의 조합이 상태 코드를 결정합니다.
#[derive(Debug, PartialEq)]
pub struct GateRejection {
    pub status: StatusCode,
    pub message: &'static str,
}

impl<S, B> Service<ServiceRequest> for AccessGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let policy = self.policy;

        Box::pin(async move {
            let Some(token_service) = req.app_data::<web::Data<TokenService>>().cloned() else {
                log::error!("TokenService is not registered in app data");
                let response = HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Internal server error"
                }));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string);

            let decision = evaluate(policy, auth_header.as_deref(), &token_service);

            match (mode, decision) {
                (AuthMode::Required, Err(rejection)) => {
                    log::warn!(
                        "access gate rejected request: {} {}",
                        rejection.status,
                        rejection.message
                    );
                    let response =
                        HttpResponse::build(rejection.status).json(serde_json::json!({
                            "message": rejection.message
                        }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (AuthMode::Required, Ok(principal)) => {
                    log::debug!("authenticated request from {}", principal.user_id);
                    req.extensions_mut().insert(principal);
                }
                (AuthMode::Optional, Ok(principal)) => {
                    req.extensions_mut().insert(principal);
                }
                // Optional 모드에서는 토큰이 없거나 무효해도 익명으로 진행
                (AuthMode::Optional, Err(_)) => {}
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 정책에 따라 요청 헤더를 평가합니다.
///
/// 상태 코드는 정책별로 다릅니다. 관리자 게이트의 무효 토큰 응답은
/// 401이 아닌 400이며, 기존 클라이언트가 이 구분에 의존하므로
/// 통일하지 않습니다.
pub fn evaluate(
    policy: GatePolicy,
    auth_header: Option<&str>,
    token_service: &TokenService,
) -> Result<Principal, GateRejection> {
    let Some(header) = auth_header else {
        return Err(match policy {
            GatePolicy::Authenticated => GateRejection {
                status: StatusCode::UNAUTHORIZED,
                message: "Access Denied, No Token Provided",
            },
            GatePolicy::Admin => GateRejection {
                status: StatusCode::UNAUTHORIZED,
                message: "Access denied, no token provided",
            },
        });
    };

    let token = token_service.extract_token(header);

    let claims = match token_service.verify(token) {
        Ok(claims) => claims,
        Err(_) => {
            return Err(match policy {
                GatePolicy::Authenticated => GateRejection {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Invalid Token",
                },
                GatePolicy::Admin => GateRejection {
                    status: StatusCode::BAD_REQUEST,
                    message: "Invalid token",
                },
            });
        }
    };

    if policy == GatePolicy::Admin && !claims.is_admin {
        return Err(GateRejection {
            status: StatusCode::FORBIDDEN,
            message: "Access denied, admin only",
        });
    }

    Ok(Principal::from(claims))
}
