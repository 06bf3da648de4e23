//! 접근 게이트 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 베어러 토큰을 검증하고 요청 주체를
//! request extensions에 넣어 다운스트림으로 전달합니다.
//! 정책은 두 가지입니다:
//!
//! - **Authenticated**: 유효한 토큰만 요구
//! - **Admin**: 유효한 토큰에 더해 관리자 권한 요구
//!
//! 게이트는 저장소를 건드리지 않으며 토큰 검증 결과만으로 동작합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::gate_inner::AccessGateService;

/// 인증 모드
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (있으면 검증, 없어도 허용)
    Optional,
}

/// 접근 정책
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GatePolicy {
    /// 유효한 토큰이면 통과
    Authenticated,
    /// 유효한 토큰 + 관리자 권한이어야 통과
    Admin,
}

/// 접근 게이트 미들웨어
pub struct AccessGate {
    mode: AuthMode,
    policy: GatePolicy,
}

impl AccessGate {
    /// 인증 필수 게이트 생성
    pub fn authenticated() -> Self {
        Self {
            mode: AuthMode::Required,
            policy: GatePolicy::Authenticated,
        }
    }

    /// 관리자 전용 게이트 생성
    pub fn admin() -> Self {
        Self {
            mode: AuthMode::Required,
            policy: GatePolicy::Admin,
        }
    }

    /// 선택적 인증 게이트 생성
    ///
    /// 토큰이 없거나 무효한 요청도 익명 주체로 통과시킵니다.
    /// 회원가입처럼 주체가 있을 수도 없을 수도 있는 라우트에서 사용합니다.
    pub fn optional() -> Self {
        Self {
            mode: AuthMode::Optional,
            policy: GatePolicy::Authenticated,
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateService {
            service: Rc::new(service),
            mode: self.mode,
            policy: self.policy,
        }))
    }
}
