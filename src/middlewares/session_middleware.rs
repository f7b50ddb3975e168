//! 세션 인증 미들웨어
//!
//! 모든 요청에 대해 세션 쿠키로 프린시펄을 복원해 request extensions에
//! 넣고, 경로 접두사 인가 정책을 평가합니다. 실제 로직은
//! [`session_inner`](crate::middlewares::session_inner)에 있습니다.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::models::auth::AuthorizationPolicy;
use crate::middlewares::session_inner::SessionMiddlewareService;
use crate::services::auth::SessionService;

/// 전역 세션 인증 미들웨어
///
/// 쿠키가 없거나 세션이 만료된 요청도 여기서 끝나지 않습니다.
/// 익명 프린시펄로 정책을 평가해, 공개 경로는 통과시키고
/// 보호 경로만 401로 거부합니다.
pub struct SessionMiddleware {
    session_service: Arc<SessionService>,
    policy: &'static AuthorizationPolicy,
}

impl SessionMiddleware {
    pub fn new(session_service: Arc<SessionService>, policy: &'static AuthorizationPolicy) -> Self {
        Self {
            session_service,
            policy,
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            session_service: self.session_service.clone(),
            policy: self.policy,
        }))
    }
}
