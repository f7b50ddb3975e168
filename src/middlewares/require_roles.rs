//! 핸들러 수준 역할 검사 미들웨어
//!
//! 경로 접두사 정책과 별개로, 특정 핸들러에만 허용 역할 집합을
//! 강제합니다 (`/info` → ADMIN, `/data` → MANAGER|ADMIN).
//! 전역 [`SessionMiddleware`](crate::middlewares::session_middleware)가
//! extensions에 넣어둔 프린시펄을 읽으므로, 반드시 그 안쪽에
//! 래핑되어야 합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse, Result};
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::{Access, DenyReason, RequiredRole, SessionPrincipal};

/// 허용 역할 집합(ANY)을 강제하는 스코프 미들웨어
pub struct RequireRoles {
    rule: RequiredRole,
}

impl RequireRoles {
    /// 나열된 역할 중 하나를 요구합니다.
    pub fn any_of(roles: &[UserRole]) -> Self {
        Self {
            rule: RequiredRole::any_of(roles),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRoles
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireRolesService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRolesService {
            service: Rc::new(service),
            rule: self.rule.clone(),
        }))
    }
}

/// 역할 검사를 수행하는 서비스
pub struct RequireRolesService<S> {
    service: Rc<S>,
    rule: RequiredRole,
}

impl<S, B> Service<ServiceRequest> for RequireRolesService<S>
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
        let rule = self.rule.clone();

        Box::pin(async move {
            let principal = req.extensions().get::<SessionPrincipal>().cloned();

            match rule.check(principal.as_ref()) {
                Access::Allow => {}
                Access::Deny(DenyReason::Unauthenticated) => {
                    log::warn!("미인증 접근 거부: {}", req.path());
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "unauthenticated",
                        "message": "로그인이 필요합니다"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                Access::Deny(DenyReason::Forbidden) => {
                    log::warn!(
                        "권한 부족: {:?} → {} (필요: {:?})",
                        principal.as_ref().map(|p| p.username().to_string()),
                        req.path(),
                        rule.allowed()
                    );
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "forbidden",
                        "message": "접근 권한이 부족합니다"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
