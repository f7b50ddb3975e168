//! SessionMiddleware 인증/인가 로직의 핵심 기능

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::config::SessionConfig;
use crate::domain::models::auth::{Access, AuthorizationPolicy, DenyReason, SessionPrincipal};
use crate::errors::AppError;
use crate::services::auth::SessionService;

/// 실제 세션 복원과 경로 정책 평가를 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
    pub session_service: Arc<SessionService>,
    pub policy: &'static AuthorizationPolicy,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
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
        let session_service = self.session_service.clone();
        let policy = self.policy;

        Box::pin(async move {
            // 1. 세션 쿠키가 있으면 프린시펄 복원
            let principal = match restore_principal(&req, &session_service).await {
                Ok(principal) => principal,
                // 세션 저장소 장애는 익명 허용으로 강등하지 않는다
                Err(err) => {
                    log::error!("세션 복원 실패: {}", err);
                    let response = HttpResponse::ServiceUnavailable().json(serde_json::json!({
                        "error": "store_unavailable",
                        "message": "요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            // 2. 정책 평가용 경로 정규화
            //    라우터는 핸들러 매칭 전에 퍼센트 인코딩을 해제하므로,
            //    정책도 반드시 해제된 경로를 봐야 한다 (/%61dmin == /admin)
            let path = match policy_path(req.path()) {
                Ok(path) => path,
                Err(err) => {
                    log::warn!("경로 정규화 실패: {} ({})", req.path(), err);
                    let response = HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "validation_error",
                        "message": "요청 경로가 올바르지 않습니다"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            // 3. 경로 접두사 정책 평가 (첫 매칭 규칙이 승리)
            match policy.authorize(&path, principal.as_ref()) {
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
                    if let Some(ref p) = principal {
                        log::warn!(
                            "권한 부족: {} ({}) → {}",
                            p.username(),
                            p.role(),
                            req.path()
                        );
                    }
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "forbidden",
                        "message": "접근 권한이 부족합니다"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 4. 프린시펄을 extensions에 저장 (추출자/스코프 미들웨어용)
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 세션 쿠키에서 프린시펄 복원
///
/// 쿠키 없음과 세션 만료는 모두 `Ok(None)`(익명)입니다.
/// Redis 장애만 에러로 구분됩니다.
async fn restore_principal(
    req: &ServiceRequest,
    session_service: &SessionService,
) -> Result<Option<SessionPrincipal>, AppError> {
    let Some(cookie) = req.cookie(&SessionConfig::cookie_name()) else {
        return Ok(None);
    };

    session_service.load(cookie.value()).await
}

/// 정책 평가용 경로 정규화
///
/// 원시 URI 경로는 퍼센트 인코딩된 상태지만, 라우터는 인코딩을 해제한
/// 경로로 핸들러를 매칭합니다. 정책이 원시 경로를 보면 `/%61dmin`이
/// 규칙 없는 경로로 통과한 뒤 `/admin` 핸들러에 도달하므로, 평가 전에
/// 같은 해제를 적용합니다. 인코딩된 구분자(`%2F`)와 잘못된 인코딩은
/// 평가 없이 거부합니다.
fn policy_path(raw: &str) -> Result<String, AppError> {
    if raw.to_ascii_lowercase().contains("%2f") {
        return Err(AppError::ValidationError(
            "경로에 인코딩된 구분자가 있습니다".to_string(),
        ));
    }

    let decoded = urlencoding::decode(raw)
        .map_err(|_| AppError::ValidationError("경로 인코딩이 올바르지 않습니다".to_string()))?;

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{User, UserRole};
    use mongodb::bson::oid::ObjectId;

    fn principal(role: UserRole) -> SessionPrincipal {
        let mut user = User::new_local("tester".to_string(), "$2b$04$hash".to_string(), None);
        user.id = Some(ObjectId::new());
        user.role = role;
        SessionPrincipal::from_local(user)
    }

    #[test]
    fn test_policy_path_decodes_percent_encoding() {
        assert_eq!(policy_path("/%61dmin").unwrap(), "/admin");
        assert_eq!(policy_path("/admin").unwrap(), "/admin");
        assert_eq!(policy_path("/user/%ED%94%84%EB%A1%9C%ED%95%84").unwrap(), "/user/프로필");
    }

    #[test]
    fn test_policy_path_rejects_encoded_separator() {
        assert!(matches!(
            policy_path("/admin%2F../user"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            policy_path("/admin%2fsettings"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_policy_path_rejects_invalid_encoding() {
        assert!(matches!(
            policy_path("/%ff"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_encoded_admin_path_is_still_role_gated() {
        // 라우터가 /admin으로 해제하는 경로는 정책도 /admin으로 본다
        let path = policy_path("/%61dmin").unwrap();
        let policy = AuthorizationPolicy::standard();

        assert_eq!(
            policy.authorize(&path, Some(&principal(UserRole::User))),
            Access::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            policy.authorize(&path, None),
            Access::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            policy.authorize(&path, Some(&principal(UserRole::Admin))),
            Access::Allow
        );
    }
}
