//! 페이지 엔드포인트 핸들러
//!
//! 원형 서비스의 화면 엔드포인트에 대응하는 JSON 응답 핸들러들입니다.
//! HTML 템플릿 렌더링은 이 게이트웨이의 범위가 아니므로 모든 본문은
//! JSON입니다. 접근 제어는 핸들러가 아니라 미들웨어 계층이 담당합니다:
//!
//! - `/user`, `/manager`, `/admin` - 전역 경로 정책
//! - `/info`, `/data` - 라우트에 래핑된 [`RequireRoles`] 규칙
//!
//! [`RequireRoles`]: crate::middlewares::RequireRoles

use actix_web::{HttpResponse, get};
use serde_json::json;

use crate::domain::dto::UserResponse;
use crate::domain::models::auth::{OptionalPrincipal, SessionPrincipal};

/// 홈 (공개)
#[get("/")]
pub async fn index(principal: OptionalPrincipal) -> HttpResponse {
    match principal.0 {
        Some(p) => HttpResponse::Ok().json(json!({
            "page": "index",
            "username": p.username()
        })),
        None => HttpResponse::Ok().json(json!({ "page": "index" })),
    }
}

/// 로그인 안내 (공개)
#[get("/loginForm")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "loginForm",
        "local": { "method": "POST", "path": "/login" },
        "social": [
            "/oauth2/authorization/google",
            "/oauth2/authorization/facebook",
            "/oauth2/authorization/naver"
        ]
    }))
}

/// 가입 안내 (공개)
#[get("/joinForm")]
pub async fn join_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "joinForm",
        "join": { "method": "POST", "path": "/join" }
    }))
}

/// 인증된 사용자 페이지 (경로 정책: 인증 필요)
///
/// 로컬/소셜 로그인 구분 없이 같은 프린시펄 뷰를 보여줍니다.
#[get("/user")]
pub async fn user_page(principal: SessionPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "user",
        "user": UserResponse::from(principal.user.clone()),
        "oauth_attributes": principal.oauth_attributes
    }))
}

/// 매니저 페이지 (경로 정책: MANAGER 또는 ADMIN)
#[get("/manager")]
pub async fn manager_page(principal: SessionPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "manager",
        "username": principal.username(),
        "role": principal.role()
    }))
}

/// 관리자 페이지 (경로 정책: ADMIN)
#[get("/admin")]
pub async fn admin_page(principal: SessionPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "admin",
        "username": principal.username(),
        "role": principal.role()
    }))
}

/// 개인 정보 (메서드 규칙: ADMIN)
///
/// 매크로 없이 정의되어 라우트 등록 시 [`RequireRoles`] 래핑과 함께
/// 연결됩니다.
///
/// [`RequireRoles`]: crate::middlewares::RequireRoles
pub async fn info(principal: SessionPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "info",
        "message": "개인 정보",
        "username": principal.username()
    }))
}

/// 데이터 정보 (메서드 규칙: MANAGER 또는 ADMIN)
pub async fn data(principal: SessionPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "data",
        "message": "데이터 정보",
        "username": principal.username()
    }))
}
