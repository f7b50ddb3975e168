//! # 라우트 등록 모듈
//!
//! 게이트웨이의 전체 HTTP 표면을 한곳에서 등록합니다.
//!
//! ## 엔드포인트 지도
//!
//! | 경로 | 메서드 | 보호 |
//! |------|--------|------|
//! | `/` `/loginForm` `/joinForm` | GET | 공개 |
//! | `/join` `/login` `/logout` | POST | 공개 |
//! | `/oauth2/authorization/{provider}` | GET | 공개 |
//! | `/login/oauth2/code/{provider}` | GET | 공개 (state 검증) |
//! | `/user` | GET | 경로 정책: 인증 |
//! | `/manager` | GET | 경로 정책: MANAGER\|ADMIN |
//! | `/admin` | GET | 경로 정책: ADMIN |
//! | `/info` | GET | 메서드 규칙: ADMIN |
//! | `/data` | GET | 메서드 규칙: MANAGER\|ADMIN |
//! | `/health` | GET | 공개 |
//!
//! 경로 정책은 전역 세션 미들웨어가, 메서드 규칙은 개별 라우트에
//! 래핑된 [`RequireRoles`]가 평가합니다.

use actix_web::web;
use serde_json::json;

use crate::domain::entities::users::UserRole;
use crate::handlers::{auth, pages};
use crate::middlewares::RequireRoles;

/// 모든 라우트를 등록합니다.
///
/// ```rust,ignore
/// use actix_web::{App, web};
///
/// App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    // 페이지
    cfg.service(pages::index)
        .service(pages::login_form)
        .service(pages::join_form)
        .service(pages::user_page)
        .service(pages::manager_page)
        .service(pages::admin_page);

    // 인증
    cfg.service(auth::join)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::oauth_login_url)
        .service(auth::oauth_callback);

    // 메서드 수준 역할 규칙이 붙는 라우트
    cfg.service(
        web::resource("/info")
            .wrap(RequireRoles::any_of(&[UserRole::Admin]))
            .route(web::get().to(pages::info)),
    );
    cfg.service(
        web::resource("/data")
            .wrap(RequireRoles::any_of(&[UserRole::Manager, UserRole::Admin]))
            .route(web::get().to(pages::data)),
    );
}

/// 헬스 체크 엔드포인트
///
/// 로드 밸런서/모니터링용. 인증이 필요 없습니다.
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "auth_gateway_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
