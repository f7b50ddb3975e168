//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 인증과 OAuth 2.0 소셜 로그인을 모두 지원하며, 세션 쿠키 기반의
//! 인가를 사용합니다. 응답 본문에 토큰은 없습니다.
//!
//! # Endpoints
//!
//! - **가입**: `POST /join`
//! - **로컬 로그인**: `POST /login` / **로그아웃**: `POST /logout`
//! - **소셜 로그인 시작**: `GET /oauth2/authorization/{provider}`
//! - **소셜 로그인 콜백**: `GET /login/oauth2/code/{provider}`

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;

use crate::config::SessionConfig;
use crate::core::AppContext;
use crate::domain::dto::{JoinRequest, LocalLoginRequest, LoginResponse, OAuthCallbackQuery, UserResponse};
use crate::domain::models::auth::SessionPrincipal;
use crate::errors::AppError;
use crate::services::auth::SessionService;
use crate::utils::string_utils::clean_optional_string;
use validator::Validate;

/// 로컬 회원 가입 핸들러
///
/// # Endpoint
/// `POST /join`
#[post("/join")]
pub async fn join(
    ctx: web::Data<AppContext>,
    payload: web::Json<JoinRequest>,
) -> Result<HttpResponse, AppError> {
    let user = ctx.user_service.join(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "가입이 완료되었습니다",
        "user": UserResponse::from(user)
    })))
}

/// 로컬 로그인 핸들러
///
/// 아이디/비밀번호 검증 후 세션을 발급하고 HttpOnly 쿠키로 전달합니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = ctx
        .user_service
        .verify_password(&payload.username, &payload.password)
        .await?;

    let principal = SessionPrincipal::from_local(user);
    let session_id = ctx.session_service.create(&principal).await?;

    Ok(HttpResponse::Ok()
        .cookie(SessionService::session_cookie(session_id))
        .json(LoginResponse::new(principal.user, "로그인 성공")))
}

/// 로그아웃 핸들러
///
/// 세션을 파기하고 쿠키를 즉시 만료시킵니다. 세션이 이미 없어도
/// 성공으로 응답합니다.
///
/// # Endpoint
/// `POST /logout`
#[post("/logout")]
pub async fn logout(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Some(cookie) = req.cookie(&SessionConfig::cookie_name()) {
        ctx.session_service.destroy(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(SessionService::removal_cookie())
        .json(json!({ "message": "로그아웃되었습니다" })))
}

/// 소셜 로그인 시작 핸들러
///
/// 프로바이더 인증 페이지로 보낼 로그인 URL과 CSRF state를 생성합니다.
/// 알 수 없는 프로바이더는 400으로 즉시 거부됩니다.
///
/// # Endpoint
/// `GET /oauth2/authorization/{provider}`
#[get("/oauth2/authorization/{provider}")]
pub async fn oauth_login_url(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let registration_id = path.into_inner();
    let response = ctx.oauth_service.login_url(&registration_id)?;

    Ok(HttpResponse::Ok().json(response))
}

/// 소셜 로그인 콜백 핸들러
///
/// state 검증 → 토큰 교환 → 프로필 정규화 → 계정 조정을 거쳐
/// 로컬 로그인과 동일한 세션 쿠키를 발급합니다.
///
/// # Endpoint
/// `GET /login/oauth2/code/{provider}`
#[get("/login/oauth2/code/{provider}")]
pub async fn oauth_callback(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let registration_id = path.into_inner();
    let query = query.into_inner();

    // 사용자가 프로바이더에서 동의를 거부한 경우
    if let Some(error) = clean_optional_string(query.error) {
        let detail = query.error_description.unwrap_or_else(|| error.clone());
        log::warn!("소셜 로그인 거부 ({}): {}", registration_id, detail);
        return Err(AppError::Unauthenticated(format!(
            "소셜 로그인이 취소되었습니다: {}",
            error
        )));
    }

    let code = query
        .code
        .ok_or_else(|| AppError::ValidationError("code 파라미터가 없습니다".to_string()))?;
    let state = query
        .state
        .ok_or_else(|| AppError::ValidationError("state 파라미터가 없습니다".to_string()))?;

    let principal = ctx
        .oauth_service
        .authenticate(&registration_id, &code, &state)
        .await?;

    let session_id = ctx.session_service.create(&principal).await?;
    let user = principal.user.clone();

    Ok(HttpResponse::Ok()
        .cookie(SessionService::session_cookie(session_id))
        .json(LoginResponse::new(user, "소셜 로그인 성공")))
}
