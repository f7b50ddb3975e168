//! # 세션 서비스
//!
//! Redis 기반 서버 사이드 세션을 관리합니다. 로그인 성공 시 무작위
//! 세션 ID를 발급해 프린시펄을 `session:{id}` 키에 TTL과 함께 저장하고,
//! HttpOnly 쿠키로 ID만 클라이언트에 전달합니다. 본문에 토큰은 없습니다.
//!
//! Redis 장애는 절대 익명 허용으로 강등되지 않습니다. 연결 실패는
//! `StoreUnavailable`(503)로 표면화됩니다.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use uuid::Uuid;

use crate::caching::redis::RedisClient;
use crate::config::SessionConfig;
use crate::domain::models::auth::SessionPrincipal;
use crate::errors::AppError;

/// Redis 세션 관리 서비스
pub struct SessionService {
    redis: Arc<RedisClient>,
}

impl SessionService {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn session_key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }

    /// 새 세션을 발급하고 세션 ID를 반환합니다.
    pub async fn create(&self, principal: &SessionPrincipal) -> Result<String, AppError> {
        let session_id = Uuid::new_v4().to_string();
        let ttl = SessionConfig::ttl_seconds() as usize;

        self.redis
            .set_with_expiry(&Self::session_key(&session_id), principal, ttl)
            .await
            .map_err(map_session_error)?;

        log::info!("세션 발급: {}", principal.username());
        Ok(session_id)
    }

    /// 세션 ID로 프린시펄을 복원합니다.
    ///
    /// 세션이 없거나 만료되었으면 `Ok(None)`입니다. Redis 장애는
    /// 에러로 그대로 표면화됩니다.
    pub async fn load(&self, session_id: &str) -> Result<Option<SessionPrincipal>, AppError> {
        self.redis
            .get::<SessionPrincipal>(&Self::session_key(session_id))
            .await
            .map_err(map_session_error)
    }

    /// 세션을 파기합니다 (로그아웃).
    pub async fn destroy(&self, session_id: &str) -> Result<(), AppError> {
        self.redis
            .del(&Self::session_key(session_id))
            .await
            .map_err(map_session_error)
    }

    /// 로그인 응답에 싣는 세션 쿠키
    ///
    /// HttpOnly라서 스크립트에서 읽을 수 없습니다.
    pub fn session_cookie(session_id: String) -> Cookie<'static> {
        Cookie::build(SessionConfig::cookie_name(), session_id)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(SessionConfig::ttl_seconds() as i64))
            .finish()
    }

    /// 로그아웃 응답에 싣는 즉시 만료 쿠키
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SessionConfig::cookie_name(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(0))
            .finish()
    }
}

/// Redis 에러 분류: 연결 계열은 503, 나머지는 500
fn map_session_error(e: redis::RedisError) -> AppError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
        AppError::StoreUnavailable(format!("세션 저장소 접근 실패: {}", e))
    } else {
        AppError::RedisError(e.to_string())
    }
}
