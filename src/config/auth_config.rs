//! # Authentication Configuration Module
//!
//! 인증 프로바이더, OAuth 클라이언트, 세션 관리 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명/패스워드 기반 전통적인 인증
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **Facebook OAuth 2.0**: Facebook 계정을 통한 소셜 로그인
//! 4. **Naver OAuth 2.0**: 네이버 계정을 통한 소셜 로그인
//!
//! ## 환경 변수
//!
//! ```bash
//! GOOGLE_CLIENT_ID=...          GOOGLE_CLIENT_SECRET=...
//! FACEBOOK_CLIENT_ID=...        FACEBOOK_CLIENT_SECRET=...
//! NAVER_CLIENT_ID=...           NAVER_CLIENT_SECRET=...
//! OAUTH_REDIRECT_BASE=http://localhost:8080
//! OAUTH_STATE_SECRET=...
//! SESSION_COOKIE_NAME=SESSION
//! SESSION_TTL_SECONDS=3600
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::errors::AppError;

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// 로컬 가입 계정은 `provider` 필드가 비어 있으므로 `Local` 변형은
/// 세션 표시용으로만 쓰입니다. OAuth 등록 ID 파싱은
/// [`from_registration_id`](AuthProvider::from_registration_id)를 통해서만 이루어지며,
/// 알 수 없는 ID는 프로파일이 비어 있는 채로 진행하는 대신
/// [`AppError::UnsupportedProvider`]로 로그인 시도를 중단시킵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 사용자명/패스워드 인증
    Local,
    /// Google OAuth 2.0
    Google,
    /// Facebook OAuth 2.0
    Facebook,
    /// Naver OAuth 2.0
    Naver,
}

impl AuthProvider {
    /// OAuth 등록 ID 문자열을 파싱합니다.
    ///
    /// `Local`은 OAuth 등록 ID가 아니므로 여기서 만들어지지 않습니다.
    ///
    /// # Errors
    ///
    /// 지원 목록에 없는 ID(`kakao` 등)는 `UnsupportedProvider`를 반환합니다.
    pub fn from_registration_id(id: &str) -> Result<Self, AppError> {
        match id {
            "google" => Ok(AuthProvider::Google),
            "facebook" => Ok(AuthProvider::Facebook),
            "naver" => Ok(AuthProvider::Naver),
            other => Err(AppError::UnsupportedProvider(other.to_string())),
        }
    }

    /// 등록 ID 문자열 표현 (username 접두어로도 사용됨)
    pub fn registration_id(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
            AuthProvider::Naver => "naver",
        }
    }
}

/// 프로바이더별 OAuth 클라이언트 자격증명
///
/// 값 자체는 환경 변수에서 읽어오며, 누락 시 빈 문자열과 함께 경고를 남깁니다.
/// (개발 환경에서 일부 프로바이더만 설정하고 기동하는 경우를 허용)
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthClientConfig {
    /// 프로바이더에 해당하는 클라이언트 설정을 로드합니다.
    ///
    /// 리다이렉트 URI는 `OAUTH_REDIRECT_BASE` + Spring 호환 콜백 경로
    /// (`/login/oauth2/code/{registrationId}`)로 구성됩니다.
    pub fn for_provider(provider: AuthProvider) -> Self {
        let prefix = provider.registration_id().to_uppercase();
        let base = env::var("OAUTH_REDIRECT_BASE")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self {
            client_id: Self::read_var(&format!("{}_CLIENT_ID", prefix)),
            client_secret: Self::read_var(&format!("{}_CLIENT_SECRET", prefix)),
            redirect_uri: format!("{}/login/oauth2/code/{}", base, provider.registration_id()),
        }
    }

    fn read_var(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| {
            log::warn!("{} not set, OAuth login for this provider will fail", key);
            String::new()
        })
    }
}

/// OAuth 공통 설정 (CSRF state 매개변수)
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 서명용 비밀키를 반환합니다.
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        })
    }

    /// state 매개변수의 유효 시간 (분 단위, 기본값: 10)
    pub fn state_timeout_minutes() -> u64 {
        env::var("OAUTH_STATE_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10)
    }
}

/// 세션 쿠키/저장소 설정
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 쿠키 이름 (기본값: SESSION)
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "SESSION".to_string())
    }

    /// 세션 TTL (초 단위, 기본값: 3600)
    pub fn ttl_seconds() -> u64 {
        env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_registration_ids() {
        assert_eq!(AuthProvider::from_registration_id("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_registration_id("facebook").unwrap(), AuthProvider::Facebook);
        assert_eq!(AuthProvider::from_registration_id("naver").unwrap(), AuthProvider::Naver);
    }

    #[test]
    fn test_unknown_registration_id_is_rejected() {
        let err = AuthProvider::from_registration_id("kakao").unwrap_err();
        match err {
            AppError::UnsupportedProvider(id) => assert_eq!(id, "kakao"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_local_is_not_a_registration_id() {
        // 로컬 계정은 OAuth 플로우를 타지 않는다
        assert!(AuthProvider::from_registration_id("local").is_err());
    }

    #[test]
    fn test_registration_id_roundtrip() {
        for provider in [AuthProvider::Google, AuthProvider::Facebook, AuthProvider::Naver] {
            let parsed = AuthProvider::from_registration_id(provider.registration_id()).unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_provider_serializes_lowercase() {
        let json = serde_json::to_string(&AuthProvider::Naver).unwrap();
        assert_eq!(json, "\"naver\"");
    }
}
