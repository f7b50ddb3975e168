//! # OAuth 2.0 소셜 로그인 서비스
//!
//! Google, Facebook, Naver 세 프로바이더의 Authorization Code Flow를
//! 하나의 서비스로 처리합니다. RFC 6749를 준수합니다.
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. GET /oauth2/authorization/{provider}  → state 생성, 로그인 URL 응답
//! 2. 사용자가 프로바이더에서 인증
//! 3. GET /login/oauth2/code/{provider}?code=..&state=..
//!    → state 검증 → 토큰 교환 → 프로필 조회 → 정규화 → 계정 조정
//!    → SessionPrincipal
//! ```
//!
//! ## State (CSRF 방지)
//!
//! `{timestamp}.{sha256(timestamp:secret)}` 형태입니다. 콜백에서
//! 다이제스트를 재계산해 비교하고, 발급 후 일정 시간이 지난 state는
//! 거부합니다. 검증 실패는 토큰 교환 전에 플로우를 중단시킵니다.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::{AuthProvider, OAuthClientConfig, OAuthConfig};
use crate::domain::dto::OAuthLoginUrlResponse;
use crate::domain::models::auth::SessionPrincipal;
use crate::domain::models::oauth::{OAuthTokenResponse, normalize};
use crate::errors::AppError;
use crate::services::auth::reconciler::IdentityReconciler;

/// 프로바이더별 고정 엔드포인트
struct ProviderEndpoints {
    auth_uri: &'static str,
    token_uri: &'static str,
    userinfo_uri: &'static str,
    scope: &'static str,
}

impl ProviderEndpoints {
    fn for_provider(provider: AuthProvider) -> Result<Self, AppError> {
        match provider {
            AuthProvider::Google => Ok(Self {
                auth_uri: "https://accounts.google.com/o/oauth2/v2/auth",
                token_uri: "https://oauth2.googleapis.com/token",
                userinfo_uri: "https://openidconnect.googleapis.com/v1/userinfo",
                scope: "openid email profile",
            }),
            AuthProvider::Facebook => Ok(Self {
                auth_uri: "https://www.facebook.com/v12.0/dialog/oauth",
                token_uri: "https://graph.facebook.com/v12.0/oauth/access_token",
                userinfo_uri: "https://graph.facebook.com/me?fields=id,name,email",
                scope: "email public_profile",
            }),
            AuthProvider::Naver => Ok(Self {
                auth_uri: "https://nid.naver.com/oauth2.0/authorize",
                token_uri: "https://nid.naver.com/oauth2.0/token",
                userinfo_uri: "https://openapi.naver.com/v1/nid/me",
                scope: "name email",
            }),
            AuthProvider::Local => Err(AppError::UnsupportedProvider("local".to_string())),
        }
    }
}

/// 소셜 로그인 서비스
pub struct OAuthLoginService {
    http: reqwest::Client,
    reconciler: Arc<IdentityReconciler>,
}

impl OAuthLoginService {
    pub fn new(reconciler: Arc<IdentityReconciler>) -> Self {
        Self {
            http: reqwest::Client::new(),
            reconciler,
        }
    }

    /// 소셜 로그인 URL 생성
    ///
    /// 사용자를 프로바이더 인증 페이지로 리다이렉트하기 위한
    /// Authorization URL을 생성합니다. 알 수 없는 프로바이더 id는
    /// 네트워크 접근 없이 즉시 거부됩니다.
    pub fn login_url(&self, registration_id: &str) -> Result<OAuthLoginUrlResponse, AppError> {
        let provider = AuthProvider::from_registration_id(registration_id)?;
        let endpoints = ProviderEndpoints::for_provider(provider)?;
        let config = OAuthClientConfig::for_provider(provider);
        let state = generate_state()?;

        let params = [
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", endpoints.scope),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(OAuthLoginUrlResponse {
            provider: registration_id.to_string(),
            login_url: format!("{}?{}", endpoints.auth_uri, query_string),
        })
    }

    /// 콜백 처리: code를 인증된 프린시펄로 바꿉니다.
    ///
    /// 단계 순서가 곧 중단 지점입니다:
    ///
    /// 1. state 검증 (실패 시 토큰 교환 없음)
    /// 2. 프로바이더 id 확인 (알 수 없으면 저장소/네트워크 접근 없음)
    /// 3. code → access token 교환
    /// 4. userinfo 조회 (원시 JSON 보존)
    /// 5. 프로필 정규화
    /// 6. 계정 조정 (find-or-create)
    pub async fn authenticate(
        &self,
        registration_id: &str,
        code: &str,
        state: &str,
    ) -> Result<SessionPrincipal, AppError> {
        verify_state(state)?;

        let provider = AuthProvider::from_registration_id(registration_id)?;
        let endpoints = ProviderEndpoints::for_provider(provider)?;
        let config = OAuthClientConfig::for_provider(provider);

        let token = self.exchange_code(&endpoints, &config, code).await?;
        let raw_attributes = self
            .fetch_user_info(&endpoints, &token.access_token)
            .await?;

        let profile = normalize(registration_id, &raw_attributes)?;
        let user = self.reconciler.reconcile(&profile).await?;

        log::info!("소셜 로그인 성공: {}", user.username);
        Ok(SessionPrincipal::from_oauth(user, raw_attributes))
    }

    /// Authorization Code를 Access Token으로 교환
    async fn exchange_code(
        &self,
        endpoints: &ProviderEndpoints,
        config: &OAuthClientConfig,
        code: &str,
    ) -> Result<OAuthTokenResponse, AppError> {
        let params = [
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(endpoints.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("토큰 교환 거부 ({}): {}", status, error_text);
            return Err(AppError::ExternalServiceError(format!(
                "토큰 교환 실패 ({})",
                status
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("토큰 응답 파싱 실패: {}", e)))
    }

    /// Access Token으로 프로바이더 userinfo 조회
    ///
    /// 형태가 프로바이더마다 다르므로 원시 `serde_json::Value`로 받고,
    /// 해석은 전부 [`normalize`]에 맡깁니다.
    async fn fetch_user_info(
        &self,
        endpoints: &ProviderEndpoints,
        access_token: &str,
    ) -> Result<Value, AppError> {
        let response = self
            .http
            .get(endpoints.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("사용자 정보 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalServiceError(format!(
                "사용자 정보 조회 실패 ({})",
                status
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("사용자 정보 파싱 실패: {}", e)))
    }
}

/// OAuth state 생성: `{timestamp}.{sha256(timestamp:secret)}`
fn generate_state() -> Result<String, AppError> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
        .as_secs();

    Ok(format!("{}.{}", timestamp, state_digest(timestamp)))
}

/// 콜백에서 받은 state 검증
///
/// 다이제스트 불일치(변조)와 발급 시한 초과(재생)를 모두 거부합니다.
fn verify_state(state: &str) -> Result<(), AppError> {
    let (timestamp_part, digest_part) = state
        .split_once('.')
        .ok_or_else(|| AppError::Unauthenticated("유효하지 않은 OAuth state".to_string()))?;

    let timestamp: u64 = timestamp_part
        .parse()
        .map_err(|_| AppError::Unauthenticated("유효하지 않은 OAuth state".to_string()))?;

    if !digest_matches(&state_digest(timestamp), digest_part) {
        return Err(AppError::Unauthenticated(
            "OAuth state 검증에 실패했습니다".to_string(),
        ));
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
        .as_secs();

    let max_age = OAuthConfig::state_timeout_minutes() * 60;
    if now < timestamp || now - timestamp > max_age {
        return Err(AppError::Unauthenticated(
            "만료된 OAuth state입니다".to_string(),
        ));
    }

    Ok(())
}

fn state_digest(timestamp: u64) -> String {
    let data = format!("{}:{}", timestamp, OAuthConfig::state_secret());
    let hash = Sha256::digest(data.as_bytes());
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 다이제스트 비교: 길이 검사 외에는 조기 종료하지 않는다
fn digest_matches(expected: &str, provided: &str) -> bool {
    if expected.len() != provided.len() {
        return false;
    }

    expected
        .bytes()
        .zip(provided.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
