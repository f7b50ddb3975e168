//! 프로바이더 토큰 교환 응답 모델

use serde::Deserialize;

/// OAuth2 authorization code 교환 응답
///
/// 세 프로바이더 모두 RFC 6749 형태를 따르므로 하나의 모델로 받습니다.
/// `access_token` 외의 필드는 프로바이더에 따라 없을 수 있습니다.
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    /// OIDC 프로바이더(Google)만 내려주는 ID 토큰
    pub id_token: Option<String>,
}
