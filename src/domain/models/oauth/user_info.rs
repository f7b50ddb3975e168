//! 프로바이더 프로필 어댑터
//!
//! OAuth 프로바이더마다 userinfo 응답 형태가 다릅니다:
//!
//! | 프로바이더 | 형태 | 식별자 필드 |
//! |-----------|------|------------|
//! | Google | 평평한 OIDC 객체 | `sub` |
//! | Facebook | 평평한 Graph 객체 | `id` |
//! | Naver | `response` 키 아래 중첩 | `response.id` |
//!
//! [`normalize`]가 이 차이를 흡수해 하나의 [`NormalizedProfile`]을
//! 만듭니다. 알 수 없는 프로바이더 id는 조용히 무시하지 않고
//! [`AppError::UnsupportedProvider`]로 즉시 실패합니다.

use serde::Deserialize;
use serde_json::Value;

use crate::config::AuthProvider;
use crate::errors::AppError;

/// 프로바이더 간 차이가 제거된 정규화 프로필
///
/// 로그인 시도 한 번의 수명만 가지며, 절대 영속되지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    /// 프로필을 발급한 프로바이더
    pub provider: AuthProvider,
    /// 프로바이더 내부 사용자 식별자
    pub provider_id: String,
    /// 프로바이더가 제공한 이메일 (없을 수 있음)
    pub email: Option<String>,
    /// 표시 이름 (없을 수 있음)
    pub display_name: Option<String>,
}

impl NormalizedProfile {
    /// 로컬 계정 이름 규칙: `{provider}_{provider_id}`
    ///
    /// 예: `naver_abc123`, `google_1097...`. 이 값이 `users.username`
    /// 유니크 인덱스의 키가 되어 프로바이더 간 충돌을 막습니다.
    pub fn canonical_username(&self) -> String {
        format!("{}_{}", self.provider.registration_id(), self.provider_id)
    }
}

/// Google OIDC userinfo 응답 (평평한 형태)
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// OIDC subject - Google 내부 사용자 식별자
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Facebook Graph API `/me` 응답 (평평한 형태)
#[derive(Debug, Deserialize)]
pub struct FacebookUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Naver 프로필 응답의 `response` 객체 내부
///
/// Naver는 최상위에 `resultcode`/`message`를 두고 실제 프로필을
/// `response` 키 아래에 중첩합니다. 호출 측에서 중첩을 벗긴 뒤
/// 이 구조체로 역직렬화합니다.
#[derive(Debug, Deserialize)]
pub struct NaverUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// 프로바이더 원시 프로필을 [`NormalizedProfile`]로 정규화합니다.
///
/// 순수 함수입니다. 입력 JSON만으로 결과가 결정되며, 실패 시에도
/// 저장소나 네트워크에는 어떤 부작용도 남기지 않습니다.
///
/// ## 에러
///
/// - [`AppError::UnsupportedProvider`] - 등록되지 않은 프로바이더 id
///   (예: `kakao`). 이후 단계(토큰 교환, 가입)는 절대 실행되지 않습니다.
/// - [`AppError::ValidationError`] - 알려진 프로바이더지만 프로필에
///   필수 식별자가 없거나 형태가 다른 경우
pub fn normalize(registration_id: &str, attributes: &Value) -> Result<NormalizedProfile, AppError> {
    let provider = AuthProvider::from_registration_id(registration_id)?;

    let profile = match provider {
        AuthProvider::Google => {
            let info: GoogleUserInfo = parse_attributes(provider, attributes)?;
            NormalizedProfile {
                provider,
                provider_id: require_id(provider, info.sub)?,
                email: info.email,
                display_name: info.name,
            }
        }
        AuthProvider::Facebook => {
            let info: FacebookUserInfo = parse_attributes(provider, attributes)?;
            NormalizedProfile {
                provider,
                provider_id: require_id(provider, info.id)?,
                email: info.email,
                display_name: info.name,
            }
        }
        AuthProvider::Naver => {
            // Naver는 실제 프로필을 response 키 아래에 중첩한다
            let nested = attributes.get("response").ok_or_else(|| {
                AppError::ValidationError(
                    "naver 프로필에 response 객체가 없습니다".to_string(),
                )
            })?;
            let info: NaverUserInfo = parse_attributes(provider, nested)?;
            NormalizedProfile {
                provider,
                provider_id: require_id(provider, info.id)?,
                email: info.email,
                display_name: info.name,
            }
        }
        // 로컬 가입은 OAuth 프로필 경로를 타지 않는다
        AuthProvider::Local => {
            return Err(AppError::UnsupportedProvider(registration_id.to_string()));
        }
    };

    Ok(profile)
}

fn parse_attributes<T: serde::de::DeserializeOwned>(
    provider: AuthProvider,
    attributes: &Value,
) -> Result<T, AppError> {
    serde_json::from_value(attributes.clone()).map_err(|e| {
        AppError::ValidationError(format!(
            "{} 프로필 형태가 올바르지 않습니다: {}",
            provider.registration_id(),
            e
        ))
    })
}

fn require_id(provider: AuthProvider, id: String) -> Result<String, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} 프로필의 사용자 식별자가 비어 있습니다",
            provider.registration_id()
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_google_flat_profile() {
        let attrs = json!({
            "sub": "109742856182306205719",
            "email": "ssar@gmail.com",
            "name": "ssar",
            "picture": "https://example.com/p.png"
        });

        let profile = normalize("google", &attrs).unwrap();

        assert_eq!(profile.provider, AuthProvider::Google);
        assert_eq!(profile.provider_id, "109742856182306205719");
        assert_eq!(profile.email.as_deref(), Some("ssar@gmail.com"));
        assert_eq!(profile.display_name.as_deref(), Some("ssar"));
        assert_eq!(profile.canonical_username(), "google_109742856182306205719");
    }

    #[test]
    fn test_normalize_facebook_flat_profile() {
        let attrs = json!({ "id": "fb-777", "email": "f@b.com", "name": "cos" });

        let profile = normalize("facebook", &attrs).unwrap();

        assert_eq!(profile.provider, AuthProvider::Facebook);
        assert_eq!(profile.provider_id, "fb-777");
        assert_eq!(profile.canonical_username(), "facebook_fb-777");
    }

    #[test]
    fn test_normalize_naver_unwraps_nested_response() {
        let attrs = json!({
            "resultcode": "00",
            "message": "success",
            "response": { "id": "abc123", "email": "a@b.com", "name": "love" }
        });

        let profile = normalize("naver", &attrs).unwrap();

        assert_eq!(profile.provider, AuthProvider::Naver);
        assert_eq!(profile.provider_id, "abc123");
        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
        assert_eq!(profile.canonical_username(), "naver_abc123");
    }

    #[test]
    fn test_normalize_naver_without_response_is_rejected() {
        let attrs = json!({ "id": "abc123" });

        let err = normalize("naver", &attrs).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_normalize_unknown_provider_is_rejected() {
        let attrs = json!({ "id": "k-1" });

        let err = normalize("kakao", &attrs).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedProvider(ref id) if id == "kakao"));
    }

    #[test]
    fn test_normalize_missing_identifier_is_rejected() {
        let attrs = json!({ "email": "no-sub@gmail.com" });

        let err = normalize("google", &attrs).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_normalize_empty_identifier_is_rejected() {
        let attrs = json!({ "sub": "   " });

        let err = normalize("google", &attrs).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
