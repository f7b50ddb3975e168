//! 응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::{User, UserRole};

/// 사용자 응답 DTO
///
/// 비밀번호 해시를 절대 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    /// 인증 프로바이더 (로컬 가입 사용자는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthProvider>,
    pub created_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            role,
            provider,
            created_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            role,
            provider,
            created_at,
        }
    }
}

/// 로그인 성공 응답 (로컬/OAuth 공통)
///
/// 세션은 HttpOnly 쿠키로 전달되므로 본문에는 토큰이 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub message: String,
}

impl LoginResponse {
    pub fn new(user: User, message: impl Into<String>) -> Self {
        Self {
            user: UserResponse::from(user),
            message: message.into(),
        }
    }
}

/// 소셜 로그인 시작 응답
///
/// 클라이언트는 `login_url`로 리다이렉트합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthLoginUrlResponse {
    pub provider: String,
    pub login_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_never_carries_password() {
        let user = User::new_local(
            "ssar".to_string(),
            "$2b$04$secret-hash".to_string(),
            Some("s@e.com".to_string()),
        );

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"ROLE_USER\""));
    }
}
