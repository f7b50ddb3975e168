//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 가입 사용자와 OAuth 자동 가입 사용자를 하나의 모델로 표현합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 역할
///
/// 저장 형식은 `ROLE_` 접두사를 포함한 문자열입니다.
/// 역할 간 상속은 없으며, 권한 규칙은 허용 역할 집합을 명시적으로 나열합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    /// 저장/표시용 역할 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Manager => "ROLE_MANAGER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증(아이디/비밀번호)과 OAuth 자동 가입을 모두 지원합니다.
///
/// OAuth 사용자의 `username`은 항상 `{provider}_{provider_id}` 형태이며,
/// `users.username`의 유니크 인덱스가 동시 가입 경쟁의 유일한 방어선입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 해시된 비밀번호 (OAuth 사용자는 무작위 플레이스홀더의 해시)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// 사용자 이메일 (프로바이더가 제공하지 않으면 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 사용자 역할
    pub role: UserRole,
    /// 인증 프로바이더 (로컬 가입 사용자는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthProvider>,
    /// 프로바이더 내부 사용자 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (아이디/비밀번호 가입)
    ///
    /// 기본 역할 `ROLE_USER`로 시작합니다. 비밀번호는 호출자가
    /// 이미 bcrypt 해시를 적용한 값이어야 합니다.
    pub fn new_local(username: String, password_hash: String, email: Option<String>) -> Self {
        Self {
            id: None,
            username,
            password: Some(password_hash),
            email,
            role: UserRole::User,
            provider: None,
            provider_id: None,
            created_at: DateTime::now(),
        }
    }

    /// 새 OAuth 자동 가입 사용자 생성
    ///
    /// 첫 소셜 로그인 시 호출됩니다. `username`은
    /// `{provider}_{provider_id}` 규칙으로 호출자가 만들어 전달하며,
    /// 비밀번호 필드는 로컬 로그인 경로로는 맞출 수 없는
    /// 플레이스홀더 해시로 채워집니다.
    pub fn new_oauth(
        username: String,
        placeholder_hash: String,
        email: Option<String>,
        provider: AuthProvider,
        provider_id: String,
    ) -> Self {
        Self {
            id: None,
            username,
            password: Some(placeholder_hash),
            email,
            role: UserRole::User,
            provider: Some(provider),
            provider_id: Some(provider_id),
            created_at: DateTime::now(),
        }
    }

    /// OAuth 자동 가입 사용자인지 확인
    pub fn is_oauth_user(&self) -> bool {
        self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_defaults_to_user_role() {
        let user = User::new_local("ssar".to_string(), "$2b$04$hash".to_string(), None);

        assert_eq!(user.role, UserRole::User);
        assert!(user.provider.is_none());
        assert!(user.provider_id.is_none());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_new_oauth_records_provider_identity() {
        let user = User::new_oauth(
            "naver_abc123".to_string(),
            "$2b$04$hash".to_string(),
            Some("a@b.com".to_string()),
            AuthProvider::Naver,
            "abc123".to_string(),
        );

        assert_eq!(user.username, "naver_abc123");
        assert_eq!(user.provider, Some(AuthProvider::Naver));
        assert_eq!(user.provider_id.as_deref(), Some("abc123"));
        assert_eq!(user.role, UserRole::User);
        assert!(user.password.is_some());
        assert!(user.is_oauth_user());
    }

    #[test]
    fn test_role_serializes_with_prefix() {
        let json = serde_json::to_string(&UserRole::Manager).unwrap();
        assert_eq!(json, "\"ROLE_MANAGER\"");

        let role: UserRole = serde_json::from_str("\"ROLE_ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
