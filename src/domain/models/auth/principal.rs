//! 세션 프린시펄
//!
//! 로컬 로그인과 OAuth 로그인 모두 같은 [`SessionPrincipal`]을 만듭니다.
//! 인가 계층은 이 타입 하나만 알면 되며, 어느 경로로 로그인했는지
//! 구분할 필요가 없습니다. Redis 세션에 JSON으로 직렬화되어
//! 세션 수명 동안 유지됩니다.

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::users::{User, UserRole};

/// 인증된 사용자를 나타내는 세션 프린시펄
///
/// 로컬 `User` 전체를 감싸고, OAuth 로그인인 경우 프로바이더가 내려준
/// 원시 속성 JSON을 함께 보관합니다. 원시 속성은 표시 용도로만
/// 쓰이며 인가 판단에는 절대 참여하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPrincipal {
    /// 감싸진 로컬 사용자 레코드
    pub user: User,
    /// OAuth 프로바이더의 원시 프로필 속성 (로컬 로그인은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_attributes: Option<Value>,
}

impl SessionPrincipal {
    /// 로컬 아이디/비밀번호 로그인용 프린시펄
    pub fn from_local(user: User) -> Self {
        Self {
            user,
            oauth_attributes: None,
        }
    }

    /// OAuth 로그인용 프린시펄
    ///
    /// `raw_attributes`는 프로바이더 userinfo 응답 원본입니다.
    pub fn from_oauth(user: User, raw_attributes: Value) -> Self {
        Self {
            user,
            oauth_attributes: Some(raw_attributes),
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// 사용자의 단일 역할
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// 역할 문자열 목록 (표시/로깅용)
    pub fn roles(&self) -> Vec<&'static str> {
        vec![self.user.role.as_str()]
    }

    /// 허용 역할 집합과의 ANY 매칭
    ///
    /// 사용자의 역할이 `allowed` 중 하나와 일치하면 true입니다.
    pub fn has_any_role(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self.user.role)
    }
}

/// 동일성은 감싸진 사용자의 저장소 ID로 판단합니다.
///
/// 저장 전(id가 None인) 사용자는 username으로 비교합니다.
impl PartialEq for SessionPrincipal {
    fn eq(&self, other: &Self) -> bool {
        match (&self.user.id, &other.user.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.user.username == other.user.username,
        }
    }
}

impl Eq for SessionPrincipal {}

/// ActixWeb FromRequest trait 구현
///
/// 세션 미들웨어가 request extensions에 넣어둔 프린시펄을 꺼냅니다.
/// 미들웨어를 거치지 않았거나 세션이 없으면 401입니다.
impl FromRequest for SessionPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<SessionPrincipal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 선택적 프린시펄 추출자
///
/// 공개 페이지에서 로그인 여부에 따라 표시를 달리할 때 사용합니다.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<SessionPrincipal>);

impl FromRequest for OptionalPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req.extensions().get::<SessionPrincipal>().cloned();
        ready(Ok(OptionalPrincipal(principal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    fn saved_user(username: &str, role: UserRole) -> User {
        let mut user = User::new_local(username.to_string(), "$2b$04$hash".to_string(), None);
        user.id = Some(ObjectId::new());
        user.role = role;
        user
    }

    #[test]
    fn test_local_and_oauth_principals_share_one_shape() {
        let local = SessionPrincipal::from_local(saved_user("ssar", UserRole::User));
        let oauth = SessionPrincipal::from_oauth(
            saved_user("naver_abc123", UserRole::User),
            json!({ "response": { "id": "abc123" } }),
        );

        assert!(local.oauth_attributes.is_none());
        assert!(oauth.oauth_attributes.is_some());
        assert_eq!(local.role(), oauth.role());
    }

    #[test]
    fn test_equality_follows_user_id_not_attributes() {
        let user = saved_user("naver_abc123", UserRole::User);
        let a = SessionPrincipal::from_oauth(user.clone(), json!({ "x": 1 }));
        let b = SessionPrincipal::from_local(user);

        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_users_are_not_equal() {
        let a = SessionPrincipal::from_local(saved_user("ssar", UserRole::User));
        let b = SessionPrincipal::from_local(saved_user("cos", UserRole::User));

        assert_ne!(a, b);
    }

    #[test]
    fn test_has_any_role_matches_any_of_the_set() {
        let manager = SessionPrincipal::from_local(saved_user("cos", UserRole::Manager));

        assert!(manager.has_any_role(&[UserRole::Manager, UserRole::Admin]));
        assert!(!manager.has_any_role(&[UserRole::Admin]));
        assert!(!manager.has_any_role(&[]));
    }

    #[test]
    fn test_principal_survives_session_round_trip() {
        let original = SessionPrincipal::from_oauth(
            saved_user("google_123", UserRole::User),
            json!({ "sub": "123", "email": "s@g.com" }),
        );

        let json = serde_json::to_string(&original).unwrap();
        let restored: SessionPrincipal = serde_json::from_str(&json).unwrap();

        assert_eq!(original, restored);
        assert_eq!(restored.oauth_attributes, original.oauth_attributes);
    }
}
