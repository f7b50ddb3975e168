//! 경로/메서드 인가 정책
//!
//! 인가 규칙은 두 계층으로 나뉩니다:
//!
//! 1. **경로 규칙** ([`AuthorizationPolicy`]) - 경로 접두사별 요구 사항.
//!    구체적인 접두사가 먼저 오는 순서 있는 목록이며, 첫 매칭 규칙이
//!    승리합니다. 어느 규칙에도 걸리지 않으면 허용입니다.
//! 2. **메서드 규칙** ([`RequiredRole`]) - 특정 핸들러에 붙는 허용 역할
//!    집합. 경로 규칙과 독립적으로 평가되며, ANY(교집합 비어있지 않음)
//!    의미론을 따릅니다.
//!
//! 정책은 기동 시 한 번 만들어지는 읽기 전용 테이블이며, HTTP 서버
//! 없이도 `authorize` 호출만으로 검증할 수 있습니다. 거부는 최종적이고
//! 어떤 경로에서도 익명 허용으로 강등되지 않습니다.

use once_cell::sync::Lazy;

use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::principal::SessionPrincipal;

/// 인가 거부 사유
///
/// HTTP 계층에서 401/403으로 구분되어 내려갑니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// 프린시펄 없음 (로그인 필요)
    Unauthenticated,
    /// 로그인했지만 역할이 부족함
    Forbidden,
}

/// 인가 평가 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

/// 경로 접두사 하나에 대한 요구 사항
#[derive(Debug, Clone, Copy)]
enum Requirement {
    /// 역할 무관, 인증만 요구
    Authenticated,
    /// 나열된 역할 중 하나 요구 (ANY)
    AnyRole(&'static [UserRole]),
}

/// 경로 접두사 인가 규칙 한 줄
#[derive(Debug, Clone, Copy)]
struct PathRule {
    prefix: &'static str,
    requirement: Requirement,
}

impl PathRule {
    /// 접두사 매칭: 정확히 일치하거나 `{prefix}/` 아래 경로여야 합니다.
    ///
    /// `/user` 규칙이 `/userdata`에 걸리지 않게 경계를 봅니다.
    fn matches(&self, path: &str) -> bool {
        path == self.prefix
            || (path.len() > self.prefix.len()
                && path.starts_with(self.prefix)
                && path.as_bytes()[self.prefix.len()] == b'/')
    }
}

/// 순서 있는 경로 규칙 목록
///
/// 모든 요청은 세션 미들웨어에서 이 정책을 한 번 통과합니다.
#[derive(Debug)]
pub struct AuthorizationPolicy {
    rules: Vec<PathRule>,
}

static STANDARD_POLICY: Lazy<AuthorizationPolicy> = Lazy::new(|| AuthorizationPolicy {
    // 구체적인 접두사부터. 첫 매칭 규칙이 승리한다.
    rules: vec![
        PathRule {
            prefix: "/admin",
            requirement: Requirement::AnyRole(&[UserRole::Admin]),
        },
        PathRule {
            prefix: "/manager",
            requirement: Requirement::AnyRole(&[UserRole::Admin, UserRole::Manager]),
        },
        PathRule {
            prefix: "/user",
            requirement: Requirement::Authenticated,
        },
    ],
});

impl AuthorizationPolicy {
    /// 표준 게이트웨이 정책
    ///
    /// `/admin/**` → ADMIN, `/manager/**` → ADMIN|MANAGER,
    /// `/user/**` → 인증만, 나머지 → 전부 허용.
    pub fn standard() -> &'static AuthorizationPolicy {
        &STANDARD_POLICY
    }

    /// 경로 하나를 평가합니다.
    ///
    /// 첫 매칭 규칙만 적용됩니다. 규칙이 없는 경로는 허용이며,
    /// 핸들러 수준의 [`RequiredRole`] 규칙은 여기와 별개로 또 평가됩니다.
    pub fn authorize(&self, path: &str, principal: Option<&SessionPrincipal>) -> Access {
        for rule in &self.rules {
            if !rule.matches(path) {
                continue;
            }

            return match (&rule.requirement, principal) {
                (_, None) => Access::Deny(DenyReason::Unauthenticated),
                (Requirement::Authenticated, Some(_)) => Access::Allow,
                (Requirement::AnyRole(allowed), Some(p)) => {
                    if p.has_any_role(allowed) {
                        Access::Allow
                    } else {
                        Access::Deny(DenyReason::Forbidden)
                    }
                }
            };
        }

        Access::Allow
    }
}

/// 핸들러 수준 허용 역할 집합 (메서드 규칙)
///
/// `/info`(ADMIN), `/data`(MANAGER|ADMIN)처럼 경로 규칙과 무관하게
/// 특정 핸들러에만 붙는 규칙입니다. ANY 의미론: 사용자의 역할이
/// 집합의 어느 원소와도 겹치지 않을 때만 거부합니다.
#[derive(Debug, Clone)]
pub struct RequiredRole {
    allowed: Vec<UserRole>,
}

impl RequiredRole {
    pub fn any_of(allowed: &[UserRole]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    pub fn allowed(&self) -> &[UserRole] {
        &self.allowed
    }

    /// 프린시펄 하나를 평가합니다.
    pub fn check(&self, principal: Option<&SessionPrincipal>) -> Access {
        match principal {
            None => Access::Deny(DenyReason::Unauthenticated),
            Some(p) if p.has_any_role(&self.allowed) => Access::Allow,
            Some(_) => Access::Deny(DenyReason::Forbidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::User;
    use mongodb::bson::oid::ObjectId;

    fn principal(role: UserRole) -> SessionPrincipal {
        let mut user = User::new_local("tester".to_string(), "$2b$04$hash".to_string(), None);
        user.id = Some(ObjectId::new());
        user.role = role;
        SessionPrincipal::from_local(user)
    }

    #[test]
    fn test_anonymous_is_denied_on_gated_prefixes() {
        let policy = AuthorizationPolicy::standard();

        for path in ["/user", "/manager", "/admin", "/user/profile", "/admin/x/y"] {
            assert_eq!(
                policy.authorize(path, None),
                Access::Deny(DenyReason::Unauthenticated),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_anonymous_is_allowed_on_public_paths() {
        let policy = AuthorizationPolicy::standard();

        for path in ["/", "/loginForm", "/joinForm", "/health", "/login"] {
            assert_eq!(policy.authorize(path, None), Access::Allow, "path: {path}");
        }
    }

    #[test]
    fn test_plain_user_reaches_user_pages_only() {
        let policy = AuthorizationPolicy::standard();
        let p = principal(UserRole::User);

        assert_eq!(policy.authorize("/user", Some(&p)), Access::Allow);
        assert_eq!(
            policy.authorize("/manager", Some(&p)),
            Access::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            policy.authorize("/admin", Some(&p)),
            Access::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_manager_reaches_manager_but_not_admin() {
        let policy = AuthorizationPolicy::standard();
        let p = principal(UserRole::Manager);

        assert_eq!(policy.authorize("/user", Some(&p)), Access::Allow);
        assert_eq!(policy.authorize("/manager", Some(&p)), Access::Allow);
        assert_eq!(policy.authorize("/manager/reports", Some(&p)), Access::Allow);
        assert_eq!(
            policy.authorize("/admin", Some(&p)),
            Access::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_admin_reaches_everything() {
        let policy = AuthorizationPolicy::standard();
        let p = principal(UserRole::Admin);

        for path in ["/user", "/manager", "/admin", "/admin/settings"] {
            assert_eq!(policy.authorize(path, Some(&p)), Access::Allow, "path: {path}");
        }
    }

    #[test]
    fn test_prefix_match_respects_segment_boundary() {
        let policy = AuthorizationPolicy::standard();

        // /userdata는 /user 규칙의 대상이 아니다
        assert_eq!(policy.authorize("/userdata", None), Access::Allow);
        assert_eq!(policy.authorize("/administrator", None), Access::Allow);
    }

    #[test]
    fn test_required_role_any_semantics() {
        let rule = RequiredRole::any_of(&[UserRole::Manager, UserRole::Admin]);

        assert_eq!(rule.check(None), Access::Deny(DenyReason::Unauthenticated));
        assert_eq!(
            rule.check(Some(&principal(UserRole::User))),
            Access::Deny(DenyReason::Forbidden)
        );
        assert_eq!(rule.check(Some(&principal(UserRole::Manager))), Access::Allow);
        assert_eq!(rule.check(Some(&principal(UserRole::Admin))), Access::Allow);
    }

    #[test]
    fn test_admin_only_rule_rejects_manager() {
        let rule = RequiredRole::any_of(&[UserRole::Admin]);

        assert_eq!(
            rule.check(Some(&principal(UserRole::Manager))),
            Access::Deny(DenyReason::Forbidden)
        );
        assert_eq!(rule.check(Some(&principal(UserRole::Admin))), Access::Allow);
    }
}
