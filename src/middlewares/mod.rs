//! 미들웨어 모듈
//!
//! - [`session_middleware`] - 전역: 세션 쿠키 → 프린시펄 복원 → 경로 정책 평가
//! - [`require_roles`] - 스코프: 특정 핸들러에 붙는 허용 역할 집합 검사

pub mod require_roles;
pub mod session_inner;
pub mod session_middleware;

pub use require_roles::RequireRoles;
pub use session_middleware::SessionMiddleware;
