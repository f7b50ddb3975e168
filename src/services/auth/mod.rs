//! 인증 서비스 모듈
//!
//! - [`reconciler`] - OAuth 프로필 → 로컬 계정 find-or-create
//! - [`oauth_login_service`] - 프로바이더별 로그인 URL, 토큰 교환, 프로필 조회
//! - [`session_service`] - Redis 기반 세션 발급/복원/파기

pub mod oauth_login_service;
pub mod reconciler;
pub mod session_service;

pub use oauth_login_service::OAuthLoginService;
pub use reconciler::IdentityReconciler;
pub use session_service::SessionService;
