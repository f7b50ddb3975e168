//! 인증/인가 도메인 모델 모듈
//!
//! 세션에 저장되는 프린시펄([`principal`])과, 경로/메서드 인가 규칙을
//! 평가하는 정책([`authorization`])을 제공합니다.

pub mod authorization;
pub mod principal;

pub use authorization::{Access, AuthorizationPolicy, DenyReason, RequiredRole};
pub use principal::{OptionalPrincipal, SessionPrincipal};
