//! 서비스 계층 모듈
//!
//! 비즈니스 로직을 담당합니다. 서비스는 구체 리포지토리가 아니라
//! 트레이트([`crate::repositories::users::UserStore`])에 의존하며,
//! `main`에서 명시적으로 조립됩니다.

pub mod auth;
pub mod users;
