//! 도메인 모델 모듈
//!
//! 영속되지 않는 도메인 객체들을 정의합니다:
//! OAuth 프로바이더 프로필 정규화([`oauth`]), 세션 프린시펄과
//! 인가 정책([`auth`]). 둘 다 요청 수명 또는 세션 수명만 가집니다.

pub mod auth;
pub mod oauth;
