//! HTTP 핸들러 모듈
//!
//! - [`auth`] - 가입/로그인/로그아웃, 소셜 로그인 시작과 콜백
//! - [`pages`] - 공개/보호 페이지 엔드포인트 (본문은 JSON)

pub mod auth;
pub mod pages;
