//! # Configuration Module
//!
//! 게이트웨이의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 저장소, 비밀번호 해싱 관련 설정
//! - [`auth_config`] - 인증 프로바이더, OAuth, 세션 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보(클라이언트 시크릿, state 비밀키)는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전하며, 누락 시 경고 로그 출력
//! - 설정값 파싱 오류는 기본값으로 대체

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
