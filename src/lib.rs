//! # 인증 게이트웨이 백엔드 라이브러리
//!
//! 로컬 아이디/비밀번호 로그인과 OAuth2 소셜 로그인(Google, Facebook,
//! Naver)을 하나의 세션 기반 인가 모델로 통합하는 데모 게이트웨이입니다.
//!
//! ## 핵심 구성
//!
//! - **프로필 어댑터** ([`domain::models::oauth`]) - 프로바이더별 원시
//!   프로필을 하나의 정규화 프로필로 변환
//! - **신원 조정** ([`services::auth::reconciler`]) - 첫 소셜 로그인 시
//!   로컬 계정 자동 생성 (유니크 제약 기반 find-or-create)
//! - **세션 프린시펄** ([`domain::models::auth`]) - 로그인 경로와 무관한
//!   단일 인증 주체 표현과 경로/메서드 인가 정책
//! - **미들웨어** ([`middlewares`]) - 세션 복원과 정책 집행
//!
//! ## 계층 구조
//!
//! ```text
//! handlers / middlewares  (HTTP)
//!        │
//! services                (비즈니스 로직)
//!        │
//! repositories            (UserStore 트레이트 / MongoDB)
//!        │
//! db / caching            (MongoDB, Redis)
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
